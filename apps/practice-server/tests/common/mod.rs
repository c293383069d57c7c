//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up the router over a seeded in-memory store
//! - Helper functions for creating sessions and quizzes

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};
use vocab_core::PracticeSettings;

use vocab_practice_server::services::store::MemoryStore;
use vocab_practice_server::{router, AppState};

/// Test context holding the store and router.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub state: AppState,
    app: Router,
}

impl TestContext {
    /// Router over the standard fixture vocabulary.
    pub fn new() -> Self {
        Self::with_settings(fixtures::quiet_settings())
    }

    pub fn with_settings(practice: PracticeSettings) -> Self {
        let state = AppState::new(MemoryStore::new(fixtures::seed_data()), practice);
        let store = state.store.clone();
        let app = router(state.clone());
        Self { store, state, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }
}

/// Create a memorize session over `selection` and return its id.
pub async fn create_memorize(server: &TestServer, selection: Value) -> String {
    let response = server
        .post("/api/memorize")
        .json(&json!({ "selection": selection }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    body["id"].as_str().unwrap().to_string()
}

/// Create a quiz over `selection` with `settings` and return its id.
pub async fn create_quiz(server: &TestServer, selection: Value, settings: Value) -> String {
    let response = server
        .post("/api/quiz")
        .json(&json!({ "selection": selection, "settings": settings }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    body["id"].as_str().unwrap().to_string()
}
