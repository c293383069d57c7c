pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_core::PracticeSettings;

use crate::config::Config;
use crate::services::sessions::{spawn_session_sweeper, Sessions};
use crate::services::store::{MemoryStore, SeedData};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub sessions: Arc<Sessions>,
    /// Defaults for sessions created without explicit settings
    pub practice: PracticeSettings,
}

impl AppState {
    pub fn new(store: MemoryStore, practice: PracticeSettings) -> Self {
        Self {
            store: Arc::new(store),
            sessions: Arc::new(Sessions::new()),
            practice,
        }
    }
}

/// Build the full router over `state`
pub fn router(state: AppState) -> Router {
    let catalog_routes = Router::new()
        .route("/api/books", get(routes::catalog::books))
        .route("/api/books/:book/chapters", get(routes::catalog::chapters))
        .route("/api/books/:book/words", get(routes::catalog::book_words))
        .route("/api/words/by-chapters", post(routes::catalog::chapter_words));

    let memorize_routes = Router::new()
        .route("/api/memorize", post(routes::memorize::create))
        .route(
            "/api/memorize/:id",
            get(routes::memorize::get).delete(routes::memorize::close),
        )
        .route("/api/memorize/:id/navigate", post(routes::memorize::navigate))
        .route("/api/memorize/:id/key", post(routes::memorize::key))
        .route("/api/memorize/:id/definition", post(routes::memorize::definition))
        .route("/api/memorize/:id/reset", post(routes::memorize::reset))
        .route("/api/memorize/:id/filter", post(routes::memorize::filter))
        .route("/api/memorize/:id/shuffle", post(routes::memorize::shuffle))
        .route("/api/memorize/:id/autoplay", post(routes::memorize::autoplay))
        .route(
            "/api/memorize/:id/pronunciation",
            post(routes::memorize::pronunciation),
        )
        .route(
            "/api/memorize/:id/words/:word_id/reviewed",
            post(routes::memorize::reviewed),
        )
        .route(
            "/api/memorize/:id/words/:word_id/memorized",
            post(routes::memorize::memorized),
        )
        .route("/api/memorize/:id/utterances", get(routes::memorize::utterances));

    let quiz_routes = Router::new()
        .route("/api/quiz", post(routes::quiz::create))
        .route(
            "/api/quiz/:id",
            get(routes::quiz::get).delete(routes::quiz::close),
        )
        .route("/api/quiz/:id/start", post(routes::quiz::start))
        .route("/api/quiz/:id/answer", post(routes::quiz::answer))
        .route("/api/quiz/:id/summary", get(routes::quiz::summary));

    Router::new()
        .route("/health", get(health_check))
        .merge(catalog_routes)
        .merge(memorize_routes)
        .merge(quiz_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store = match &config.data_path {
        Some(path) => {
            tracing::info!("Loading vocabulary from {}", path.display());
            MemoryStore::from_json_file(path)?
        }
        None => {
            tracing::warn!("VOCAB_DATA not set, starting with an empty vocabulary");
            MemoryStore::new(SeedData::default())
        }
    };

    let state = AppState::new(store, config.practice.clone());
    let sweeper = spawn_session_sweeper(state.sessions.clone(), config.session_idle);
    let app = router(state);

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let served = axum::serve(listener, app).await;
    sweeper.abort();
    served?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
