//! Keyboard shortcuts for the flashcard view.

use serde::{Deserialize, Serialize};

use crate::types::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommand {
    Navigate(Direction),
    ToggleAutoplay,
}

/// Map a DOM-style key name to a command.
pub fn command_for_key(key: &str) -> Option<KeyCommand> {
    match key {
        "ArrowRight" | " " => Some(KeyCommand::Navigate(Direction::Next)),
        "ArrowLeft" => Some(KeyCommand::Navigate(Direction::Prev)),
        "p" | "P" => Some(KeyCommand::ToggleAutoplay),
        _ => None,
    }
}
