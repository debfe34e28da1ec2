//! Notation and position-string error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("Invalid square: {0}")]
    InvalidSquare(String),

    #[error("Invalid move notation: {0}")]
    InvalidNotation(String),

    #[error("Invalid position string '{fen}': {reason}")]
    InvalidPosition { fen: String, reason: &'static str },
}

impl NotationError {
    pub(crate) fn position(fen: &str, reason: &'static str) -> Self {
        NotationError::InvalidPosition {
            fen: fen.to_string(),
            reason,
        }
    }
}
