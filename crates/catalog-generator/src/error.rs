//! Generator error types

use notation_core::NotationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Override line {line}: {source}")]
    Override {
        line: usize,
        #[source]
        source: NotationError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GeneratorError {
    pub(crate) fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        GeneratorError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
