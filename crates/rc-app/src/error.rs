//! Error types for the rc-app service layer.

use rc_cycle::{CycleError, SizingError};
use rc_fluids::FluidError;
use std::path::PathBuf;

/// Application error shared by every front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Dataset {path}: {message}")]
    Dataset { path: PathBuf, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Fluid(#[from] FluidError),

    #[error(transparent)]
    Cycle(#[from] CycleError),

    #[error(transparent)]
    Sizing(#[from] SizingError),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rc-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialize(err.to_string())
    }
}
