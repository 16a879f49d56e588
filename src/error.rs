use thiserror::Error;

use crate::core::ValidationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
