//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Core error: {0}")]
    Core(#[from] mcal_core::CoreError),

    #[error("REST error: {0}")]
    Rest(#[from] mcal_rest::RestError),

    #[error("Logging init error: {0}")]
    Logging(String),
}

pub type AppResult<T> = Result<T, AppError>;
