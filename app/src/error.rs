//! FILENAME: app/src/error.rs

use engine::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("Invalid key: '{0}'")]
    InvalidKey(String),

    #[error("Lock error: {0}")]
    Lock(String),

    #[error("Log file error: {0}")]
    LogFile(String),
}

impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}
