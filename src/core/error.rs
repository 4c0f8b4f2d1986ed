//! Error type shared by the library and the CLI.

use thiserror::Error;

/// Errors surfaced by the library.
///
/// The extraction pipeline itself never fails; these variants cover the
/// boundaries around it (configuration, input payloads, page context).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, AppError>;
