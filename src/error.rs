//! Error types for the loan intake bot

use thiserror::Error;

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, LendBotError>;

#[derive(Error, Debug)]
pub enum LendBotError {

    // =============================
    // Core Flow Errors
    // =============================

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("Lender search error: {0}")]
    SearchError(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
