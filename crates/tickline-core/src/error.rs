//! Error types for tickline-core

use thiserror::Error;

/// Result type alias using tickline-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tickline-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server rejected the call (non-2xx or business failure payload)
    #[error("{0}")]
    Api(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local session storage error
    #[error("Session storage error: {0}")]
    Storage(String),
}
