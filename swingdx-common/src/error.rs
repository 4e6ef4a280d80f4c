//! Common error types for swingdx
//!
//! Scoring operations never fail; these errors only arise at the edges
//! (configuration, baseline tables, JSON input).

use thiserror::Error;

/// Common result type for swingdx operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across swingdx crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error (wraps toml::de::Error)
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parse error (wraps serde_json::Error)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid caller-supplied input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
