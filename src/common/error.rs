//! Error handling module
//!
//! This module defines the error types and result type aliases used in the application.

use std::io;
use thiserror::Error;

/// Cert Sentry error type
#[derive(Error, Debug)]
pub enum SentryError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// HTTP client error (browser endpoint discovery)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// WebSocket transport error (DevTools session)
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Browser endpoint error
    #[error("Browser endpoint error: {0}")]
    Browser(String),

    /// Security-state inspection error
    #[error("Inspection error: {0}")]
    Inspect(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias
///
/// This is a `Result` type alias that uses our custom `SentryError`.
pub type Result<T> = std::result::Result<T, SentryError>;
