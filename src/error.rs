//! Error types for the Serenity client
//!
//! This module defines all error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Serenity client operations
///
/// Covers configuration loading, HTTP calls against the chat server,
/// decoding of server payloads, and interactive command handling.
#[derive(Error, Debug)]
pub enum SerenityError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The server answered with a non-success status
    #[error("Server returned {status} for {endpoint}")]
    Api {
        /// HTTP status code returned by the server
        status: u16,
        /// Endpoint path that was called
        endpoint: String,
    },

    /// The request never produced a response (connect, timeout, ...)
    #[error("Transport error calling {endpoint}: {message}")]
    Transport {
        /// Endpoint path that was called
        endpoint: String,
        /// Underlying failure description
        message: String,
    },

    /// The response body could not be decoded into the expected shape
    #[error("Unexpected payload from {endpoint}: {message}")]
    Decode {
        /// Endpoint path that was called
        endpoint: String,
        /// Decoder failure description
        message: String,
    },

    /// No chat record with the given id is loaded
    #[error("No chat with id {0} in history")]
    NotFound(i64),

    /// A destructive action was declined at the confirmation prompt
    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// Interactive command errors
    #[error("Command error: {0}")]
    Command(String),

    /// Line editor failures
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Config file is not valid YAML for [`crate::Config`]
    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Serenity client operations
///
/// Uses `anyhow::Error` so callers can attach context while still being
/// able to downcast to [`SerenityError`].
pub type Result<T> = anyhow::Result<T>;
