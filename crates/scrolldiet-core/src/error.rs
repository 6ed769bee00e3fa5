//! Core error types for scrolldiet-core.
//!
//! This module defines the error hierarchy using thiserror. Only a few of
//! these ever reach the user: a malformed budget record or a failing content
//! service is logged and absorbed where it happens.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for scrolldiet-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Content service errors
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    /// No budget has been set up yet
    #[error("No daily budget configured yet. Run `scrolldiet setup` first.")]
    NotInitialized,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Could not determine or create the data directory
    #[error("Data directory unavailable: {0}")]
    DataDir(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A daily limit of zero would lock the budget forever
    #[error("Daily limit must be greater than zero")]
    ZeroLimit,
}

/// Errors from the generated-content service.
#[derive(Error, Debug)]
pub enum ContentError {
    /// No API key in the environment or keyring
    #[error("No content API key configured")]
    MissingCredentials,

    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the service
    #[error("Content service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The configured endpoint is not a valid URL
    #[error("Invalid content endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The response did not contain the expected JSON payload
    #[error("Malformed content response: {0}")]
    Malformed(String),

    /// Keyring access failed
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
