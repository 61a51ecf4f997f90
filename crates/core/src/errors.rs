//! Core error types for Fedisync.
//!
//! This module defines database- and transport-agnostic error types. Storage
//! errors (Diesel, SQLite, r2d2) are converted to [`DatabaseError`] by the
//! storage layer; HTTP errors are converted to [`NetworkError`] by the client.

use serde::Deserialize;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type returned by actions, repositories and the API client.
#[derive(Error, Debug)]
pub enum Error {
    /// The remote call failed at the transport or HTTP layer.
    #[error("Network request failed: {0}")]
    NetworkFailure(#[from] NetworkError),

    /// The caller supplied an argument the action cannot accept.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The server refused the request with an explanatory message.
    #[error("{0}")]
    ServerRejected(String),

    /// A local cache operation failed.
    #[error("Storage operation failed: {0}")]
    StorageFailure(#[from] DatabaseError),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Failure reported by the remote API client.
///
/// `status` is `None` when no HTTP response was received (DNS, TLS, timeout).
/// `body` keeps the raw response body so callers can extract the server's
/// own error message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct NetworkError {
    pub status: Option<u16>,
    pub message: String,
    pub body: Option<String>,
}

#[derive(Deserialize)]
struct ServerErrorBody {
    error: Option<String>,
}

impl NetworkError {
    /// A failure without any HTTP response.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            body: None,
        }
    }

    /// A non-success HTTP response.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = match Self::extract_server_message(&body) {
            Some(msg) => format!("HTTP {}: {}", status, msg),
            None => format!("HTTP {}", status),
        };
        Self {
            status: Some(status),
            message,
            body: Some(body),
        }
    }

    /// The `error` field of a Mastodon-style JSON error body, if present.
    pub fn server_message(&self) -> Option<String> {
        self.body.as_deref().and_then(Self::extract_server_message)
    }

    fn extract_server_message(body: &str) -> Option<String> {
        serde_json::from_str::<ServerErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|msg| !msg.trim().is_empty())
    }
}

/// Database-agnostic error type for storage operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    #[error("Database query failed: {0}")]
    QueryFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::StorageFailure(DatabaseError::Internal(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
