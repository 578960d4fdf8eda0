//! Error types for the timkiem library.
//!
//! All errors are represented by the [`TimkiemError`] enum. Store failures
//! are never retried or recovered in this layer; they carry whatever message
//! the store adapter produced and propagate unchanged to the caller.

use anyhow;
use thiserror::Error;

/// The main error type for timkiem operations.
#[derive(Error, Debug)]
pub enum TimkiemError {
    /// Invalid caller input (e.g. a fuzzy search over an empty field list).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Query construction or evaluation errors.
    #[error("Query error: {0}")]
    Query(String),

    /// Errors raised by the backing document store.
    #[error("Store error: {0}")]
    Store(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with TimkiemError.
pub type Result<T> = std::result::Result<T, TimkiemError>;

impl TimkiemError {
    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        TimkiemError::InvalidInput(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        TimkiemError::Query(msg.into())
    }

    /// Create a new store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        TimkiemError::Store(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TimkiemError::Other(msg.into())
    }
}
