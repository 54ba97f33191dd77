//! # Domain Errors

use thiserror::Error;

/// Result store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No result is stored under this identifier.
    #[error("Analysis result not found: {0}")]
    NotFound(String),

    /// Stored bytes do not decode or no longer hash to their identifier.
    #[error("Stored result {id} is corrupted: {reason}")]
    Corrupted {
        /// Identifier that was looked up
        id: String,
        /// What failed
        reason: String,
    },

    /// Underlying medium failed (disk full, permissions, ...).
    #[error("Result store I/O error: {0}")]
    Io(String),
}

impl StoreError {
    /// True for the lookup-miss case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}
