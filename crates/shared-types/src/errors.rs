//! # Error Types
//!
//! Parse errors for the shared domain vocabulary.

use thiserror::Error;

/// Errors raised while parsing shared domain values from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Ecosystem type is not one of the recognized values.
    #[error("Unknown ecosystem type: {0} (expected mangrove, seagrass or saltmarsh)")]
    UnknownEcosystem(String),

    /// Vegetation health label is not recognized.
    #[error("Unknown vegetation health label: {0}")]
    UnknownHealthLabel(String),

    /// Content identifier is not 64 lowercase hex characters.
    #[error("Invalid content identifier: {0}")]
    InvalidContentId(String),

    /// Project identifier is neither a ledger id nor a local id.
    #[error("Invalid project identifier: {0}")]
    InvalidProjectId(String),
}
