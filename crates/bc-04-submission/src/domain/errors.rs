//! # Domain Errors
//!
//! Only two kinds of failure abort a submission: bad input and a failed
//! store write. Everything else degrades the outcome.

use bc_01_result_store::StoreError;
use thiserror::Error;

/// Submission input rejected before any external call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Image file is required")]
    MissingEvidence,

    #[error("All fields are required (missing {0})")]
    MissingField(&'static str),

    #[error("Area must be a positive number of hectares, got {0:?}")]
    InvalidArea(String),

    #[error("Unknown ecosystem type {0:?} (expected mangrove, seagrass or saltmarsh)")]
    UnknownEcosystem(String),

    #[error("Evidence must be an image, got content type {0:?}")]
    NotAnImage(String),

    #[error("File too large. Maximum size is {max} bytes (got {size})")]
    EvidenceTooLarge { size: usize, max: usize },
}

/// Submission aborted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Bad request; never retried and never reaches external systems.
    #[error("Invalid submission: {0}")]
    ClientInput(#[from] ValidationError),

    /// The analysis result could not be persisted.
    #[error("Failed to persist analysis result: {0}")]
    Persistence(StoreError),
}

impl SubmissionError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            SubmissionError::ClientInput(_) => 400,
            SubmissionError::Persistence(_) => 500,
        }
    }

    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionError::ClientInput(_) => "rejected-input",
            SubmissionError::Persistence(_) => "persistence-error",
        }
    }
}
