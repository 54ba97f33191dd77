//! # Inbound Ports
//!
//! API exposed to the HTTP gateway.

use async_trait::async_trait;

use crate::domain::{RawSubmission, SubmissionError, SubmissionOutcome};

/// Submission Orchestrator API - inbound port.
#[async_trait]
pub trait SubmissionApi: Send + Sync {
    /// Run one submission through the pipeline.
    ///
    /// Returns an outcome whenever the input is valid and the analysis
    /// result was stored, whatever happened on the ledger. Dropping the
    /// future cancels in-flight scorer and ledger calls; a completed store
    /// write is kept.
    async fn submit(&self, submission: RawSubmission) -> Result<SubmissionOutcome, SubmissionError>;
}
