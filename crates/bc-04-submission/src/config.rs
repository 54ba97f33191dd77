//! # Orchestrator Configuration

use crate::domain::DEFAULT_MAX_EVIDENCE_BYTES;

/// Submission Orchestrator configuration.
#[derive(Debug, Clone)]
pub struct SubmissionConfig {
    /// Largest accepted evidence blob, in bytes.
    pub max_evidence_bytes: usize,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            max_evidence_bytes: DEFAULT_MAX_EVIDENCE_BYTES,
        }
    }
}

impl SubmissionConfig {
    /// Small limit so size checks are cheap to exercise.
    pub fn for_testing() -> Self {
        Self {
            max_evidence_bytes: 64 * 1024,
        }
    }
}
