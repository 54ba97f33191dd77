//! # Submission Policy
//!
//! Constants that decide what the orchestrator does, kept in one place.
//!
//! | Constant | Value | Meaning |
//! |----------|-------|---------|
//! | `CONFIDENCE_THRESHOLD` | 0.7 | Credits are issued only when confidence is strictly greater |
//! | `DEFAULT_MAX_EVIDENCE_BYTES` | 10 MiB | Evidence size limit |
//! | `LOCAL_PROJECT_ID_PREFIX` | `local-` | Namespace of project ids not assigned by the ledger |
//!
//! Fallback base rates live with the analysis client
//! (`bc_02_analysis::ECOSYSTEM_BASE_RATES`).

pub use shared_types::LOCAL_PROJECT_ID_PREFIX;

/// Confidence the analysis must exceed before credits are issued.
pub const CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Default evidence size limit (10 MiB).
pub const DEFAULT_MAX_EVIDENCE_BYTES: usize = 10 * 1024 * 1024;

/// Whether a registered project gets credits issued for this analysis.
pub fn credit_gate_open(confidence: f64, carbon_credits: u64) -> bool {
    carbon_credits > 0 && confidence > CONFIDENCE_THRESHOLD
}
