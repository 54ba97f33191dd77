//! # Submission Outcome
//!
//! The response to an accepted submission. It always carries the analysis
//! result; the ledger part says what happened on the ledger.

use bc_02_analysis::AnalysisDegradation;
use bc_03_ledger::{LedgerError, LedgerFailureKind, ProjectRef, TxRef};
use serde::Serialize;
use shared_types::{AnalysisResult, ContentId, ProjectId};

/// What happened on the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LedgerOutcomeKind {
    /// Registered; credit gate closed.
    Registered,
    RegistrationFailed,
    CreditsIssued,
    /// Registered, but issuing credits failed.
    CreditsFailed,
    SkippedLedgerDisabled,
}

impl LedgerOutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerOutcomeKind::Registered => "registered",
            LedgerOutcomeKind::RegistrationFailed => "registration-failed",
            LedgerOutcomeKind::CreditsIssued => "credits-issued",
            LedgerOutcomeKind::CreditsFailed => "credits-failed",
            LedgerOutcomeKind::SkippedLedgerDisabled => "skipped-ledger-disabled",
        }
    }
}

/// Ledger failure surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerFailure {
    pub kind: LedgerFailureKind,
    pub detail: String,
}

impl From<&LedgerError> for LedgerFailure {
    fn from(err: &LedgerError) -> Self {
        Self {
            kind: err.kind(),
            detail: err.to_string(),
        }
    }
}

/// Ledger part of a submission outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerOutcome {
    pub outcome: LedgerOutcomeKind,
    /// Ledger-assigned project id (registered only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_tx: Option<TxRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits_tx: Option<TxRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits_issued: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<LedgerFailure>,
}

impl LedgerOutcome {
    fn empty(outcome: LedgerOutcomeKind) -> Self {
        Self {
            outcome,
            project_id: None,
            registration_tx: None,
            credits_tx: None,
            credits_issued: None,
            failure: None,
        }
    }

    pub fn skipped() -> Self {
        Self::empty(LedgerOutcomeKind::SkippedLedgerDisabled)
    }

    pub fn registration_failed(err: &LedgerError) -> Self {
        Self {
            failure: Some(err.into()),
            ..Self::empty(LedgerOutcomeKind::RegistrationFailed)
        }
    }

    pub fn registered(project: &ProjectRef) -> Self {
        Self {
            project_id: Some(ProjectId::Ledger(project.project_id)),
            registration_tx: Some(project.tx),
            ..Self::empty(LedgerOutcomeKind::Registered)
        }
    }

    pub fn credits_issued(project: &ProjectRef, tx: TxRef, quantity: u64) -> Self {
        Self {
            outcome: LedgerOutcomeKind::CreditsIssued,
            credits_tx: Some(tx),
            credits_issued: Some(quantity),
            ..Self::registered(project)
        }
    }

    pub fn credits_failed(project: &ProjectRef, err: &LedgerError) -> Self {
        Self {
            outcome: LedgerOutcomeKind::CreditsFailed,
            failure: Some(err.into()),
            ..Self::registered(project)
        }
    }

    /// True when the project is on the ledger.
    pub fn is_registered(&self) -> bool {
        self.project_id.is_some()
    }
}

/// Response to an accepted submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    pub success: bool,
    /// Ledger-assigned id, or a `local-` id when the ledger was not used.
    pub project_id: ProjectId,
    pub ledger: LedgerOutcome,
    pub analysis: AnalysisResult,
    pub credits_estimate: u64,
    /// Hex SHA-256 of the evidence bytes.
    pub evidence_ref: ContentId,
    /// Why the analysis fell back, if it did.
    pub degraded: Option<AnalysisDegradation>,
}
