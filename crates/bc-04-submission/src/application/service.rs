//! # Submission Service
//!
//! Sequences validation, analysis, storage and the ledger steps.

use std::sync::Arc;

use async_trait::async_trait;
use bc_03_ledger::{ProjectRef, ProjectRegistration};
use bc_telemetry::{
    metric_inc, HistogramTimer, ANALYSIS_FALLBACKS, LEDGER_CALLS, RESULTS_STORED, SUBMISSIONS,
    SUBMISSION_DURATION,
};
use shared_types::{AnalysisResult, ContentId, ProjectId};
use tracing::{error, info, warn};

use crate::config::SubmissionConfig;
use crate::domain::{
    credit_gate_open, LedgerOutcome, RawSubmission, SubmissionError, SubmissionOutcome,
    SubmissionRequest, SubmissionState, SubmissionTracker,
};
use crate::ports::{AnalysisApi, LedgerApi, ResultStore, SubmissionApi};

/// Submission Service - the Submission Orchestrator.
///
/// Holds no per-submission state; concurrent submissions share only the
/// store and the ledger client.
pub struct SubmissionService {
    analysis: Arc<dyn AnalysisApi>,
    store: Arc<dyn ResultStore>,
    ledger: Arc<dyn LedgerApi>,
    config: SubmissionConfig,
}

impl SubmissionService {
    pub fn new(
        analysis: Arc<dyn AnalysisApi>,
        store: Arc<dyn ResultStore>,
        ledger: Arc<dyn LedgerApi>,
        config: SubmissionConfig,
    ) -> Self {
        Self {
            analysis,
            store,
            ledger,
            config,
        }
    }

    pub fn config(&self) -> &SubmissionConfig {
        &self.config
    }

    async fn run(&self, submission: RawSubmission) -> Result<SubmissionOutcome, SubmissionError> {
        let mut tracker = SubmissionTracker::new();

        // Validating
        let request = match submission.validate(self.config.max_evidence_bytes) {
            Ok(request) => request,
            Err(e) => {
                tracker.advance(SubmissionState::Aborted);
                info!("[bc-04] Submission rejected: {}", e);
                return Err(e.into());
            }
        };
        let metadata = request.metadata();
        let evidence_ref = request.evidence().digest();
        info!(
            evidence_ref = %evidence_ref,
            "[bc-04] 📋 Submission accepted: {:?} ({} ha {})",
            metadata.name,
            metadata.area_hectares,
            metadata.ecosystem_type
        );

        // Analyzing
        tracker.advance(SubmissionState::Analyzing);
        let analysis = self.analysis.analyze(request.evidence(), metadata).await;
        if let Some(degradation) = &analysis.degradation {
            metric_inc!(ANALYSIS_FALLBACKS, &[degradation.reason()]);
        }

        // Storing
        tracker.advance(SubmissionState::Storing);
        let result_id = match self.store.put(&analysis.result).await {
            Ok(id) => id,
            Err(e) => {
                tracker.advance(SubmissionState::Aborted);
                error!(result_id = %analysis.result.id, "[bc-04] ❌ Failed to store analysis result: {}", e);
                return Err(SubmissionError::Persistence(e));
            }
        };
        metric_inc!(RESULTS_STORED);

        let (project_id, ledger) = self
            .anchor(&mut tracker, &request, &analysis.result, &result_id)
            .await;
        tracker.advance(SubmissionState::Done);

        let outcome = SubmissionOutcome {
            success: true,
            project_id,
            ledger,
            credits_estimate: analysis.result.content.carbon_credits,
            analysis: analysis.result,
            evidence_ref,
            degraded: analysis.degradation,
        };

        if outcome.degraded.is_some() || outcome.ledger.failure.is_some() {
            warn!(
                project_id = %outcome.project_id,
                result_id = %result_id,
                "[bc-04] ⚠️ Degraded submission: ledger={} analysis_fallback={}",
                outcome.ledger.outcome.as_str(),
                outcome.degraded.is_some()
            );
        } else {
            info!(
                project_id = %outcome.project_id,
                result_id = %result_id,
                "[bc-04] ✅ Submission complete: ledger={}",
                outcome.ledger.outcome.as_str()
            );
        }
        Ok(outcome)
    }

    /// Ledger steps. Never fails; failures are reported in the outcome.
    async fn anchor(
        &self,
        tracker: &mut SubmissionTracker,
        request: &SubmissionRequest,
        result: &AnalysisResult,
        result_id: &ContentId,
    ) -> (ProjectId, LedgerOutcome) {
        if !self.ledger.is_enabled() {
            tracker.advance(SubmissionState::LedgerDisabled);
            tracker.advance(SubmissionState::Idle);
            return (ProjectId::new_local(), LedgerOutcome::skipped());
        }

        // Registering
        tracker.advance(SubmissionState::Registering);
        let metadata = request.metadata();
        let registration = ProjectRegistration {
            name: metadata.name.clone(),
            location: metadata.location.clone(),
            area: metadata.whole_hectares(),
            ecosystem_type: metadata.ecosystem_type.as_str().to_string(),
            evidence_ref: request.evidence().digest().to_string(),
        };
        let project = match self.ledger.register_project(&registration).await {
            Ok(project) => {
                metric_inc!(LEDGER_CALLS, &["register", "ok"]);
                project
            }
            Err(e) => {
                metric_inc!(LEDGER_CALLS, &["register", e.kind().as_str()]);
                warn!("[bc-04] Ledger registration failed, continuing off-ledger: {}", e);
                tracker.advance(SubmissionState::Idle);
                return (ProjectId::new_local(), LedgerOutcome::registration_failed(&e));
            }
        };
        let project_id = ProjectId::Ledger(project.project_id);

        let content = &result.content;
        if !credit_gate_open(content.confidence, content.carbon_credits) {
            info!(
                project_id = %project_id,
                "[bc-04] Credit gate closed (confidence {:.2}, {} credits)",
                content.confidence,
                content.carbon_credits
            );
            tracker.advance(SubmissionState::Idle);
            return (project_id, LedgerOutcome::registered(&project));
        }

        // IssuingCredits
        tracker.advance(SubmissionState::IssuingCredits);
        (project_id, self.issue(&project, content.carbon_credits, result_id).await)
    }

    async fn issue(&self, project: &ProjectRef, quantity: u64, result_id: &ContentId) -> LedgerOutcome {
        match self.ledger.issue_credits(project, quantity, result_id).await {
            Ok(tx) => {
                metric_inc!(LEDGER_CALLS, &["issue", "ok"]);
                info!(
                    project_id = project.project_id,
                    tx_hash = %tx.tx_hash,
                    "[bc-04] 🌱 Issued {} credits",
                    quantity
                );
                LedgerOutcome::credits_issued(project, tx, quantity)
            }
            Err(e) => {
                metric_inc!(LEDGER_CALLS, &["issue", e.kind().as_str()]);
                warn!(project_id = project.project_id, "[bc-04] Credit issuance failed: {}", e);
                LedgerOutcome::credits_failed(project, &e)
            }
        }
    }
}

#[async_trait]
impl SubmissionApi for SubmissionService {
    async fn submit(&self, submission: RawSubmission) -> Result<SubmissionOutcome, SubmissionError> {
        let _timer = HistogramTimer::new(&SUBMISSION_DURATION);
        let result = self.run(submission).await;
        let label = match &result {
            Ok(outcome) => outcome.ledger.outcome.as_str(),
            Err(e) => e.label(),
        };
        metric_inc!(SUBMISSIONS, &[label]);
        result
    }
}
