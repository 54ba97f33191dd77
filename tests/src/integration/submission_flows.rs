//! # Submission Flows
//!
//! Orchestrator (bc-04) over the file-backed store (bc-01), the analysis
//! client (bc-02) and the mock ledger (bc-03).
//!
//! ## Flows Tested:
//!
//! 1. **Durability**: the returned analysis is on disk, canonical, and
//!    survives reopening the store
//! 2. **Deduplication**: concurrent identical submissions share one result
//!    file while each one is still registered on the ledger
//! 3. **Ledger outage**: the caller still gets the analysis and a local id
//! 4. **Scorer subprocess**: real child processes, well-formed and failing

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use bc_01_result_store::{FileResultStore, ResultStore, ResultStoreConfig};
    use bc_02_analysis::{fallback_content, MockScorer, UnconfiguredScorer};
    use bc_03_ledger::{LedgerError, MockLedger};
    use bc_04_submission::{LedgerOutcomeKind, SubmissionApi};
    use shared_types::{AnalysisResult, AnalysisSource, EcosystemType};

    use crate::integration::fixtures::{
        orchestrator, png_evidence, sample_metadata, sample_submission,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    async fn file_store(dir: &tempfile::TempDir) -> Arc<FileResultStore> {
        let config = ResultStoreConfig::under_data_dir(dir.path());
        Arc::new(FileResultStore::open(&config).await.unwrap())
    }

    fn result_files(store: &FileResultStore) -> usize {
        std::fs::read_dir(store.directory())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".json"))
            .count()
    }

    // =============================================================================
    // DURABILITY
    // =============================================================================

    #[tokio::test]
    async fn test_outcome_analysis_is_persisted_canonically() {
        let dir = tempfile::tempdir().unwrap();
        let store = file_store(&dir).await;
        let service = orchestrator(
            Arc::new(MockScorer::well_formed(250, 0.88)),
            store.clone(),
            Arc::new(MockLedger::new()),
        );

        let outcome = service.submit(sample_submission("durable")).await.unwrap();

        let path = store
            .directory()
            .join(format!("{}.json", outcome.analysis.id));
        assert_eq!(std::fs::read(path).unwrap(), outcome.analysis.canonical_bytes());
        assert!(outcome.analysis.verify());
        assert_eq!(
            outcome.analysis.content.evidence_digest,
            outcome.evidence_ref
        );
    }

    #[tokio::test]
    async fn test_results_survive_store_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = {
            let service = orchestrator(
                Arc::new(UnconfiguredScorer),
                file_store(&dir).await,
                Arc::new(MockLedger::disabled()),
            );
            service.submit(sample_submission("reopen")).await.unwrap()
        };

        let reopened = file_store(&dir).await;
        let stored = reopened.get(&outcome.analysis.id).await.unwrap();
        assert_eq!(stored, outcome.analysis);
    }

    #[tokio::test]
    async fn test_fallback_results_read_back_intact() {
        let dir = tempfile::tempdir().unwrap();
        let store = file_store(&dir).await;
        let digest = png_evidence("roundtrip").digest();
        let ecosystems = [
            EcosystemType::Mangrove,
            EcosystemType::Seagrass,
            EcosystemType::Saltmarsh,
        ];

        for i in 0..600u64 {
            let metadata = sample_metadata(1.0 + i as f64 * 0.37, ecosystems[(i % 3) as usize]);
            let result = AnalysisResult::seal(fallback_content(&metadata, digest.clone(), i), i);

            let id = store.put(&result).await.unwrap();
            let stored = store.get(&id).await.unwrap();
            assert_eq!(stored, result, "result {} changed on disk", i);
        }
    }

    // =============================================================================
    // DEDUPLICATION
    // =============================================================================

    #[tokio::test]
    async fn test_concurrent_identical_submissions_share_one_result() {
        let dir = tempfile::tempdir().unwrap();
        let store = file_store(&dir).await;
        let ledger = Arc::new(MockLedger::new());
        let service = Arc::new(orchestrator(
            Arc::new(MockScorer::well_formed(120, 0.9)),
            store.clone(),
            ledger.clone(),
        ));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.submit(sample_submission("same")).await })
            })
            .collect();

        let mut result_ids = HashSet::new();
        let mut project_ids = HashSet::new();
        for handle in handles {
            let outcome = handle.await.unwrap().unwrap();
            result_ids.insert(outcome.analysis.id.clone());
            project_ids.insert(outcome.project_id.to_string());
        }

        assert_eq!(result_ids.len(), 1);
        assert_eq!(result_files(&store), 1);
        // The ledger is the only authority on project uniqueness.
        assert_eq!(ledger.register_calls(), 8);
        assert_eq!(project_ids.len(), 8);
    }

    // =============================================================================
    // LEDGER OUTAGE
    // =============================================================================

    #[tokio::test]
    async fn test_total_ledger_outage_still_returns_analysis() {
        let dir = tempfile::tempdir().unwrap();
        let store = file_store(&dir).await;
        let ledger = Arc::new(MockLedger::failing_registration(LedgerError::Network(
            "connection refused".to_string(),
        )));
        let service = orchestrator(
            Arc::new(MockScorer::well_formed(300, 0.95)),
            store.clone(),
            ledger.clone(),
        );

        let outcome = service.submit(sample_submission("outage")).await.unwrap();

        assert!(outcome.success);
        assert!(outcome.project_id.is_local());
        assert_eq!(outcome.ledger.outcome, LedgerOutcomeKind::RegistrationFailed);
        assert_eq!(ledger.issue_calls(), 0);
        assert!(store.contains(&outcome.analysis.id).await.unwrap());
    }

    // =============================================================================
    // SCORER SUBPROCESS
    // =============================================================================

    #[cfg(unix)]
    #[tokio::test]
    async fn test_subprocess_scorer_output_is_used() {
        use bc_02_analysis::{ScorerCommandConfig, SubprocessScorer};

        let output = r#"{"carbonCredits":90,"vegetationHealth":"moderate","confidence":0.8,"area_detected":12.1,"ndvi":0.41,"image_quality":"fair"}"#;
        let scorer = SubprocessScorer::new(ScorerCommandConfig {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                format!("test -f \"$1\" && printf '%s' '{}'", output),
                "scorer".to_string(),
            ],
        });

        let dir = tempfile::tempdir().unwrap();
        let ledger = Arc::new(MockLedger::new());
        let service = orchestrator(Arc::new(scorer), file_store(&dir).await, ledger.clone());
        let outcome = service.submit(sample_submission("subprocess")).await.unwrap();

        assert!(outcome.degraded.is_none());
        assert_eq!(outcome.analysis.content.source, AnalysisSource::Scorer);
        assert_eq!(outcome.analysis.content.carbon_credits, 90);
        assert_eq!(outcome.ledger.outcome, LedgerOutcomeKind::CreditsIssued);
        assert_eq!(ledger.stored_project(1).unwrap().carbon_credits, 90);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_subprocess_falls_back() {
        use bc_02_analysis::{ScorerCommandConfig, SubprocessScorer};

        let scorer = SubprocessScorer::new(ScorerCommandConfig {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                "echo 'model not found' >&2; exit 3".to_string(),
                "scorer".to_string(),
            ],
        });

        let dir = tempfile::tempdir().unwrap();
        let service = orchestrator(
            Arc::new(scorer),
            file_store(&dir).await,
            Arc::new(MockLedger::disabled()),
        );
        let outcome = service.submit(sample_submission("failing")).await.unwrap();

        let degraded = outcome.degraded.unwrap();
        assert_eq!(degraded.reason(), "scorer-failed");
        assert_eq!(outcome.analysis.content.source, AnalysisSource::Fallback);
        // 12.5 ha of mangrove at 10 credits per hectare.
        assert_eq!(outcome.analysis.content.carbon_credits, 125);
    }
}
