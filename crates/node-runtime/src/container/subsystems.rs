//! Subsystem construction.

use std::sync::Arc;

use anyhow::{Context, Result};
use bc_01_result_store::{FileResultStore, ResultStore};
use bc_02_analysis::{AnalysisApi, AnalysisService, Scorer, SubprocessScorer, UnconfiguredScorer};
use bc_03_ledger::LedgerApi;
use bc_04_submission::{SubmissionApi, SubmissionService};
use bc_05_api_gateway::{ApiGatewayService, AppState};
use tracing::{info, warn};

use super::config::NodeConfig;

/// All subsystem instances of one process.
pub struct SubsystemContainer {
    /// Configuration the container was built from.
    pub config: NodeConfig,
    /// Result Store (bc-01).
    pub store: Arc<dyn ResultStore>,
    /// Analysis Client (bc-02).
    pub analysis: Arc<dyn AnalysisApi>,
    /// Ledger Client (bc-03), enabled or disabled.
    pub ledger: Arc<dyn LedgerApi>,
    /// Submission Orchestrator (bc-04).
    pub submissions: Arc<dyn SubmissionApi>,
}

impl SubsystemContainer {
    /// Build every subsystem in dependency order.
    pub async fn new(config: NodeConfig) -> Result<Self> {
        let store = FileResultStore::open(&config.store)
            .await
            .with_context(|| {
                format!(
                    "failed to open result store at {}",
                    config.store.directory.display()
                )
            })?;

        let ledger = bc_03_ledger::connect(&config.ledger);
        Ok(Self::with_parts(config, Arc::new(store), ledger))
    }

    /// Build around an existing store and ledger client.
    pub fn with_parts(
        config: NodeConfig,
        store: Arc<dyn ResultStore>,
        ledger: Arc<dyn LedgerApi>,
    ) -> Self {
        let scorer: Arc<dyn Scorer> = match &config.scorer {
            Some(command) => {
                info!(
                    "[bc-02] 🔬 Scorer: {} {}",
                    command.program,
                    command.args.join(" ")
                );
                Arc::new(SubprocessScorer::new(command.clone()))
            }
            None => {
                warn!("[bc-02] No scorer configured; every analysis uses the fallback");
                Arc::new(UnconfiguredScorer)
            }
        };

        let analysis: Arc<dyn AnalysisApi> =
            Arc::new(AnalysisService::new(scorer, config.analysis.clone()));

        let submissions: Arc<dyn SubmissionApi> = Arc::new(SubmissionService::new(
            Arc::clone(&analysis),
            Arc::clone(&store),
            Arc::clone(&ledger),
            config.submission.clone(),
        ));

        Self {
            config,
            store,
            analysis,
            ledger,
            submissions,
        }
    }

    /// Handler state for the HTTP gateway.
    pub fn app_state(&self) -> AppState {
        AppState {
            submissions: Arc::clone(&self.submissions),
            store: Arc::clone(&self.store),
            ledger: Arc::clone(&self.ledger),
            scorer_configured: self.analysis.scorer_configured(),
            max_evidence_bytes: self.config.gateway.max_evidence_bytes,
        }
    }

    /// HTTP gateway over these subsystems.
    pub fn gateway(&self) -> ApiGatewayService {
        ApiGatewayService::new(self.config.gateway.clone(), self.app_state())
    }
}
