//! # Inbound Ports

use async_trait::async_trait;
use shared_types::{Evidence, ProjectMetadata};

use crate::domain::AnalysisOutcome;

/// Analysis client API - inbound port.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Analyze evidence against declared metadata.
    ///
    /// Infallible: every scorer failure resolves to the deterministic
    /// fallback with a degradation attached.
    async fn analyze(&self, evidence: &Evidence, metadata: &ProjectMetadata) -> AnalysisOutcome;

    /// Whether a real scorer is configured (false means every call falls back).
    fn scorer_configured(&self) -> bool;
}
