use async_trait::async_trait;
use shared_types::Evidence;

use crate::domain::ScorerError;
use crate::ports::Scorer;

/// Scorer used when no scorer command is configured; every call falls back.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredScorer;

#[async_trait]
impl Scorer for UnconfiguredScorer {
    async fn score(&self, _evidence: &Evidence, _metadata_json: &str) -> Result<String, ScorerError> {
        Err(ScorerError::Unavailable(
            "no scorer command configured".to_string(),
        ))
    }

    fn is_configured(&self) -> bool {
        false
    }
}
