//! # Outbound Ports
//!
//! The external scorer, whatever it is (subprocess, HTTP model, in-process).

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use shared_types::Evidence;

use crate::domain::ScorerError;

/// External scorer - outbound port.
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Score the evidence. Returns the scorer's raw output.
    ///
    /// `metadata_json` is `{name, location, area, ecosystemType, submitter}`.
    /// Implementations must be cancel-safe: dropping the future abandons
    /// the call and releases its resources.
    async fn score(&self, evidence: &Evidence, metadata_json: &str) -> Result<String, ScorerError>;

    /// Whether this scorer can ever succeed.
    fn is_configured(&self) -> bool {
        true
    }
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Scripted behaviour of a `MockScorer`.
#[derive(Debug, Clone)]
pub enum MockScorerBehavior {
    /// Return this raw output.
    Respond(String),
    /// Fail with `ScorerError::Unavailable`.
    Fail,
    /// Never answer.
    Hang,
}

/// Mock scorer for testing, counting its invocations.
#[derive(Debug)]
pub struct MockScorer {
    pub behavior: MockScorerBehavior,
    calls: AtomicUsize,
}

impl MockScorer {
    pub fn new(behavior: MockScorerBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    /// Scorer answering with well-formed output.
    pub fn well_formed(carbon_credits: u64, confidence: f64) -> Self {
        let output = serde_json::json!({
            "carbonCredits": carbon_credits,
            "vegetationHealth": "good",
            "confidence": confidence,
            "area_detected": 10.0,
            "ndvi": 0.55,
            "image_quality": "good",
        });
        Self::new(MockScorerBehavior::Respond(output.to_string()))
    }

    /// Scorer answering with arbitrary raw output.
    pub fn responding(raw: impl Into<String>) -> Self {
        Self::new(MockScorerBehavior::Respond(raw.into()))
    }

    pub fn failing() -> Self {
        Self::new(MockScorerBehavior::Fail)
    }

    pub fn hanging() -> Self {
        Self::new(MockScorerBehavior::Hang)
    }

    /// Number of `score` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Scorer for MockScorer {
    async fn score(&self, _evidence: &Evidence, _metadata_json: &str) -> Result<String, ScorerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockScorerBehavior::Respond(raw) => Ok(raw.clone()),
            MockScorerBehavior::Fail => Err(ScorerError::Unavailable("Mock failure".to_string())),
            MockScorerBehavior::Hang => {
                std::future::pending::<()>().await;
                Err(ScorerError::Unavailable("unreachable".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_scorer_counts_calls() {
        let scorer = MockScorer::well_formed(10, 0.9);
        let evidence = Evidence::new(vec![1, 2, 3], "image/png");

        assert!(scorer.score(&evidence, "{}").await.is_ok());
        assert!(scorer.score(&evidence, "{}").await.is_ok());
        assert_eq!(scorer.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_scorer_failing() {
        let scorer = MockScorer::failing();
        let evidence = Evidence::new(vec![1], "image/png");
        assert!(matches!(
            scorer.score(&evidence, "{}").await,
            Err(ScorerError::Unavailable(_))
        ));
    }
}
