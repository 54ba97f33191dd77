//! # Analysis Service
//!
//! Bounds the scorer call, validates its output and falls back
//! deterministically on any failure.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{
    AnalysisResult, ContentId, Evidence, ProjectMetadata, SystemTimeSource, TimeSource,
};
use tracing::{debug, warn};

use crate::config::AnalysisConfig;
use crate::domain::{
    fallback_content, parse_scorer_output, truncate_for_log, AnalysisDegradation, AnalysisOutcome,
};
use crate::ports::{AnalysisApi, Scorer};

/// Analysis Service - the Analysis Client implementation.
pub struct AnalysisService {
    scorer: Arc<dyn Scorer>,
    config: AnalysisConfig,
    time_source: Arc<dyn TimeSource>,
}

impl AnalysisService {
    /// Create a service using the system clock.
    pub fn new(scorer: Arc<dyn Scorer>, config: AnalysisConfig) -> Self {
        Self::with_time_source(scorer, config, Arc::new(SystemTimeSource))
    }

    /// Create a service with an injected clock.
    pub fn with_time_source(
        scorer: Arc<dyn Scorer>,
        config: AnalysisConfig,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            scorer,
            config,
            time_source,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    fn fallback(
        &self,
        metadata: &ProjectMetadata,
        evidence_digest: ContentId,
        degradation: AnalysisDegradation,
    ) -> AnalysisOutcome {
        warn!(
            reason = degradation.reason(),
            "[bc-02] ⚠️ Using fallback analysis: {}",
            degradation.detail()
        );
        let content = fallback_content(metadata, evidence_digest, self.config.fallback_seed);
        AnalysisOutcome {
            result: AnalysisResult::seal(content, self.time_source.now()),
            degradation: Some(degradation),
        }
    }
}

#[async_trait]
impl AnalysisApi for AnalysisService {
    async fn analyze(&self, evidence: &Evidence, metadata: &ProjectMetadata) -> AnalysisOutcome {
        let evidence_digest = evidence.digest();
        let metadata_json = serde_json::to_string(metadata).unwrap_or_default();

        let attempt = tokio::time::timeout(
            self.config.scorer_timeout,
            self.scorer.score(evidence, &metadata_json),
        )
        .await;

        let raw = match attempt {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                return self.fallback(
                    metadata,
                    evidence_digest,
                    AnalysisDegradation::ScorerFailed(e.to_string()),
                )
            }
            Err(_elapsed) => {
                return self.fallback(
                    metadata,
                    evidence_digest,
                    AnalysisDegradation::Timeout(self.config.scorer_timeout),
                )
            }
        };

        match parse_scorer_output(&raw) {
            Ok(report) => {
                let content = report.into_content(metadata.ecosystem_type, evidence_digest);
                let result = AnalysisResult::seal(content, self.time_source.now());
                debug!(
                    result_id = %result.id,
                    "[bc-02] Scorer result: {} credits at confidence {:.2}",
                    result.content.carbon_credits,
                    result.content.confidence
                );
                AnalysisOutcome {
                    result,
                    degradation: None,
                }
            }
            Err(reason) => {
                warn!(
                    raw_output = %truncate_for_log(&raw, self.config.max_logged_output_bytes),
                    "[bc-02] Malformed scorer output: {}",
                    reason
                );
                self.fallback(
                    metadata,
                    evidence_digest,
                    AnalysisDegradation::MalformedOutput(reason),
                )
            }
        }
    }

    fn scorer_configured(&self) -> bool {
        self.scorer.is_configured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::UnconfiguredScorer;
    use crate::ports::MockScorer;
    use shared_types::{AnalysisSource, EcosystemType, FixedTimeSource};

    fn metadata(area: f64, eco: EcosystemType) -> ProjectMetadata {
        ProjectMetadata {
            name: "Coastal Restoration".to_string(),
            location: "Gulf of Kutch".to_string(),
            area_hectares: area,
            ecosystem_type: eco,
            submitter: "0xabc".to_string(),
        }
    }

    fn evidence() -> Evidence {
        Evidence::new(b"\x89PNG fake".to_vec(), "image/png")
    }

    fn service(scorer: Arc<dyn Scorer>) -> AnalysisService {
        AnalysisService::with_time_source(
            scorer,
            AnalysisConfig::for_testing(),
            Arc::new(FixedTimeSource(1_700_000_000)),
        )
    }

    #[tokio::test]
    async fn test_well_formed_output_is_used() {
        let svc = service(Arc::new(MockScorer::well_formed(250, 0.88)));
        let outcome = svc.analyze(&evidence(), &metadata(10.0, EcosystemType::Mangrove)).await;

        assert!(!outcome.is_degraded());
        assert_eq!(outcome.result.content.carbon_credits, 250);
        assert_eq!(outcome.result.content.source, AnalysisSource::Scorer);
        assert_eq!(outcome.result.content.evidence_digest, evidence().digest());
        assert_eq!(outcome.result.generated_at, 1_700_000_000);
        assert!(outcome.result.verify());
    }

    #[tokio::test]
    async fn test_unreachable_scorer_uses_rate_table() {
        let svc = service(Arc::new(UnconfiguredScorer));
        let outcome = svc.analyze(&evidence(), &metadata(10.0, EcosystemType::Mangrove)).await;

        assert_eq!(outcome.result.content.carbon_credits, 100);
        assert_eq!(outcome.result.content.source, AnalysisSource::Fallback);
        assert!(matches!(
            outcome.degradation,
            Some(AnalysisDegradation::ScorerFailed(_))
        ));
        assert!(!svc.scorer_configured());
    }

    #[tokio::test]
    async fn test_malformed_output_falls_back() {
        let svc = service(Arc::new(MockScorer::responding("Traceback (most recent call last)")));
        let outcome = svc.analyze(&evidence(), &metadata(3.0, EcosystemType::Seagrass)).await;

        assert_eq!(outcome.result.content.carbon_credits, 24);
        assert!(matches!(
            outcome.degradation,
            Some(AnalysisDegradation::MalformedOutput(_))
        ));
    }

    #[tokio::test]
    async fn test_hanging_scorer_times_out() {
        let svc = service(Arc::new(MockScorer::hanging()));
        let outcome = svc.analyze(&evidence(), &metadata(2.0, EcosystemType::Saltmarsh)).await;

        assert_eq!(outcome.result.content.carbon_credits, 12);
        assert!(matches!(outcome.degradation, Some(AnalysisDegradation::Timeout(_))));
    }

    #[tokio::test]
    async fn test_fallback_is_reproducible_across_failure_modes() {
        let m = metadata(7.5, EcosystemType::Mangrove);
        let failing = service(Arc::new(MockScorer::failing()))
            .analyze(&evidence(), &m)
            .await;
        let malformed = service(Arc::new(MockScorer::responding("{}")))
            .analyze(&evidence(), &m)
            .await;

        assert_eq!(failing.result, malformed.result);
    }

    #[tokio::test]
    async fn test_results_always_within_bounds() {
        for area in [0.5, 1.0, 33.3, 1_000.0] {
            for eco in EcosystemType::ALL {
                let svc = service(Arc::new(MockScorer::failing()));
                let r = svc.analyze(&evidence(), &metadata(area, eco)).await.result;
                assert!((0.0..=1.0).contains(&r.content.confidence));
            }
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_subprocess_is_killed_on_timeout() {
        use crate::adapters::SubprocessScorer;
        use crate::config::ScorerCommandConfig;

        let scorer = SubprocessScorer::new(ScorerCommandConfig {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "sleep 5".to_string(), "scorer".to_string()],
        });
        let svc = service(Arc::new(scorer));
        let started = std::time::Instant::now();
        let outcome = svc.analyze(&evidence(), &metadata(1.0, EcosystemType::Mangrove)).await;

        assert!(matches!(outcome.degradation, Some(AnalysisDegradation::Timeout(_))));
        assert!(started.elapsed() < std::time::Duration::from_secs(4));
    }
}
