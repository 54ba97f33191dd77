//! # Analysis Outcome

use std::time::Duration;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use shared_types::AnalysisResult;

/// Why the fallback was used instead of scorer output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisDegradation {
    /// The scorer did not answer in time.
    Timeout(Duration),
    /// The scorer errored, exited non-zero, or is unavailable.
    ScorerFailed(String),
    /// The scorer answered with output that does not fit the result schema.
    MalformedOutput(String),
}

impl AnalysisDegradation {
    /// Stable machine-readable reason, also used as a metric label.
    pub fn reason(&self) -> &'static str {
        match self {
            AnalysisDegradation::Timeout(_) => "timeout",
            AnalysisDegradation::ScorerFailed(_) => "scorer-failed",
            AnalysisDegradation::MalformedOutput(_) => "malformed-output",
        }
    }

    /// Human-readable detail.
    pub fn detail(&self) -> String {
        match self {
            AnalysisDegradation::Timeout(after) => {
                format!("scorer did not answer within {} ms", after.as_millis())
            }
            AnalysisDegradation::ScorerFailed(detail)
            | AnalysisDegradation::MalformedOutput(detail) => detail.clone(),
        }
    }
}

impl Serialize for AnalysisDegradation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AnalysisDegradation", 2)?;
        state.serialize_field("reason", self.reason())?;
        state.serialize_field("detail", &self.detail())?;
        state.end()
    }
}

/// Result of `analyze`: always a valid result, plus an optional degradation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub degradation: Option<AnalysisDegradation>,
}

impl AnalysisOutcome {
    pub fn is_degraded(&self) -> bool {
        self.degradation.is_some()
    }
}
