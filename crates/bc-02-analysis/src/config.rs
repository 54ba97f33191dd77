//! # Analysis Configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Hard limit on one scorer invocation.
pub const DEFAULT_SCORER_TIMEOUT: Duration = Duration::from_secs(30);

/// Seed mixed into every fallback PRNG.
pub const DEFAULT_FALLBACK_SEED: u64 = 0x5EED_CA4B_0000_0001;

/// Analysis client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Scorer timeout. Elapsed → fallback.
    pub scorer_timeout: Duration,

    /// Base seed for the deterministic fallback.
    pub fallback_seed: u64,

    /// Bytes of malformed scorer output kept in the warning log.
    pub max_logged_output_bytes: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            scorer_timeout: DEFAULT_SCORER_TIMEOUT,
            fallback_seed: DEFAULT_FALLBACK_SEED,
            max_logged_output_bytes: 512,
        }
    }
}

impl AnalysisConfig {
    /// Create a config for testing (short timeout, fixed seed).
    pub fn for_testing() -> Self {
        Self {
            scorer_timeout: Duration::from_millis(200),
            fallback_seed: 42,
            max_logged_output_bytes: 64,
        }
    }
}

/// External scorer program and its leading arguments.
///
/// The evidence path and metadata JSON are appended per call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorerCommandConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl ScorerCommandConfig {
    /// Build from a program and a space-separated argument string.
    pub fn from_parts(program: impl Into<String>, args: &str) -> Self {
        Self {
            program: program.into(),
            args: args.split_whitespace().map(str::to_string).collect(),
        }
    }
}
