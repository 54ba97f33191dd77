//! # Domain Errors

use thiserror::Error;

/// Failures of a single scorer invocation.
///
/// These never leave the analysis client; they select the fallback path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScorerError {
    /// No scorer is configured or it cannot be reached.
    #[error("Scorer unavailable: {0}")]
    Unavailable(String),

    /// The scorer process could not be started.
    #[error("Failed to start scorer: {0}")]
    Spawn(String),

    /// The scorer exited unsuccessfully.
    #[error("Scorer exited with {}: {stderr}", code.map(|c| c.to_string()).unwrap_or_else(|| "signal".to_string()))]
    NonZeroExit {
        /// Exit code, `None` if killed by a signal
        code: Option<i32>,
        /// Captured standard error (truncated)
        stderr: String,
    },

    /// Staging the evidence for the scorer failed.
    #[error("Scorer I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ScorerError {
    fn from(err: std::io::Error) -> Self {
        ScorerError::Io(err.to_string())
    }
}
