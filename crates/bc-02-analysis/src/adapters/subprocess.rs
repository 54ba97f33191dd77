//! Subprocess scorer adapter.
//!
//! Runs `<program> <args..> <evidence-path> <metadata-json>` and returns its
//! standard output.

use std::process::Stdio;

use async_trait::async_trait;
use shared_types::Evidence;
use tokio::process::Command;
use tracing::debug;

use crate::config::ScorerCommandConfig;
use crate::domain::{truncate_for_log, ScorerError};
use crate::ports::Scorer;

const MAX_STDERR_BYTES: usize = 1024;

/// Scorer backed by an external program.
///
/// The evidence is staged in a temp file that lives for the duration of the
/// call. The child is killed if the call is dropped (timeout or caller
/// cancellation).
#[derive(Debug, Clone)]
pub struct SubprocessScorer {
    command: ScorerCommandConfig,
}

impl SubprocessScorer {
    pub fn new(command: ScorerCommandConfig) -> Self {
        Self { command }
    }

    fn suffix_for(content_type: &str) -> &'static str {
        match content_type.split(';').next().unwrap_or_default().trim() {
            "image/png" => ".png",
            "image/jpeg" | "image/jpg" => ".jpg",
            "image/gif" => ".gif",
            "image/webp" => ".webp",
            "image/tiff" => ".tif",
            _ => ".img",
        }
    }
}

#[async_trait]
impl Scorer for SubprocessScorer {
    async fn score(&self, evidence: &Evidence, metadata_json: &str) -> Result<String, ScorerError> {
        let staged = tempfile::Builder::new()
            .prefix("bc-evidence-")
            .suffix(Self::suffix_for(&evidence.content_type))
            .tempfile()?;
        tokio::fs::write(staged.path(), &evidence.bytes).await?;

        debug!(
            "[bc-02] Running scorer {} on {} bytes",
            self.command.program,
            evidence.len()
        );

        let output = Command::new(&self.command.program)
            .args(&self.command.args)
            .arg(staged.path())
            .arg(metadata_json)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ScorerError::Spawn(format!("{}: {}", self.command.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScorerError::NonZeroExit {
                code: output.status.code(),
                stderr: truncate_for_log(stderr.trim(), MAX_STDERR_BYTES),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
