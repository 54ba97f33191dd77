//! # Result Store Configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the file-backed store, relative to the working directory.
pub const DEFAULT_RESULTS_DIR: &str = "./data/analysis_results";

/// Result store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResultStoreConfig {
    /// Directory holding one `<id>.json` file per result.
    pub directory: PathBuf,
}

impl Default for ResultStoreConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_RESULTS_DIR),
        }
    }
}

impl ResultStoreConfig {
    /// Store results under `<data_dir>/analysis_results`.
    pub fn under_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            directory: data_dir.into().join("analysis_results"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResultStoreConfig::default();
        assert!(config.directory.ends_with("analysis_results"));
    }

    #[test]
    fn test_under_data_dir() {
        let config = ResultStoreConfig::under_data_dir("/var/lib/bc");
        assert_eq!(config.directory, PathBuf::from("/var/lib/bc/analysis_results"));
    }
}
