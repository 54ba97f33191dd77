//! # Node Configuration
//!
//! Unified configuration for all subsystems, assembled from environment
//! variables. Every variable that overrides a default is logged once at
//! startup (signing keys are redacted).
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BC_HTTP_PORT` / `PORT` | `3001` |
//! | `BC_DATA_DIR` | `./data` |
//! | `BC_MAX_EVIDENCE_BYTES` | `10485760` |
//! | `BC_SCORER_CMD` | unset (fallback only) |
//! | `BC_SCORER_ARGS` | empty |
//! | `BC_SCORER_TIMEOUT_SECS` | `30` |
//! | `BC_FALLBACK_SEED` | `0x5EEDCA4B00000001` |
//! | `BC_RPC_URL` / `RPC_URL` | unset |
//! | `BC_PRIVATE_KEY` / `PRIVATE_KEY` | unset |
//! | `BC_CONTRACT_ADDRESS` / `CONTRACT_ADDRESS` | unset |
//! | `BC_CHAIN_ID` | unset (queried from the node) |
//! | `BC_LEDGER_TIMEOUT_SECS` | `60` |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use bc_01_result_store::ResultStoreConfig;
use bc_02_analysis::{AnalysisConfig, ScorerCommandConfig};
use bc_03_ledger::LedgerConfig;
use bc_04_submission::SubmissionConfig;
use bc_05_api_gateway::GatewayConfig;
use tracing::{info, warn};

/// Default data directory.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// HTTP gateway configuration.
    pub gateway: GatewayConfig,
    /// Root data directory.
    pub data_dir: PathBuf,
    /// Result store configuration (under the data directory).
    pub store: ResultStoreConfig,
    /// Analysis client configuration.
    pub analysis: AnalysisConfig,
    /// External scorer; `None` means every analysis uses the fallback.
    pub scorer: Option<ScorerCommandConfig>,
    /// Ledger client configuration.
    pub ledger: LedgerConfig,
    /// Orchestrator configuration.
    pub submission: SubmissionConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            store: ResultStoreConfig::under_data_dir(DEFAULT_DATA_DIR),
            analysis: AnalysisConfig::default(),
            scorer: None,
            ledger: LedgerConfig::default(),
            submission: SubmissionConfig::default(),
        }
    }
}

/// Load configuration from the process environment.
pub fn load_config() -> NodeConfig {
    NodeConfig::from_lookup(|key| std::env::var(key).ok())
}

impl NodeConfig {
    /// Build from an arbitrary variable lookup.
    ///
    /// Unparseable values are ignored with a warning and the default is kept.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let env = Env { lookup: &lookup };
        let mut config = Self::default();

        if let Some(port) = env.parsed::<u16>(&["BC_HTTP_PORT", "PORT"]) {
            config.gateway.port = port;
        }

        if let Some(dir) = env.string(&["BC_DATA_DIR"]) {
            config.data_dir = PathBuf::from(dir);
            config.store = ResultStoreConfig::under_data_dir(config.data_dir.clone());
        }

        if let Some(max) = env.parsed::<usize>(&["BC_MAX_EVIDENCE_BYTES"]) {
            if max == 0 {
                warn!("BC_MAX_EVIDENCE_BYTES must be positive, keeping default");
            } else {
                config.gateway.max_evidence_bytes = max;
                config.submission.max_evidence_bytes = max;
            }
        }

        if let Some(program) = env.string(&["BC_SCORER_CMD"]) {
            let args = env.string(&["BC_SCORER_ARGS"]).unwrap_or_default();
            config.scorer = Some(ScorerCommandConfig::from_parts(program, &args));
        }

        if let Some(secs) = env.parsed::<u64>(&["BC_SCORER_TIMEOUT_SECS"]) {
            config.analysis.scorer_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = env.string(&["BC_FALLBACK_SEED"]) {
            match parse_seed(&raw) {
                Some(seed) => config.analysis.fallback_seed = seed,
                None => warn!("Ignoring invalid BC_FALLBACK_SEED '{}'", raw),
            }
        }

        config.ledger.rpc_url = env.string(&["BC_RPC_URL", "RPC_URL"]);
        config.ledger.private_key = env.secret(&["BC_PRIVATE_KEY", "PRIVATE_KEY"]);
        config.ledger.contract_address = env.string(&["BC_CONTRACT_ADDRESS", "CONTRACT_ADDRESS"]);
        config.ledger.chain_id = env.parsed::<u64>(&["BC_CHAIN_ID"]);

        if let Some(secs) = env.parsed::<u64>(&["BC_LEDGER_TIMEOUT_SECS"]) {
            config.ledger.call_timeout = Duration::from_secs(secs);
        }

        config
    }
}

/// Decimal or `0x`-prefixed hex.
fn parse_seed(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16).ok(),
        None => raw.parse().ok(),
    }
}

struct Env<'a, F: Fn(&str) -> Option<String>> {
    lookup: &'a F,
}

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    /// First non-empty value among `keys`, with the key that supplied it.
    fn first(&self, keys: &[&'static str]) -> Option<(&'static str, String)> {
        keys.iter().find_map(|key| {
            (self.lookup)(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| (*key, v))
        })
    }

    fn string(&self, keys: &[&'static str]) -> Option<String> {
        let (key, value) = self.first(keys)?;
        info!("Config override: {}={}", key, value);
        Some(value)
    }

    fn secret(&self, keys: &[&'static str]) -> Option<String> {
        let (key, value) = self.first(keys)?;
        info!("Config override: {}=<redacted>", key);
        Some(value)
    }

    fn parsed<T: FromStr>(&self, keys: &[&'static str]) -> Option<T> {
        let (key, value) = self.first(keys)?;
        match value.parse() {
            Ok(parsed) => {
                info!("Config override: {}={}", key, value);
                Some(parsed)
            }
            Err(_) => {
                warn!("Ignoring invalid {} '{}'", key, value);
                None
            }
        }
    }
}
