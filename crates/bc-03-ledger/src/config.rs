//! # Ledger Configuration

use std::time::Duration;

use crate::domain::{Address, ConfigError, LedgerSigner};

/// Default bound on each ledger call, covering send and receipt wait.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// Default interval between receipt polls.
pub const DEFAULT_RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Gas estimate multiplier, in percent.
pub const GAS_ESTIMATE_MARGIN_PERCENT: u64 = 120;

/// Raw ledger configuration as read from the environment.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// JSON-RPC endpoint.
    pub rpc_url: Option<String>,
    /// Hex signing key.
    pub private_key: Option<String>,
    /// Registry contract address.
    pub contract_address: Option<String>,
    /// EIP-155 chain id; queried with `eth_chainId` when unset.
    pub chain_id: Option<u64>,
    pub call_timeout: Duration,
    pub receipt_poll_interval: Duration,
    /// Fixed gas limit; estimated per call when unset.
    pub gas_limit: Option<u64>,
    /// Fixed gas price in wei; queried per call when unset.
    pub gas_price: Option<u128>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            private_key: None,
            contract_address: None,
            chain_id: None,
            call_timeout: DEFAULT_CALL_TIMEOUT,
            receipt_poll_interval: DEFAULT_RECEIPT_POLL_INTERVAL,
            gas_limit: None,
            gas_price: None,
        }
    }
}

/// Configuration that passed validation; the ledger is enabled.
#[derive(Debug, Clone)]
pub struct ValidatedLedgerConfig {
    pub rpc_url: String,
    pub signer: LedgerSigner,
    pub contract: Address,
    pub chain_id: Option<u64>,
    pub call_timeout: Duration,
    pub receipt_poll_interval: Duration,
    pub gas_limit: Option<u64>,
    pub gas_price: Option<u128>,
}

impl LedgerConfig {
    /// Configuration with short timeouts for tests. Endpoint, key and
    /// contract are left unset.
    pub fn for_testing() -> Self {
        Self {
            call_timeout: Duration::from_millis(500),
            receipt_poll_interval: Duration::from_millis(10),
            ..Default::default()
        }
    }

    /// Check endpoint, credential and contract address.
    pub fn validate(&self) -> Result<ValidatedLedgerConfig, ConfigError> {
        let rpc_url = non_empty(&self.rpc_url).ok_or(ConfigError::MissingEndpoint)?;
        if !(rpc_url.starts_with("http://") || rpc_url.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(rpc_url.to_string()));
        }

        let key = non_empty(&self.private_key).ok_or(ConfigError::MissingCredential)?;
        let signer = LedgerSigner::from_hex(key)?;

        let contract = non_empty(&self.contract_address)
            .ok_or(ConfigError::MissingContract)?
            .parse::<Address>()?;

        Ok(ValidatedLedgerConfig {
            rpc_url: rpc_url.to_string(),
            signer,
            contract,
            chain_id: self.chain_id,
            call_timeout: self.call_timeout,
            receipt_poll_interval: self.receipt_poll_interval,
            gas_limit: self.gas_limit,
            gas_price: self.gas_price,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
