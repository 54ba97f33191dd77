//! # Application Layer
//!
//! Ledger client implementations and startup wiring.

mod disabled;
mod evm_client;

use std::sync::Arc;

use tracing::{info, warn};

pub use disabled::DisabledLedgerClient;
pub use evm_client::EvmLedgerClient;

use crate::adapters::HttpRpcTransport;
use crate::config::LedgerConfig;
use crate::ports::LedgerApi;

/// Build the ledger client for this process.
///
/// An incomplete or invalid configuration yields a [`DisabledLedgerClient`];
/// the reason is logged once here.
pub fn connect(config: &LedgerConfig) -> Arc<dyn LedgerApi> {
    match config.validate() {
        Ok(validated) => {
            info!(
                "[bc-03] ⛓️ Ledger enabled: endpoint={} contract={} signer={}",
                validated.rpc_url,
                validated.contract,
                validated.signer.address()
            );
            let transport = HttpRpcTransport::new(validated.rpc_url.clone(), validated.call_timeout);
            Arc::new(EvmLedgerClient::new(Arc::new(transport), validated))
        }
        Err(reason) => {
            warn!("[bc-03] Ledger disabled: {}", reason);
            Arc::new(DisabledLedgerClient::new(reason.to_string()))
        }
    }
}
