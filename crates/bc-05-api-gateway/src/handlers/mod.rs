//! Request handlers, grouped by resource.

pub mod projects;
pub mod registry;
pub mod system;

use bc_03_ledger::Address;

use crate::domain::ApiError;
use crate::router::AppState;

/// 503 unless the ledger was configured at startup.
pub(crate) fn ensure_ledger(state: &AppState) -> Result<(), ApiError> {
    if state.ledger.is_enabled() {
        Ok(())
    } else {
        Err(ApiError::ledger_unavailable(
            "RPC endpoint, signing key or contract address not configured",
        ))
    }
}

pub(crate) fn parse_address(raw: &str, error: &str) -> Result<Address, ApiError> {
    raw.trim()
        .parse::<Address>()
        .map_err(|e| ApiError::bad_request(error).with_details(e.to_string()))
}
