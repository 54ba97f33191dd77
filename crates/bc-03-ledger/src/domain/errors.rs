//! # Domain Errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::TxHash;

/// Structured ledger failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Ledger not configured at startup; no I/O was attempted.
    #[error("Ledger disabled: {0}")]
    Disabled(String),

    /// Endpoint unreachable or the connection failed.
    #[error("Ledger network error: {0}")]
    Network(String),

    /// The call did not complete within the call timeout.
    #[error("Ledger call timed out: {0}")]
    Timeout(String),

    /// Transaction reverted or was refused by the node.
    #[error("Ledger rejected the transaction: {0}")]
    Rejected(String),

    /// The endpoint refused our credentials, or the signer lacks the role.
    #[error("Ledger call unauthorized: {0}")]
    Unauthorized(String),

    /// The node answered with something we cannot decode.
    #[error("Malformed ledger response: {0}")]
    MalformedResponse(String),
}

/// Failure category surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LedgerFailureKind {
    Unavailable,
    Timeout,
    Rejected,
    Unauthorized,
    MalformedResponse,
}

impl LedgerFailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerFailureKind::Unavailable => "unavailable",
            LedgerFailureKind::Timeout => "timeout",
            LedgerFailureKind::Rejected => "rejected",
            LedgerFailureKind::Unauthorized => "unauthorized",
            LedgerFailureKind::MalformedResponse => "malformed-response",
        }
    }
}

impl LedgerError {
    /// Category of this failure.
    pub fn kind(&self) -> LedgerFailureKind {
        match self {
            LedgerError::Disabled(_) | LedgerError::Network(_) => LedgerFailureKind::Unavailable,
            LedgerError::Timeout(_) => LedgerFailureKind::Timeout,
            LedgerError::Rejected(_) => LedgerFailureKind::Rejected,
            LedgerError::Unauthorized(_) => LedgerFailureKind::Unauthorized,
            LedgerError::MalformedResponse(_) => LedgerFailureKind::MalformedResponse,
        }
    }

    /// Detail string without the category prefix.
    pub fn detail(&self) -> &str {
        match self {
            LedgerError::Disabled(d)
            | LedgerError::Network(d)
            | LedgerError::Timeout(d)
            | LedgerError::Rejected(d)
            | LedgerError::Unauthorized(d)
            | LedgerError::MalformedResponse(d) => d,
        }
    }

    /// Same failure, with the broadcast transaction named in the detail so
    /// callers can reconcile it later.
    pub fn with_tx(self, tx_hash: &TxHash) -> Self {
        let tag = |d: String| format!("{} (tx {})", d, tx_hash);
        match self {
            LedgerError::Disabled(d) => LedgerError::Disabled(tag(d)),
            LedgerError::Network(d) => LedgerError::Network(tag(d)),
            LedgerError::Timeout(d) => LedgerError::Timeout(tag(d)),
            LedgerError::Rejected(d) => LedgerError::Rejected(tag(d)),
            LedgerError::Unauthorized(d) => LedgerError::Unauthorized(tag(d)),
            LedgerError::MalformedResponse(d) => LedgerError::MalformedResponse(tag(d)),
        }
    }

    /// Classify a JSON-RPC error object returned by the node.
    ///
    /// Credential problems are `Unauthorized`. Everything else the node
    /// answers with an error object (reverts, "insufficient funds", nonce
    /// conflicts, "transaction rejected", unknown methods) is a rejection of
    /// the request, not a transport failure.
    pub fn from_rpc_error(code: i64, message: &str) -> Self {
        let detail = format!("rpc error {}: {}", code, message);
        let lower = message.to_ascii_lowercase();

        if lower.contains("unauthorized") || lower.contains("forbidden") {
            LedgerError::Unauthorized(detail)
        } else {
            LedgerError::Rejected(detail)
        }
    }
}

/// Invalid or missing ledger configuration. Any of these disables the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no ledger endpoint configured")]
    MissingEndpoint,

    #[error("invalid ledger endpoint {0:?} (expected http:// or https:// URL)")]
    InvalidEndpoint(String),

    #[error("no signing key configured")]
    MissingCredential,

    #[error("invalid signing key: {0}")]
    InvalidCredential(String),

    #[error("no contract address configured")]
    MissingContract,

    #[error("invalid contract address {0:?} (expected 0x followed by 40 hex characters)")]
    InvalidContract(String),
}

/// ABI encoding or decoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    #[error("return data too short: need {needed} bytes, have {available}")]
    TooShort { needed: usize, available: usize },

    #[error("invalid {what} in return data")]
    Invalid { what: &'static str },

    #[error("value does not fit in 64 bits")]
    Overflow,
}

impl From<AbiError> for LedgerError {
    fn from(err: AbiError) -> Self {
        LedgerError::MalformedResponse(err.to_string())
    }
}
