//! Ledger client used when the ledger is not configured.

use async_trait::async_trait;
use shared_types::ContentId;

use crate::domain::{
    Address, LedgerError, LedgerProject, PlatformStats, ProjectRef, ProjectRegistration, TxRef,
};
use crate::ports::LedgerApi;

/// Short-circuits every call with [`LedgerError::Disabled`], without I/O.
#[derive(Debug, Clone)]
pub struct DisabledLedgerClient {
    reason: String,
}

impl DisabledLedgerClient {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    fn disabled<T>(&self) -> Result<T, LedgerError> {
        Err(LedgerError::Disabled(self.reason.clone()))
    }
}

#[async_trait]
impl LedgerApi for DisabledLedgerClient {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn register_project(&self, _: &ProjectRegistration) -> Result<ProjectRef, LedgerError> {
        self.disabled()
    }

    async fn issue_credits(&self, _: &ProjectRef, _: u64, _: &ContentId) -> Result<TxRef, LedgerError> {
        self.disabled()
    }

    async fn user_projects(&self, _: Address) -> Result<Vec<u64>, LedgerError> {
        self.disabled()
    }

    async fn project(&self, _: u64) -> Result<LedgerProject, LedgerError> {
        self.disabled()
    }

    async fn platform_stats(&self) -> Result<PlatformStats, LedgerError> {
        self.disabled()
    }

    async fn is_verified_organization(&self, _: Address) -> Result<bool, LedgerError> {
        self.disabled()
    }

    async fn admin(&self) -> Result<Address, LedgerError> {
        self.disabled()
    }

    async fn add_verified_organization(&self, _: Address) -> Result<TxRef, LedgerError> {
        self.disabled()
    }

    fn signer_address(&self) -> Option<Address> {
        None
    }

    fn contract_address(&self) -> Option<Address> {
        None
    }
}
