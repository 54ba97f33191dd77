//! # Inbound Ports
//!
//! API exposed to the orchestrator and the HTTP gateway.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::ContentId;

use crate::domain::{
    keccak256, Address, LedgerError, LedgerProject, PlatformStats, ProjectRef,
    ProjectRegistration, TxHash, TxRef,
};

/// Ledger Client API - inbound port.
///
/// No method retries. Every failure is a structured [`LedgerError`].
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// Whether the ledger was configured at startup.
    fn is_enabled(&self) -> bool;

    /// `createProject`; returns the ledger-assigned project id.
    async fn register_project(
        &self,
        registration: &ProjectRegistration,
    ) -> Result<ProjectRef, LedgerError>;

    /// `verifyProjectAndIssueCredits` for a registered project.
    async fn issue_credits(
        &self,
        project: &ProjectRef,
        quantity: u64,
        result_id: &ContentId,
    ) -> Result<TxRef, LedgerError>;

    /// Ids of the projects owned by an account.
    async fn user_projects(&self, owner: Address) -> Result<Vec<u64>, LedgerError>;

    /// Full record of one project.
    async fn project(&self, project_id: u64) -> Result<LedgerProject, LedgerError>;

    async fn platform_stats(&self) -> Result<PlatformStats, LedgerError>;

    async fn is_verified_organization(&self, organization: Address) -> Result<bool, LedgerError>;

    /// Contract administrator.
    async fn admin(&self) -> Result<Address, LedgerError>;

    /// Mark an organization as verified. Requires the signer to be the admin.
    async fn add_verified_organization(&self, organization: Address)
        -> Result<TxRef, LedgerError>;

    /// Account our transactions are sent from.
    fn signer_address(&self) -> Option<Address>;

    /// Registry contract address.
    fn contract_address(&self) -> Option<Address>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

#[derive(Debug, Default)]
struct MockLedgerState {
    projects: BTreeMap<u64, LedgerProject>,
    verified: HashSet<Address>,
    tx_counter: u64,
}

impl MockLedgerState {
    fn next_tx(&mut self) -> TxRef {
        self.tx_counter += 1;
        TxRef {
            tx_hash: TxHash(keccak256(&self.tx_counter.to_be_bytes())),
            block_number: Some(self.tx_counter),
        }
    }
}

/// In-memory ledger for testing, counting its write calls.
#[derive(Debug)]
pub struct MockLedger {
    enabled: bool,
    signer: Address,
    admin: Address,
    contract: Address,
    registration_failure: Option<LedgerError>,
    issuance_failure: Option<LedgerError>,
    delay: Option<Duration>,
    state: RwLock<MockLedgerState>,
    register_calls: AtomicUsize,
    issue_calls: AtomicUsize,
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLedger {
    /// Enabled ledger whose signer is also the contract admin.
    pub fn new() -> Self {
        let signer = Address([0xA1; 20]);
        Self {
            enabled: true,
            signer,
            admin: signer,
            contract: Address([0xC0; 20]),
            registration_failure: None,
            issuance_failure: None,
            delay: None,
            state: RwLock::new(MockLedgerState::default()),
            register_calls: AtomicUsize::new(0),
            issue_calls: AtomicUsize::new(0),
        }
    }

    /// Ledger that was never configured.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    /// Every `register_project` fails with `error`.
    pub fn failing_registration(error: LedgerError) -> Self {
        Self {
            registration_failure: Some(error),
            ..Self::new()
        }
    }

    /// Every `issue_credits` fails with `error`.
    pub fn failing_issuance(error: LedgerError) -> Self {
        Self {
            issuance_failure: Some(error),
            ..Self::new()
        }
    }

    /// Delay every write call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Use a different admin so the signer lacks the admin role.
    pub fn with_admin(mut self, admin: Address) -> Self {
        self.admin = admin;
        self
    }

    pub fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    pub fn issue_calls(&self) -> usize {
        self.issue_calls.load(Ordering::SeqCst)
    }

    /// Snapshot of a stored project.
    pub fn stored_project(&self, project_id: u64) -> Option<LedgerProject> {
        self.state.read().projects.get(&project_id).cloned()
    }

    fn check_enabled(&self) -> Result<(), LedgerError> {
        if self.enabled {
            Ok(())
        } else {
            Err(LedgerError::Disabled("mock ledger disabled".to_string()))
        }
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn project_not_found(project_id: u64) -> LedgerError {
    LedgerError::Rejected(format!("execution reverted: project {} does not exist", project_id))
}

#[async_trait]
impl LedgerApi for MockLedger {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn register_project(
        &self,
        registration: &ProjectRegistration,
    ) -> Result<ProjectRef, LedgerError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.check_enabled()?;
        self.pause().await;
        if let Some(err) = &self.registration_failure {
            return Err(err.clone());
        }

        let mut state = self.state.write();
        let project_id = state.projects.len() as u64 + 1;
        let tx = state.next_tx();
        state.projects.insert(
            project_id,
            LedgerProject {
                id: project_id,
                name: registration.name.clone(),
                location: registration.location.clone(),
                owner: self.signer,
                area: registration.area,
                ecosystem_type: registration.ecosystem_type.clone(),
                carbon_credits: 0,
                created_at: tx.block_number.unwrap_or_default(),
                is_active: true,
                image_hash: registration.evidence_ref.clone(),
                ai_results_hash: String::new(),
            },
        );
        Ok(ProjectRef { project_id, tx })
    }

    async fn issue_credits(
        &self,
        project: &ProjectRef,
        quantity: u64,
        result_id: &ContentId,
    ) -> Result<TxRef, LedgerError> {
        self.issue_calls.fetch_add(1, Ordering::SeqCst);
        self.check_enabled()?;
        self.pause().await;
        if let Some(err) = &self.issuance_failure {
            return Err(err.clone());
        }

        let mut state = self.state.write();
        let tx = state.next_tx();
        let record = state
            .projects
            .get_mut(&project.project_id)
            .ok_or_else(|| project_not_found(project.project_id))?;
        record.carbon_credits = record.carbon_credits.saturating_add(quantity);
        record.ai_results_hash = result_id.to_string();
        Ok(tx)
    }

    async fn user_projects(&self, owner: Address) -> Result<Vec<u64>, LedgerError> {
        self.check_enabled()?;
        Ok(self
            .state
            .read()
            .projects
            .values()
            .filter(|p| p.owner == owner)
            .map(|p| p.id)
            .collect())
    }

    async fn project(&self, project_id: u64) -> Result<LedgerProject, LedgerError> {
        self.check_enabled()?;
        self.stored_project(project_id)
            .ok_or_else(|| project_not_found(project_id))
    }

    async fn platform_stats(&self) -> Result<PlatformStats, LedgerError> {
        self.check_enabled()?;
        let state = self.state.read();
        Ok(PlatformStats {
            total_projects: state.projects.len() as u64,
            total_carbon_credits: state.projects.values().map(|p| p.carbon_credits).sum(),
            total_verified_orgs: state.verified.len() as u64,
        })
    }

    async fn is_verified_organization(&self, organization: Address) -> Result<bool, LedgerError> {
        self.check_enabled()?;
        Ok(self.state.read().verified.contains(&organization))
    }

    async fn admin(&self) -> Result<Address, LedgerError> {
        self.check_enabled()?;
        Ok(self.admin)
    }

    async fn add_verified_organization(
        &self,
        organization: Address,
    ) -> Result<TxRef, LedgerError> {
        self.check_enabled()?;
        if self.admin != self.signer {
            return Err(LedgerError::Unauthorized(
                "signer is not the contract admin".to_string(),
            ));
        }
        let mut state = self.state.write();
        state.verified.insert(organization);
        Ok(state.next_tx())
    }

    fn signer_address(&self) -> Option<Address> {
        self.enabled.then_some(self.signer)
    }

    fn contract_address(&self) -> Option<Address> {
        self.enabled.then_some(self.contract)
    }
}
