//! # BC-03 Ledger Client
//!
//! Wraps the project registry contract on an external EVM ledger.
//!
//! **Subsystem ID:** 03  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Operations
//!
//! | Path | Operation | Contract call |
//! |------|-----------|---------------|
//! | Write | `register_project` | `createProject(string,string,uint256,string,string)` |
//! | Write | `issue_credits` | `verifyProjectAndIssueCredits(uint256,uint256,string)` |
//! | Write | `add_verified_organization` | `addVerifiedOrganization(address)` (admin only) |
//! | Read | `user_projects` | `getUserProjects(address)` |
//! | Read | `project` | `getProject(uint256)` |
//! | Read | `platform_stats` | `getPlatformStats()` |
//! | Read | `is_verified_organization` | `isVerifiedOrganization(address)` |
//! | Read | `admin` | `admin()` |
//!
//! ## Failure Model
//!
//! - Every call is bounded by the configured call timeout.
//! - Failures surface as a structured [`LedgerError`], never a raw transport
//!   error. There are no retries inside this crate.
//! - When endpoint, credential or contract address is missing or invalid at
//!   startup, [`connect`] returns a [`DisabledLedgerClient`] that
//!   short-circuits every call without I/O.
//!
//! ## Module Structure
//!
//! ```text
//! bc-03-ledger/
//! ├── domain/          # ABI codec, legacy transactions, entities, errors
//! ├── ports/           # LedgerApi (inbound), RpcTransport (outbound), mocks
//! ├── adapters/        # HttpRpcTransport (reqwest)
//! ├── application/     # EvmLedgerClient, DisabledLedgerClient, connect()
//! └── config.rs        # LedgerConfig
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::HttpRpcTransport;
pub use application::{connect, DisabledLedgerClient, EvmLedgerClient};
pub use config::{LedgerConfig, ValidatedLedgerConfig, DEFAULT_CALL_TIMEOUT};
pub use domain::{
    Address, ConfigError, LedgerError, LedgerFailureKind, LedgerProject, LedgerSigner,
    PlatformStats, ProjectRef, ProjectRegistration, TxHash, TxRef,
};
pub use ports::{LedgerApi, MockLedger, MockRpcTransport, RpcTransport};
