//! # Subsystem Container
//!
//! Holds every subsystem instance and wires them together by their ports.
//!
//! ```text
//! FileResultStore ─┐
//! AnalysisService ─┼─→ SubmissionService ─→ AppState ─→ HTTP router
//! LedgerApi ───────┘                           ↑
//!   (Evm or Disabled)   store + ledger (read path)
//! ```

pub mod config;
pub mod subsystems;

pub use config::{load_config, NodeConfig};
pub use subsystems::SubsystemContainer;
