//! # Outbound Ports
//!
//! The orchestrator depends only on the inbound ports of its sibling
//! subsystems. They are re-exported here so wiring code has one place to
//! look.
//!
//! | Port | Subsystem | Used in state |
//! |------|-----------|---------------|
//! | `AnalysisApi` | bc-02 | Analyzing |
//! | `ResultStore` | bc-01 | Storing |
//! | `LedgerApi` | bc-03 | Registering, IssuingCredits |

pub use bc_01_result_store::ResultStore;
pub use bc_02_analysis::AnalysisApi;
pub use bc_03_ledger::LedgerApi;
