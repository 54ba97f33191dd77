//! # Blue Carbon Registry Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/      # Cross-subsystem flows
//! │   ├── fixtures.rs       # Shared builders (submissions, multipart, RPC scripts)
//! │   ├── submission_flows.rs  # Orchestrator + file store + scorer subprocess
//! │   ├── ledger_flows.rs      # Orchestrator + EVM client over scripted JSON-RPC
//! │   └── http_flows.rs        # Full node container behind the HTTP router
//! └── benches/              # Criterion benchmarks of the hot paths
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bc-tests
//! cargo test -p bc-tests integration::ledger_flows
//! cargo bench -p bc-tests
//! ```

pub mod integration;
