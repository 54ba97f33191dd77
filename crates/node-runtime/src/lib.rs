//! # Node Runtime Library
//!
//! Exposes the subsystem container for testing. The main entry point is the
//! `main.rs` binary.
//!
//! ## Architectural Patterns
//!
//! - **Hexagonal Architecture**: subsystems depend on each other's ports,
//!   never on concrete adapters
//! - **Graceful degradation**: a missing scorer or ledger configuration
//!   disables that dependency instead of failing startup

#![warn(clippy::all)]

pub mod container;

pub use container::{load_config, NodeConfig, SubsystemContainer};
