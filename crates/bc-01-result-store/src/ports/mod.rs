//! # Ports Module
//!
//! The store exposes a single port used by the orchestrator and the gateway.

pub mod inbound;

pub use inbound::*;
