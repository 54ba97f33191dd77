//! # Ports Module
//!
//! Hexagonal architecture ports (inbound ledger API, outbound JSON-RPC transport).

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
