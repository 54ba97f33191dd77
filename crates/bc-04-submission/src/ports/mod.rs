//! # Ports Module
//!
//! Hexagonal architecture ports (inbound submission API, outbound subsystem
//! dependencies).

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
