//! # Integration Flows
//!
//! Each module wires real subsystem implementations together and only
//! replaces the outermost external collaborator (scorer process, JSON-RPC
//! node) with a test double.

pub mod fixtures;

mod http_flows;
mod ledger_flows;
mod submission_flows;
