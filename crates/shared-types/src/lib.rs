//! # Shared Types Crate
//!
//! Domain vocabulary used by every subsystem of the registry.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-subsystem types are defined here.
//! - **Content Addressing**: an `AnalysisResult` identifier is a pure function
//!   of its canonical content bytes (see [`analysis`]).
//! - **Disjoint Project Namespaces**: ledger-assigned and locally synthesized
//!   project identifiers can never collide (see [`ProjectId`]).

pub mod analysis;
pub mod entities;
pub mod errors;
pub mod time;

pub use analysis::{AnalysisContent, AnalysisResult, ContentId};
pub use entities::*;
pub use errors::*;
pub use time::{FixedTimeSource, SystemTimeSource, TimeSource, Timestamp};
