//! # Adapters Layer
//!
//! Implementations of the `Scorer` port.

mod subprocess;
mod unconfigured;

pub use subprocess::SubprocessScorer;
pub use unconfigured::UnconfiguredScorer;
