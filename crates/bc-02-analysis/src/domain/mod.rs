//! # Domain Module
//!
//! Fallback policy, scorer output validation and outcome types.

pub mod entities;
pub mod errors;
pub mod fallback;
pub mod scorer_output;

pub use entities::*;
pub use errors::*;
pub use fallback::*;
pub use scorer_output::*;
