//! # Domain Module
//!
//! Policy, validation, the submission state machine and the outcome model.

pub mod errors;
pub mod outcome;
pub mod policy;
pub mod request;
pub mod state;

pub use errors::*;
pub use outcome::*;
pub use policy::*;
pub use request::*;
pub use state::*;
