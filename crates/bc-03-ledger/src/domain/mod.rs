//! # Domain Module
//!
//! Contract ABI codec, transaction signing, entities and errors.

pub mod abi;
pub mod entities;
pub mod errors;
pub mod transaction;

pub use entities::*;
pub use errors::*;
pub use transaction::{keccak256, LedgerSigner, LegacyTransaction};
