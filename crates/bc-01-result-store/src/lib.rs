//! # BC-01 Result Store
//!
//! Content-addressed persistence for analysis results.
//!
//! **Subsystem ID:** 01  
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Contract
//!
//! | Operation | Behaviour |
//! |-----------|-----------|
//! | `put(result)` | Computes the content address, persists once, returns the id. Idempotent. |
//! | `get(id)` | Returns the result, `NotFound` for unknown ids, `Corrupted` if the bytes no longer hash to `id`. |
//! | `contains(id)` | Existence check without decoding. |
//!
//! The identifier is the SHA-256 of the canonical content bytes (see
//! [`shared_types::analysis`]), so no secondary index is needed.
//!
//! ## Module Structure
//!
//! ```text
//! bc-01-result-store/
//! ├── domain/          # StoreError
//! ├── ports/           # ResultStore trait
//! ├── adapters/        # FileResultStore, InMemoryResultStore
//! └── config.rs        # ResultStoreConfig
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{FileResultStore, InMemoryResultStore};
pub use config::ResultStoreConfig;
pub use domain::StoreError;
pub use ports::ResultStore;
