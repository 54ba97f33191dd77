//! # Adapters Layer
//!
//! Implementations of the `ResultStore` port.

mod file;
mod memory;

pub use file::FileResultStore;
pub use memory::InMemoryResultStore;
