//! Gateway domain: error mapping and response bodies.

pub mod error;
pub mod responses;

pub use error::{ApiError, GatewayError};
pub use responses::*;
