//! # Adapters Layer
//!
//! Implementations of the `RpcTransport` port.

mod http_transport;

pub use http_transport::HttpRpcTransport;
