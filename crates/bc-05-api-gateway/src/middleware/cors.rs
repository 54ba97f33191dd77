//! CORS layer built from the gateway configuration.

use std::time::Duration;

use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

use crate::config::CorsConfig;

/// Create the CORS layer. The browser front end posts multipart forms, so
/// any request header is allowed.
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age));

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}
