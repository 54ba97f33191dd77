use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use bc_01_result_store::ResultStore;
use bc_03_ledger::LedgerApi;
use bc_04_submission::SubmissionApi;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::handlers::{projects, registry, system};
use crate::middleware::create_cors_layer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub submissions: Arc<dyn SubmissionApi>,
    pub store: Arc<dyn ResultStore>,
    pub ledger: Arc<dyn LedgerApi>,
    /// Whether an external scorer is configured (reported by `/health`)
    pub scorer_configured: bool,
    pub max_evidence_bytes: usize,
}

/// Build the HTTP router.
pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/metrics", get(system::metrics))
        .route("/api/projects", post(projects::submit_project))
        .route("/api/projects/user/:address", get(projects::user_projects))
        .route("/api/projects/:id", get(projects::get_project))
        .route("/api/analysis/:id", get(system::stored_analysis))
        .route("/api/stats", get(registry::platform_stats))
        .route("/api/verify/:address", get(registry::verification_status))
        .route("/api/admin", get(registry::contract_admin))
        .route("/api/admin/verify-org", post(registry::verify_organization))
        .fallback(system::not_found)
        .layer(DefaultBodyLimit::max(config.body_limit()))
        .layer(create_cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
