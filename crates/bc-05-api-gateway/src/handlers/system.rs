//! Health, metrics, stored analyses and the fallback route.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use shared_types::AnalysisResult;

use crate::domain::{ApiError, FeatureFlags, HealthResponse, CONTRACT_NOT_CONFIGURED};
use crate::router::AppState;

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let ledger_enabled = state.ledger.is_enabled();
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        contract: state
            .ledger
            .contract_address()
            .map(|a| a.to_string())
            .unwrap_or_else(|| CONTRACT_NOT_CONFIGURED.to_string()),
        ledger_enabled,
        features: FeatureFlags {
            file_upload: true,
            ai_analysis: true,
            scorer: state.scorer_configured,
            ledger: ledger_enabled,
        },
    })
}

/// `GET /metrics`
pub async fn metrics() -> Response {
    match bc_telemetry::encode_metrics() {
        Ok(text) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode metrics")
            .with_details(e.to_string())
            .into_response(),
    }
}

/// `GET /api/analysis/:id`
pub async fn stored_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AnalysisResult>, ApiError> {
    state
        .store
        .lookup(&id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_store(&e))
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found("Route not found").with_details(uri.path().to_string())
}
