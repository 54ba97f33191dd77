//! Registry-wide queries and organization verification.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bc_03_ledger::{LedgerError, PlatformStats};
use serde_json::json;
use tracing::info;

use crate::domain::{
    AdminResponse, ApiError, StatsResponse, VerificationResponse, VerifyOrgRequest,
    VerifyOrgResponse, LEDGER_DISABLED_NOTE,
};
use crate::handlers::{ensure_ledger, parse_address};
use crate::router::AppState;

/// `GET /api/stats`
pub async fn platform_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    if !state.ledger.is_enabled() {
        return Ok(Json(StatsResponse {
            stats: PlatformStats::default(),
            note: Some(LEDGER_DISABLED_NOTE),
        }));
    }

    let stats = state
        .ledger
        .platform_stats()
        .await
        .map_err(|e| ApiError::from_ledger("Failed to fetch statistics", &e))?;
    Ok(Json(StatsResponse { stats, note: None }))
}

/// `GET /api/verify/:address`
pub async fn verification_status(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<VerificationResponse>, ApiError> {
    if !state.ledger.is_enabled() {
        return Ok(Json(VerificationResponse {
            is_verified: false,
            note: Some(LEDGER_DISABLED_NOTE),
        }));
    }

    let organization = parse_address(&address, "Invalid organization address")?;
    let is_verified = state
        .ledger
        .is_verified_organization(organization)
        .await
        .map_err(|e| ApiError::from_ledger("Failed to check verification status", &e))?;
    Ok(Json(VerificationResponse {
        is_verified,
        note: None,
    }))
}

/// `GET /api/admin`
pub async fn contract_admin(State(state): State<AppState>) -> Result<Json<AdminResponse>, ApiError> {
    if !state.ledger.is_enabled() {
        return Ok(Json(AdminResponse {
            admin: None,
            note: Some(LEDGER_DISABLED_NOTE),
        }));
    }

    let admin = state
        .ledger
        .admin()
        .await
        .map_err(|e| ApiError::from_ledger("Failed to fetch admin", &e))?;
    Ok(Json(AdminResponse {
        admin: Some(admin),
        note: None,
    }))
}

/// `POST /api/admin/verify-org`
pub async fn verify_organization(
    State(state): State<AppState>,
    body: Result<Json<VerifyOrgRequest>, JsonRejection>,
) -> Result<Json<VerifyOrgResponse>, ApiError> {
    let raw_address = match body {
        Ok(Json(request)) => request.organization_address,
        Err(_) => None,
    }
    .filter(|a| !a.trim().is_empty())
    .ok_or_else(|| ApiError::bad_request("Organization address is required"))?;

    ensure_ledger(&state)?;
    let organization = parse_address(&raw_address, "Invalid organization address")?;

    match state.ledger.add_verified_organization(organization).await {
        Ok(tx) => {
            info!(
                tx_hash = %tx.tx_hash,
                "[bc-05] ✅ Organization {} verified",
                organization
            );
            Ok(Json(VerifyOrgResponse {
                success: true,
                transaction_hash: tx.tx_hash,
                verified_address: organization,
            }))
        }
        Err(LedgerError::Unauthorized(detail)) => {
            let admin = state.ledger.admin().await.ok();
            Err(
                ApiError::new(StatusCode::FORBIDDEN, "Only admin can verify organizations")
                    .with_details(detail)
                    .with_field("admin", json!(admin))
                    .with_field("current", json!(state.ledger.signer_address())),
            )
        }
        Err(e) => Err(ApiError::from_ledger("Failed to verify organization", &e)),
    }
}
