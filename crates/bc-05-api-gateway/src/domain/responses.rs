//! Request and response bodies of the HTTP API.

use bc_03_ledger::{Address, LedgerProject, PlatformStats, TxHash};
use serde::{Deserialize, Serialize};
use shared_types::AnalysisResult;

/// Attached to read-path answers given without a ledger.
pub const LEDGER_DISABLED_NOTE: &str = "Ledger functionality not available";

/// Shown as the contract address when none is configured.
pub const CONTRACT_NOT_CONFIGURED: &str = "Not configured";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    /// RFC 3339
    pub timestamp: String,
    pub contract: String,
    pub ledger_enabled: bool,
    pub features: FeatureFlags,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    pub file_upload: bool,
    /// Always on: without a scorer the fallback answers.
    pub ai_analysis: bool,
    /// An external scorer is configured.
    pub scorer: bool,
    pub ledger: bool,
}

/// Ledger record with its stored analysis, when available.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: LedgerProject,
    pub analysis: Option<AnalysisResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserProjects {
    pub owner: Address,
    pub projects: Vec<LedgerProject>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: PlatformStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResponse {
    pub is_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminResponse {
    pub admin: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerifyOrgRequest {
    pub organization_address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOrgResponse {
    pub success: bool,
    pub transaction_hash: TxHash,
    pub verified_address: Address,
}
