//! Shared builders for integration tests and benchmarks.

use std::sync::Arc;

use bc_01_result_store::ResultStore;
use bc_02_analysis::{AnalysisConfig, AnalysisService, Scorer};
use bc_03_ledger::domain::abi;
use bc_03_ledger::{LedgerApi, MockRpcTransport};
use bc_04_submission::{RawSubmission, SubmissionConfig, SubmissionService};
use serde_json::{json, Value};
use shared_types::{EcosystemType, Evidence, ProjectMetadata};

/// Hardhat/Anvil development account #0.
pub const DEV_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Address of [`DEV_KEY`].
pub const DEV_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

/// First contract deployed by the development account.
pub const CONTRACT: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";

/// Multipart boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "bc-tests-boundary";

/// A small PNG-looking payload.
pub fn png_evidence(tag: &str) -> Evidence {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.extend_from_slice(tag.as_bytes());
    Evidence::new(bytes, "image/png")
}

/// Complete, valid submission.
pub fn sample_submission(tag: &str) -> RawSubmission {
    RawSubmission {
        name: Some("Mangrove Bay".to_string()),
        location: Some("Sundarbans".to_string()),
        area: Some("12.5".to_string()),
        ecosystem_type: Some("mangrove".to_string()),
        submitter: Some(DEV_ADDRESS.to_string()),
        evidence: Some(png_evidence(tag)),
    }
}

pub fn sample_metadata(area_hectares: f64, ecosystem_type: EcosystemType) -> ProjectMetadata {
    ProjectMetadata {
        name: "Mangrove Bay".to_string(),
        location: "Sundarbans".to_string(),
        area_hectares,
        ecosystem_type,
        submitter: DEV_ADDRESS.to_string(),
    }
}

/// Orchestrator over the given collaborators with test configuration.
pub fn orchestrator(
    scorer: Arc<dyn Scorer>,
    store: Arc<dyn ResultStore>,
    ledger: Arc<dyn LedgerApi>,
) -> SubmissionService {
    let analysis = Arc::new(AnalysisService::new(scorer, AnalysisConfig::for_testing()));
    SubmissionService::new(analysis, store, ledger, SubmissionConfig::for_testing())
}

/// `multipart/form-data` body with the given text fields and optional image part.
pub fn multipart_body(fields: &[(&str, &str)], image: Option<&Evidence>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some(evidence) = image {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"site.png\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, evidence.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(&evidence.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// The text fields of [`sample_submission`], as form fields.
pub fn sample_form_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Mangrove Bay"),
        ("location", "Sundarbans"),
        ("area", "12.5"),
        ("ecosystemType", "mangrove"),
        ("userAddress", DEV_ADDRESS),
    ]
}

/// 32-byte big-endian word as 0x hex.
pub fn word(value: u64) -> String {
    format!("0x{:064x}", value)
}

/// Script the calls every transaction send makes.
pub fn script_send(transport: &MockRpcTransport) {
    transport
        .respond("eth_chainId", json!("0x7a69"))
        .respond("eth_getTransactionCount", json!("0x0"))
        .respond("eth_gasPrice", json!("0x3b9aca00"))
        .respond("eth_estimateGas", json!("0x186a0"))
        .respond("eth_sendRawTransaction", json!(format!("0x{}", "11".repeat(32))));
}

/// Mined receipt carrying a `ProjectCreated` log for `project_id`.
pub fn created_receipt(project_id: u64) -> Value {
    json!({
        "status": "0x1",
        "blockNumber": "0x20",
        "logs": [{
            "address": CONTRACT,
            "topics": [
                format!("0x{}", hex::encode(abi::event_topic(abi::PROJECT_CREATED_EVENT))),
                word(project_id),
                word(0),
            ]
        }]
    })
}

/// Mined receipt without logs.
pub fn plain_receipt(status: &str) -> Value {
    json!({"status": status, "blockNumber": "0x21", "logs": []})
}
