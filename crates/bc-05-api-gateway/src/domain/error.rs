//! Gateway error types.
//!
//! Every error response body is a JSON object `{error, details?, ...}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bc_01_result_store::StoreError;
use bc_03_ledger::LedgerError;
use bc_04_submission::SubmissionError;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

/// Error returned by a request handler.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<String>,
    /// Additional top-level fields of the body
    pub fields: Map<String, Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details: None,
            fields: Map::new(),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error)
    }

    /// 503 for endpoints that cannot answer without a ledger.
    pub fn ledger_unavailable(reason: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Ledger functionality not available",
        )
        .with_details(reason)
    }

    /// Map a read-path ledger failure. `context` names what was attempted.
    pub fn from_ledger(context: &str, err: &LedgerError) -> Self {
        match err {
            LedgerError::Disabled(reason) => Self::ledger_unavailable(reason.clone()),
            LedgerError::Unauthorized(detail) => {
                Self::new(StatusCode::FORBIDDEN, context).with_details(detail.clone())
            }
            other => {
                warn!(kind = other.kind().as_str(), "[bc-05] {}: {}", context, other);
                Self::new(StatusCode::BAD_GATEWAY, context).with_details(other.to_string())
            }
        }
    }

    /// Map a result store read failure.
    pub fn from_store(err: &StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => {
                Self::not_found("Analysis result not found").with_details(id.clone())
            }
            other => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read analysis result",
            )
            .with_details(other.to_string()),
        }
    }

    /// Body oversized for the configured limit.
    pub fn file_too_large(max_evidence_bytes: usize) -> Self {
        Self::bad_request(format!(
            "File too large. Maximum size is {}.",
            human_size(max_evidence_bytes)
        ))
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match err {
            SubmissionError::ClientInput(validation) => Self::new(status, validation.to_string()),
            SubmissionError::Persistence(store) => {
                Self::new(status, "Failed to create project").with_details(store.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = Map::new();
        body.insert("error".to_string(), Value::String(self.error));
        if let Some(details) = self.details {
            body.insert("details".to_string(), Value::String(details));
        }
        body.extend(self.fields);
        (self.status, Json(Value::Object(body))).into_response()
    }
}

/// `10485760` → `10MB`, `65536` → `64KB`.
fn human_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * 1024;
    if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else if bytes >= KB && bytes % KB == 0 {
        format!("{}KB", bytes / KB)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Server lifecycle errors.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Listener could not be bound
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server stopped with an I/O error
    #[error("server error: {0}")]
    Serve(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use bc_04_submission::ValidationError;

    #[test]
    fn test_submission_error_mapping() {
        let input: ApiError = SubmissionError::from(ValidationError::MissingEvidence).into();
        assert_eq!(input.status, StatusCode::BAD_REQUEST);
        assert_eq!(input.error, "Image file is required");

        let persistence: ApiError =
            SubmissionError::Persistence(StoreError::Io("disk full".to_string())).into();
        assert_eq!(persistence.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(persistence.error, "Failed to create project");
        assert!(persistence.details.unwrap().contains("disk full"));
    }

    #[test]
    fn test_ledger_error_mapping() {
        let disabled = ApiError::from_ledger("x", &LedgerError::Disabled("no rpc".to_string()));
        assert_eq!(disabled.status, StatusCode::SERVICE_UNAVAILABLE);

        let denied = ApiError::from_ledger("x", &LedgerError::Unauthorized("role".to_string()));
        assert_eq!(denied.status, StatusCode::FORBIDDEN);

        let down = ApiError::from_ledger("Failed", &LedgerError::Network("refused".to_string()));
        assert_eq!(down.status, StatusCode::BAD_GATEWAY);
        assert_eq!(down.error, "Failed");
    }

    #[test]
    fn test_store_error_mapping() {
        let missing = ApiError::from_store(&StoreError::NotFound("abc".to_string()));
        assert_eq!(missing.status, StatusCode::NOT_FOUND);

        let corrupt = ApiError::from_store(&StoreError::Corrupted {
            id: "abc".to_string(),
            reason: "bad".to_string(),
        });
        assert_eq!(corrupt.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_file_too_large_message() {
        assert_eq!(
            ApiError::file_too_large(10 * 1024 * 1024).error,
            "File too large. Maximum size is 10MB."
        );
        assert_eq!(ApiError::file_too_large(64 * 1024).error, "File too large. Maximum size is 64KB.");
        assert_eq!(ApiError::file_too_large(1000).error, "File too large. Maximum size is 1000 bytes.");
    }
}
