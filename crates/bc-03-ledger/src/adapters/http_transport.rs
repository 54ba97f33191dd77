//! JSON-RPC over HTTP using reqwest.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::domain::LedgerError;
use crate::ports::RpcTransport;

/// JSON-RPC request structure.
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Value,
    id: u64,
}

/// JSON-RPC response structure.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// HTTP JSON-RPC transport to an EVM node.
#[derive(Debug)]
pub struct HttpRpcTransport {
    http_client: reqwest::Client,
    rpc_url: String,
    request_id: AtomicU64,
}

impl HttpRpcTransport {
    /// Create a transport; each HTTP request is bounded by `request_timeout`.
    pub fn new(rpc_url: impl Into<String>, request_timeout: Duration) -> Self {
        // reqwest::Client::new() is the infallible fallback.
        let http_client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client,
            rpc_url: rpc_url.into(),
            request_id: AtomicU64::new(1),
        }
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

fn classify_transport_error(method: &str, err: reqwest::Error) -> LedgerError {
    if err.is_timeout() {
        LedgerError::Timeout(format!("{}: {}", method, err))
    } else if err.is_decode() {
        LedgerError::MalformedResponse(format!("{}: {}", method, err))
    } else {
        LedgerError::Network(format!("{}: {}", method, err))
    }
}

#[async_trait]
impl RpcTransport for HttpRpcTransport {
    async fn call(&self, method: &str, params: Value) -> Result<Value, LedgerError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        trace!("[bc-03] rpc #{} {}", id, method);

        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
        };

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| classify_transport_error(method, e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LedgerError::Unauthorized(format!("{}: HTTP {}", method, status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_transport_error(method, e))?;

        let rpc_response: JsonRpcResponse = serde_json::from_slice(&body).map_err(|e| {
            if status.is_success() {
                LedgerError::MalformedResponse(format!("{}: {}", method, e))
            } else {
                LedgerError::Network(format!("{}: HTTP {}", method, status))
            }
        })?;

        if let Some(error) = rpc_response.error {
            return Err(LedgerError::from_rpc_error(error.code, &error.message));
        }

        // A JSON null result (e.g. a receipt not mined yet) is a valid answer.
        Ok(rpc_response.result.unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method: "eth_chainId",
            params: json!([]),
            id: 7,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"jsonrpc": "2.0", "method": "eth_chainId", "params": [], "id": 7}));
    }

    #[test]
    fn test_response_null_result_and_error() {
        let ok: JsonRpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":null}"#).unwrap();
        assert!(ok.result.is_none() && ok.error.is_none());

        let err: JsonRpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"execution reverted"}}"#,
        )
        .unwrap();
        assert_eq!(err.error.unwrap().code, -32000);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        // Port 9 (discard) on localhost is not expected to run an HTTP server.
        let transport = HttpRpcTransport::new("http://127.0.0.1:9", Duration::from_secs(2));
        let err = transport.call("eth_chainId", json!([])).await.unwrap_err();
        assert!(matches!(err, LedgerError::Network(_) | LedgerError::Timeout(_)));
    }
}
