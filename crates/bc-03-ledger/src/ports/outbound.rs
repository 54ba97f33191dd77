//! # Outbound Ports
//!
//! JSON-RPC transport to the ledger node.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::domain::LedgerError;

/// JSON-RPC transport - outbound port.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Invoke `method` with positional `params`, returning the `result` member.
    async fn call(&self, method: &str, params: Value) -> Result<Value, LedgerError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Scripted transport for testing.
///
/// Responses are queued per method. The last queued response of a method is
/// repeated once the queue is down to one entry.
#[derive(Debug, Default)]
pub struct MockRpcTransport {
    responses: Mutex<HashMap<String, VecDeque<Result<Value, LedgerError>>>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockRpcTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful result for `method`.
    pub fn respond(&self, method: &str, result: Value) -> &Self {
        self.push(method, Ok(result))
    }

    /// Queue a failure for `method`.
    pub fn fail(&self, method: &str, error: LedgerError) -> &Self {
        self.push(method, Err(error))
    }

    fn push(&self, method: &str, response: Result<Value, LedgerError>) -> &Self {
        self.responses
            .lock()
            .entry(method.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// Number of calls made to `method`.
    pub fn call_count(&self, method: &str) -> usize {
        self.calls.lock().iter().filter(|(m, _)| m == method).count()
    }

    /// Params of every call made to `method`, in order.
    pub fn params_of(&self, method: &str) -> Vec<Value> {
        self.calls
            .lock()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, p)| p.clone())
            .collect()
    }
}

#[async_trait]
impl RpcTransport for MockRpcTransport {
    async fn call(&self, method: &str, params: Value) -> Result<Value, LedgerError> {
        self.calls.lock().push((method.to_string(), params));
        let mut responses = self.responses.lock();
        let queue = responses.get_mut(method).ok_or_else(|| {
            LedgerError::Rejected(format!("rpc error -32601: method {} not scripted", method))
        })?;
        let response = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        response.unwrap_or_else(|| {
            Err(LedgerError::Rejected(format!("no response left for {}", method)))
        })
    }
}
