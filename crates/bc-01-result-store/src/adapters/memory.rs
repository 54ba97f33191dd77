use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{AnalysisResult, ContentId};

use crate::domain::StoreError;
use crate::ports::inbound::{resealed, ResultStore};

/// In-memory result store for unit tests and ephemeral deployments.
#[derive(Default)]
pub struct InMemoryResultStore {
    results: RwLock<HashMap<ContentId, AnalysisResult>>,
    fail_writes: AtomicBool,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose writes always fail with an I/O error.
    pub fn failing() -> Self {
        let store = Self::default();
        store.set_fail_writes(true);
        store
    }

    /// Toggle simulated write failures.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of distinct results held.
    pub fn len(&self) -> usize {
        self.results.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.read().is_empty()
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn put(&self, result: &AnalysisResult) -> Result<ContentId, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Io("simulated write failure".to_string()));
        }
        let sealed = resealed(result);
        let id = sealed.id.clone();
        self.results.write().entry(id.clone()).or_insert(sealed);
        Ok(id)
    }

    async fn get(&self, id: &ContentId) -> Result<AnalysisResult, StoreError> {
        self.results
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn contains(&self, id: &ContentId) -> Result<bool, StoreError> {
        Ok(self.results.read().contains_key(id))
    }
}
