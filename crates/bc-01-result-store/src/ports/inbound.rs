//! # Inbound Ports
//!
//! API trait defining what the Result Store can do.

use async_trait::async_trait;
use shared_types::{AnalysisResult, ContentId};

use crate::domain::StoreError;

/// Content-addressed result store - inbound port.
///
/// Implementations must be safe for concurrent use: the same result may be
/// stored by several submissions at once.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Persist a result under its content address.
    ///
    /// The identifier is recomputed from the content; the returned id is the
    /// one the result is retrievable under. Storing the same content twice is
    /// a no-op that returns the same id.
    async fn put(&self, result: &AnalysisResult) -> Result<ContentId, StoreError>;

    /// Fetch a result by identifier.
    async fn get(&self, id: &ContentId) -> Result<AnalysisResult, StoreError>;

    /// Check whether a result is stored.
    async fn contains(&self, id: &ContentId) -> Result<bool, StoreError>;

    /// Fetch by an untrusted identifier string.
    ///
    /// Malformed identifiers are reported as `NotFound`.
    async fn lookup(&self, raw_id: &str) -> Result<AnalysisResult, StoreError> {
        let id = ContentId::parse(raw_id).map_err(|_| StoreError::NotFound(raw_id.to_string()))?;
        self.get(&id).await
    }
}

/// Reseal a result so its id matches its content.
pub(crate) fn resealed(result: &AnalysisResult) -> AnalysisResult {
    AnalysisResult::seal(result.content.clone(), result.generated_at)
}
