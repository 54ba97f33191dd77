use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use shared_types::{AnalysisResult, ContentId};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::ResultStoreConfig;
use crate::domain::StoreError;
use crate::ports::inbound::{resealed, ResultStore};

/// File-backed result store.
///
/// One file per result, `<directory>/<id>.json`, holding the canonical
/// serialization of the whole record. Writes go to a uniquely named temp
/// file that is then hard-linked into place. Linking never replaces an
/// existing file, so readers never observe a partial record and the first
/// writer of an id keeps its bytes.
#[derive(Debug, Clone)]
pub struct FileResultStore {
    directory: PathBuf,
}

impl FileResultStore {
    /// Open (and create if needed) the store directory.
    pub async fn open(config: &ResultStoreConfig) -> Result<Self, StoreError> {
        tokio::fs::create_dir_all(&config.directory).await?;
        info!(
            "[bc-01] 📁 Result store at {}",
            config.directory.display()
        );
        Ok(Self {
            directory: config.directory.clone(),
        })
    }

    /// Directory holding the result files.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, id: &ContentId) -> PathBuf {
        self.directory.join(format!("{}.json", id))
    }

    /// Publish `bytes` at `target` unless something is already there.
    ///
    /// Returns `false` when another writer published first.
    async fn publish(&self, target: &Path, bytes: &[u8]) -> Result<bool, StoreError> {
        let temp_path = self
            .directory
            .join(format!(".{}.tmp", Uuid::new_v4().simple()));

        let linked = async {
            let mut file = tokio::fs::File::create(&temp_path).await?;
            file.write_all(bytes).await?;
            file.sync_all().await?;
            match tokio::fs::hard_link(&temp_path, target).await {
                Ok(()) => Ok(true),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
                Err(e) => Err(e),
            }
        }
        .await;

        if let Err(e) = tokio::fs::remove_file(&temp_path).await {
            if e.kind() != ErrorKind::NotFound {
                warn!("[bc-01] Could not remove {}: {}", temp_path.display(), e);
            }
        }
        Ok(linked?)
    }
}

#[async_trait]
impl ResultStore for FileResultStore {
    async fn put(&self, result: &AnalysisResult) -> Result<ContentId, StoreError> {
        let sealed = resealed(result);
        let path = self.path_for(&sealed.id);

        if tokio::fs::try_exists(&path).await? {
            debug!("[bc-01] Result {} already stored", sealed.id);
            return Ok(sealed.id);
        }

        if self.publish(&path, &sealed.canonical_bytes()).await? {
            debug!("[bc-01] Stored result {}", sealed.id);
        } else {
            debug!("[bc-01] Result {} stored concurrently, keeping first", sealed.id);
        }
        Ok(sealed.id)
    }

    async fn get(&self, id: &ContentId) -> Result<AnalysisResult, StoreError> {
        let bytes = match tokio::fs::read(self.path_for(id)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let result: AnalysisResult =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupted {
                id: id.to_string(),
                reason: e.to_string(),
            })?;

        if &result.id != id || !result.verify() {
            warn!("[bc-01] ⚠️ Digest mismatch for stored result {}", id);
            return Err(StoreError::Corrupted {
                id: id.to_string(),
                reason: "content does not hash to its identifier".to_string(),
            });
        }

        Ok(result)
    }

    async fn contains(&self, id: &ContentId) -> Result<bool, StoreError> {
        Ok(tokio::fs::try_exists(self.path_for(id)).await?)
    }
}
