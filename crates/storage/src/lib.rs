use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub public_id: String,
    pub secure_url: String,
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("upload failed: {0}")]
    Upload(#[from] std::io::Error),

    #[error("source file has no name: {0}")]
    BadSource(PathBuf),
}

/// Upload collaborator. Takes a local file written by the request plumbing and
/// returns a durable reference clients can fetch.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload(&self, local_path: &Path) -> Result<StoredObject, StorageError>;
}

/// Filesystem-backed store: copies uploads under a media root served at a
/// fixed base URL. The extension of the source file is preserved.
pub struct FsStore {
    root: PathBuf,
    base_url: String,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for FsStore {
    async fn upload(&self, local_path: &Path) -> Result<StoredObject, StorageError> {
        if local_path.file_name().is_none() {
            return Err(StorageError::BadSource(local_path.to_path_buf()));
        }

        let public_id = Uuid::new_v4().to_string();
        let object_name = match local_path.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{public_id}.{ext}"),
            None => public_id.clone(),
        };

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::copy(local_path, self.root.join(&object_name)).await?;
        tracing::debug!(object = %object_name, "stored upload");

        Ok(StoredObject {
            public_id,
            secure_url: format!("{}/{}", self.base_url.trim_end_matches('/'), object_name),
        })
    }
}
