use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use super::BlobStore;
use crate::errors::{AppError, Result};
use crate::models::files::entities::BlobPath;

/// 以本地目录为根的对象存储
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            AppError::blob_store(format!(
                "Failed to create upload directory {}: {e}",
                root.display()
            ))
        })?;
        Ok(Self { root })
    }

    fn resolve(&self, path: &BlobPath) -> PathBuf {
        // BlobPath 已拒绝 `..` 与空段
        path.as_str()
            .split('/')
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, path: &BlobPath, data: &[u8]) -> Result<()> {
        let target = self.resolve(path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(AppError::object_exists(format!("Object already exists: {path}")));
            }
            Err(e) => return Err(AppError::blob_store(format!("Failed to create {path}: {e}"))),
        };

        if let Err(e) = file.write_all(data).await {
            drop(file);
            let _ = tokio::fs::remove_file(&target).await;
            return Err(AppError::blob_store(format!("Failed to write {path}: {e}")));
        }
        file.flush().await?;

        debug!("Stored object {} ({} bytes)", path, data.len());
        Ok(())
    }

    async fn get(&self, path: &BlobPath) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.resolve(path)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::blob_store(format!("Failed to read {path}: {e}"))),
        }
    }

    async fn remove(&self, path: &BlobPath) -> Result<bool> {
        match tokio::fs::remove_file(self.resolve(path)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => {
                warn!("Failed to remove object {}: {}", path, e);
                Err(AppError::blob_store(format!("Failed to remove {path}: {e}")))
            }
        }
    }
}
