use super::GuardedStore;
use crate::errors::{AppError, Result};
use crate::models::files::entities::BlobPath;
use crate::policy::{Actor, Row};

impl GuardedStore {
    /// 按对象存储读取策略下载文件
    pub async fn read_file(&self, actor: &Actor, raw_path: &str) -> Result<(BlobPath, Vec<u8>)> {
        let path = BlobPath::parse(raw_path)?;
        if !self.is_visible(actor, Row::StoredFile(&path)) {
            return Err(AppError::not_found(format!("File not found: {path}")));
        }

        let data = self
            .blobs
            .get(&path)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File not found: {path}")))?;
        Ok((path, data))
    }
}
