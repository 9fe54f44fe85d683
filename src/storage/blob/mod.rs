//! 提交文件的对象存储

mod local;

pub use local::LocalBlobStore;

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::files::entities::BlobPath;

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// 写入新对象，路径已存在时返回冲突错误，不覆盖
    async fn put(&self, path: &BlobPath, data: &[u8]) -> Result<()>;
    async fn get(&self, path: &BlobPath) -> Result<Option<Vec<u8>>>;
    /// 删除对象，返回是否确实存在过
    async fn remove(&self, path: &BlobPath) -> Result<bool>;
}
