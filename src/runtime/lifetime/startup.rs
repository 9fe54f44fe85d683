use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::policy::RoleDirectory;
use crate::storage::{BlobStore, GuardedStore, LocalBlobStore, Storage};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub roles: RoleDirectory,
    pub store: GuardedStore,
}

async fn build_cache(name: &str) -> Result<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name).ok_or_else(|| {
        AppError::cache_plugin_not_found(format!("Cache backend '{name}' not found in registry"))
    })?;
    constructor().await.map(Arc::from)
}

/// 按配置创建缓存，失败时回退到内存缓存
pub async fn create_cache(cache_type: &str) -> Result<Arc<dyn ObjectCache>> {
    warn!("Attempting to create {} cache backend", cache_type);

    match build_cache(cache_type).await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", cache_type);
            Ok(cache)
        }
        Err(e) if cache_type != "moka" => {
            warn!("Failed to create {} cache: {}", cache_type, e);
            warn!("Falling back to memory cache");
            let cache = build_cache("moka").await?;
            warn!("Successfully created fallback Moka (in-memory) cache backend");
            Ok(cache)
        }
        Err(e) => Err(e),
    }
}

/// 准备服务器启动的上下文
/// 包括存储、缓存、对象存储与访问策略视图
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let config = AppConfig::get();

    // 重复安装时返回 Err，说明已有可用的 provider
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    let cache = create_cache(&config.cache.cache_type).await?;
    warn!("Cache backend initialized");

    let blobs: Arc<dyn BlobStore> = Arc::new(LocalBlobStore::new(&config.upload.dir).await?);
    warn!("Blob store ready at {}", config.upload.dir);

    let roles = RoleDirectory::new(storage.clone(), cache);
    let store = GuardedStore::new(storage.clone(), blobs);

    Ok(StartupContext {
        storage,
        roles,
        store,
    })
}
