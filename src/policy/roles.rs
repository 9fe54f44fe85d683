use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use super::Actor;
use crate::cache::{CacheResult, ObjectCache};
use crate::errors::Result;
use crate::models::roles::entities::Role;
use crate::storage::Storage;

/// 角色查询
///
/// 直接读取存储层，不经过访问策略，因此可以在策略谓词之外安全地调用。
/// 角色分配后不会变更，只缓存已存在的角色。
#[derive(Clone)]
pub struct RoleDirectory {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
}

impl RoleDirectory {
    pub fn new(storage: Arc<dyn Storage>, cache: Arc<dyn ObjectCache>) -> Self {
        Self { storage, cache }
    }

    fn cache_key(user_id: Uuid) -> String {
        format!("role:{user_id}")
    }

    /// 身份的角色，未分配时为 `None`
    pub async fn role_of(&self, user_id: Uuid) -> Result<Option<Role>> {
        let key = Self::cache_key(user_id);

        if let CacheResult::Found(raw) = self.cache.get_raw(&key).await {
            match raw.parse::<Role>() {
                Ok(role) => return Ok(Some(role)),
                Err(e) => {
                    debug!("Discarding cached role for {}: {}", user_id, e);
                    self.cache.remove(&key).await;
                }
            }
        }

        let role = self
            .storage
            .get_role_by_user_id(user_id)
            .await?
            .map(|assignment| assignment.role);

        if let Some(role) = role {
            self.cache.insert_raw(key, role.to_string(), 0).await;
        }

        Ok(role)
    }

    pub async fn has_role(&self, user_id: Uuid, role: Role) -> Result<bool> {
        Ok(self.role_of(user_id).await? == Some(role))
    }

    /// 组装当前调用方
    pub async fn resolve_actor(&self, user_id: Uuid) -> Result<Actor> {
        Ok(Actor::new(user_id, self.role_of(user_id).await?))
    }
}
