use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::requests::UpdateProfileRequest;

/// 未提供显示名称时使用的占位名称
pub const DEFAULT_FULL_NAME: &str = "User";

// 个人资料，主键与身份 ID 相同
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "api/profile.ts")]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Profile {
    /// 账号创建时自动生成的资料
    pub fn bootstrap(id: Uuid, full_name: Option<&str>, email: &str) -> Self {
        let now = chrono::Utc::now();
        let full_name = full_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FULL_NAME);

        Self {
            id,
            full_name: full_name.to_string(),
            email: email.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Profile {
    /// 应用部分更新，`updated_at` 留给存储层维护
    pub fn with_update(&self, req: UpdateProfileRequest) -> Self {
        Self {
            full_name: req
                .full_name
                .map(|n| n.trim().to_string())
                .unwrap_or_else(|| self.full_name.clone()),
            email: req
                .email
                .map(|e| e.trim().to_lowercase())
                .unwrap_or_else(|| self.email.clone()),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_uses_signup_name() {
        let id = Uuid::new_v4();
        let profile = Profile::bootstrap(id, Some("  Ada Lovelace "), "ada@example.com");
        assert_eq!(profile.id, id);
        assert_eq!(profile.full_name, "Ada Lovelace");
        assert_eq!(profile.email, "ada@example.com");
    }

    #[test]
    fn test_bootstrap_falls_back_to_placeholder() {
        let profile = Profile::bootstrap(Uuid::new_v4(), Some("   "), "x@example.com");
        assert_eq!(profile.full_name, DEFAULT_FULL_NAME);
        let profile = Profile::bootstrap(Uuid::new_v4(), None, "x@example.com");
        assert_eq!(profile.full_name, DEFAULT_FULL_NAME);
    }
}
