use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

use crate::models::profiles::entities::Profile;
use crate::models::roles::entities::Role;

// 登录/注册成功响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "api/auth.ts")]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub user_id: Uuid,
    pub role: Option<Role>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "api/auth.ts")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

// 当前登录者
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "api/auth.ts")]
pub struct MeResponse {
    pub id: Uuid,
    pub role: Option<Role>,
    pub profile: Option<Profile>,
}
