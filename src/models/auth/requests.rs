use serde::Deserialize;
use ts_rs::TS;

use crate::models::roles::entities::Role;

// 注册请求（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "api/auth.ts")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    /// 显示名称，缺省时使用占位名称
    pub full_name: Option<String>,
    pub role: Role,
}

// 用户登录请求（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "api/auth.ts")]
pub struct LoginRequest {
    pub email: String,
    /// 密码
    pub password: String,
    /// 是否记住我
    #[serde(default)]
    pub remember_me: bool,
}
