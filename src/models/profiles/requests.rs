use serde::Deserialize;
use ts_rs::TS;

/// 创建个人资料请求（资料缺失时由本人补建）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "api/profile.ts")]
pub struct CreateProfileRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

/// 更新个人资料请求，`updated_at` 由服务端维护
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "api/profile.ts")]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
}
