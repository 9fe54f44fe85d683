use serde::Serialize;
use ts_rs::TS;

use super::entities::Submission;
use crate::models::PaginationInfo;

/// 提交列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "api/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<Submission>,
    pub pagination: PaginationInfo,
}
