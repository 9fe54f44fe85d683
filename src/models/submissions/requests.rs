use serde::Deserialize;
use ts_rs::TS;
use uuid::Uuid;

use super::entities::SubmissionStatus;
use crate::models::common::pagination::PaginationQuery;

/// 教师评分请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "api/submission.ts")]
pub struct GradeSubmissionRequest {
    pub grade: i32,
    pub feedback: Option<String>,
}

/// 教师调整提交状态或评语
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "api/submission.ts")]
pub struct ReviewSubmissionRequest {
    pub status: Option<SubmissionStatus>,
    pub feedback: Option<String>,
}

/// 提交列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "api/submission.ts")]
pub struct SubmissionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub assignment_id: Option<Uuid>,
    pub status: Option<SubmissionStatus>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub assignment_id: Option<Uuid>,
    pub student_id: Option<Uuid>,
    pub status: Option<SubmissionStatus>,
}

impl From<SubmissionListParams> for SubmissionListQuery {
    fn from(params: SubmissionListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            assignment_id: params.assignment_id,
            student_id: None,
            status: params.status,
        }
    }
}
