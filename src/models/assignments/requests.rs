use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;
use uuid::Uuid;

use crate::models::common::pagination::PaginationQuery;

/// 创建作业请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "api/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub due_date: DateTime<Utc>, // ISO 8601 格式，如 "2026-01-24T12:00:00Z"
    pub max_score: Option<i32>,
}

/// 更新作业请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "api/assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub max_score: Option<i32>,
}

impl CreateAssignmentRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("Title must not be empty");
        }
        if self.subject.trim().is_empty() {
            return Err("Subject must not be empty");
        }
        if matches!(self.max_score, Some(score) if score < 1) {
            return Err("Max score must be at least 1");
        }
        Ok(())
    }
}

impl UpdateAssignmentRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if matches!(self.title, Some(ref title) if title.trim().is_empty()) {
            return Err("Title must not be empty");
        }
        if matches!(self.subject, Some(ref subject) if subject.trim().is_empty()) {
            return Err("Subject must not be empty");
        }
        if matches!(self.max_score, Some(score) if score < 1) {
            return Err("Max score must be at least 1");
        }
        Ok(())
    }
}

/// 作业列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "api/assignment.ts")]
pub struct AssignmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub subject: Option<String>,
    pub created_by: Option<Uuid>,
    pub search: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct AssignmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub subject: Option<String>,
    pub created_by: Option<Uuid>,
    pub search: Option<String>,
}

impl From<AssignmentListParams> for AssignmentListQuery {
    fn from(params: AssignmentListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            subject: params.subject,
            created_by: params.created_by,
            search: params.search,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateAssignmentRequest {
        CreateAssignmentRequest {
            title: "Essay 1".to_string(),
            description: None,
            subject: "English".to_string(),
            due_date: Utc::now(),
            max_score: None,
        }
    }

    #[test]
    fn test_create_validation() {
        assert!(create_request().validate().is_ok());

        let mut blank_title = create_request();
        blank_title.title = "   ".to_string();
        assert_eq!(blank_title.validate(), Err("Title must not be empty"));

        let mut zero_score = create_request();
        zero_score.max_score = Some(0);
        assert_eq!(zero_score.validate(), Err("Max score must be at least 1"));
    }

    #[test]
    fn test_update_validation_only_checks_present_fields() {
        assert!(UpdateAssignmentRequest::default().validate().is_ok());
        let update = UpdateAssignmentRequest {
            subject: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(update.validate(), Err("Subject must not be empty"));
    }
}
