use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::requests::{CreateAssignmentRequest, UpdateAssignmentRequest};

/// 作业默认满分
pub const DEFAULT_MAX_SCORE: i32 = 100;

// 作业实体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "api/assignment.ts")]
pub struct Assignment {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub due_date: DateTime<Utc>,
    pub max_score: i32,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Assignment {
    /// 由请求构造新作业，创建者为当前调用方
    pub fn from_request(created_by: Uuid, req: CreateAssignmentRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: req.title.trim().to_string(),
            description: req.description,
            subject: req.subject.trim().to_string(),
            due_date: req.due_date,
            max_score: req.max_score.unwrap_or(DEFAULT_MAX_SCORE),
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// 应用部分更新，未提供的字段保持不变
    ///
    /// 创建者与时间戳不受请求影响。
    pub fn with_update(&self, req: UpdateAssignmentRequest) -> Self {
        Self {
            title: req
                .title
                .map(|t| t.trim().to_string())
                .unwrap_or_else(|| self.title.clone()),
            description: req.description.or_else(|| self.description.clone()),
            subject: req
                .subject
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| self.subject.clone()),
            due_date: req.due_date.unwrap_or(self.due_date),
            max_score: req.max_score.unwrap_or(self.max_score),
            ..self.clone()
        }
    }

    /// 截止时间是否已过
    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        now > self.due_date
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn essay(created_by: Uuid) -> Assignment {
        Assignment::from_request(
            created_by,
            CreateAssignmentRequest {
                title: "  Essay 1 ".to_string(),
                description: None,
                subject: "English".to_string(),
                due_date: Utc::now() + Duration::days(7),
                max_score: None,
            },
        )
    }

    #[test]
    fn test_from_request_defaults() {
        let teacher = Uuid::new_v4();
        let assignment = essay(teacher);
        assert_eq!(assignment.title, "Essay 1");
        assert_eq!(assignment.max_score, DEFAULT_MAX_SCORE);
        assert_eq!(assignment.created_by, teacher);
        assert!(!assignment.is_past_due(Utc::now()));
    }

    #[test]
    fn test_with_update_keeps_owner() {
        let assignment = essay(Uuid::new_v4());
        let updated = assignment.with_update(UpdateAssignmentRequest {
            max_score: Some(50),
            ..Default::default()
        });
        assert_eq!(updated.max_score, 50);
        assert_eq!(updated.title, assignment.title);
        assert_eq!(updated.created_by, assignment.created_by);
        assert_eq!(updated.id, assignment.id);
    }
}
