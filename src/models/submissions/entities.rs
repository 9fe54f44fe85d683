use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

// 提交状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "api/submission.ts")]
pub enum SubmissionStatus {
    Pending,   // 待提交
    Submitted, // 已提交，可由学生替换文件
    Graded,    // 已评分，学生不可再修改
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<SubmissionStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的提交状态: '{s}'. 支持的状态: pending, submitted, graded"
            ))
        })
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Pending => write!(f, "pending"),
            SubmissionStatus::Submitted => write!(f, "submitted"),
            SubmissionStatus::Graded => write!(f, "graded"),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SubmissionStatus::Pending),
            "submitted" => Ok(SubmissionStatus::Submitted),
            "graded" => Ok(SubmissionStatus::Graded),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

// 提交实体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "api/submission.ts")]
pub struct Submission {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub student_id: Uuid,
    /// 对象存储中的路径：`<student_id>/<assignment_id>/<name>`
    pub file_url: String,
    pub file_name: String,
    pub submitted_at: DateTime<Utc>,
    pub grade: Option<i32>,
    pub feedback: Option<String>,
    pub status: SubmissionStatus,
    pub graded_at: Option<DateTime<Utc>>,
}

impl Submission {
    /// 新提交，初始状态为 submitted
    pub fn new(assignment_id: Uuid, student_id: Uuid, file_url: String, file_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            assignment_id,
            student_id,
            file_url,
            file_name,
            submitted_at: Utc::now(),
            grade: None,
            feedback: None,
            status: SubmissionStatus::Submitted,
            graded_at: None,
        }
    }

    /// 学生替换提交文件
    pub fn with_replaced_file(&self, file_url: String, file_name: String) -> Self {
        Self {
            file_url,
            file_name,
            submitted_at: Utc::now(),
            ..self.clone()
        }
    }

    /// 教师评分：写入分数与评语，状态置为 graded 并记录评分时间
    pub fn with_grade(&self, grade: i32, feedback: Option<String>) -> Self {
        Self {
            grade: Some(grade),
            feedback: feedback.or_else(|| self.feedback.clone()),
            status: SubmissionStatus::Graded,
            graded_at: Some(Utc::now()),
            ..self.clone()
        }
    }

    /// 教师调整状态或评语
    ///
    /// 进入 graded 时记录评分时间，离开 graded 时清除。
    pub fn with_review(&self, status: Option<SubmissionStatus>, feedback: Option<String>) -> Self {
        let status = status.unwrap_or(self.status);
        let graded_at = match (self.status, status) {
            (SubmissionStatus::Graded, SubmissionStatus::Graded) => self.graded_at,
            (_, SubmissionStatus::Graded) => Some(Utc::now()),
            _ => None,
        };

        Self {
            status,
            graded_at,
            feedback: feedback.or_else(|| self.feedback.clone()),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submitted() -> Submission {
        Submission::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "s/a/1_essay.pdf".to_string(),
            "essay.pdf".to_string(),
        )
    }

    #[test]
    fn test_new_submission_is_submitted() {
        let submission = submitted();
        assert_eq!(submission.status, SubmissionStatus::Submitted);
        assert!(submission.grade.is_none());
        assert!(submission.graded_at.is_none());
    }

    #[test]
    fn test_grading_stamps_graded_at() {
        let graded = submitted().with_grade(88, Some("Good work".to_string()));
        assert_eq!(graded.status, SubmissionStatus::Graded);
        assert_eq!(graded.grade, Some(88));
        assert_eq!(graded.feedback.as_deref(), Some("Good work"));
        assert!(graded.graded_at.is_some());
    }

    #[test]
    fn test_review_out_of_graded_clears_timestamp() {
        let graded = submitted().with_grade(70, None);
        let reopened = graded.with_review(Some(SubmissionStatus::Submitted), None);
        assert_eq!(reopened.status, SubmissionStatus::Submitted);
        assert!(reopened.graded_at.is_none());
        assert_eq!(reopened.grade, Some(70));
    }

    #[test]
    fn test_review_keeps_existing_graded_at() {
        let graded = submitted().with_grade(70, None);
        let commented = graded.with_review(None, Some("See margin notes".to_string()));
        assert_eq!(commented.graded_at, graded.graded_at);
        assert_eq!(commented.feedback.as_deref(), Some("See margin notes"));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("graded".parse::<SubmissionStatus>(), Ok(SubmissionStatus::Graded));
        assert!("late".parse::<SubmissionStatus>().is_err());
    }
}
