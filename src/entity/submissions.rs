//! 提交实体

use sea_orm::{Set, Unchanged};
use tracing::warn;
use sea_orm::entity::prelude::*;

use crate::models::submissions::entities::{Submission, SubmissionStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub student_id: Uuid,
    pub file_url: String,
    pub file_name: String,
    pub submitted_at: i64,
    pub grade: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub status: String,
    pub graded_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::StudentId",
        to = "super::accounts::Column::Id"
    )]
    Student,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_submission(self) -> Submission {
        Submission {
            id: self.id,
            assignment_id: self.assignment_id,
            student_id: self.student_id,
            file_url: self.file_url,
            file_name: self.file_name,
            submitted_at: super::to_datetime(self.submitted_at),
            grade: self.grade,
            feedback: self.feedback,
            status: self.status.parse::<SubmissionStatus>().unwrap_or_else(|e| {
                warn!("Submission {} has unknown status: {}", self.id, e);
                SubmissionStatus::Pending
            }),
            graded_at: self.graded_at.map(super::to_datetime),
        }
    }
}

impl From<&Submission> for ActiveModel {
    fn from(submission: &Submission) -> Self {
        ActiveModel {
            id: Set(submission.id),
            assignment_id: Set(submission.assignment_id),
            student_id: Set(submission.student_id),
            file_url: Set(submission.file_url.clone()),
            file_name: Set(submission.file_name.clone()),
            submitted_at: Set(submission.submitted_at.timestamp()),
            grade: Set(submission.grade),
            feedback: Set(submission.feedback.clone()),
            status: Set(submission.status.to_string()),
            graded_at: Set(submission.graded_at.map(|at| at.timestamp())),
        }
    }
}

impl ActiveModel {
    /// 只包含变化列的更新模型
    pub fn changes(existing: &Submission, proposed: &Submission) -> Self {
        let mut model = Self {
            id: Unchanged(existing.id),
            ..<Self as ActiveModelBehavior>::new()
        };
        super::set_if_changed(
            &mut model.file_url,
            existing.file_url.clone(),
            proposed.file_url.clone(),
        );
        super::set_if_changed(
            &mut model.file_name,
            existing.file_name.clone(),
            proposed.file_name.clone(),
        );
        super::set_if_changed(
            &mut model.submitted_at,
            existing.submitted_at.timestamp(),
            proposed.submitted_at.timestamp(),
        );
        super::set_if_changed(&mut model.grade, existing.grade, proposed.grade);
        super::set_if_changed(
            &mut model.feedback,
            existing.feedback.clone(),
            proposed.feedback.clone(),
        );
        super::set_if_changed(
            &mut model.status,
            existing.status.to_string(),
            proposed.status.to_string(),
        );
        super::set_if_changed(
            &mut model.graded_at,
            existing.graded_at.map(|at| at.timestamp()),
            proposed.graded_at.map(|at| at.timestamp()),
        );
        model
    }
}
