//! 作业实体

use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set, Unchanged};

use crate::models::assignments::entities::Assignment;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub subject: String,
    pub due_date: i64,
    pub max_score: i32,
    pub created_by: Uuid,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::CreatedBy",
        to = "super::accounts::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    // 更新时无条件刷新 updated_at，忽略调用方传入的值
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.updated_at = Set(chrono::Utc::now().timestamp());
        }
        Ok(self)
    }
}

impl Model {
    pub fn into_assignment(self) -> Assignment {
        Assignment {
            id: self.id,
            title: self.title,
            description: self.description,
            subject: self.subject,
            due_date: super::to_datetime(self.due_date),
            max_score: self.max_score,
            created_by: self.created_by,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}

impl From<&Assignment> for ActiveModel {
    fn from(assignment: &Assignment) -> Self {
        ActiveModel {
            id: Set(assignment.id),
            title: Set(assignment.title.clone()),
            description: Set(assignment.description.clone()),
            subject: Set(assignment.subject.clone()),
            due_date: Set(assignment.due_date.timestamp()),
            max_score: Set(assignment.max_score),
            created_by: Set(assignment.created_by),
            created_at: Set(assignment.created_at.timestamp()),
            updated_at: Set(assignment.updated_at.timestamp()),
        }
    }
}

impl ActiveModel {
    /// 只包含变化列的更新模型；创建者不可变，`updated_at` 交给 `before_save`
    pub fn changes(existing: &Assignment, proposed: &Assignment) -> Self {
        let mut model = Self {
            id: Unchanged(existing.id),
            ..<Self as ActiveModelBehavior>::new()
        };
        super::set_if_changed(&mut model.title, existing.title.clone(), proposed.title.clone());
        super::set_if_changed(
            &mut model.description,
            existing.description.clone(),
            proposed.description.clone(),
        );
        super::set_if_changed(
            &mut model.subject,
            existing.subject.clone(),
            proposed.subject.clone(),
        );
        super::set_if_changed(
            &mut model.due_date,
            existing.due_date.timestamp(),
            proposed.due_date.timestamp(),
        );
        super::set_if_changed(&mut model.max_score, existing.max_score, proposed.max_score);
        model
    }
}
