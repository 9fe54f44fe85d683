//! 角色分配实体

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use crate::models::roles::entities::{Role, RoleAssignment};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::UserId",
        to = "super::accounts::Column::Id"
    )]
    Account,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 数据库中无法识别的角色值视为无角色
    pub fn into_role_assignment(self) -> Option<RoleAssignment> {
        let role = self.role.parse::<Role>().ok()?;
        Some(RoleAssignment {
            id: self.id,
            user_id: self.user_id,
            role,
            created_at: super::to_datetime(self.created_at),
        })
    }
}

impl From<&RoleAssignment> for ActiveModel {
    fn from(assignment: &RoleAssignment) -> Self {
        ActiveModel {
            id: Set(assignment.id),
            user_id: Set(assignment.user_id),
            role: Set(assignment.role.to_string()),
            created_at: Set(assignment.created_at.timestamp()),
        }
    }
}
