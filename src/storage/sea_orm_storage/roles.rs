use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};
use tracing::warn;
use uuid::Uuid;

use super::SeaOrmStorage;
use crate::entity::user_roles::{ActiveModel, Column, Entity as UserRoles};
use crate::errors::{AppError, Result};
use crate::models::roles::entities::RoleAssignment;

impl SeaOrmStorage {
    pub async fn insert_role_impl(&self, role: &RoleAssignment) -> Result<RoleAssignment> {
        let model = ActiveModel::from(role)
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_db(e, "分配角色失败"))?;

        model
            .into_role_assignment()
            .ok_or_else(|| AppError::database_operation("分配角色失败: 无效的角色值"))
    }

    pub async fn get_role_by_user_id_impl(&self, user_id: Uuid) -> Result<Option<RoleAssignment>> {
        let result = UserRoles::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| AppError::from_db(e, "查询角色失败"))?;

        // 库中出现未知角色值时按无角色处理
        Ok(result.and_then(|m| {
            let raw = m.role.clone();
            let assignment = m.into_role_assignment();
            if assignment.is_none() {
                warn!("Ignoring unknown role '{}' for user {}", raw, user_id);
            }
            assignment
        }))
    }
}
