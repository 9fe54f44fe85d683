use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, QueryOrder};
use uuid::Uuid;

use super::SeaOrmStorage;
use crate::entity::profiles::{ActiveModel, Column, Entity as Profiles};
use crate::errors::{AppError, Result};
use crate::models::profiles::entities::Profile;

impl SeaOrmStorage {
    pub async fn insert_profile_impl(&self, profile: &Profile) -> Result<Profile> {
        let result = ActiveModel::from(profile)
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_db(e, "创建个人资料失败"))?;

        Ok(result.into_profile())
    }

    pub async fn get_profile_impl(&self, id: Uuid) -> Result<Option<Profile>> {
        let result = Profiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::from_db(e, "查询个人资料失败"))?;

        Ok(result.map(|m| m.into_profile()))
    }

    pub async fn list_profiles_impl(&self) -> Result<Vec<Profile>> {
        let result = Profiles::find()
            .order_by_asc(Column::FullName)
            .all(&self.db)
            .await
            .map_err(|e| AppError::from_db(e, "查询个人资料列表失败"))?;

        Ok(result.into_iter().map(|m| m.into_profile()).collect())
    }

    /// 更新个人资料，只写入变化的列，`updated_at` 由实体钩子刷新
    pub async fn update_profile_impl(
        &self,
        existing: &Profile,
        proposed: &Profile,
    ) -> Result<Profile> {
        let result = ActiveModel::changes(existing, proposed)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => {
                    AppError::not_found(format!("Profile {} not found", existing.id))
                }
                e => AppError::from_db(e, "更新个人资料失败"),
            })?;

        Ok(result.into_profile())
    }
}
