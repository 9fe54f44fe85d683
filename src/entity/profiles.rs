//! 个人资料实体

use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set, Unchanged};

use crate::models::profiles::entities::Profile;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::Id",
        to = "super::accounts::Column::Id"
    )]
    Account,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
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
    pub fn into_profile(self) -> Profile {
        Profile {
            id: self.id,
            full_name: self.full_name,
            email: self.email,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}

impl From<&Profile> for ActiveModel {
    fn from(profile: &Profile) -> Self {
        ActiveModel {
            id: Set(profile.id),
            full_name: Set(profile.full_name.clone()),
            email: Set(profile.email.clone()),
            created_at: Set(profile.created_at.timestamp()),
            updated_at: Set(profile.updated_at.timestamp()),
        }
    }
}

impl ActiveModel {
    /// 只包含变化列的更新模型，`updated_at` 交给 `before_save`
    pub fn changes(existing: &Profile, proposed: &Profile) -> Self {
        let mut model = Self {
            id: Unchanged(existing.id),
            ..<Self as ActiveModelBehavior>::new()
        };
        super::set_if_changed(
            &mut model.full_name,
            existing.full_name.clone(),
            proposed.full_name.clone(),
        );
        super::set_if_changed(&mut model.email, existing.email.clone(), proposed.email.clone());
        model
    }
}
