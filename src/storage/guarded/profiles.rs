use uuid::Uuid;

use super::GuardedStore;
use crate::errors::{AppError, Result};
use crate::models::profiles::{
    entities::Profile,
    requests::{CreateProfileRequest, UpdateProfileRequest},
};
use crate::policy::{Actor, Row, Verb};

impl GuardedStore {
    /// 可见的个人资料：教师看到全部，其他人只看到自己
    pub async fn list_profiles(&self, actor: &Actor) -> Result<Vec<Profile>> {
        let candidates = if actor.is_teacher() {
            self.storage.list_profiles().await?
        } else {
            self.storage.get_profile(actor.id).await?.into_iter().collect()
        };

        Ok(candidates
            .into_iter()
            .filter(|profile| self.is_visible(actor, Row::Profile(profile)))
            .collect())
    }

    pub async fn get_profile(&self, actor: &Actor, id: Uuid) -> Result<Profile> {
        let profile = self.storage.get_profile(id).await?;
        self.visible_or_not_found(actor, profile, |p| Row::Profile(p), "Profile")
    }

    /// 本人补建资料，已存在时返回冲突
    pub async fn insert_profile(
        &self,
        actor: &Actor,
        req: CreateProfileRequest,
    ) -> Result<Profile> {
        let email = match req.email {
            Some(email) => email.trim().to_lowercase(),
            None => self
                .storage
                .get_account_by_id(actor.id)
                .await?
                .map(|account| account.email)
                .ok_or_else(|| AppError::reference(format!("Account {} not found", actor.id)))?,
        };
        let profile = Profile::bootstrap(actor.id, req.full_name.as_deref(), &email);

        self.check(actor, Verb::Insert, Row::Profile(&profile))?;
        self.storage.insert_profile(&profile).await
    }

    pub async fn update_profile(
        &self,
        actor: &Actor,
        id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<Profile> {
        let existing = self.get_profile(actor, id).await?;
        let proposed = existing.with_update(req);

        self.check_update(actor, Row::Profile(&existing), Row::Profile(&proposed))?;
        self.storage.update_profile(&existing, &proposed).await
    }
}
