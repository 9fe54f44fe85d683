//! 数据存储层
//!
//! [`Storage`] 是不经过访问策略的可信接口，只由 [`guarded::GuardedStore`]、
//! [`crate::policy::RoleDirectory`] 和身份认证流程直接使用。
//! 面向请求的读写一律通过 `GuardedStore`。

use std::sync::Arc;

use uuid::Uuid;

use crate::errors::Result;
use crate::models::{
    assignments::{
        entities::Assignment, requests::AssignmentListQuery, responses::AssignmentListResponse,
    },
    auth::Account,
    profiles::entities::Profile,
    roles::entities::RoleAssignment,
    submissions::{
        entities::Submission, requests::SubmissionListQuery, responses::SubmissionListResponse,
    },
};

pub mod blob;
pub mod guarded;
pub mod sea_orm_storage;

pub use blob::{BlobStore, LocalBlobStore};
pub use guarded::GuardedStore;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账号管理方法
    // 创建账号并在同一事务中生成个人资料
    async fn create_account(
        &self,
        account: Account,
        full_name: Option<String>,
    ) -> Result<(Account, Profile)>;
    async fn get_account_by_id(&self, id: Uuid) -> Result<Option<Account>>;
    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>>;
    // 删除账号，资料、角色、作业与提交级联删除
    async fn delete_account(&self, id: Uuid) -> Result<bool>;

    /// 个人资料方法
    async fn insert_profile(&self, profile: &Profile) -> Result<Profile>;
    async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>>;
    async fn list_profiles(&self) -> Result<Vec<Profile>>;
    // 只写入与 existing 相比变化的列
    async fn update_profile(&self, existing: &Profile, proposed: &Profile) -> Result<Profile>;

    /// 角色方法
    async fn insert_role(&self, role: &RoleAssignment) -> Result<RoleAssignment>;
    async fn get_role_by_user_id(&self, user_id: Uuid) -> Result<Option<RoleAssignment>>;

    /// 作业方法
    async fn insert_assignment(&self, assignment: &Assignment) -> Result<Assignment>;
    async fn get_assignment(&self, id: Uuid) -> Result<Option<Assignment>>;
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    async fn update_assignment(
        &self,
        existing: &Assignment,
        proposed: &Assignment,
    ) -> Result<Assignment>;
    async fn delete_assignment(&self, id: Uuid) -> Result<bool>;

    /// 提交方法
    async fn insert_submission(&self, submission: &Submission) -> Result<Submission>;
    async fn get_submission(&self, id: Uuid) -> Result<Option<Submission>>;
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 状态已被并发修改时返回 None
    async fn update_submission(
        &self,
        existing: &Submission,
        proposed: &Submission,
    ) -> Result<Option<Submission>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
