use uuid::Uuid;

use super::GuardedStore;
use crate::errors::Result;
use crate::models::roles::entities::{Role, RoleAssignment};
use crate::policy::{Actor, Row, Verb};

impl GuardedStore {
    /// 读取某身份的角色分配，只有本人可见
    pub async fn get_role_assignment(&self, actor: &Actor, user_id: Uuid) -> Result<RoleAssignment> {
        let assignment = self.storage.get_role_by_user_id(user_id).await?;
        self.visible_or_not_found(
            actor,
            assignment,
            |r| Row::RoleAssignment(r),
            "Role assignment",
        )
    }

    /// 为身份分配角色
    ///
    /// 只允许本人插入；重复分配由唯一约束拒绝。
    pub async fn assign_role(
        &self,
        actor: &Actor,
        user_id: Uuid,
        role: Role,
    ) -> Result<RoleAssignment> {
        let assignment = RoleAssignment::new(user_id, role);

        self.check(actor, Verb::Insert, Row::RoleAssignment(&assignment))?;
        self.storage.insert_role(&assignment).await
    }
}
