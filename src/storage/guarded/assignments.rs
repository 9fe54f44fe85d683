use uuid::Uuid;

use super::GuardedStore;
use crate::errors::{AppError, Result};
use crate::models::assignments::{
    entities::Assignment,
    requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
    responses::AssignmentListResponse,
};
use crate::policy::{Actor, Row, Verb};

impl GuardedStore {
    pub async fn list_assignments(
        &self,
        actor: &Actor,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let mut response = self.storage.list_assignments_with_pagination(query).await?;
        response
            .items
            .retain(|assignment| self.is_visible(actor, Row::Assignment(assignment)));
        Ok(response)
    }

    pub async fn get_assignment(&self, actor: &Actor, id: Uuid) -> Result<Assignment> {
        let assignment = self.storage.get_assignment(id).await?;
        self.visible_or_not_found(actor, assignment, |a| Row::Assignment(a), "Assignment")
    }

    /// 以调用方为创建者发布作业
    pub async fn create_assignment(
        &self,
        actor: &Actor,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        req.validate().map_err(AppError::validation)?;
        let assignment = Assignment::from_request(actor.id, req);

        self.check(actor, Verb::Insert, Row::Assignment(&assignment))?;
        self.storage.insert_assignment(&assignment).await
    }

    /// 插入调用方构造好的作业行，创建者字段按原样检查
    pub async fn insert_assignment(&self, actor: &Actor, assignment: &Assignment) -> Result<Assignment> {
        self.check(actor, Verb::Insert, Row::Assignment(assignment))?;
        self.storage.insert_assignment(assignment).await
    }

    pub async fn update_assignment(
        &self,
        actor: &Actor,
        id: Uuid,
        req: UpdateAssignmentRequest,
    ) -> Result<Assignment> {
        req.validate().map_err(AppError::validation)?;
        let existing = self.get_assignment(actor, id).await?;
        let proposed = existing.with_update(req);

        self.check_update(actor, Row::Assignment(&existing), Row::Assignment(&proposed))?;
        self.storage.update_assignment(&existing, &proposed).await
    }

    /// 删除作业，相关提交记录级联删除
    pub async fn delete_assignment(&self, actor: &Actor, id: Uuid) -> Result<()> {
        let existing = self.get_assignment(actor, id).await?;

        self.check(actor, Verb::Delete, Row::Assignment(&existing))?;
        if !self.storage.delete_assignment(id).await? {
            return Err(AppError::not_found("Assignment not found"));
        }
        Ok(())
    }
}
