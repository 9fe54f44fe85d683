use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{AppError, Result};
use crate::models::common::pagination::normalize_page;
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::Submission, requests::SubmissionListQuery, responses::SubmissionListResponse,
    },
};

impl SeaOrmStorage {
    /// 写入提交，(assignment_id, student_id) 重复时返回冲突错误
    pub async fn insert_submission_impl(&self, submission: &Submission) -> Result<Submission> {
        let result = ActiveModel::from(submission)
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_db(e, "创建提交失败"))?;

        Ok(result.into_submission())
    }

    pub async fn get_submission_impl(&self, id: Uuid) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::from_db(e, "查询提交失败"))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 分页列出提交，最新提交在前
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Submissions::find();

        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_desc(Column::SubmittedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AppError::from_db(e, "查询提交总数失败"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AppError::from_db(e, "查询提交页数失败"))?;
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AppError::from_db(e, "查询提交列表失败"))?;

        Ok(SubmissionListResponse {
            items: items.into_iter().map(|m| m.into_submission()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 条件更新：仅当行的状态仍为 `existing.status` 时写入变化的列
    ///
    /// 状态已被并发修改（或行已删除）时返回 `None`。
    pub async fn update_submission_impl(
        &self,
        existing: &Submission,
        proposed: &Submission,
    ) -> Result<Option<Submission>> {
        let changes = ActiveModel::changes(existing, proposed);
        if changes.is_changed() {
            let result = Submissions::update_many()
                .set(changes)
                .filter(Column::Id.eq(existing.id))
                .filter(Column::Status.eq(existing.status.to_string()))
                .exec(&self.db)
                .await
                .map_err(|e| AppError::from_db(e, "更新提交失败"))?;

            if result.rows_affected == 0 {
                return Ok(None);
            }
        }

        self.get_submission_impl(existing.id).await
    }
}
