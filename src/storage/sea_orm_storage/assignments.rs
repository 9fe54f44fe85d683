use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{AppError, Result};
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::Assignment, requests::AssignmentListQuery, responses::AssignmentListResponse,
    },
};
use crate::models::common::pagination::normalize_page;
use crate::utils::contains_pattern;

impl SeaOrmStorage {
    pub async fn insert_assignment_impl(&self, assignment: &Assignment) -> Result<Assignment> {
        let result = ActiveModel::from(assignment)
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_db(e, "创建作业失败"))?;

        Ok(result.into_assignment())
    }

    pub async fn get_assignment_impl(&self, id: Uuid) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::from_db(e, "查询作业失败"))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 分页列出作业，按截止时间升序
    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Assignments::find();

        // 科目筛选
        if let Some(ref subject) = query.subject
            && !subject.trim().is_empty()
        {
            select = select.filter(Column::Subject.eq(subject.trim()));
        }

        // 创建者筛选
        if let Some(created_by) = query.created_by {
            select = select.filter(Column::CreatedBy.eq(created_by));
        }

        // 标题或描述搜索
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = contains_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.like(pattern.clone()))
                    .add(Column::Description.like(pattern)),
            );
        }

        select = select
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AppError::from_db(e, "查询作业总数失败"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AppError::from_db(e, "查询作业页数失败"))?;
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AppError::from_db(e, "查询作业列表失败"))?;

        Ok(AssignmentListResponse {
            items: items.into_iter().map(|m| m.into_assignment()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新作业，只写入与 `existing` 相比发生变化的列，`updated_at` 由实体钩子刷新
    pub async fn update_assignment_impl(
        &self,
        existing: &Assignment,
        proposed: &Assignment,
    ) -> Result<Assignment> {
        let result = ActiveModel::changes(existing, proposed)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => {
                    AppError::not_found(format!("Assignment {} not found", existing.id))
                }
                e => AppError::from_db(e, "更新作业失败"),
            })?;

        Ok(result.into_assignment())
    }

    pub async fn delete_assignment_impl(&self, id: Uuid) -> Result<bool> {
        let result = Assignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| AppError::from_db(e, "删除作业失败"))?;

        Ok(result.rows_affected > 0)
    }
}
