pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::GuardedStore;

use super::app_data;

pub struct AssignmentService {
    store: Option<GuardedStore>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { store: None }
    }

    pub(crate) fn get_store(&self, request: &HttpRequest) -> Result<GuardedStore> {
        match &self.store {
            Some(store) => Ok(store.clone()),
            None => app_data::<GuardedStore>(request, "GuardedStore"),
        }
    }

    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        params: AssignmentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, params).await
    }

    pub async fn get_assignment(&self, request: &HttpRequest, id: Uuid) -> ActixResult<HttpResponse> {
        detail::get_assignment(self, request, id).await
    }

    // 教师发布作业
    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        create_request: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, create_request).await
    }

    // 创建者修改作业
    pub async fn update_assignment(
        &self,
        request: &HttpRequest,
        id: Uuid,
        update_request: UpdateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_assignment(self, request, id, update_request).await
    }

    // 创建者删除作业
    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        id: Uuid,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, request, id).await
    }
}

// 作业不存在时使用专门的业务错误码
fn render<T: Serialize + TS>(result: Result<T>, status: StatusCode, message: &str) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::build(status).json(ApiResponse::success(data, message)),
        Err(e @ AppError::NotFound(_)) => e.to_http_response_with(ErrorCode::AssignmentNotFound),
        Err(e) => e.to_http_response(),
    }
}
