pub mod create;
pub mod detail;
pub mod grade;
pub mod list;
pub mod resubmit;

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::submissions::requests::{
    GradeSubmissionRequest, ReviewSubmissionRequest, SubmissionListParams,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::GuardedStore;

use super::app_data;

pub struct SubmissionService {
    store: Option<GuardedStore>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { store: None }
    }

    pub(crate) fn get_store(&self, request: &HttpRequest) -> Result<GuardedStore> {
        match &self.store {
            Some(store) => Ok(store.clone()),
            None => app_data::<GuardedStore>(request, "GuardedStore"),
        }
    }

    // 学生上传并提交
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        assignment_id: Uuid,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, assignment_id, payload).await
    }

    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        params: SubmissionListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request, params).await
    }

    pub async fn get_submission(&self, request: &HttpRequest, id: Uuid) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, id).await
    }

    // 学生替换文件
    pub async fn resubmit(
        &self,
        request: &HttpRequest,
        id: Uuid,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        resubmit::resubmit(self, request, id, payload).await
    }

    // 教师评分
    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        id: Uuid,
        grade_request: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, request, id, grade_request).await
    }

    // 教师调整状态与评语
    pub async fn review_submission(
        &self,
        request: &HttpRequest,
        id: Uuid,
        review_request: ReviewSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::review_submission(self, request, id, review_request).await
    }
}

// 提交相关的专用业务错误码
fn render<T: Serialize + TS>(result: Result<T>, status: StatusCode, message: &str) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::build(status).json(ApiResponse::success(data, message)),
        Err(e @ AppError::NotFound(_)) => e.to_http_response_with(ErrorCode::SubmissionNotFound),
        Err(e @ AppError::Conflict(_)) => {
            e.to_http_response_with(ErrorCode::SubmissionAlreadyExists)
        }
        Err(e @ AppError::Stale(_)) => e.to_http_response_with(ErrorCode::SubmissionModified),
        Err(e) => e.to_http_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn code_of(response: HttpResponse) -> (StatusCode, i64) {
        let status = response.status();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        (status, json["code"].as_i64().unwrap())
    }

    #[tokio::test]
    async fn test_file_path_clash_is_not_a_duplicate_submission() {
        let response = render::<()>(
            Err(AppError::object_exists("Object already exists")),
            StatusCode::OK,
            "unused",
        );
        assert_eq!(
            code_of(response).await,
            (StatusCode::CONFLICT, ErrorCode::FileAlreadyExists as i64)
        );

        let response = render::<()>(
            Err(AppError::conflict("UNIQUE constraint failed")),
            StatusCode::OK,
            "unused",
        );
        assert_eq!(
            code_of(response).await,
            (StatusCode::CONFLICT, ErrorCode::SubmissionAlreadyExists as i64)
        );
    }

    #[tokio::test]
    async fn test_concurrent_change_has_its_own_code() {
        let response = render::<()>(Err(AppError::stale("changed")), StatusCode::OK, "unused");
        assert_eq!(
            code_of(response).await,
            (StatusCode::CONFLICT, ErrorCode::SubmissionModified as i64)
        );
    }
}
