use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::SubmissionService;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_actor;
use crate::services::files::{UploadLimits, read_upload};

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: Uuid,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let (actor, store) = match (current_actor(request), service.get_store(request)) {
        (Ok(actor), Ok(store)) => (actor, store),
        (Err(e), _) | (_, Err(e)) => return Ok(e.to_http_response()),
    };

    let limits = UploadLimits::from_config(AppConfig::get());
    let upload = match read_upload(payload, &limits).await {
        Ok(upload) => upload,
        Err(rejection) => return Ok(rejection.to_http_response()),
    };

    let result = store
        .submit(&actor, assignment_id, &upload.file_name, &upload.data)
        .await;

    match result {
        Ok(submission) => {
            tracing::info!(
                "Submission {} for assignment {} stored by {}",
                submission.id,
                assignment_id,
                actor
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                submission,
                "Submission created successfully",
            )))
        }
        // 作业不存在或不可见
        Err(e @ AppError::NotFound(_)) => {
            Ok(e.to_http_response_with(ErrorCode::AssignmentNotFound))
        }
        Err(e @ AppError::Conflict(_)) => {
            Ok(e.to_http_response_with(ErrorCode::SubmissionAlreadyExists))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}
