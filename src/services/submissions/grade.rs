use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::{SubmissionService, render};
use crate::errors::AppError;
use crate::models::ErrorCode;
use crate::models::submissions::requests::{GradeSubmissionRequest, ReviewSubmissionRequest};
use crate::services::current_actor;

pub async fn grade_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    id: Uuid,
    grade_request: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let result = async {
        let actor = current_actor(request)?;
        let graded = service
            .get_store(request)?
            .grade_submission(&actor, id, grade_request)
            .await;
        if let Ok(submission) = &graded {
            tracing::info!(
                "Submission {} graded {:?} by {}",
                submission.id,
                submission.grade,
                actor
            );
        }
        graded
    }
    .await;

    match result {
        Err(e @ AppError::Validation(_)) => Ok(e.to_http_response_with(ErrorCode::GradeOutOfRange)),
        other => Ok(render(other, StatusCode::OK, "Submission graded successfully")),
    }
}

pub async fn review_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    id: Uuid,
    review_request: ReviewSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let result = async {
        let actor = current_actor(request)?;
        service
            .get_store(request)?
            .review_submission(&actor, id, review_request)
            .await
    }
    .await;

    Ok(render(result, StatusCode::OK, "Submission reviewed successfully"))
}
