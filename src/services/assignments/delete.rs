use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::AssignmentService;
use crate::errors::AppError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_actor;

pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    id: Uuid,
) -> ActixResult<HttpResponse> {
    let result = async {
        let actor = current_actor(request)?;
        service.get_store(request)?.delete_assignment(&actor, id).await?;
        tracing::info!("Assignment {} deleted by {}", id, actor);
        Ok::<(), AppError>(())
    }
    .await;

    match result {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Assignment deleted successfully",
        ))),
        Err(e @ AppError::NotFound(_)) => {
            Ok(e.to_http_response_with(ErrorCode::AssignmentNotFound))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}
