use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::{SubmissionService, render};
use crate::services::current_actor;

pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    id: Uuid,
) -> ActixResult<HttpResponse> {
    let result = async {
        let actor = current_actor(request)?;
        service.get_store(request)?.get_submission(&actor, id).await
    }
    .await;

    Ok(render(result, StatusCode::OK, "Submission retrieved successfully"))
}
