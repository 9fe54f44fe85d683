use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::{AssignmentService, render};
use crate::services::current_actor;

pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    id: Uuid,
) -> ActixResult<HttpResponse> {
    let result = async {
        let actor = current_actor(request)?;
        service.get_store(request)?.get_assignment(&actor, id).await
    }
    .await;

    Ok(render(result, StatusCode::OK, "Assignment retrieved successfully"))
}
