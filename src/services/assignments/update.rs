use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::{AssignmentService, render};
use crate::models::assignments::requests::UpdateAssignmentRequest;
use crate::services::current_actor;

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    id: Uuid,
    update_request: UpdateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let result = async {
        let actor = current_actor(request)?;
        service
            .get_store(request)?
            .update_assignment(&actor, id, update_request)
            .await
    }
    .await;

    Ok(render(result, StatusCode::OK, "Assignment updated successfully"))
}
