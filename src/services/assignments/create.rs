use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, render};
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::services::current_actor;

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    create_request: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let result = async {
        let actor = current_actor(request)?;
        let store = service.get_store(request)?;
        let created = store.create_assignment(&actor, create_request).await;
        if let Ok(assignment) = &created {
            tracing::info!("Assignment {} created by {}", assignment.id, actor);
        }
        created
    }
    .await;

    Ok(render(result, StatusCode::CREATED, "Assignment created successfully"))
}
