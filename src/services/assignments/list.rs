use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, render};
use crate::models::assignments::requests::{AssignmentListParams, AssignmentListQuery};
use crate::services::current_actor;

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    params: AssignmentListParams,
) -> ActixResult<HttpResponse> {
    let result = async {
        let actor = current_actor(request)?;
        service
            .get_store(request)?
            .list_assignments(&actor, AssignmentListQuery::from(params))
            .await
    }
    .await;

    Ok(render(result, StatusCode::OK, "Assignments retrieved successfully"))
}
