use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubmissionService, render};
use crate::models::submissions::requests::{SubmissionListParams, SubmissionListQuery};
use crate::services::current_actor;

pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    params: SubmissionListParams,
) -> ActixResult<HttpResponse> {
    let result = async {
        let actor = current_actor(request)?;
        service
            .get_store(request)?
            .list_submissions(&actor, SubmissionListQuery::from(params))
            .await
    }
    .await;

    Ok(render(result, StatusCode::OK, "Submissions retrieved successfully"))
}
