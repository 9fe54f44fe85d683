use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::ProfileService;
use crate::services::{current_actor, respond};

pub async fn get_profile(
    service: &ProfileService,
    request: &HttpRequest,
    id: Uuid,
) -> ActixResult<HttpResponse> {
    let result = async {
        let actor = current_actor(request)?;
        service.get_store(request)?.get_profile(&actor, id).await
    }
    .await;

    Ok(respond(result, StatusCode::OK, "Profile retrieved successfully"))
}
