use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProfileService;
use crate::services::{current_actor, respond};

pub async fn list_profiles(
    service: &ProfileService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let result = async {
        let actor = current_actor(request)?;
        service.get_store(request)?.list_profiles(&actor).await
    }
    .await;

    Ok(respond(result, StatusCode::OK, "Profiles retrieved successfully"))
}
