use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProfileService;
use crate::errors::AppError;
use crate::models::profiles::requests::UpdateProfileRequest;
use crate::services::{current_actor, respond};
use crate::utils::validate::{validate_email, validate_full_name};

pub async fn update_my_profile(
    service: &ProfileService,
    request: &HttpRequest,
    update_request: UpdateProfileRequest,
) -> ActixResult<HttpResponse> {
    let result = async {
        if let Some(name) = update_request.full_name.as_deref() {
            validate_full_name(name.trim()).map_err(AppError::validation)?;
        }
        if let Some(email) = update_request.email.as_deref() {
            validate_email(email.trim()).map_err(AppError::validation)?;
        }

        let actor = current_actor(request)?;
        service
            .get_store(request)?
            .update_profile(&actor, actor.id, update_request)
            .await
    }
    .await;

    Ok(respond(result, StatusCode::OK, "Profile updated successfully"))
}
