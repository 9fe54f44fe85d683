use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::AppError;
use crate::models::auth::{MeResponse, RefreshTokenResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_actor;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    match JwtUtils::refresh_access_token(&refresh_token) {
        Ok((user_id, access_token)) => {
            tracing::debug!("Issued new access token for {}", user_id);
            let response = RefreshTokenResponse {
                access_token,
                expires_in: config.jwt.access_token_expiry * 60,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Token refreshed successfully",
            )))
        }
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);
            Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Login expired or invalid, please login again",
            )))
        }
    }
}

pub async fn handle_me(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let actor = match current_actor(request) {
        Ok(actor) => actor,
        Err(e) => return Ok(e.to_http_response()),
    };
    let store = match service.get_store(request) {
        Ok(store) => store,
        Err(e) => return Ok(e.to_http_response()),
    };

    // 资料缺失（或不可见）时仍返回身份与角色
    let profile = match store.get_profile(&actor, actor.id).await {
        Ok(profile) => Some(profile),
        Err(AppError::NotFound(_)) => None,
        Err(e) => return Ok(e.to_http_response()),
    };

    let response = MeResponse {
        id: actor.id,
        role: actor.role,
        profile,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "User information retrieved successfully",
    )))
}
