use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

fn auth_failed() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Email or password is incorrect",
    )))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let (storage, roles) = match (service.get_storage(request), service.get_roles(request)) {
        (Ok(storage), Ok(roles)) => (storage, roles),
        (Err(e), _) | (_, Err(e)) => return Ok(e.to_http_response()),
    };
    let config = service.get_config();

    // 1. 按邮箱查找账号
    let email = login_request.email.trim().to_lowercase();
    let account = match storage.get_account_by_email(&email).await {
        Ok(Some(account)) => account,
        Ok(None) => return auth_failed(),
        Err(e) => return Ok(e.to_http_response()),
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &account.password_hash) {
        tracing::info!("Failed login attempt for account {}", account.id);
        return auth_failed();
    }

    // 3. 角色缺失不阻止登录，但调用方无法通过任何策略
    let role = match roles.role_of(account.id).await {
        Ok(role) => role,
        Err(e) => return Ok(e.to_http_response()),
    };

    // 4. 生成令牌对
    let token_pair = match JwtUtils::generate_token_pair(account.id, login_request.remember_me) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            );
        }
    };

    tracing::info!("Account {} logged in successfully", account.id);

    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
        user_id: account.id,
        role,
        created_at: chrono::Utc::now(),
    };
    let refresh_cookie =
        JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token, login_request.remember_me);

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}
