use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::AppError;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{Account, LoginResponse, SignupRequest},
};
use crate::policy::Actor;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_full_name, validate_password};

use super::AuthService;

fn bad_request(code: ErrorCode, message: impl Into<String>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message)))
}

pub async fn handle_signup(
    service: &AuthService,
    signup_request: SignupRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let (storage, store) = match (service.get_storage(request), service.get_store(request)) {
        (Ok(storage), Ok(store)) => (storage, store),
        (Err(e), _) | (_, Err(e)) => return Ok(e.to_http_response()),
    };
    let config = service.get_config();

    // 1. 校验输入
    let email = signup_request.email.trim().to_lowercase();
    if let Err(msg) = validate_email(&email) {
        return bad_request(ErrorCode::UserEmailInvalid, msg);
    }
    if let Err(msg) = validate_password(&signup_request.password) {
        return bad_request(ErrorCode::UserPasswordInvalid, msg);
    }
    if let Some(name) = signup_request.full_name.as_deref()
        && let Err(msg) = validate_full_name(name.trim())
    {
        return bad_request(ErrorCode::BadRequest, msg);
    }

    // 2. 邮箱是否已注册（并发注册由唯一约束兜底）
    match storage.get_account_by_email(&email).await {
        Ok(None) => {}
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserEmailAlreadyExists,
                "Email already registered",
            )));
        }
        Err(e) => return Ok(e.to_http_response()),
    }

    let password_hash = match hash_password(&signup_request.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(e.to_http_response_with(ErrorCode::RegisterFailed)),
    };

    // 3. 账号与资料在同一事务中创建
    let (account, profile) = match storage
        .create_account(Account::new(&email, password_hash), signup_request.full_name)
        .await
    {
        Ok(created) => created,
        Err(e @ AppError::Conflict(_)) => {
            return Ok(e.to_http_response_with(ErrorCode::UserEmailAlreadyExists));
        }
        Err(e) => return Ok(e.to_http_response_with(ErrorCode::RegisterFailed)),
    };

    // 4. 以新身份自己的名义插入角色，失败时删除账号
    let newcomer = Actor::new(account.id, None);
    let assignment = match store
        .assign_role(&newcomer, account.id, signup_request.role)
        .await
    {
        Ok(assignment) => assignment,
        Err(e) => {
            tracing::warn!(
                "Role assignment for {} failed, removing account: {}",
                account.id,
                e
            );
            if let Err(cleanup) = storage.delete_account(account.id).await {
                tracing::error!("Failed to remove account {}: {}", account.id, cleanup);
            }
            return Ok(e.to_http_response_with(ErrorCode::RegisterFailed));
        }
    };

    // 5. 签发令牌
    let token_pair = match JwtUtils::generate_token_pair(account.id, false) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Signup succeeded, but token generation failed",
                )),
            );
        }
    };

    tracing::info!(
        "Account {} signed up as {} ({})",
        account.id,
        assignment.role,
        profile.email
    );

    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: config.jwt.access_token_expiry * 60,
        user_id: account.id,
        role: Some(assignment.role),
        created_at: account.created_at,
    };
    let refresh_cookie = JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token, false);

    Ok(HttpResponse::build(StatusCode::CREATED)
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Signup successful")))
}
