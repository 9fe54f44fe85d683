pub mod rate_limit;
pub mod require_jwt;

pub use rate_limit::RateLimit;
pub use require_jwt::RequireJWT;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;

use crate::models::{ApiResponse, ErrorCode};

// 中间件统一的错误响应
pub(crate) fn create_error_response(
    status: StatusCode,
    code: ErrorCode,
    message: &str,
) -> HttpResponse {
    if status == StatusCode::NO_CONTENT {
        return HttpResponse::build(status).finish();
    }
    HttpResponse::build(status).json(ApiResponse::error_empty(code, message))
}
