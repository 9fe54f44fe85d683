//! 业务服务层
//!
//! 每个服务都是路由层懒加载的单例，共享依赖（存储、受控存储、角色查询）
//! 在处理请求时从 `app_data` 中取出。

pub mod assignments;
pub mod auth;
pub mod files;
pub mod profiles;
pub mod roles;
pub mod submissions;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use files::FileService;
pub use profiles::ProfileService;
pub use roles::RoleService;
pub use submissions::SubmissionService;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use ts_rs::TS;

use crate::errors::{AppError, Result};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::policy::Actor;

/// 从 `app_data` 取出共享依赖
pub(crate) fn app_data<T: Clone + 'static>(request: &HttpRequest, what: &str) -> Result<T> {
    request
        .app_data::<web::Data<T>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| AppError::internal(format!("{what} not found in app data")))
}

/// 由 `RequireJWT` 写入的调用方
pub(crate) fn current_actor(request: &HttpRequest) -> Result<Actor> {
    RequireJWT::extract_actor(request)
        .ok_or_else(|| AppError::authentication("Unauthorized access, please login"))
}

/// 成功时包装为统一响应，失败时按错误类型映射状态码
pub(crate) fn respond<T: Serialize + TS>(
    result: Result<T>,
    status: StatusCode,
    message: &str,
) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::build(status).json(ApiResponse::success(data, message)),
        Err(e) => e.to_http_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_missing_app_data_is_internal_error() {
        let request = TestRequest::default().to_http_request();
        let err = app_data::<String>(&request, "Greeting").unwrap_err();
        assert_eq!(err.code(), "E016");
        assert!(err.message().contains("Greeting"));
    }

    #[test]
    fn test_app_data_is_cloned_out() {
        let request = TestRequest::default()
            .app_data(web::Data::new("hello".to_string()))
            .to_http_request();
        assert_eq!(app_data::<String>(&request, "Greeting").unwrap(), "hello");
    }

    #[test]
    fn test_missing_actor_is_unauthorized() {
        let request = TestRequest::default().to_http_request();
        let err = current_actor(&request).unwrap_err();
        assert_eq!(err.http_status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_respond_maps_errors() {
        let ok = respond(Ok(1_i32), StatusCode::CREATED, "created");
        assert_eq!(ok.status(), StatusCode::CREATED);

        let err = respond::<i32>(
            Err(AppError::authorization("denied")),
            StatusCode::OK,
            "unused",
        );
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }
}
