/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>`，通过 [`RoleDirectory`] 解析调用方角色，
 * 并把 [`Actor`] 放入请求扩展。
 *
 * ```rust,ignore
 * web::scope("/api/v1/assignments")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_assignments))
 *
 * async fn list_assignments(req: HttpRequest) -> ActixResult<HttpResponse> {
 *     let actor = RequireJWT::extract_actor(&req);
 *     // ...
 * }
 * ```
 *
 * 令牌中不携带角色；角色在每次请求时从角色目录（带缓存）读取。
 */

use std::rc::Rc;

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, StatusCode},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, error, info};

use super::create_error_response;
use crate::models::ErrorCode;
use crate::policy::{Actor, RoleDirectory};
use crate::utils::jwt::JwtUtils;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireJWT;

enum AuthFailure {
    Unauthorized(String),
    Internal(String),
}

async fn authenticate(req: &ServiceRequest) -> Result<Actor, AuthFailure> {
    let token = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| {
            AuthFailure::Unauthorized("Missing or invalid Authorization header".to_string())
        })?;

    let user_id = JwtUtils::verify_access_token(token)
        .and_then(|claims| claims.subject())
        .map_err(|err| {
            info!("JWT token validation failed: {}", err);
            AuthFailure::Unauthorized("Invalid JWT token".to_string())
        })?;

    let directory = req
        .app_data::<web::Data<RoleDirectory>>()
        .ok_or_else(|| AuthFailure::Internal("Role directory not configured".to_string()))?;

    directory.resolve_actor(user_id).await.map_err(|err| {
        error!("Failed to resolve role for {}: {}", user_id, err);
        AuthFailure::Internal("Failed to resolve caller".to_string())
    })
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match authenticate(&req).await {
                Ok(actor) => {
                    debug!("JWT authentication successful for {}", actor);
                    req.extensions_mut().insert(actor);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(AuthFailure::Unauthorized(err)) => {
                    info!("JWT authentication failed for {}: {}", req.path(), err);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
                Err(AuthFailure::Internal(err)) => Ok(req.into_response(
                    create_error_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorCode::InternalServerError,
                        &err,
                    )
                    .map_into_right_body(),
                )),
            }
        })
    }
}

impl RequireJWT {
    /// 读取中间件放入的调用方，未经过中间件时为 `None`
    pub fn extract_actor(req: &actix_web::HttpRequest) -> Option<Actor> {
        req.extensions().get::<Actor>().cloned()
    }
}
