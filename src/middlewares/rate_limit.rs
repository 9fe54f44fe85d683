/*!
 * 速率限制中间件（固定窗口计数）
 *
 * ```rust,ignore
 * web::scope("/api/v1/auth")
 *     .service(
 *         web::resource("/login")
 *             .wrap(RateLimit::login())
 *             .route(web::post().to(login)),
 *     )
 * ```
 *
 * 已认证请求按身份计数，否则按客户端 IP 计数。超限返回 429。
 */

use std::net::IpAddr;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};
use crate::policy::Actor;

/// 一个键在当前窗口内的计数
#[derive(Debug, Clone, Copy)]
struct WindowCount {
    started: Instant,
    count: u32,
}

/// 固定窗口计数器
#[derive(Clone)]
pub struct FixedWindow {
    max_requests: u32,
    window: Duration,
    counts: Cache<String, WindowCount>,
}

impl FixedWindow {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            counts: Cache::builder()
                .time_to_live(window)
                .max_capacity(100_000)
                .build(),
        }
    }

    /// 记一次请求；超限时返回距窗口结束的秒数
    pub async fn hit(&self, key: &str) -> Result<u32, u64> {
        let now = Instant::now();
        let current = match self.counts.get(key).await {
            Some(entry) if now.duration_since(entry.started) < self.window => entry,
            _ => WindowCount {
                started: now,
                count: 0,
            },
        };

        if current.count >= self.max_requests {
            let elapsed = now.duration_since(current.started);
            return Err(self.window.saturating_sub(elapsed).as_secs().max(1));
        }

        let next = WindowCount {
            count: current.count + 1,
            ..current
        };
        self.counts.insert(key.to_string(), next).await;
        Ok(self.max_requests - next.count)
    }
}

/// 速率限制配置
#[derive(Clone)]
pub struct RateLimit {
    key_prefix: &'static str,
    window: Arc<FixedWindow>,
}

impl RateLimit {
    pub fn new(key_prefix: &'static str, max_requests: u32, window_secs: u64) -> Self {
        Self {
            key_prefix,
            window: Arc::new(FixedWindow::new(
                max_requests,
                Duration::from_secs(window_secs),
            )),
        }
    }

    /// 登录：5 次/分钟
    pub fn login() -> Self {
        Self::new("login", 5, 60)
    }

    /// 注册：3 次/分钟
    pub fn signup() -> Self {
        Self::new("signup", 3, 60)
    }

    /// 刷新令牌：10 次/分钟
    pub fn refresh_token() -> Self {
        Self::new("refresh", 10, 60)
    }

    /// 提交上传：10 次/分钟
    pub fn file_upload() -> Self {
        Self::new("upload", 10, 60)
    }
}

/// 取客户端 IP，连接信息优先，其次是转发头
fn extract_client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(str::to_string);

    if let Some(ip) = connection_ip.as_deref()
        && ip.parse::<IpAddr>().is_ok()
    {
        return ip.to_string();
    }

    ["X-Forwarded-For", "X-Real-IP"]
        .iter()
        .filter_map(|name| req.headers().get(*name))
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(',').next())
        .map(str::trim)
        .find(|ip| ip.parse::<IpAddr>().is_ok())
        .map(str::to_string)
        .or(connection_ip)
        .unwrap_or_else(|| "unknown".to_string())
}

fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let limit = self.limit.clone();

        Box::pin(async move {
            let identifier = req
                .extensions()
                .get::<Actor>()
                .map(|actor| format!("user:{}", actor.id))
                .unwrap_or_else(|| format!("ip:{}", extract_client_ip(&req)));
            let key = format!("{}:{}", limit.key_prefix, identifier);

            if let Err(retry_after) = limit.window.hit(&key).await {
                warn!("Rate limit exceeded for key: {}", key);
                return Ok(req.into_response(
                    create_rate_limit_response(retry_after).map_into_right_body(),
                ));
            }

            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}
