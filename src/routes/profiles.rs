use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::middlewares;
use crate::models::profiles::requests::{CreateProfileRequest, UpdateProfileRequest};
use crate::services::ProfileService;

// 懒加载的全局 ProfileService 实例
static PROFILE_SERVICE: Lazy<ProfileService> = Lazy::new(ProfileService::new_lazy);

pub async fn list_profiles(req: HttpRequest) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.list_profiles(&req).await
}

pub async fn get_profile(req: HttpRequest, path: web::Path<Uuid>) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.get_profile(&req, path.into_inner()).await
}

pub async fn create_profile(
    req: HttpRequest,
    body: web::Json<CreateProfileRequest>,
) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.create_profile(&req, body.into_inner()).await
}

pub async fn update_my_profile(
    req: HttpRequest,
    body: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.update_my_profile(&req, body.into_inner()).await
}

// 配置路由
pub fn configure_profiles_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/profiles")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_profiles))
            .route("", web::post().to(create_profile))
            // 固定路径在前，避免被 `{id}` 匹配
            .route("/me", web::put().to(update_my_profile))
            .route("/{id}", web::get().to(get_profile)),
    );
}
