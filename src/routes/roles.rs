use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::RoleService;

static ROLE_SERVICE: Lazy<RoleService> = Lazy::new(RoleService::new_lazy);

pub async fn get_my_role(req: HttpRequest) -> ActixResult<HttpResponse> {
    ROLE_SERVICE.get_my_role(&req).await
}

pub fn configure_roles_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/roles")
            .wrap(middlewares::RequireJWT)
            .route("/me", web::get().to(get_my_role)),
    );
}
