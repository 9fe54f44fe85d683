pub mod assignments;
pub mod auth;
pub mod files;
pub mod profiles;
pub mod roles;
pub mod submissions;

pub use assignments::configure_assignments_routes;
pub use auth::configure_auth_routes;
pub use files::configure_file_routes;
pub use profiles::configure_profiles_routes;
pub use roles::configure_roles_routes;
pub use submissions::configure_submissions_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_profiles_routes)
        .configure(configure_roles_routes)
        .configure(configure_assignments_routes)
        .configure(configure_submissions_routes)
        .configure(configure_file_routes);
}
