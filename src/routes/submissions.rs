use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::middlewares::{self, RateLimit};
use crate::models::submissions::requests::{
    GradeSubmissionRequest, ReviewSubmissionRequest, SubmissionListParams,
};
use crate::services::SubmissionService;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 列出可见的提交
pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(&req, query.into_inner())
        .await
}

// 获取提交详情
pub async fn get_submission(req: HttpRequest, path: web::Path<Uuid>) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submission(&req, path.into_inner())
        .await
}

// 替换提交文件
pub async fn resubmit(
    req: HttpRequest,
    path: web::Path<Uuid>,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .resubmit(&req, path.into_inner(), payload)
        .await
}

// 评分
pub async fn grade_submission(
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade_submission(&req, path.into_inner(), body.into_inner())
        .await
}

// 调整状态与评语
pub async fn review_submission(
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<ReviewSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .review_submission(&req, path.into_inner(), body.into_inner())
        .await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_submissions))
            .route("/{id}", web::get().to(get_submission))
            .service(
                web::resource("/{id}")
                    .guard(guard::Put())
                    .wrap(RateLimit::file_upload())
                    .to(resubmit),
            )
            .route("/{id}/grade", web::put().to(grade_submission))
            .route("/{id}/review", web::put().to(review_submission)),
    );
}
