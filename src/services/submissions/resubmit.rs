use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::{SubmissionService, render};
use crate::config::AppConfig;
use crate::services::current_actor;
use crate::services::files::{UploadLimits, read_upload};

pub async fn resubmit(
    service: &SubmissionService,
    request: &HttpRequest,
    id: Uuid,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let (actor, store) = match (current_actor(request), service.get_store(request)) {
        (Ok(actor), Ok(store)) => (actor, store),
        (Err(e), _) | (_, Err(e)) => return Ok(e.to_http_response()),
    };

    let limits = UploadLimits::from_config(AppConfig::get());
    let upload = match read_upload(payload, &limits).await {
        Ok(upload) => upload,
        Err(rejection) => return Ok(rejection.to_http_response()),
    };

    let result = store
        .resubmit(&actor, id, &upload.file_name, &upload.data)
        .await;
    if result.is_ok() {
        tracing::info!("Submission {} replaced by {}", id, actor);
    }

    Ok(render(result, StatusCode::OK, "Submission updated successfully"))
}
