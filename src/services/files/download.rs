use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FileService;
use crate::errors::AppError;
use crate::models::ErrorCode;
use crate::services::current_actor;

pub async fn handle_download(
    service: &FileService,
    request: &HttpRequest,
    path: String,
) -> ActixResult<HttpResponse> {
    let result = async {
        let actor = current_actor(request)?;
        service.get_store(request)?.read_file(&actor, &path).await
    }
    .await;

    let (blob_path, data) = match result {
        Ok(found) => found,
        Err(e @ AppError::NotFound(_)) => {
            return Ok(e.to_http_response_with(ErrorCode::FileNotFound));
        }
        Err(e) => return Ok(e.to_http_response()),
    };

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/octet-stream"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", blob_path.file_name()),
        ))
        .body(data))
}
