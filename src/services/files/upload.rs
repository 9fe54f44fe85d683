//! multipart 上传读取
//!
//! 只接受一个名为 `file` 的字段，依次校验扩展名、文件头和大小。

use actix_multipart::Multipart;
use actix_web::HttpResponse;
use futures_util::{StreamExt, TryStreamExt};

use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::{extension_of, validate_magic_bytes};

/// 读取完成的上传文件
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct UploadLimits {
    pub max_size: usize,
    pub allowed_types: Vec<String>,
}

impl UploadLimits {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_size: config.upload.max_size,
            allowed_types: config.upload.allowed_types.clone(),
        }
    }

    /// 返回小写的扩展名（含点号）
    pub fn check_file_name(&self, file_name: &str) -> Result<String, UploadRejection> {
        let extension = extension_of(file_name).ok_or(UploadRejection::TypeNotAllowed)?;
        if self
            .allowed_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&extension))
        {
            Ok(extension)
        } else {
            Err(UploadRejection::TypeNotAllowed)
        }
    }

    pub fn check_size(&self, total: usize) -> Result<(), UploadRejection> {
        if total > self.max_size {
            Err(UploadRejection::TooLarge(self.max_size))
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    NoFile,
    MultipleFiles,
    TypeNotAllowed,
    ContentMismatch,
    TooLarge(usize),
    Malformed(String),
}

impl UploadRejection {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            UploadRejection::NoFile => ErrorCode::FileNotFound,
            UploadRejection::MultipleFiles => ErrorCode::MultifileUploadNotAllowed,
            UploadRejection::TypeNotAllowed | UploadRejection::ContentMismatch => {
                ErrorCode::FileTypeNotAllowed
            }
            UploadRejection::TooLarge(_) => ErrorCode::FileSizeExceeded,
            UploadRejection::Malformed(_) => ErrorCode::FileUploadFailed,
        }
    }

    pub fn message(&self) -> String {
        match self {
            UploadRejection::NoFile => "No file found in upload payload".to_string(),
            UploadRejection::MultipleFiles => "Only one file can be uploaded at a time".to_string(),
            UploadRejection::TypeNotAllowed => "File type not allowed".to_string(),
            UploadRejection::ContentMismatch => {
                "File content does not match its extension".to_string()
            }
            UploadRejection::TooLarge(limit) => {
                format!("File size exceeds the limit of {limit} bytes")
            }
            UploadRejection::Malformed(detail) => format!("Malformed upload: {detail}"),
        }
    }

    pub fn to_http_response(&self) -> HttpResponse {
        let body = ApiResponse::error_empty(self.error_code(), self.message());
        match self {
            UploadRejection::TooLarge(_) => HttpResponse::PayloadTooLarge().json(body),
            _ => HttpResponse::BadRequest().json(body),
        }
    }
}

/// 读取唯一的 `file` 字段，其余字段忽略
pub async fn read_upload(
    mut payload: Multipart,
    limits: &UploadLimits,
) -> Result<UploadedFile, UploadRejection> {
    let mut uploaded: Option<UploadedFile> = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| UploadRejection::Malformed(e.to_string()))?
    {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        if name != "file" {
            continue;
        }
        if uploaded.is_some() {
            return Err(UploadRejection::MultipleFiles);
        }

        let file_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();
        let extension = limits.check_file_name(&file_name)?;

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| UploadRejection::Malformed(e.to_string()))?;
            limits.check_size(data.len() + chunk.len())?;
            data.extend_from_slice(&chunk);
        }

        // 文本文件要整体是 UTF-8，因此在读完后校验
        if !validate_magic_bytes(&data, &extension) {
            return Err(UploadRejection::ContentMismatch);
        }

        uploaded = Some(UploadedFile { file_name, data });
    }

    uploaded.ok_or(UploadRejection::NoFile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> UploadLimits {
        UploadLimits {
            max_size: 16,
            allowed_types: vec![".pdf".to_string(), ".TXT".to_string()],
        }
    }

    #[test]
    fn test_allowed_extensions() {
        assert_eq!(limits().check_file_name("essay.PDF").unwrap(), ".pdf");
        assert_eq!(limits().check_file_name("notes.txt").unwrap(), ".txt");
        assert_eq!(
            limits().check_file_name("run.exe").unwrap_err(),
            UploadRejection::TypeNotAllowed
        );
        assert_eq!(
            limits().check_file_name("no_extension").unwrap_err(),
            UploadRejection::TypeNotAllowed
        );
    }

    #[test]
    fn test_size_cap() {
        assert!(limits().check_size(16).is_ok());
        assert_eq!(limits().check_size(17).unwrap_err(), UploadRejection::TooLarge(16));
    }

    #[test]
    fn test_rejection_codes() {
        assert_eq!(
            UploadRejection::MultipleFiles.error_code(),
            ErrorCode::MultifileUploadNotAllowed
        );
        assert_eq!(
            UploadRejection::ContentMismatch.error_code(),
            ErrorCode::FileTypeNotAllowed
        );
        assert_eq!(
            UploadRejection::TooLarge(1).to_http_response().status(),
            actix_web::http::StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            UploadRejection::NoFile.to_http_response().status(),
            actix_web::http::StatusCode::BAD_REQUEST
        );
    }
}
