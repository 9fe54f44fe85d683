//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 数据库约束冲突会被归类为 `Conflict` / `Reference`，与授权拒绝 `Authorization` 一起
//! 构成对调用方可见的三类写入失败。

use std::fmt;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use sea_orm::{DbErr, SqlErr};

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_app_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum AppError {
            $($variant(String),)*
        }

        impl AppError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(AppError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AppError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AppError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl AppError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AppError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_app_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    BlobStore("E010", "Blob Store Error"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
    Conflict("E014", "Uniqueness Violation"),
    Reference("E015", "Referential Integrity Violation"),
    Internal("E016", "Internal Error"),
    Stale("E017", "Concurrent Modification"),
    ObjectExists("E018", "Object Already Exists"),
}

impl AppError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 带上下文地转换数据库错误，保留约束冲突的分类
    pub fn from_db(err: DbErr, context: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                AppError::Conflict(format!("{context}: {detail}"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                AppError::Reference(format!("{context}: {detail}"))
            }
            _ => AppError::DatabaseOperation(format!("{context}: {err}")),
        }
    }

    /// 对应的 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::DateParse(_) => StatusCode::BAD_REQUEST,
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::Authorization(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::Stale(_) | AppError::ObjectExists(_) => {
                StatusCode::CONFLICT
            }
            AppError::Reference(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 对应的 API 业务错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) | AppError::DateParse(_) => ErrorCode::BadRequest,
            AppError::Authentication(_) => ErrorCode::Unauthorized,
            AppError::Authorization(_) => ErrorCode::Forbidden,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Conflict(_) | AppError::Stale(_) => ErrorCode::Conflict,
            AppError::ObjectExists(_) => ErrorCode::FileAlreadyExists,
            AppError::Reference(_) => ErrorCode::ReferenceInvalid,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// 转换为统一格式的 HTTP 响应，错误信息原样返回给调用方
    pub fn to_http_response(&self) -> HttpResponse {
        self.to_http_response_with(self.error_code())
    }

    /// 同上，但使用更具体的业务错误码
    pub fn to_http_response_with(&self, code: ErrorCode) -> HttpResponse {
        if self.http_status().is_server_error() {
            tracing::error!("{}", self.format_simple());
        }
        HttpResponse::build(self.http_status()).json(ApiResponse::error_empty(code, self.message()))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AppError {}

// 为常见的错误类型实现 From trait
impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::from_db(err, "Database operation failed")
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::cache_connection("test").code(), "E001");
        assert_eq!(AppError::database_config("test").code(), "E003");
        assert_eq!(AppError::validation("test").code(), "E007");
        assert_eq!(AppError::authorization("test").code(), "E013");
        assert_eq!(AppError::conflict("test").code(), "E014");
        assert_eq!(AppError::internal("test").code(), "E016");
    }

    #[test]
    fn test_http_response_status() {
        let response = AppError::not_found("gone").to_http_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response =
            AppError::conflict("dup").to_http_response_with(ErrorCode::SubmissionAlreadyExists);
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            AppError::reference("test").error_type(),
            "Referential Integrity Violation"
        );
        assert_eq!(AppError::validation("test").error_type(), "Validation Error");
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            AppError::authorization("denied").http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::conflict("dup").http_status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::reference("missing").http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::database_operation("boom").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_write_races_are_conflicts() {
        assert_eq!(AppError::stale("changed").http_status(), StatusCode::CONFLICT);
        assert_eq!(AppError::object_exists("taken").code(), "E018");
        assert_eq!(
            AppError::object_exists("taken").error_code(),
            ErrorCode::FileAlreadyExists
        );
    }

    #[test]
    fn test_generic_db_error_is_operation_error() {
        let err = AppError::from_db(DbErr::Custom("broken".into()), "Query failed");
        assert_eq!(err.code(), "E005");
        assert!(err.message().contains("Query failed"));
    }

    #[test]
    fn test_format_simple() {
        let err = AppError::validation("Invalid title");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid title"));
    }
}
