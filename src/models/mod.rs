//! 业务数据模型
//!
//! - `entities`: 业务实体（与数据库实体分离）
//! - `requests`: HTTP 请求结构
//! - `responses`: HTTP 响应结构

pub mod assignments;
pub mod auth;
pub mod common;
pub mod files;
pub mod profiles;
pub mod roles;
pub mod submissions;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

use serde::{Serialize, Serializer};

/// API 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1000~1999
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    ReferenceInvalid = 1022,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证 2000~2999
    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserEmailInvalid = 2002,
    UserPasswordInvalid = 2003,
    UserEmailAlreadyExists = 2004,

    // 文件 3000~3999
    FileNotFound = 3000,
    FileUploadFailed = 3001,
    FileTypeNotAllowed = 3002,
    FileSizeExceeded = 3003,
    MultifileUploadNotAllowed = 3004,
    FileAlreadyExists = 3005,

    // 作业与提交 4000~4999
    AssignmentNotFound = 4000,
    SubmissionNotFound = 4100,
    SubmissionAlreadyExists = 4101,
    GradeOutOfRange = 4102,
    SubmissionModified = 4103,
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(*self as i32)
    }
}
