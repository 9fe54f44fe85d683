//! 对象存储路径
//!
//! 提交文件以 `<student_id>/<assignment_id>/<unix_ts>_<name>` 的形式存放。
//! 第一段是上传者身份，访问策略按它判断归属。

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::errors::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "api/file.ts")]
pub struct BlobPath(String);

impl BlobPath {
    /// 为一次上传生成存储路径
    pub fn for_submission(student_id: Uuid, assignment_id: Uuid, file_name: &str) -> Self {
        Self(format!(
            "{}/{}/{}_{}",
            student_id,
            assignment_id,
            chrono::Utc::now().timestamp_millis(),
            sanitize_file_name(file_name)
        ))
    }

    /// 解析外部传入的路径，拒绝空段与目录穿越
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim_matches('/');
        if trimmed.is_empty() {
            return Err(AppError::validation("File path is empty"));
        }
        if trimmed
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(AppError::validation(format!("Invalid file path: {raw}")));
        }
        if trimmed.contains('\\') {
            return Err(AppError::validation(format!("Invalid file path: {raw}")));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// 路径第一段
    pub fn owner_segment(&self) -> &str {
        self.0.split('/').next().unwrap_or_default()
    }

    /// 第一段是否为该身份
    pub fn is_owned_by(&self, id: Uuid) -> bool {
        self.owner_segment()
            .parse::<Uuid>()
            .is_ok_and(|owner| owner == id)
    }

    /// 下载时使用的文件名，去掉时间戳前缀
    pub fn file_name(&self) -> &str {
        let last = self.0.rsplit('/').next().unwrap_or_default();
        match last.split_once('_') {
            Some((ts, name)) if !name.is_empty() && ts.bytes().all(|b| b.is_ascii_digit()) => name,
            _ => last,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlobPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 只保留安全字符，其余替换为下划线
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}
