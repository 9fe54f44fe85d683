//! 受访问策略约束的存储视图
//!
//! 每个操作都带上调用方 [`Actor`]：
//! - 列表只返回可见行
//! - 单行读取不可见时报告不存在
//! - 被拒绝的写入返回授权错误
//! - 更新同时检查旧行与新行

mod assignments;
mod files;
mod profiles;
mod roles;
mod submissions;

use std::sync::Arc;

use crate::errors::{AppError, Result};
use crate::policy::{Actor, PolicySet, Row, Verb, default_policies};
use crate::storage::{BlobStore, Storage};

#[derive(Clone)]
pub struct GuardedStore {
    storage: Arc<dyn Storage>,
    blobs: Arc<dyn BlobStore>,
    policies: Arc<PolicySet>,
}

impl GuardedStore {
    pub fn new(storage: Arc<dyn Storage>, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            storage,
            blobs,
            policies: default_policies(),
        }
    }

    fn is_visible(&self, actor: &Actor, row: Row<'_>) -> bool {
        self.policies
            .authorize(Some(actor), Verb::Read, &row)
            .is_allowed()
    }

    /// 单行读取：不存在或不可见都按不存在处理
    fn visible_or_not_found<T>(
        &self,
        actor: &Actor,
        row: Option<T>,
        to_row: impl Fn(&T) -> Row<'_>,
        what: &str,
    ) -> Result<T> {
        match row {
            Some(row) if self.is_visible(actor, to_row(&row)) => Ok(row),
            _ => Err(AppError::not_found(format!("{what} not found"))),
        }
    }

    fn check(&self, actor: &Actor, verb: Verb, row: Row<'_>) -> Result<()> {
        self.policies
            .authorize(Some(actor), verb, &row)
            .into_result(Some(actor), verb, row.table())
    }

    fn check_update(&self, actor: &Actor, existing: Row<'_>, proposed: Row<'_>) -> Result<()> {
        self.policies
            .authorize_update(Some(actor), &existing, &proposed)
            .into_result(Some(actor), Verb::Update, existing.table())
    }
}
