//! 行级访问策略
//!
//! 每次读写都以 `(表, 动词)` 为键查找一组谓词，任意一条通过即放行，
//! 没有登记的键一律拒绝。未登录的调用方在所有键上都被拒绝。
//!
//! 角色查询走 [`RoleDirectory`]，它直接访问存储层，不经过这里的策略。

pub mod roles;
pub mod rules;

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::files::entities::BlobPath;
use crate::models::profiles::entities::Profile;
use crate::models::roles::entities::{Role, RoleAssignment};
use crate::models::submissions::entities::Submission;

pub use roles::RoleDirectory;
pub use rules::{Policy, PolicySet};

static DEFAULT_POLICIES: Lazy<Arc<PolicySet>> =
    Lazy::new(|| Arc::new(PolicySet::with_default_rules()));

/// 全局默认策略集
pub fn default_policies() -> Arc<PolicySet> {
    DEFAULT_POLICIES.clone()
}

/// 当前请求的调用方：身份 ID 加上（可能缺失的）角色
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub role: Option<Role>,
}

impl Actor {
    pub fn new(id: Uuid, role: Option<Role>) -> Self {
        Self { id, role }
    }

    pub fn teacher(id: Uuid) -> Self {
        Self::new(id, Some(Role::Teacher))
    }

    pub fn student(id: Uuid) -> Self {
        Self::new(id, Some(Role::Student))
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }

    pub fn is_teacher(&self) -> bool {
        self.has_role(Role::Teacher)
    }

    pub fn is_student(&self) -> bool {
        self.has_role(Role::Student)
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role {
            Some(role) => write!(f, "{}({role})", self.id),
            None => write!(f, "{}(no role)", self.id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Read,
    Insert,
    Update,
    Delete,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verb::Read => "read",
            Verb::Insert => "insert",
            Verb::Update => "update",
            Verb::Delete => "delete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Profiles,
    UserRoles,
    Assignments,
    Submissions,
    StoredFiles,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Table::Profiles => "profiles",
            Table::UserRoles => "user_roles",
            Table::Assignments => "assignments",
            Table::Submissions => "submissions",
            Table::StoredFiles => "stored_files",
        };
        f.write_str(name)
    }
}

/// 被检查的行，表由行的类型决定
#[derive(Debug, Clone, Copy)]
pub enum Row<'a> {
    Profile(&'a Profile),
    RoleAssignment(&'a RoleAssignment),
    Assignment(&'a Assignment),
    Submission(&'a Submission),
    StoredFile(&'a BlobPath),
}

impl Row<'_> {
    pub fn table(&self) -> Table {
        match self {
            Row::Profile(_) => Table::Profiles,
            Row::RoleAssignment(_) => Table::UserRoles,
            Row::Assignment(_) => Table::Assignments,
            Row::Submission(_) => Table::Submissions,
            Row::StoredFile(_) => Table::StoredFiles,
        }
    }
}

impl<'a> From<&'a Profile> for Row<'a> {
    fn from(row: &'a Profile) -> Self {
        Row::Profile(row)
    }
}

impl<'a> From<&'a RoleAssignment> for Row<'a> {
    fn from(row: &'a RoleAssignment) -> Self {
        Row::RoleAssignment(row)
    }
}

impl<'a> From<&'a Assignment> for Row<'a> {
    fn from(row: &'a Assignment) -> Self {
        Row::Assignment(row)
    }
}

impl<'a> From<&'a Submission> for Row<'a> {
    fn from(row: &'a Submission) -> Self {
        Row::Submission(row)
    }
}

impl<'a> From<&'a BlobPath> for Row<'a> {
    fn from(row: &'a BlobPath) -> Self {
        Row::StoredFile(row)
    }
}

/// 策略判定结果，放行时带上命中的策略名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow { policy: &'static str },
    Deny,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow { .. })
    }

    /// 写操作被拒绝时返回授权错误
    pub fn into_result(self, actor: Option<&Actor>, verb: Verb, table: Table) -> Result<()> {
        match self {
            Decision::Allow { .. } => Ok(()),
            Decision::Deny => {
                let who = actor.map_or_else(|| "anonymous".to_string(), Actor::to_string);
                Err(AppError::authorization(format!(
                    "{who} is not allowed to {verb} {table}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_roles() {
        let id = Uuid::new_v4();
        assert!(Actor::teacher(id).is_teacher());
        assert!(!Actor::teacher(id).is_student());
        assert!(Actor::student(id).is_student());
        assert!(!Actor::new(id, None).is_teacher());
        assert!(!Actor::new(id, None).is_student());
    }

    #[test]
    fn test_deny_maps_to_authorization_error() {
        let actor = Actor::student(Uuid::new_v4());
        let err = Decision::Deny
            .into_result(Some(&actor), Verb::Insert, Table::Assignments)
            .unwrap_err();
        assert_eq!(err.code(), "E013");
        assert!(err.message().contains("insert assignments"));

        let err = Decision::Deny
            .into_result(None, Verb::Read, Table::Profiles)
            .unwrap_err();
        assert!(err.message().starts_with("anonymous"));
    }

    #[test]
    fn test_allow_is_ok() {
        let decision = Decision::Allow { policy: "test" };
        assert!(decision.is_allowed());
        assert!(decision.into_result(None, Verb::Read, Table::Profiles).is_ok());
    }
}
