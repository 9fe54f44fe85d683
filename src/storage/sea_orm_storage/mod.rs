//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod accounts;
mod assignments;
mod profiles;
mod roles;
mod submissions;

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::models::{
    assignments::{
        entities::Assignment, requests::AssignmentListQuery, responses::AssignmentListResponse,
    },
    auth::Account,
    profiles::entities::Profile,
    roles::entities::RoleAssignment,
    submissions::{
        entities::Submission, requests::SubmissionListQuery, responses::SubmissionListResponse,
    },
};
use crate::storage::Storage;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| AppError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM storage initialized, database: {}", db_url);

        Ok(Self { db })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    ///
    /// 内存库只能使用单连接，否则每个连接各自是一份空库。
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AppError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");
        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");
        }

        let mut pool = SqlitePoolOptions::new()
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout));
        pool = if in_memory {
            pool.max_connections(1).idle_timeout(None).max_lifetime(None)
        } else {
            pool.max_connections(pool_size)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool
            .connect_with(opt)
            .await
            .map_err(|e| AppError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(pool_size.min(5))
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| AppError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AppError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

#[async_trait]
impl Storage for SeaOrmStorage {
    // 账号模块
    async fn create_account(
        &self,
        account: Account,
        full_name: Option<String>,
    ) -> Result<(Account, Profile)> {
        self.create_account_impl(account, full_name).await
    }

    async fn get_account_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        self.get_account_by_id_impl(id).await
    }

    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        self.get_account_by_email_impl(email).await
    }

    async fn delete_account(&self, id: Uuid) -> Result<bool> {
        self.delete_account_impl(id).await
    }

    // 个人资料模块
    async fn insert_profile(&self, profile: &Profile) -> Result<Profile> {
        self.insert_profile_impl(profile).await
    }

    async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>> {
        self.get_profile_impl(id).await
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        self.list_profiles_impl().await
    }

    async fn update_profile(&self, existing: &Profile, proposed: &Profile) -> Result<Profile> {
        self.update_profile_impl(existing, proposed).await
    }

    // 角色模块
    async fn insert_role(&self, role: &RoleAssignment) -> Result<RoleAssignment> {
        self.insert_role_impl(role).await
    }

    async fn get_role_by_user_id(&self, user_id: Uuid) -> Result<Option<RoleAssignment>> {
        self.get_role_by_user_id_impl(user_id).await
    }

    // 作业模块
    async fn insert_assignment(&self, assignment: &Assignment) -> Result<Assignment> {
        self.insert_assignment_impl(assignment).await
    }

    async fn get_assignment(&self, id: Uuid) -> Result<Option<Assignment>> {
        self.get_assignment_impl(id).await
    }

    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_with_pagination_impl(query).await
    }

    async fn update_assignment(
        &self,
        existing: &Assignment,
        proposed: &Assignment,
    ) -> Result<Assignment> {
        self.update_assignment_impl(existing, proposed).await
    }

    async fn delete_assignment(&self, id: Uuid) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    // 提交模块
    async fn insert_submission(&self, submission: &Submission) -> Result<Submission> {
        self.insert_submission_impl(submission).await
    }

    async fn get_submission(&self, id: Uuid) -> Result<Option<Submission>> {
        self.get_submission_impl(id).await
    }

    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(query).await
    }

    async fn update_submission(
        &self,
        existing: &Submission,
        proposed: &Submission,
    ) -> Result<Option<Submission>> {
        self.update_submission_impl(existing, proposed).await
    }
}
