#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use tempfile::TempDir;

use assignment_desk::models::assignments::entities::Assignment;
use assignment_desk::models::assignments::requests::CreateAssignmentRequest;
use assignment_desk::models::auth::Account;
use assignment_desk::models::roles::entities::Role;
use assignment_desk::policy::Actor;
use assignment_desk::storage::sea_orm_storage::SeaOrmStorage;
use assignment_desk::storage::{GuardedStore, LocalBlobStore, Storage};

pub struct TestEnv {
    pub db: Arc<SeaOrmStorage>,
    pub storage: Arc<dyn Storage>,
    pub blobs: Arc<LocalBlobStore>,
    pub store: GuardedStore,
    _dir: TempDir,
}

impl TestEnv {
    pub async fn new() -> Self {
        let db = Arc::new(
            SeaOrmStorage::connect("sqlite::memory:", 1, 30)
                .await
                .expect("in-memory database"),
        );
        let dir = tempfile::tempdir().expect("temp dir");
        let blobs = Arc::new(LocalBlobStore::new(dir.path()).await.expect("blob store"));

        let storage: Arc<dyn Storage> = db.clone();
        let store = GuardedStore::new(storage.clone(), blobs.clone());

        Self {
            db,
            storage,
            blobs,
            store,
            _dir: dir,
        }
    }

    /// 走注册流程：账号与资料一起创建，再以本人身份插入角色
    pub async fn identity(&self, name: &str, role: Role) -> Actor {
        let email = format!("{}@school.test", name.to_lowercase());
        let (account, _) = self
            .storage
            .create_account(Account::new(&email, "not-a-real-hash".to_string()), Some(name.to_string()))
            .await
            .expect("account");

        self.store
            .assign_role(&Actor::new(account.id, None), account.id, role)
            .await
            .expect("role");

        Actor::new(account.id, Some(role))
    }

    pub async fn teacher(&self, name: &str) -> Actor {
        self.identity(name, Role::Teacher).await
    }

    pub async fn student(&self, name: &str) -> Actor {
        self.identity(name, Role::Student).await
    }

    pub async fn assignment(&self, teacher: &Actor, title: &str) -> Assignment {
        self.store
            .create_assignment(teacher, assignment_request(title, 7))
            .await
            .expect("assignment")
    }
}

pub fn assignment_request(title: &str, due_in_days: i64) -> CreateAssignmentRequest {
    CreateAssignmentRequest {
        title: title.to_string(),
        description: Some(format!("{title} description")),
        subject: "English".to_string(),
        due_date: Utc::now() + Duration::days(due_in_days),
        max_score: Some(100),
    }
}
