mod common;

use std::sync::Arc;

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use assignment_desk::cache::object_cache::moka::MokaCacheWrapper;
use assignment_desk::cache::{CacheResult, ObjectCache};
use assignment_desk::errors::AppError;
use assignment_desk::models::assignments::requests::AssignmentListQuery;
use assignment_desk::models::auth::Account;
use assignment_desk::models::profiles::entities::DEFAULT_FULL_NAME;
use assignment_desk::models::profiles::requests::UpdateProfileRequest;
use assignment_desk::models::roles::entities::Role;
use assignment_desk::policy::RoleDirectory;

use common::{TestEnv, assignment_request};

#[tokio::test]
async fn signup_creates_profile_in_same_transaction() {
    let env = TestEnv::new().await;

    let (account, profile) = env
        .storage
        .create_account(Account::new(" Carol@School.TEST ", "hash".to_string()), None)
        .await
        .unwrap();

    assert_eq!(account.email, "carol@school.test");
    assert_eq!(profile.id, account.id);
    assert_eq!(profile.email, "carol@school.test");
    assert_eq!(profile.full_name, DEFAULT_FULL_NAME);

    let stored = env.storage.get_profile(account.id).await.unwrap();
    assert_eq!(stored, Some(profile));
}

#[tokio::test]
async fn failed_profile_insert_rolls_back_account() {
    let env = TestEnv::new().await;
    env.db
        .connection()
        .execute_unprepared(
            "CREATE TRIGGER reject_profiles BEFORE INSERT ON profiles \
             BEGIN SELECT RAISE(ABORT, 'profiles are read-only'); END;",
        )
        .await
        .unwrap();

    let result = env
        .storage
        .create_account(Account::new("dave@school.test", "hash".to_string()), None)
        .await;
    assert!(result.is_err());

    let account = env
        .storage
        .get_account_by_email("dave@school.test")
        .await
        .unwrap();
    assert!(account.is_none());
}

#[tokio::test]
async fn duplicate_email_is_conflict() {
    let env = TestEnv::new().await;
    env.storage
        .create_account(Account::new("erin@school.test", "hash".to_string()), None)
        .await
        .unwrap();

    let err = env
        .storage
        .create_account(Account::new("ERIN@school.test", "hash".to_string()), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn deleting_account_cascades() {
    let env = TestEnv::new().await;
    let student = env.student("Frank").await;

    assert!(env.storage.delete_account(student.id).await.unwrap());
    assert!(env.storage.get_profile(student.id).await.unwrap().is_none());
    assert!(
        env.storage
            .get_role_by_user_id(student.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(!env.storage.delete_account(student.id).await.unwrap());
}

#[tokio::test]
async fn assignments_are_ordered_by_due_date_and_searchable() {
    let env = TestEnv::new().await;
    let teacher = env.teacher("Turner").await;

    for (title, days) in [("Late essay", 10), ("Early quiz", 1), ("100% effort", 5)] {
        env.store
            .create_assignment(&teacher, assignment_request(title, days))
            .await
            .unwrap();
    }

    let all = env
        .storage
        .list_assignments_with_pagination(AssignmentListQuery::default())
        .await
        .unwrap();
    let titles: Vec<_> = all.items.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, ["Early quiz", "100% effort", "Late essay"]);
    assert_eq!(all.pagination.total, 3);

    // `%` 按字面量匹配
    let percent = env
        .storage
        .list_assignments_with_pagination(AssignmentListQuery {
            search: Some("100%".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(percent.items.len(), 1);
    assert_eq!(percent.items[0].title, "100% effort");

    let paged = env
        .storage
        .list_assignments_with_pagination(AssignmentListQuery {
            page: Some(2),
            size: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(paged.items.len(), 1);
    assert_eq!(paged.items[0].title, "Late essay");
}

#[tokio::test]
async fn role_directory_caches_present_roles() {
    let env = TestEnv::new().await;
    let teacher = env.teacher("Turner").await;
    let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(100, 60));
    let roles = RoleDirectory::new(env.storage.clone(), cache.clone());

    assert_eq!(roles.role_of(teacher.id).await.unwrap(), Some(Role::Teacher));
    assert_eq!(
        cache.get_raw(&format!("role:{}", teacher.id)).await,
        CacheResult::Found("teacher".to_string())
    );
    assert!(roles.has_role(teacher.id, Role::Teacher).await.unwrap());

    // 未分配角色时不写缓存
    let stranger = Uuid::new_v4();
    assert_eq!(roles.role_of(stranger).await.unwrap(), None);
    assert_eq!(
        cache.get_raw(&format!("role:{stranger}")).await,
        CacheResult::NotFound
    );

    let actor = roles.resolve_actor(teacher.id).await.unwrap();
    assert!(actor.is_teacher());
}

#[tokio::test]
async fn stale_profile_edit_keeps_other_columns() {
    let env = TestEnv::new().await;
    let student = env.student("Grace").await;
    let snapshot = env.storage.get_profile(student.id).await.unwrap().unwrap();

    let renamed = snapshot.with_update(UpdateProfileRequest {
        full_name: Some("Grace Hopper".to_string()),
        email: None,
    });
    env.storage.update_profile(&snapshot, &renamed).await.unwrap();

    // 同一旧快照上的第二次编辑只改邮箱
    let moved = snapshot.with_update(UpdateProfileRequest {
        full_name: None,
        email: Some("grace@navy.test".to_string()),
    });
    let stored = env.storage.update_profile(&snapshot, &moved).await.unwrap();
    assert_eq!(stored.full_name, "Grace Hopper");
    assert_eq!(stored.email, "grace@navy.test");
}
