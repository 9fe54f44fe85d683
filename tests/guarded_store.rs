mod common;

use assignment_desk::errors::AppError;
use assignment_desk::models::assignments::requests::{
    AssignmentListQuery, UpdateAssignmentRequest,
};
use assignment_desk::models::files::entities::BlobPath;
use assignment_desk::models::profiles::requests::{CreateProfileRequest, UpdateProfileRequest};
use assignment_desk::models::roles::entities::Role;
use assignment_desk::models::submissions::entities::{Submission, SubmissionStatus};
use assignment_desk::models::submissions::requests::{
    GradeSubmissionRequest, ReviewSubmissionRequest, SubmissionListQuery,
};
use assignment_desk::policy::Actor;
use assignment_desk::storage::BlobStore;
use uuid::Uuid;

use common::{TestEnv, assignment_request};

const PDF: &[u8] = b"%PDF-1.7 essay body";

#[tokio::test]
async fn essay_submission_and_grading_flow() {
    let env = TestEnv::new().await;
    let teacher = env.teacher("Turner").await;
    let alice = env.student("Alice").await;
    let bob = env.student("Bob").await;

    let essay = env.assignment(&teacher, "Essay 1").await;

    // 学生能看到作业
    let visible = env
        .store
        .list_assignments(&alice, AssignmentListQuery::default())
        .await
        .unwrap();
    assert_eq!(visible.items.len(), 1);

    let submission = env
        .store
        .submit(&alice, essay.id, "essay.pdf", PDF)
        .await
        .unwrap();
    assert_eq!(submission.status, SubmissionStatus::Submitted);
    assert_eq!(submission.student_id, alice.id);
    assert!(submission.file_url.starts_with(&alice.id.to_string()));

    // 列表只包含可见行
    let own = env
        .store
        .list_submissions(&alice, SubmissionListQuery::default())
        .await
        .unwrap();
    assert_eq!(own.items.len(), 1);

    let others = env
        .store
        .list_submissions(&bob, SubmissionListQuery::default())
        .await
        .unwrap();
    assert!(others.items.is_empty());

    let all = env
        .store
        .list_submissions(&teacher, SubmissionListQuery::default())
        .await
        .unwrap();
    assert_eq!(all.items.len(), 1);

    let graded = env
        .store
        .grade_submission(
            &teacher,
            submission.id,
            GradeSubmissionRequest {
                grade: 90,
                feedback: Some("Well argued".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(graded.grade, Some(90));
    assert_eq!(graded.status, SubmissionStatus::Graded);
    assert!(graded.graded_at.is_some());

    // 评分后学生不能再替换文件
    let err = env
        .store
        .resubmit(&alice, submission.id, "essay-v2.pdf", PDF)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Authorization(_)));
}

#[tokio::test]
async fn student_cannot_publish_assignments() {
    let env = TestEnv::new().await;
    let alice = env.student("Alice").await;

    let err = env
        .store
        .create_assignment(&alice, assignment_request("Homework", 3))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E013");

    let listed = env
        .store
        .list_assignments(&alice, AssignmentListQuery::default())
        .await
        .unwrap();
    assert!(listed.items.is_empty());
}

#[tokio::test]
async fn caller_without_role_is_denied() {
    let env = TestEnv::new().await;
    let teacher = env.teacher("Turner").await;
    let essay = env.assignment(&teacher, "Essay 1").await;

    let roleless = Actor::new(teacher.id, None);
    let err = env
        .store
        .submit(&roleless, essay.id, "essay.pdf", PDF)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Authorization(_)));
}

#[tokio::test]
async fn teacher_cannot_touch_colleagues_assignment() {
    let env = TestEnv::new().await;
    let owner = env.teacher("Owner").await;
    let colleague = env.teacher("Colleague").await;
    let essay = env.assignment(&owner, "Essay 1").await;

    let err = env
        .store
        .update_assignment(
            &colleague,
            essay.id,
            UpdateAssignmentRequest {
                title: Some("Hijacked".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Authorization(_)));

    let err = env
        .store
        .delete_assignment(&colleague, essay.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Authorization(_)));

    let unchanged = env.store.get_assignment(&owner, essay.id).await.unwrap();
    assert_eq!(unchanged.title, "Essay 1");
}

#[tokio::test]
async fn owner_updates_and_deletes_assignment() {
    let env = TestEnv::new().await;
    let teacher = env.teacher("Turner").await;
    let alice = env.student("Alice").await;
    let essay = env.assignment(&teacher, "Essay 1").await;
    let submission = env
        .store
        .submit(&alice, essay.id, "essay.pdf", PDF)
        .await
        .unwrap();

    // 时间戳精确到秒
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    let updated = env
        .store
        .update_assignment(
            &teacher,
            essay.id,
            UpdateAssignmentRequest {
                max_score: Some(50),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.max_score, 50);
    assert_eq!(updated.created_by, teacher.id);
    assert!(updated.updated_at > essay.updated_at);

    env.store.delete_assignment(&teacher, essay.id).await.unwrap();

    // 提交随作业级联删除
    let err = env
        .store
        .get_submission(&teacher, submission.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn invisible_submission_reads_as_not_found() {
    let env = TestEnv::new().await;
    let teacher = env.teacher("Turner").await;
    let alice = env.student("Alice").await;
    let bob = env.student("Bob").await;
    let essay = env.assignment(&teacher, "Essay 1").await;

    let submission = env
        .store
        .submit(&alice, essay.id, "essay.pdf", PDF)
        .await
        .unwrap();

    let err = env
        .store
        .get_submission(&bob, submission.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let missing = env
        .store
        .get_submission(&teacher, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(missing, AppError::NotFound(_)));
}

#[tokio::test]
async fn student_cannot_write_grading_columns() {
    let env = TestEnv::new().await;
    let teacher = env.teacher("Turner").await;
    let alice = env.student("Alice").await;
    let essay = env.assignment(&teacher, "Essay 1").await;
    let submission = env
        .store
        .submit(&alice, essay.id, "essay.pdf", PDF)
        .await
        .unwrap();

    let err = env
        .store
        .grade_submission(
            &alice,
            submission.id,
            GradeSubmissionRequest {
                grade: 100,
                feedback: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Authorization(_)));

    let err = env
        .store
        .review_submission(
            &alice,
            submission.id,
            ReviewSubmissionRequest {
                status: Some(SubmissionStatus::Graded),
                feedback: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Authorization(_)));

    let stored = env
        .store
        .get_submission(&alice, submission.id)
        .await
        .unwrap();
    assert_eq!(stored.grade, None);
    assert_eq!(stored.status, SubmissionStatus::Submitted);
}

#[tokio::test]
async fn grade_must_fit_max_score() {
    let env = TestEnv::new().await;
    let teacher = env.teacher("Turner").await;
    let alice = env.student("Alice").await;
    let essay = env.assignment(&teacher, "Essay 1").await;
    let submission = env
        .store
        .submit(&alice, essay.id, "essay.pdf", PDF)
        .await
        .unwrap();

    for grade in [-1, 101] {
        let err = env
            .store
            .grade_submission(
                &teacher,
                submission.id,
                GradeSubmissionRequest {
                    grade,
                    feedback: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    let graded = env
        .store
        .grade_submission(
            &teacher,
            submission.id,
            GradeSubmissionRequest {
                grade: 100,
                feedback: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(graded.grade, Some(100));
}

#[tokio::test]
async fn review_out_of_graded_clears_timestamp() {
    let env = TestEnv::new().await;
    let teacher = env.teacher("Turner").await;
    let alice = env.student("Alice").await;
    let essay = env.assignment(&teacher, "Essay 1").await;
    let submission = env
        .store
        .submit(&alice, essay.id, "essay.pdf", PDF)
        .await
        .unwrap();

    env.store
        .grade_submission(
            &teacher,
            submission.id,
            GradeSubmissionRequest {
                grade: 70,
                feedback: None,
            },
        )
        .await
        .unwrap();

    let reopened = env
        .store
        .review_submission(
            &teacher,
            submission.id,
            ReviewSubmissionRequest {
                status: Some(SubmissionStatus::Submitted),
                feedback: Some("Please revise the conclusion".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(reopened.status, SubmissionStatus::Submitted);
    assert!(reopened.graded_at.is_none());
    assert_eq!(
        reopened.feedback.as_deref(),
        Some("Please revise the conclusion")
    );

    // 重新开放后学生可以再次替换文件
    let replaced = env
        .store
        .resubmit(&alice, submission.id, "essay-v2.pdf", PDF)
        .await
        .unwrap();
    assert_eq!(replaced.file_name, "essay-v2.pdf");
}

#[tokio::test]
async fn resubmit_replaces_stored_object() {
    let env = TestEnv::new().await;
    let teacher = env.teacher("Turner").await;
    let alice = env.student("Alice").await;
    let essay = env.assignment(&teacher, "Essay 1").await;

    let first = env
        .store
        .submit(&alice, essay.id, "draft.pdf", PDF)
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = env
        .store
        .resubmit(&alice, first.id, "final.pdf", b"%PDF-1.7 final")
        .await
        .unwrap();

    assert_eq!(second.id, first.id);
    assert_ne!(second.file_url, first.file_url);
    assert!(second.submitted_at >= first.submitted_at);

    let old_path = BlobPath::parse(&first.file_url).unwrap();
    let new_path = BlobPath::parse(&second.file_url).unwrap();
    assert!(env.blobs.get(&old_path).await.unwrap().is_none());
    assert_eq!(
        env.blobs.get(&new_path).await.unwrap().as_deref(),
        Some(&b"%PDF-1.7 final"[..])
    );
}

#[tokio::test]
async fn stale_student_write_cannot_undo_grading() {
    let env = TestEnv::new().await;
    let teacher = env.teacher("Turner").await;
    let alice = env.student("Alice").await;
    let essay = env.assignment(&teacher, "Essay 1").await;

    // 学生读到 submitted 之后、写入之前，教师完成评分
    let seen = env
        .store
        .submit(&alice, essay.id, "draft.pdf", PDF)
        .await
        .unwrap();
    let graded = env
        .store
        .grade_submission(
            &teacher,
            seen.id,
            GradeSubmissionRequest {
                grade: 88,
                feedback: Some("Good work".to_string()),
            },
        )
        .await
        .unwrap();

    let proposed = seen.with_replaced_file(
        format!("{}/{}/2_final.pdf", alice.id, essay.id),
        "final.pdf".to_string(),
    );
    let written = env.storage.update_submission(&seen, &proposed).await.unwrap();
    assert!(written.is_none());

    let current = env.store.get_submission(&teacher, seen.id).await.unwrap();
    assert_eq!(current.status, SubmissionStatus::Graded);
    assert_eq!(current.grade, Some(88));
    assert_eq!(current.graded_at, graded.graded_at);
    assert_eq!(current.file_url, seen.file_url);
}

#[tokio::test]
async fn stale_assignment_edit_keeps_other_columns() {
    let env = TestEnv::new().await;
    let teacher = env.teacher("Turner").await;
    let essay = env.assignment(&teacher, "Essay 1").await;

    env.store
        .update_assignment(
            &teacher,
            essay.id,
            UpdateAssignmentRequest {
                title: Some("Essay 1 (revised)".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // 基于旧快照的另一次编辑只改分值
    let stale = essay.with_update(UpdateAssignmentRequest {
        max_score: Some(40),
        ..Default::default()
    });
    let written = env
        .storage
        .update_assignment(&essay, &stale)
        .await
        .unwrap();
    assert_eq!(written.title, "Essay 1 (revised)");
    assert_eq!(written.max_score, 40);
    assert_eq!(written.created_by, teacher.id);
}

#[tokio::test]
async fn duplicate_submission_is_rejected() {
    let env = TestEnv::new().await;
    let teacher = env.teacher("Turner").await;
    let alice = env.student("Alice").await;
    let essay = env.assignment(&teacher, "Essay 1").await;

    let (first, second) = tokio::join!(
        env.store.submit(&alice, essay.id, "a.pdf", PDF),
        env.store.submit(&alice, essay.id, "b.pdf", PDF),
    );

    let results = [first, second];
    let accepted = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(AppError::Conflict(_))))
        .count();
    assert_eq!(accepted, 1);
    assert_eq!(conflicts, 1);

    let listed = env
        .store
        .list_submissions(&teacher, SubmissionListQuery::default())
        .await
        .unwrap();
    assert_eq!(listed.items.len(), 1);
}

#[tokio::test]
async fn submission_for_missing_assignment() {
    let env = TestEnv::new().await;
    let alice = env.student("Alice").await;

    let err = env
        .store
        .submit(&alice, Uuid::new_v4(), "essay.pdf", PDF)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // 绕过作业检查直接插入时由外键拒绝
    let orphan = Submission::new(
        Uuid::new_v4(),
        alice.id,
        format!("{}/x/1_essay.pdf", alice.id),
        "essay.pdf".to_string(),
    );
    let err = env
        .store
        .insert_submission(&alice, &orphan)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Reference(_)));
}

#[tokio::test]
async fn stored_files_follow_folder_ownership() {
    let env = TestEnv::new().await;
    let teacher = env.teacher("Turner").await;
    let alice = env.student("Alice").await;
    let bob = env.student("Bob").await;
    let essay = env.assignment(&teacher, "Essay 1").await;

    let submission = env
        .store
        .submit(&alice, essay.id, "essay.pdf", PDF)
        .await
        .unwrap();

    let (path, data) = env
        .store
        .read_file(&alice, &submission.file_url)
        .await
        .unwrap();
    assert_eq!(data, PDF);
    assert_eq!(path.file_name(), "essay.pdf");

    let (_, data) = env
        .store
        .read_file(&teacher, &submission.file_url)
        .await
        .unwrap();
    assert_eq!(data, PDF);

    let err = env
        .store
        .read_file(&bob, &submission.file_url)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = env
        .store
        .read_file(&alice, "../../etc/passwd")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn profile_visibility_and_updates() {
    let env = TestEnv::new().await;
    let teacher = env.teacher("Turner").await;
    let alice = env.student("Alice").await;
    let bob = env.student("Bob").await;

    let own = env.store.list_profiles(&alice).await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].id, alice.id);

    let everyone = env.store.list_profiles(&teacher).await.unwrap();
    assert_eq!(everyone.len(), 3);

    let err = env.store.get_profile(&alice, bob.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = env
        .store
        .update_profile(
            &alice,
            bob.id,
            UpdateProfileRequest {
                full_name: Some("Mallory".to_string()),
                email: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let before = env.store.get_profile(&alice, alice.id).await.unwrap();
    // 时间戳精确到秒
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    let after = env
        .store
        .update_profile(
            &alice,
            alice.id,
            UpdateProfileRequest {
                full_name: Some("  Alice Liddell ".to_string()),
                email: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(after.full_name, "Alice Liddell");
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);

    // 资料已由注册流程创建
    let err = env
        .store
        .insert_profile(
            &alice,
            CreateProfileRequest {
                full_name: None,
                email: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn role_rows_are_private_and_single() {
    let env = TestEnv::new().await;
    let alice = env.student("Alice").await;
    let bob = env.student("Bob").await;

    let own = env.store.get_role_assignment(&alice, alice.id).await.unwrap();
    assert_eq!(own.role, Role::Student);

    let err = env
        .store
        .get_role_assignment(&alice, bob.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // 不能替别人分配角色
    let err = env
        .store
        .assign_role(&alice, bob.id, Role::Teacher)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Authorization(_)));

    // 每个身份只有一个角色
    let err = env
        .store
        .assign_role(&alice, alice.id, Role::Teacher)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}
