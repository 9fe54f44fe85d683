use std::collections::HashMap;

use tracing::{debug, info};

use super::{Actor, Decision, Row, Table, Verb};
use crate::models::submissions::entities::SubmissionStatus;

type Predicate = Box<dyn Fn(&Actor, &Row<'_>) -> bool + Send + Sync>;

/// 一条具名策略
pub struct Policy {
    pub name: &'static str,
    check: Predicate,
}

impl Policy {
    pub fn new<F>(name: &'static str, check: F) -> Self
    where
        F: Fn(&Actor, &Row<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            name,
            check: Box::new(check),
        }
    }

    pub fn check(&self, actor: &Actor, row: &Row<'_>) -> bool {
        (self.check)(actor, row)
    }
}

impl std::fmt::Debug for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Policy").field("name", &self.name).finish()
    }
}

/// 按 `(表, 动词)` 索引的策略表
#[derive(Debug, Default)]
pub struct PolicySet {
    rules: HashMap<(Table, Verb), Vec<Policy>>,
}

impl PolicySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, table: Table, verb: Verb, policy: Policy) -> &mut Self {
        self.rules.entry((table, verb)).or_default().push(policy);
        self
    }

    pub fn policies_for(&self, table: Table, verb: Verb) -> &[Policy] {
        self.rules
            .get(&(table, verb))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// 判定 `actor` 能否对 `row` 执行 `verb`
    pub fn authorize(&self, actor: Option<&Actor>, verb: Verb, row: &Row<'_>) -> Decision {
        let table = row.table();
        let Some(actor) = actor else {
            info!("Denied anonymous {} on {}", verb, table);
            return Decision::Deny;
        };

        match self
            .policies_for(table, verb)
            .iter()
            .find(|policy| policy.check(actor, row))
        {
            Some(policy) => {
                debug!(
                    "Allowed {} {} on {} by policy '{}'",
                    actor, verb, table, policy.name
                );
                Decision::Allow {
                    policy: policy.name,
                }
            }
            None => {
                info!("Denied {} {} on {}", actor, verb, table);
                Decision::Deny
            }
        }
    }

    /// 更新同时检查旧行与新行，两者都需通过
    pub fn authorize_update(
        &self,
        actor: Option<&Actor>,
        existing: &Row<'_>,
        proposed: &Row<'_>,
    ) -> Decision {
        if existing.table() != proposed.table() {
            return Decision::Deny;
        }
        match self.authorize(actor, Verb::Update, existing) {
            Decision::Allow { .. } => self.authorize(actor, Verb::Update, proposed),
            Decision::Deny => Decision::Deny,
        }
    }

    /// 内置策略表
    pub fn with_default_rules() -> Self {
        let mut set = Self::new();

        // profiles
        set.register(
            Table::Profiles,
            Verb::Read,
            Policy::new("profiles_select_own", |actor, row| {
                matches!(row, Row::Profile(p) if p.id == actor.id)
            }),
        )
        .register(
            Table::Profiles,
            Verb::Read,
            Policy::new("profiles_select_teacher", |actor, row| {
                matches!(row, Row::Profile(_)) && actor.is_teacher()
            }),
        )
        .register(
            Table::Profiles,
            Verb::Update,
            Policy::new("profiles_update_own", |actor, row| {
                matches!(row, Row::Profile(p) if p.id == actor.id)
            }),
        )
        .register(
            Table::Profiles,
            Verb::Insert,
            Policy::new("profiles_insert_own", |actor, row| {
                matches!(row, Row::Profile(p) if p.id == actor.id)
            }),
        );

        // user_roles
        set.register(
            Table::UserRoles,
            Verb::Read,
            Policy::new("user_roles_select_own", |actor, row| {
                matches!(row, Row::RoleAssignment(r) if r.user_id == actor.id)
            }),
        )
        .register(
            Table::UserRoles,
            Verb::Insert,
            Policy::new("user_roles_insert_own", |actor, row| {
                matches!(row, Row::RoleAssignment(r) if r.user_id == actor.id)
            }),
        );

        // assignments
        set.register(
            Table::Assignments,
            Verb::Read,
            Policy::new("assignments_select_authenticated", |_, row| {
                matches!(row, Row::Assignment(_))
            }),
        );
        for (verb, name) in [
            (Verb::Insert, "assignments_insert_teacher_owner"),
            (Verb::Update, "assignments_update_teacher_owner"),
            (Verb::Delete, "assignments_delete_teacher_owner"),
        ] {
            set.register(
                Table::Assignments,
                verb,
                Policy::new(name, |actor, row| {
                    actor.is_teacher()
                        && matches!(row, Row::Assignment(a) if a.created_by == actor.id)
                }),
            );
        }

        // submissions
        set.register(
            Table::Submissions,
            Verb::Read,
            Policy::new("submissions_select_own", |actor, row| {
                matches!(row, Row::Submission(s) if s.student_id == actor.id)
            }),
        )
        .register(
            Table::Submissions,
            Verb::Read,
            Policy::new("submissions_select_teacher", |actor, row| {
                matches!(row, Row::Submission(_)) && actor.is_teacher()
            }),
        )
        .register(
            Table::Submissions,
            Verb::Insert,
            Policy::new("submissions_insert_student_own", |actor, row| {
                actor.is_student()
                    && matches!(row, Row::Submission(s) if s.student_id == actor.id)
            }),
        )
        .register(
            Table::Submissions,
            Verb::Update,
            Policy::new("submissions_update_own_pending", |actor, row| {
                matches!(
                    row,
                    Row::Submission(s)
                        if s.student_id == actor.id && s.status == SubmissionStatus::Submitted
                )
            }),
        )
        .register(
            Table::Submissions,
            Verb::Update,
            Policy::new("submissions_update_teacher", |actor, row| {
                matches!(row, Row::Submission(_)) && actor.is_teacher()
            }),
        );

        // 对象存储：首段路径即学生 ID
        set.register(
            Table::StoredFiles,
            Verb::Insert,
            Policy::new("stored_files_insert_own_folder", |actor, row| {
                matches!(row, Row::StoredFile(path) if path.is_owned_by(actor.id))
            }),
        )
        .register(
            Table::StoredFiles,
            Verb::Read,
            Policy::new("stored_files_select_own_folder", |actor, row| {
                matches!(row, Row::StoredFile(path) if path.is_owned_by(actor.id))
            }),
        )
        .register(
            Table::StoredFiles,
            Verb::Read,
            Policy::new("stored_files_select_teacher", |actor, row| {
                matches!(row, Row::StoredFile(_)) && actor.is_teacher()
            }),
        );

        set
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::models::assignments::entities::Assignment;
    use crate::models::files::entities::BlobPath;
    use crate::models::profiles::entities::Profile;
    use crate::models::roles::entities::{Role, RoleAssignment};
    use crate::models::submissions::entities::Submission;

    fn assignment(created_by: Uuid) -> Assignment {
        let now = Utc::now();
        Assignment {
            id: Uuid::new_v4(),
            title: "Essay 1".to_string(),
            description: None,
            subject: "English".to_string(),
            due_date: now + Duration::days(7),
            max_score: 100,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    fn allowed(set: &PolicySet, actor: &Actor, verb: Verb, row: Row<'_>) -> bool {
        set.authorize(Some(actor), verb, &row).is_allowed()
    }

    #[test]
    fn test_profile_rules() {
        let set = PolicySet::with_default_rules();
        let owner = Actor::student(Uuid::new_v4());
        let other = Actor::student(Uuid::new_v4());
        let teacher = Actor::teacher(Uuid::new_v4());
        let profile = Profile::bootstrap(owner.id, Some("Ada"), "ada@example.com");

        assert!(allowed(&set, &owner, Verb::Read, (&profile).into()));
        assert!(allowed(&set, &teacher, Verb::Read, (&profile).into()));
        assert!(!allowed(&set, &other, Verb::Read, (&profile).into()));

        assert!(allowed(&set, &owner, Verb::Update, (&profile).into()));
        assert!(!allowed(&set, &teacher, Verb::Update, (&profile).into()));
        assert!(allowed(&set, &owner, Verb::Insert, (&profile).into()));
        assert!(!allowed(&set, &other, Verb::Insert, (&profile).into()));

        // 未登记的键拒绝
        assert!(!allowed(&set, &owner, Verb::Delete, (&profile).into()));
    }

    #[test]
    fn test_role_rules() {
        let set = PolicySet::with_default_rules();
        let user = Actor::new(Uuid::new_v4(), None);
        let other = Actor::teacher(Uuid::new_v4());
        let row = RoleAssignment::new(user.id, Role::Student);

        assert!(allowed(&set, &user, Verb::Insert, (&row).into()));
        assert!(allowed(&set, &user, Verb::Read, (&row).into()));
        assert!(!allowed(&set, &other, Verb::Read, (&row).into()));
        assert!(!allowed(&set, &other, Verb::Insert, (&row).into()));
        assert!(!allowed(&set, &user, Verb::Update, (&row).into()));
        assert!(!allowed(&set, &user, Verb::Delete, (&row).into()));
    }

    #[test]
    fn test_assignment_rules() {
        let set = PolicySet::with_default_rules();
        let teacher = Actor::teacher(Uuid::new_v4());
        let other_teacher = Actor::teacher(Uuid::new_v4());
        let student = Actor::student(Uuid::new_v4());
        let row = assignment(teacher.id);

        for actor in [&teacher, &other_teacher, &student] {
            assert!(allowed(&set, actor, Verb::Read, (&row).into()));
        }
        for verb in [Verb::Insert, Verb::Update, Verb::Delete] {
            assert!(allowed(&set, &teacher, verb, (&row).into()));
            assert!(!allowed(&set, &other_teacher, verb, (&row).into()));
            assert!(!allowed(&set, &student, verb, (&row).into()));
        }
    }

    #[test]
    fn test_student_cannot_insert_assignment_even_as_owner() {
        let set = PolicySet::with_default_rules();
        let student = Actor::student(Uuid::new_v4());
        let row = assignment(student.id);

        let decision = set.authorize(Some(&student), Verb::Insert, &(&row).into());
        assert_eq!(decision, Decision::Deny);
    }

    #[test]
    fn test_submission_rules() {
        let set = PolicySet::with_default_rules();
        let student = Actor::student(Uuid::new_v4());
        let other = Actor::student(Uuid::new_v4());
        let teacher = Actor::teacher(Uuid::new_v4());
        let row = Submission::new(
            Uuid::new_v4(),
            student.id,
            "a/b/c.pdf".into(),
            "c.pdf".into(),
        );

        assert!(allowed(&set, &student, Verb::Read, (&row).into()));
        assert!(allowed(&set, &teacher, Verb::Read, (&row).into()));
        assert!(!allowed(&set, &other, Verb::Read, (&row).into()));

        assert!(allowed(&set, &student, Verb::Insert, (&row).into()));
        assert!(!allowed(&set, &other, Verb::Insert, (&row).into()));
        assert!(!allowed(&set, &teacher, Verb::Insert, (&row).into()));

        assert!(allowed(&set, &student, Verb::Update, (&row).into()));
        assert!(allowed(&set, &teacher, Verb::Update, (&row).into()));
        assert!(!allowed(&set, &other, Verb::Update, (&row).into()));

        let graded = row.with_grade(80, None);
        assert!(!allowed(&set, &student, Verb::Update, (&graded).into()));
        assert!(allowed(&set, &teacher, Verb::Update, (&graded).into()));

        assert!(!allowed(&set, &teacher, Verb::Delete, (&row).into()));
    }

    #[test]
    fn test_submission_without_role_cannot_insert() {
        let set = PolicySet::with_default_rules();
        let actor = Actor::new(Uuid::new_v4(), None);
        let row = Submission::new(Uuid::new_v4(), actor.id, "x".into(), "x".into());
        assert!(!allowed(&set, &actor, Verb::Insert, (&row).into()));
    }

    #[test]
    fn test_stored_file_rules() {
        let set = PolicySet::with_default_rules();
        let student = Actor::student(Uuid::new_v4());
        let other = Actor::student(Uuid::new_v4());
        let teacher = Actor::teacher(Uuid::new_v4());
        let path = BlobPath::for_submission(student.id, Uuid::new_v4(), "essay.pdf");

        assert!(allowed(&set, &student, Verb::Insert, (&path).into()));
        assert!(!allowed(&set, &other, Verb::Insert, (&path).into()));
        assert!(!allowed(&set, &teacher, Verb::Insert, (&path).into()));

        assert!(allowed(&set, &student, Verb::Read, (&path).into()));
        assert!(allowed(&set, &teacher, Verb::Read, (&path).into()));
        assert!(!allowed(&set, &other, Verb::Read, (&path).into()));
    }

    #[test]
    fn test_anonymous_is_denied_everywhere() {
        let set = PolicySet::with_default_rules();
        let row = assignment(Uuid::new_v4());
        for verb in [Verb::Read, Verb::Insert, Verb::Update, Verb::Delete] {
            assert_eq!(set.authorize(None, verb, &(&row).into()), Decision::Deny);
        }
    }

    #[test]
    fn test_update_checks_proposed_row() {
        let set = PolicySet::with_default_rules();
        let teacher = Actor::teacher(Uuid::new_v4());
        let existing = assignment(teacher.id);
        let mut stolen = existing.clone();
        stolen.created_by = Uuid::new_v4();

        assert!(
            set.authorize_update(Some(&teacher), &(&existing).into(), &(&existing).into())
                .is_allowed()
        );
        assert_eq!(
            set.authorize_update(Some(&teacher), &(&existing).into(), &(&stolen).into()),
            Decision::Deny
        );
    }

    #[test]
    fn test_essay_scenario() {
        let set = PolicySet::with_default_rules();
        let teacher = Actor::teacher(Uuid::new_v4());
        let student = Actor::student(Uuid::new_v4());
        let intruder = Actor::student(Uuid::new_v4());

        let essay = assignment(teacher.id);
        assert!(allowed(&set, &teacher, Verb::Insert, (&essay).into()));

        let path = BlobPath::for_submission(student.id, essay.id, "essay.pdf");
        assert!(allowed(&set, &student, Verb::Insert, (&path).into()));
        let submission = Submission::new(
            essay.id,
            student.id,
            path.to_string(),
            "essay.pdf".into(),
        );
        assert!(allowed(&set, &student, Verb::Insert, (&submission).into()));

        // 其他学生看不到这份提交
        assert!(!allowed(&set, &intruder, Verb::Read, (&submission).into()));

        let graded = submission.with_grade(85, Some("Good".into()));
        assert!(
            set.authorize_update(Some(&teacher), &(&submission).into(), &(&graded).into())
                .is_allowed()
        );

        // 评分后学生不能再改
        let resubmitted = graded.with_replaced_file("x".into(), "x.pdf".into());
        assert_eq!(
            set.authorize_update(Some(&student), &(&graded).into(), &(&resubmitted).into()),
            Decision::Deny
        );
        assert!(allowed(&set, &student, Verb::Read, (&graded).into()));
    }

    #[test]
    fn test_custom_rules_extend_default_set() {
        let mut set = PolicySet::new();
        set.register(
            Table::Assignments,
            Verb::Delete,
            Policy::new("nobody", |_, _| false),
        );
        let teacher = Actor::teacher(Uuid::new_v4());
        let row = assignment(teacher.id);
        assert!(!allowed(&set, &teacher, Verb::Delete, (&row).into()));
        assert_eq!(set.policies_for(Table::Assignments, Verb::Delete).len(), 1);
        assert!(set.policies_for(Table::Profiles, Verb::Read).is_empty());
    }
}
