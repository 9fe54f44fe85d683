use tracing::warn;
use uuid::Uuid;

use super::GuardedStore;
use crate::errors::{AppError, Result};
use crate::models::files::entities::BlobPath;
use crate::models::submissions::{
    entities::Submission,
    requests::{GradeSubmissionRequest, ReviewSubmissionRequest, SubmissionListQuery},
    responses::SubmissionListResponse,
};
use crate::policy::{Actor, Row, Verb};

impl GuardedStore {
    /// 可见的提交：教师看到全部，学生只看到自己的
    pub async fn list_submissions(
        &self,
        actor: &Actor,
        mut query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        if !actor.is_teacher() {
            query.student_id = Some(actor.id);
        }

        let mut response = self.storage.list_submissions_with_pagination(query).await?;
        response
            .items
            .retain(|submission| self.is_visible(actor, Row::Submission(submission)));
        Ok(response)
    }

    pub async fn get_submission(&self, actor: &Actor, id: Uuid) -> Result<Submission> {
        let submission = self.storage.get_submission(id).await?;
        self.visible_or_not_found(actor, submission, |s| Row::Submission(s), "Submission")
    }

    /// 插入提交行
    pub async fn insert_submission(
        &self,
        actor: &Actor,
        submission: &Submission,
    ) -> Result<Submission> {
        self.check(actor, Verb::Insert, Row::Submission(submission))?;
        self.storage.insert_submission(submission).await
    }

    /// 学生上传文件并提交作业
    ///
    /// 先检查文件与提交行的插入策略，再写文件；行写入失败时删除刚写入的文件。
    pub async fn submit(
        &self,
        actor: &Actor,
        assignment_id: Uuid,
        file_name: &str,
        data: &[u8],
    ) -> Result<Submission> {
        let assignment = self.get_assignment(actor, assignment_id).await?;

        let path = BlobPath::for_submission(actor.id, assignment.id, file_name);
        let submission =
            Submission::new(assignment.id, actor.id, path.to_string(), file_name.to_string());

        self.check(actor, Verb::Insert, Row::StoredFile(&path))?;
        self.check(actor, Verb::Insert, Row::Submission(&submission))?;

        self.blobs.put(&path, data).await?;
        match self.storage.insert_submission(&submission).await {
            Ok(stored) => Ok(stored),
            Err(e) => {
                self.discard_blob(&path).await;
                Err(e)
            }
        }
    }

    /// 学生替换提交文件，仅在 submitted 状态下允许
    pub async fn resubmit(
        &self,
        actor: &Actor,
        id: Uuid,
        file_name: &str,
        data: &[u8],
    ) -> Result<Submission> {
        let existing = self.get_submission(actor, id).await?;

        let path = BlobPath::for_submission(existing.student_id, existing.assignment_id, file_name);
        let proposed = existing.with_replaced_file(path.to_string(), file_name.to_string());

        self.check(actor, Verb::Insert, Row::StoredFile(&path))?;
        self.check_update(actor, Row::Submission(&existing), Row::Submission(&proposed))?;

        self.blobs.put(&path, data).await?;
        let updated = match self.write_submission(actor, &existing, &proposed).await {
            Ok(updated) => updated,
            Err(e) => {
                self.discard_blob(&path).await;
                return Err(e);
            }
        };

        if let Ok(old_path) = BlobPath::parse(&existing.file_url) {
            self.discard_blob(&old_path).await;
        }
        Ok(updated)
    }

    /// 教师评分，分数须在 `0..=max_score` 内
    pub async fn grade_submission(
        &self,
        actor: &Actor,
        id: Uuid,
        req: GradeSubmissionRequest,
    ) -> Result<Submission> {
        Self::ensure_grading_columns(actor)?;
        let existing = self.get_submission(actor, id).await?;
        let assignment = self.get_assignment(actor, existing.assignment_id).await?;

        if !(0..=assignment.max_score).contains(&req.grade) {
            return Err(AppError::validation(format!(
                "Grade must be between 0 and {}",
                assignment.max_score
            )));
        }

        let proposed = existing.with_grade(req.grade, req.feedback);
        self.check_update(actor, Row::Submission(&existing), Row::Submission(&proposed))?;
        self.write_submission(actor, &existing, &proposed).await
    }

    /// 教师调整状态与评语
    pub async fn review_submission(
        &self,
        actor: &Actor,
        id: Uuid,
        req: ReviewSubmissionRequest,
    ) -> Result<Submission> {
        Self::ensure_grading_columns(actor)?;
        let existing = self.get_submission(actor, id).await?;

        let proposed = existing.with_review(req.status, req.feedback);
        self.check_update(actor, Row::Submission(&existing), Row::Submission(&proposed))?;
        self.write_submission(actor, &existing, &proposed).await
    }

    /// 写入已通过策略检查的更新
    ///
    /// 存储层只在状态与 `existing` 一致时写入；状态在检查之后被改动时，
    /// 按当前行重新判定：不再允许则返回授权错误，否则返回并发修改错误。
    async fn write_submission(
        &self,
        actor: &Actor,
        existing: &Submission,
        proposed: &Submission,
    ) -> Result<Submission> {
        if let Some(updated) = self.storage.update_submission(existing, proposed).await? {
            return Ok(updated);
        }

        let current = self.get_submission(actor, existing.id).await?;
        self.check_update(actor, Row::Submission(&current), Row::Submission(proposed))?;
        Err(AppError::stale(format!(
            "Submission {} changed to {} while being updated",
            existing.id, current.status
        )))
    }

    // 分数、评语与状态只能由教师写入
    fn ensure_grading_columns(actor: &Actor) -> Result<()> {
        if actor.is_teacher() {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "{actor} may not write grading columns"
            )))
        }
    }

    async fn discard_blob(&self, path: &BlobPath) {
        if let Err(e) = self.blobs.remove(path).await {
            warn!("Failed to remove orphaned object {}: {}", path, e);
        }
    }
}
