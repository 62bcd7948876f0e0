use chrono::Utc;
use uuid::Uuid;

use helpdesk_domain::pagination::PageRequest;
use helpdesk_domain::upload::{UploadKind, validate_upload};
use helpdesk_domain::user::UserRole;

use crate::domain::repository::{CommentRepository, FileStore, QuestionRepository};
use crate::domain::types::{NewQuestion, Question, Upload, may_moderate, validate_title};
use crate::error::HelpdeskError;

/// Number of questions shown on the home feed.
pub const HOME_FEED_LIMIT: u64 = 10;

// ── CreateQuestion ───────────────────────────────────────────────────────────

pub struct CreateQuestionInput {
    pub title: String,
    pub body: String,
    pub upload: Option<Upload>,
}

pub struct CreateQuestionUseCase<Q, F>
where
    Q: QuestionRepository,
    F: FileStore,
{
    pub repo: Q,
    pub files: F,
}

impl<Q, F> CreateQuestionUseCase<Q, F>
where
    Q: QuestionRepository,
    F: FileStore,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: CreateQuestionInput,
    ) -> Result<Question, HelpdeskError> {
        if !validate_title(&input.title) {
            return Err(HelpdeskError::InvalidTitle);
        }
        if input.body.trim().is_empty() {
            return Err(HelpdeskError::MissingData);
        }

        let file = match &input.upload {
            Some(upload) => {
                let ext =
                    validate_upload(UploadKind::Question, &upload.filename, upload.bytes.len())?;
                Some(
                    self.files
                        .save(UploadKind::Question, &ext, &upload.bytes)
                        .await?,
                )
            }
            None => None,
        };

        self.repo
            .create(&NewQuestion {
                user_id,
                title: input.title.trim().to_owned(),
                body: input.body,
                file,
                created_at: Utc::now(),
            })
            .await
    }
}

// ── GetQuestion ──────────────────────────────────────────────────────────────

pub struct GetQuestionUseCase<Q: QuestionRepository> {
    pub repo: Q,
}

impl<Q: QuestionRepository> GetQuestionUseCase<Q> {
    pub async fn execute(&self, id: i32) -> Result<Question, HelpdeskError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(HelpdeskError::QuestionNotFound)
    }
}

// ── EditQuestion ─────────────────────────────────────────────────────────────

pub struct EditQuestionInput {
    pub title: String,
    pub body: String,
    pub upload: Option<Upload>,
}

pub struct EditQuestionUseCase<Q, F>
where
    Q: QuestionRepository,
    F: FileStore,
{
    pub repo: Q,
    pub files: F,
}

impl<Q, F> EditQuestionUseCase<Q, F>
where
    Q: QuestionRepository,
    F: FileStore,
{
    pub async fn execute(
        &self,
        actor: Uuid,
        role: UserRole,
        id: i32,
        input: EditQuestionInput,
    ) -> Result<(), HelpdeskError> {
        let question = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(HelpdeskError::QuestionNotFound)?;
        if !may_moderate(question.user_id, actor, role) {
            return Err(HelpdeskError::Forbidden);
        }
        if !validate_title(&input.title) {
            return Err(HelpdeskError::InvalidTitle);
        }
        if input.body.trim().is_empty() {
            return Err(HelpdeskError::MissingData);
        }

        self.repo
            .update_content(id, input.title.trim(), &input.body)
            .await?;

        if let Some(upload) = &input.upload {
            let ext = validate_upload(UploadKind::Question, &upload.filename, upload.bytes.len())?;
            // Replace = delete old, then store new. The two steps are not
            // atomic; a failure in between leaves the question file-less.
            if let Some(old) = &question.file {
                self.files.delete(old).await?;
            }
            let path = self
                .files
                .save(UploadKind::Question, &ext, &upload.bytes)
                .await?;
            self.repo.set_file(id, Some(path)).await?;
        }
        Ok(())
    }
}

// ── DeleteQuestion ───────────────────────────────────────────────────────────

pub struct DeleteQuestionUseCase<Q, C, F>
where
    Q: QuestionRepository,
    C: CommentRepository,
    F: FileStore,
{
    pub repo: Q,
    pub comments: C,
    pub files: F,
}

impl<Q, C, F> DeleteQuestionUseCase<Q, C, F>
where
    Q: QuestionRepository,
    C: CommentRepository,
    F: FileStore,
{
    pub async fn execute(&self, actor: Uuid, role: UserRole, id: i32) -> Result<(), HelpdeskError> {
        let question = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(HelpdeskError::QuestionNotFound)?;
        if !may_moderate(question.user_id, actor, role) {
            return Err(HelpdeskError::Forbidden);
        }

        // Collect comment attachments before the cascade removes the rows.
        let mut orphans = self.comments.file_paths_for_question(id).await?;
        if let Some(file) = question.file {
            orphans.push(file);
        }

        self.repo.delete(id).await?;

        for path in orphans {
            if let Err(e) = self.files.delete(&path).await {
                tracing::warn!(path, error = %e, "orphaned media file after question delete");
            }
        }
        Ok(())
    }
}

// ── DeleteQuestionFile ───────────────────────────────────────────────────────

pub struct DeleteQuestionFileUseCase<Q, F>
where
    Q: QuestionRepository,
    F: FileStore,
{
    pub repo: Q,
    pub files: F,
}

impl<Q, F> DeleteQuestionFileUseCase<Q, F>
where
    Q: QuestionRepository,
    F: FileStore,
{
    pub async fn execute(&self, actor: Uuid, role: UserRole, id: i32) -> Result<(), HelpdeskError> {
        let question = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(HelpdeskError::QuestionNotFound)?;
        if !may_moderate(question.user_id, actor, role) {
            return Err(HelpdeskError::Forbidden);
        }
        let path = question.file.ok_or(HelpdeskError::FileNotFound)?;
        self.files.delete(&path).await?;
        self.repo.set_file(id, None).await
    }
}

// ── SearchQuestions ──────────────────────────────────────────────────────────

pub struct SearchQuestionsUseCase<Q: QuestionRepository> {
    pub repo: Q,
}

impl<Q: QuestionRepository> SearchQuestionsUseCase<Q> {
    /// Empty or missing query returns nothing rather than everything.
    pub async fn execute(
        &self,
        query: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Question>, HelpdeskError> {
        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => self.repo.search(q, page.clamped()).await,
            None => Ok(Vec::new()),
        }
    }
}

// ── HomeFeed ─────────────────────────────────────────────────────────────────

pub struct HomeFeedUseCase<Q: QuestionRepository> {
    pub repo: Q,
}

impl<Q: QuestionRepository> HomeFeedUseCase<Q> {
    pub async fn execute(&self) -> Result<Vec<Question>, HelpdeskError> {
        self.repo.recent(HOME_FEED_LIMIT).await
    }
}
