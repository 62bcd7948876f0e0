use chrono::Utc;
use uuid::Uuid;

use helpdesk_domain::upload::{UploadKind, validate_upload};
use helpdesk_domain::user::UserRole;

use crate::domain::repository::{CommentRepository, FileStore, QuestionRepository};
use crate::domain::types::{Comment, NewComment, Upload, may_moderate};
use crate::error::HelpdeskError;

// ── CreateComment ────────────────────────────────────────────────────────────

pub struct CreateCommentInput {
    pub content: String,
    pub upload: Option<Upload>,
}

pub struct CreateCommentUseCase<Q, C, F>
where
    Q: QuestionRepository,
    C: CommentRepository,
    F: FileStore,
{
    pub questions: Q,
    pub comments: C,
    pub files: F,
}

impl<Q, C, F> CreateCommentUseCase<Q, C, F>
where
    Q: QuestionRepository,
    C: CommentRepository,
    F: FileStore,
{
    /// Any authenticated user may comment on any existing question.
    pub async fn execute(
        &self,
        author: Uuid,
        question_id: i32,
        input: CreateCommentInput,
    ) -> Result<Comment, HelpdeskError> {
        self.questions
            .find_by_id(question_id)
            .await?
            .ok_or(HelpdeskError::QuestionNotFound)?;
        if input.content.trim().is_empty() {
            return Err(HelpdeskError::MissingData);
        }

        let file = match &input.upload {
            Some(upload) => {
                let ext =
                    validate_upload(UploadKind::Comment, &upload.filename, upload.bytes.len())?;
                Some(
                    self.files
                        .save(UploadKind::Comment, &ext, &upload.bytes)
                        .await?,
                )
            }
            None => None,
        };

        self.comments
            .create(&NewComment {
                question_id,
                author_id: author,
                content: input.content,
                file,
                created_at: Utc::now(),
            })
            .await
    }
}

// ── EditComment ──────────────────────────────────────────────────────────────

pub struct EditCommentInput {
    pub content: String,
    pub upload: Option<Upload>,
}

pub struct EditCommentUseCase<C, F>
where
    C: CommentRepository,
    F: FileStore,
{
    pub comments: C,
    pub files: F,
}

impl<C, F> EditCommentUseCase<C, F>
where
    C: CommentRepository,
    F: FileStore,
{
    pub async fn execute(
        &self,
        actor: Uuid,
        role: UserRole,
        id: i32,
        input: EditCommentInput,
    ) -> Result<(), HelpdeskError> {
        let comment = self
            .comments
            .find_by_id(id)
            .await?
            .ok_or(HelpdeskError::CommentNotFound)?;
        if !may_moderate(comment.author_id, actor, role) {
            return Err(HelpdeskError::Forbidden);
        }
        if input.content.trim().is_empty() {
            return Err(HelpdeskError::MissingData);
        }

        self.comments.update_content(id, &input.content).await?;

        if let Some(upload) = &input.upload {
            let ext = validate_upload(UploadKind::Comment, &upload.filename, upload.bytes.len())?;
            if let Some(old) = &comment.file {
                self.files.delete(old).await?;
            }
            let path = self
                .files
                .save(UploadKind::Comment, &ext, &upload.bytes)
                .await?;
            self.comments.set_file(id, Some(path)).await?;
        }
        Ok(())
    }
}

// ── DeleteComment ────────────────────────────────────────────────────────────

pub struct DeleteCommentUseCase<C, F>
where
    C: CommentRepository,
    F: FileStore,
{
    pub comments: C,
    pub files: F,
}

impl<C, F> DeleteCommentUseCase<C, F>
where
    C: CommentRepository,
    F: FileStore,
{
    pub async fn execute(&self, actor: Uuid, role: UserRole, id: i32) -> Result<(), HelpdeskError> {
        let comment = self
            .comments
            .find_by_id(id)
            .await?
            .ok_or(HelpdeskError::CommentNotFound)?;
        if !may_moderate(comment.author_id, actor, role) {
            return Err(HelpdeskError::Forbidden);
        }

        self.comments.delete(id).await?;

        if let Some(path) = comment.file {
            if let Err(e) = self.files.delete(&path).await {
                tracing::warn!(path, error = %e, "orphaned media file after comment delete");
            }
        }
        Ok(())
    }
}
