#![allow(async_fn_in_trait)]

use uuid::Uuid;

use helpdesk_domain::pagination::PageRequest;
use helpdesk_domain::upload::UploadKind;

use crate::domain::types::{Comment, NewComment, NewQuestion, Otp, Profile, Question, User};
use crate::error::HelpdeskError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, HelpdeskError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, HelpdeskError>;
    async fn email_exists(&self, email: &str) -> Result<bool, HelpdeskError>;
    async fn username_exists(&self, username: &str) -> Result<bool, HelpdeskError>;
    async fn create(&self, user: &User) -> Result<(), HelpdeskError>;

    /// Flip `is_active` to true after OTP verification.
    async fn activate(&self, id: Uuid) -> Result<(), HelpdeskError>;

    /// Remove a user (signup rollback). Dependent rows cascade.
    async fn delete(&self, id: Uuid) -> Result<(), HelpdeskError>;
}

/// Repository for one-time passwords. Rows are append-only; verification
/// always reads the most recently created row for a user.
pub trait OtpRepository: Send + Sync {
    async fn create(&self, otp: &Otp) -> Result<(), HelpdeskError>;
    async fn find_latest(&self, user_id: Uuid) -> Result<Option<Otp>, HelpdeskError>;
}

/// Repository for questions.
pub trait QuestionRepository: Send + Sync {
    async fn create(&self, question: &NewQuestion) -> Result<Question, HelpdeskError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Question>, HelpdeskError>;

    /// Most recently created questions, newest first.
    async fn recent(&self, limit: u64) -> Result<Vec<Question>, HelpdeskError>;

    /// Case-insensitive substring match on title OR body.
    async fn search(
        &self,
        query: &str,
        page: PageRequest,
    ) -> Result<Vec<Question>, HelpdeskError>;

    async fn update_content(
        &self,
        id: i32,
        title: &str,
        body: &str,
    ) -> Result<(), HelpdeskError>;

    /// Replace or clear the attached file path.
    async fn set_file(&self, id: i32, file: Option<String>) -> Result<(), HelpdeskError>;

    /// Delete a question. Returns `true` if deleted, `false` if not found.
    /// Comments cascade at the storage layer.
    async fn delete(&self, id: i32) -> Result<bool, HelpdeskError>;
}

/// Repository for comments.
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: &NewComment) -> Result<Comment, HelpdeskError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, HelpdeskError>;

    /// Comments of a question, newest first.
    async fn list_for_question(&self, question_id: i32) -> Result<Vec<Comment>, HelpdeskError>;

    /// File paths attached to a question's comments (for cleanup before a
    /// cascade delete removes the rows).
    async fn file_paths_for_question(
        &self,
        question_id: i32,
    ) -> Result<Vec<String>, HelpdeskError>;

    async fn update_content(&self, id: i32, content: &str) -> Result<(), HelpdeskError>;
    async fn set_file(&self, id: i32, file: Option<String>) -> Result<(), HelpdeskError>;
    async fn delete(&self, id: i32) -> Result<bool, HelpdeskError>;
}

/// Repository for user profiles.
pub trait ProfileRepository: Send + Sync {
    async fn find(&self, user_id: Uuid) -> Result<Option<Profile>, HelpdeskError>;
    async fn create(&self, profile: &Profile) -> Result<(), HelpdeskError>;

    /// Set the provided fields; untouched fields keep their value.
    async fn update(
        &self,
        user_id: Uuid,
        bio: Option<&str>,
        picture: Option<&str>,
    ) -> Result<(), HelpdeskError>;
}

/// Media store for uploaded files, namespaced by upload kind. Paths are
/// relative to the media root.
pub trait FileStore: Send + Sync {
    /// Persist `bytes` under a generated name with the given extension and
    /// return the stored path.
    async fn save(
        &self,
        kind: UploadKind,
        ext: &str,
        bytes: &[u8],
    ) -> Result<String, HelpdeskError>;

    /// Remove a stored file. Deleting a path that no longer exists is not an
    /// error.
    async fn delete(&self, path: &str) -> Result<(), HelpdeskError>;
}

/// Outgoing mail. Dispatch is synchronous within the request.
pub trait MailPort: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), HelpdeskError>;
}

/// Chat-completion backend for AI answer drafts. Errors carry the upstream
/// diagnostic; callers convert them into user-visible text instead of
/// failing the request.
pub trait CompletionPort: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, anyhow::Error>;
}
