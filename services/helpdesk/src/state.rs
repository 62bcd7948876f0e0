use sea_orm::DatabaseConnection;

use crate::infra::ai::OpenAiClient;
use crate::infra::db::{
    DbCommentRepository, DbOtpRepository, DbProfileRepository, DbQuestionRepository,
    DbUserRepository,
};
use crate::infra::files::FsFileStore;
use crate::infra::mail::HttpMailer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub cookie_domain: String,
    pub media: FsFileStore,
    pub mailer: HttpMailer,
    /// `None` when no chat-completion credential is configured.
    pub completion: Option<OpenAiClient>,
    pub use_fake_ai: bool,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn question_repo(&self) -> DbQuestionRepository {
        DbQuestionRepository {
            db: self.db.clone(),
        }
    }

    pub fn comment_repo(&self) -> DbCommentRepository {
        DbCommentRepository {
            db: self.db.clone(),
        }
    }

    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: self.db.clone(),
        }
    }

    pub fn file_store(&self) -> FsFileStore {
        self.media.clone()
    }
}
