use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use helpdesk_domain::user::UserRole;

/// User account. `is_active` stays false until OTP verification succeeds.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// One-time password emailed during signup. Immutable once created; a
/// resend supersedes it via the most-recently-created lookup.
#[derive(Debug, Clone)]
pub struct Otp {
    pub id: Uuid,
    pub user_id: Uuid,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

impl Otp {
    pub fn is_expired(&self) -> bool {
        Utc::now() - self.created_at > Duration::seconds(OTP_TTL_SECS)
    }
}

/// OTP length in digits.
pub const OTP_LEN: usize = 6;

/// OTP time-to-live in seconds.
pub const OTP_TTL_SECS: i64 = 60;

/// Support question. `file` is a media-store path owned by the question.
#[derive(Debug, Clone)]
pub struct Question {
    pub id: i32,
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    pub file: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting a question (id is assigned by storage).
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    pub file: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Comment on a question.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: i32,
    pub question_id: i32,
    pub author_id: Uuid,
    pub content: String,
    pub file: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting a comment (id is assigned by storage).
#[derive(Debug, Clone)]
pub struct NewComment {
    pub question_id: i32,
    pub author_id: Uuid,
    pub content: String,
    pub file: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One-to-one user profile. `picture` always holds a path; the placeholder
/// when the user never uploaded one.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub picture: String,
}

/// An uploaded file as received from a multipart form.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Moderation rule shared by questions and comments: the record owner or a
/// superuser may mutate it, nobody else.
pub fn may_moderate(owner: Uuid, actor: Uuid, role: UserRole) -> bool {
    actor == owner || role.is_superuser()
}

/// Validate a username: alphanumeric + hyphen + underscore, 3-30 chars.
pub fn validate_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }
    username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Minimal email shape check: one '@' with non-empty local part and a
/// domain containing a dot, total length ≤ 254.
pub fn validate_email(email: &str) -> bool {
    if email.len() > 254 {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Validate a password: at least 8 characters.
pub fn validate_password(password: &str) -> bool {
    password.len() >= 8
}

/// Validate a question title: non-empty after trimming, at most 255 chars.
pub fn validate_title(title: &str) -> bool {
    let trimmed = title.trim();
    !trimmed.is_empty() && trimmed.len() <= 255
}
