use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use helpdesk_domain::upload::UploadError;

/// Helpdesk service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum HelpdeskError {
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("invalid username")]
    InvalidUsername,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("password too weak")]
    InvalidPassword,
    #[error("title is missing or too long")]
    InvalidTitle,
    #[error("missing data")]
    MissingData,
    #[error("malformed form submission")]
    InvalidMultipart,
    #[error(transparent)]
    InvalidUpload(#[from] UploadError),
    #[error("email already exists")]
    EmailTaken,
    #[error("username already taken")]
    UsernameTaken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid or expired OTP")]
    InvalidOtp,
    #[error("no pending signup")]
    SignupSessionMissing,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("question not found")]
    QuestionNotFound,
    #[error("comment not found")]
    CommentNotFound,
    #[error("no attached file")]
    FileNotFound,
    #[error("mail delivery failed")]
    MailDelivery(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl HelpdeskError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PasswordMismatch => "PASSWORD_MISMATCH",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::InvalidTitle => "INVALID_TITLE",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidMultipart => "INVALID_MULTIPART",
            Self::InvalidUpload(_) => "INVALID_UPLOAD",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidOtp => "INVALID_OTP",
            Self::SignupSessionMissing => "SIGNUP_SESSION_MISSING",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::QuestionNotFound => "QUESTION_NOT_FOUND",
            Self::CommentNotFound => "COMMENT_NOT_FOUND",
            Self::FileNotFound => "FILE_NOT_FOUND",
            Self::MailDelivery(_) => "MAIL_DELIVERY",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for HelpdeskError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::PasswordMismatch
            | Self::InvalidUsername
            | Self::InvalidEmail
            | Self::InvalidPassword
            | Self::InvalidTitle
            | Self::MissingData
            | Self::InvalidMultipart
            | Self::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            Self::EmailTaken | Self::UsernameTaken => StatusCode::CONFLICT,
            Self::InvalidCredentials
            | Self::InvalidOtp
            | Self::SignupSessionMissing
            | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound
            | Self::QuestionNotFound
            | Self::CommentNotFound
            | Self::FileNotFound => StatusCode::NOT_FOUND,
            Self::MailDelivery(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 5xx only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        match &self {
            Self::Internal(e) => tracing::error!(error = %e, kind = "INTERNAL", "internal error"),
            Self::MailDelivery(e) => {
                tracing::error!(error = %e, kind = "MAIL_DELIVERY", "mail delivery failed")
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
