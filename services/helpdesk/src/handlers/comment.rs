use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::domain::types::Comment;
use crate::error::HelpdeskError;
use crate::handlers::read_form;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::comment::{DeleteCommentUseCase, EditCommentInput, EditCommentUseCase};

#[derive(Serialize)]
pub struct CommentResponse {
    pub id: i32,
    pub question_id: i32,
    pub author_id: String,
    pub content: String,
    pub file: Option<String>,
    #[serde(serialize_with = "helpdesk_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            question_id: comment.question_id,
            author_id: comment.author_id.to_string(),
            content: comment.content,
            file: comment.file,
            created_at: comment.created_at,
        }
    }
}

// ── POST /comment/{id}/edit/ ─────────────────────────────────────────────────

pub async fn edit_comment(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<StatusCode, HelpdeskError> {
    let mut form = read_form(multipart).await?;
    let input = EditCommentInput {
        content: form.require("content")?,
        upload: form.upload.take(),
    };

    let usecase = EditCommentUseCase {
        comments: state.comment_repo(),
        files: state.file_store(),
    };
    usecase
        .execute(identity.user_id, identity.role, id, input)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /comment/{id}/delete/ ───────────────────────────────────────────────

pub async fn delete_comment(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, HelpdeskError> {
    let usecase = DeleteCommentUseCase {
        comments: state.comment_repo(),
        files: state.file_store(),
    };
    usecase.execute(identity.user_id, identity.role, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
