use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use helpdesk_domain::pagination::PageRequest;

use crate::domain::repository::CommentRepository;
use crate::domain::types::Question;
use crate::error::HelpdeskError;
use crate::handlers::comment::CommentResponse;
use crate::handlers::read_form;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::comment::{CreateCommentInput, CreateCommentUseCase};
use crate::usecase::question::{
    CreateQuestionInput, CreateQuestionUseCase, DeleteQuestionFileUseCase, DeleteQuestionUseCase,
    EditQuestionInput, EditQuestionUseCase, GetQuestionUseCase, HomeFeedUseCase,
    SearchQuestionsUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct QuestionResponse {
    pub id: i32,
    pub user_id: String,
    pub title: String,
    pub body: String,
    pub file: Option<String>,
    #[serde(serialize_with = "helpdesk_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Question> for QuestionResponse {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            user_id: question.user_id.to_string(),
            title: question.title,
            body: question.body,
            file: question.file,
            created_at: question.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct QuestionDetailResponse {
    pub question: QuestionResponse,
    pub comments: Vec<CommentResponse>,
}

// ── GET / ────────────────────────────────────────────────────────────────────

pub async fn home(
    State(state): State<AppState>,
) -> Result<Json<Vec<QuestionResponse>>, HelpdeskError> {
    let usecase = HomeFeedUseCase {
        repo: state.question_repo(),
    };
    let questions = usecase.execute().await?;
    Ok(Json(questions.into_iter().map(Into::into).collect()))
}

// ── POST /ask/ ───────────────────────────────────────────────────────────────

pub async fn ask_question(
    identity: Identity,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HelpdeskError> {
    let mut form = read_form(multipart).await?;
    let input = CreateQuestionInput {
        title: form.require("title")?,
        body: form.require("body")?,
        upload: form.upload.take(),
    };

    let usecase = CreateQuestionUseCase {
        repo: state.question_repo(),
        files: state.file_store(),
    };
    let question = usecase.execute(identity.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(QuestionResponse::from(question))))
}

// ── GET /question/{id}/ ──────────────────────────────────────────────────────

pub async fn view_question(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<QuestionDetailResponse>, HelpdeskError> {
    let usecase = GetQuestionUseCase {
        repo: state.question_repo(),
    };
    let question = usecase.execute(id).await?;
    let comments = state.comment_repo().list_for_question(id).await?;

    Ok(Json(QuestionDetailResponse {
        question: question.into(),
        comments: comments.into_iter().map(Into::into).collect(),
    }))
}

// ── POST /question/{id}/ — add a comment ─────────────────────────────────────

pub async fn post_comment(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HelpdeskError> {
    let mut form = read_form(multipart).await?;
    let input = CreateCommentInput {
        content: form.require("content")?,
        upload: form.upload.take(),
    };

    let usecase = CreateCommentUseCase {
        questions: state.question_repo(),
        comments: state.comment_repo(),
        files: state.file_store(),
    };
    let comment = usecase.execute(identity.user_id, id, input).await?;
    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

// ── GET /search/?q= ──────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct SearchQuery {
    pub q: Option<String>,
    #[serde(rename = "per-page")]
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn search_questions(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<QuestionResponse>>, HelpdeskError> {
    let mut page = PageRequest::default();
    if let Some(per_page) = query.per_page {
        page.per_page = per_page;
    }
    if let Some(number) = query.page {
        page.page = number;
    }

    let usecase = SearchQuestionsUseCase {
        repo: state.question_repo(),
    };
    let results = usecase.execute(query.q.as_deref(), page).await?;
    Ok(Json(results.into_iter().map(Into::into).collect()))
}

// ── POST /question/{id}/edit/ ────────────────────────────────────────────────

pub async fn edit_question(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<StatusCode, HelpdeskError> {
    let mut form = read_form(multipart).await?;
    let input = EditQuestionInput {
        title: form.require("title")?,
        body: form.require("body")?,
        upload: form.upload.take(),
    };

    let usecase = EditQuestionUseCase {
        repo: state.question_repo(),
        files: state.file_store(),
    };
    usecase
        .execute(identity.user_id, identity.role, id, input)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /question/{id}/delete/ ──────────────────────────────────────────────

pub async fn delete_question(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, HelpdeskError> {
    let usecase = DeleteQuestionUseCase {
        repo: state.question_repo(),
        comments: state.comment_repo(),
        files: state.file_store(),
    };
    usecase.execute(identity.user_id, identity.role, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /delete-file/{id}/ ──────────────────────────────────────────────────

pub async fn delete_question_file(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, HelpdeskError> {
    let usecase = DeleteQuestionFileUseCase {
        repo: state.question_repo(),
        files: state.file_store(),
    };
    usecase.execute(identity.user_id, identity.role, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
