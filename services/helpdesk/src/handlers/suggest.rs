use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::HelpdeskError;
use crate::state::AppState;
use crate::usecase::suggest::{DraftAnswerUseCase, SuggestUseCase};

#[derive(Deserialize, Default)]
pub struct SuggestParams {
    pub text: Option<String>,
}

/// Contract: this endpoint always answers with a well-formed `{ok, …}`
/// body, never the standard error envelope and never an unhandled failure.
async fn suggest_response(state: &AppState, question_id: i32, text: Option<String>) -> Response {
    let usecase = SuggestUseCase {
        repo: state.question_repo(),
    };
    match usecase.execute(question_id, text).await {
        Ok(suggestions) => (
            StatusCode::OK,
            Json(json!({
                "ok": true,
                "question_id": question_id,
                "count": suggestions.len(),
                "suggestions": suggestions,
            })),
        )
            .into_response(),
        Err(HelpdeskError::QuestionNotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "ok": false, "error": "question not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "ok": false, "error": e.to_string() })),
        )
            .into_response(),
    }
}

// ── GET /ai/suggest/{question_id}/ ───────────────────────────────────────────

pub async fn ai_suggest_get(
    State(state): State<AppState>,
    Path(question_id): Path<i32>,
    Query(params): Query<SuggestParams>,
) -> Response {
    suggest_response(&state, question_id, params.text).await
}

// ── POST /ai/suggest/{question_id}/ ──────────────────────────────────────────

pub async fn ai_suggest_post(
    State(state): State<AppState>,
    Path(question_id): Path<i32>,
    Query(params): Query<SuggestParams>,
    body: axum::body::Bytes,
) -> Response {
    // Lenient body handling: request text beats the query parameter, and a
    // missing or malformed body is not an error on this endpoint.
    let text = serde_json::from_slice::<SuggestParams>(&body)
        .ok()
        .and_then(|p| p.text)
        .or(params.text);
    suggest_response(&state, question_id, text).await
}

// ── GET|POST /ai/answer/{question_id}/ ───────────────────────────────────────

pub async fn ai_answer(
    State(state): State<AppState>,
    Path(question_id): Path<i32>,
) -> Result<Json<Value>, HelpdeskError> {
    let usecase = DraftAnswerUseCase {
        repo: state.question_repo(),
        completion: state.completion.clone(),
        force_fake: state.use_fake_ai,
    };
    let answer = usecase.execute(question_id).await?;
    Ok(Json(json!({
        "ok": true,
        "question_id": question_id,
        "answer": answer,
    })))
}
