use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use helpdesk_core::health::{healthz, readyz};
use helpdesk_core::middleware::{AllowedHosts, filter_host, request_id_layer};
use helpdesk_domain::upload::MAX_UPLOAD_BYTES;

use crate::handlers::{
    auth::{login, logout, resend_otp, signup, verify_otp},
    comment::{delete_comment, edit_comment},
    profile::{get_profile, remove_picture, update_profile},
    question::{
        ask_question, delete_question, delete_question_file, edit_question, home, post_comment,
        search_questions, view_question,
    },
    suggest::{ai_answer, ai_suggest_get, ai_suggest_post},
};
use crate::state::AppState;

pub fn build_router(state: AppState, allowed_hosts: AllowedHosts) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Home feed
        .route("/", get(home))
        // Signup & OTP
        .route("/signup/", post(signup))
        .route("/verify-otp/", post(verify_otp))
        .route("/resend-otp/", post(resend_otp))
        // Sessions
        .route("/login/", post(login))
        .route("/logout/", get(logout))
        // Questions
        .route("/ask/", post(ask_question))
        .route("/question/{id}/", get(view_question).post(post_comment))
        .route("/question/{id}/edit/", post(edit_question))
        .route("/question/{id}/delete/", post(delete_question))
        .route("/delete-file/{id}/", post(delete_question_file))
        .route("/search/", get(search_questions))
        // Comments
        .route("/comment/{id}/edit/", post(edit_comment))
        .route("/comment/{id}/delete/", post(delete_comment))
        // Profile
        .route("/profile/", get(get_profile).post(update_profile))
        .route("/remove-dp/", post(remove_picture))
        // AI suggestions
        .route(
            "/ai/suggest/{question_id}/",
            get(ai_suggest_get).post(ai_suggest_post),
        )
        .route("/ai/answer/{question_id}/", get(ai_answer).post(ai_answer))
        // Multipart bodies carry attachments up to MAX_UPLOAD_BYTES plus
        // form overhead.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn_with_state(
                    allowed_hosts,
                    filter_host,
                )),
        )
        .with_state(state)
}
