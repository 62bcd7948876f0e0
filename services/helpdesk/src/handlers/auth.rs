use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use helpdesk_session::cookie::{
    HELPDESK_SIGNUP, clear_session_cookie, clear_signup_cookie, set_session_cookie,
    set_signup_cookie,
};
use helpdesk_session::token::{issue_session_token, issue_signup_token, validate_signup_token};

use crate::error::HelpdeskError;
use crate::state::AppState;
use crate::usecase::login::{LoginInput, LoginUseCase};
use crate::usecase::signup::{ResendOtpUseCase, SignupInput, SignupUseCase, VerifyOtpUseCase};

/// Pending user id from the signup cookie; absence or invalidity maps to
/// "restart the signup flow".
fn pending_user(jar: &CookieJar, secret: &str) -> Result<Uuid, HelpdeskError> {
    let token = jar
        .get(HELPDESK_SIGNUP)
        .map(|c| c.value().to_owned())
        .ok_or(HelpdeskError::SignupSessionMissing)?;
    validate_signup_token(&token, secret).map_err(|_| HelpdeskError::SignupSessionMissing)
}

// ── POST /signup/ ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub password1: String,
    pub password2: String,
}

#[derive(Serialize)]
pub struct SignupResponse {
    pub user_id: String,
}

pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse, HelpdeskError> {
    let usecase = SignupUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        profiles: state.profile_repo(),
        mailer: state.mailer.clone(),
    };
    let out = usecase
        .execute(SignupInput {
            username: body.username,
            email: body.email,
            phone: body.phone,
            password1: body.password1,
            password2: body.password2,
        })
        .await?;

    let token = issue_signup_token(out.user_id, &state.jwt_secret)
        .map_err(|e| HelpdeskError::Internal(e.into()))?;
    let jar = set_signup_cookie(jar, token, state.cookie_domain.clone());

    Ok((
        StatusCode::CREATED,
        jar,
        Json(SignupResponse {
            user_id: out.user_id.to_string(),
        }),
    ))
}

// ── POST /verify-otp/ ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub code: String,
}

#[derive(Serialize)]
pub struct VerifyOtpResponse {
    pub user_id: String,
    pub role: u8,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<VerifyOtpRequest>,
) -> Result<impl IntoResponse, HelpdeskError> {
    let user_id = pending_user(&jar, &state.jwt_secret)?;

    let usecase = VerifyOtpUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
    };
    let out = usecase.execute(user_id, body.code.trim()).await?;

    let token = issue_session_token(out.user_id, out.role.as_u8(), &state.jwt_secret)
        .map_err(|e| HelpdeskError::Internal(e.into()))?;
    let jar = clear_signup_cookie(jar, state.cookie_domain.clone());
    let jar = set_session_cookie(jar, token, state.cookie_domain.clone());

    Ok((
        StatusCode::OK,
        jar,
        Json(VerifyOtpResponse {
            user_id: out.user_id.to_string(),
            role: out.role.as_u8(),
        }),
    ))
}

// ── POST /resend-otp/ ────────────────────────────────────────────────────────

pub async fn resend_otp(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<StatusCode, HelpdeskError> {
    let user_id = pending_user(&jar, &state.jwt_secret)?;

    let usecase = ResendOtpUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        mailer: state.mailer.clone(),
    };
    usecase.execute(user_id).await?;
    Ok(StatusCode::OK)
}

// ── POST /login/ ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub user_id: String,
    pub role: u8,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, HelpdeskError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(LoginInput {
            username: body.username,
            password: body.password,
        })
        .await?;

    let token = issue_session_token(user.id, user.role.as_u8(), &state.jwt_secret)
        .map_err(|e| HelpdeskError::Internal(e.into()))?;
    let jar = set_session_cookie(jar, token, state.cookie_domain.clone());

    Ok((
        StatusCode::OK,
        jar,
        Json(LoginResponse {
            user_id: user.id.to_string(),
            role: user.role.as_u8(),
        }),
    ))
}

// ── GET /logout/ ─────────────────────────────────────────────────────────────

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    // Unconditional: clearing an absent cookie is fine.
    let jar = clear_session_cookie(jar, state.cookie_domain.clone());
    (StatusCode::NO_CONTENT, jar)
}
