//! Session-cookie identity extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use helpdesk_domain::user::UserRole;
use helpdesk_session::cookie::HELPDESK_SESSION;
use helpdesk_session::token::validate_session_token;

use crate::error::HelpdeskError;
use crate::state::AppState;

/// Caller identity extracted from the session cookie.
///
/// Rejects with 401 when the cookie is absent, invalid, expired, or carries
/// a non-session purpose. Per-record authorization (403) happens in the
/// usecases after extraction.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = HelpdeskError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = CookieJar::from_headers(&parts.headers)
            .get(HELPDESK_SESSION)
            .map(|c| c.value().to_owned());
        let secret = state.jwt_secret.clone();

        async move {
            let token = token.ok_or(HelpdeskError::Unauthorized)?;
            let info = validate_session_token(&token, &secret)
                .map_err(|_| HelpdeskError::Unauthorized)?;
            let role = UserRole::from_u8(info.role).ok_or(HelpdeskError::Unauthorized)?;
            Ok(Self {
                user_id: info.user_id,
                role,
            })
        }
    }
}
