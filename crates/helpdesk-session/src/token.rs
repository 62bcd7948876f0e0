//! JWT issuance and validation for session and pending-signup tokens.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::cookie::{SESSION_EXP, SIGNUP_EXP};

/// `purpose` claim value for login-session tokens.
pub const PURPOSE_SESSION: &str = "session";

/// `purpose` claim value for pending-signup tokens.
pub const PURPOSE_SIGNUP: &str = "signup";

/// User identity extracted from a validated session token.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub user_id: Uuid,
    pub role: u8,
    pub exp: u64,
}

/// Errors returned by token validation.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("token purpose mismatch")]
    WrongPurpose,
    #[error("token encoding failed")]
    Encoding,
}

/// JWT claims payload.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `sub` | user ID (UUID string) |
/// | `role` | `u8` wire value, see `helpdesk_domain::user::UserRole` |
/// | `purpose` | `"session"` or `"signup"` — the two scopes never interchange |
/// | `exp` | seconds since epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub role: u8,
    pub purpose: String,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

fn issue(sub: Uuid, role: u8, purpose: &str, ttl: u64, secret: &str) -> Result<String, TokenError> {
    let claims = JwtClaims {
        sub: sub.to_string(),
        role,
        purpose: purpose.to_owned(),
        exp: now_secs() + ttl,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| TokenError::Encoding)
}

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s tolerates clock skew.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, TokenError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    Ok(data.claims)
}

/// Issue a login-session token for an activated user.
pub fn issue_session_token(user_id: Uuid, role: u8, secret: &str) -> Result<String, TokenError> {
    issue(user_id, role, PURPOSE_SESSION, SESSION_EXP, secret)
}

/// Issue a pending-signup token scoping OTP verification to one user.
pub fn issue_signup_token(user_id: Uuid, secret: &str) -> Result<String, TokenError> {
    issue(user_id, 0, PURPOSE_SIGNUP, SIGNUP_EXP, secret)
}

/// Validate a session-cookie value, returning the parsed identity.
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionInfo, TokenError> {
    let claims = decode_jwt(token, secret)?;
    if claims.purpose != PURPOSE_SESSION {
        return Err(TokenError::WrongPurpose);
    }
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| TokenError::Malformed)?;
    Ok(SessionInfo {
        user_id,
        role: claims.role,
        exp: claims.exp,
    })
}

/// Validate a pending-signup cookie value, returning the pending user id.
pub fn validate_signup_token(token: &str, secret: &str) -> Result<Uuid, TokenError> {
    let claims = decode_jwt(token, secret)?;
    if claims.purpose != PURPOSE_SIGNUP {
        return Err(TokenError::WrongPurpose);
    }
    claims.sub.parse::<Uuid>().map_err(|_| TokenError::Malformed)
}
