//! Cookie builders for the session and pending-signup tokens.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the login session token.
pub const HELPDESK_SESSION: &str = "helpdesk_session";

/// Cookie name for the pending-signup token set between signup and OTP
/// verification.
pub const HELPDESK_SIGNUP: &str = "helpdesk_signup";

/// Session JWT and cookie lifetime in seconds (7 days).
pub const SESSION_EXP: u64 = 604800;

/// Pending-signup JWT and cookie lifetime in seconds (15 minutes).
pub const SIGNUP_EXP: u64 = 900;

/// Set the session cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use helpdesk_session::cookie::{set_session_cookie, HELPDESK_SESSION};
///
/// let jar = CookieJar::new();
/// let jar = set_session_cookie(jar, "token_value".to_string(), "example.com".to_string());
/// let cookie = jar.get(HELPDESK_SESSION).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(604800)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(jar: CookieJar, value: String, domain: String) -> CookieJar {
    let cookie = Cookie::build((HELPDESK_SESSION, value))
        .path("/")
        .domain(domain)
        .max_age(Duration::seconds(SESSION_EXP as i64))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Set the pending-signup cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use helpdesk_session::cookie::{set_signup_cookie, HELPDESK_SIGNUP};
///
/// let jar = CookieJar::new();
/// let jar = set_signup_cookie(jar, "pending_value".to_string(), "example.com".to_string());
/// let cookie = jar.get(HELPDESK_SIGNUP).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(900)));
/// assert!(cookie.http_only().unwrap_or(false));
/// ```
pub fn set_signup_cookie(jar: CookieJar, value: String, domain: String) -> CookieJar {
    let cookie = Cookie::build((HELPDESK_SIGNUP, value))
        .path("/")
        .domain(domain)
        .max_age(Duration::seconds(SIGNUP_EXP as i64))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear the session cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use helpdesk_session::cookie::{clear_session_cookie, set_session_cookie, HELPDESK_SESSION};
///
/// let jar = CookieJar::new();
/// let jar = set_session_cookie(jar, "a".to_string(), "example.com".to_string());
/// let jar = clear_session_cookie(jar, "example.com".to_string());
/// let cookie = jar.get(HELPDESK_SESSION).unwrap();
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_session_cookie(jar: CookieJar, domain: String) -> CookieJar {
    let cookie = Cookie::build((HELPDESK_SESSION, ""))
        .path("/")
        .domain(domain)
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear the pending-signup cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use helpdesk_session::cookie::{clear_signup_cookie, set_signup_cookie, HELPDESK_SIGNUP};
///
/// let jar = CookieJar::new();
/// let jar = set_signup_cookie(jar, "p".to_string(), "example.com".to_string());
/// let jar = clear_signup_cookie(jar, "example.com".to_string());
/// let cookie = jar.get(HELPDESK_SIGNUP).unwrap();
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_signup_cookie(jar: CookieJar, domain: String) -> CookieJar {
    let cookie = Cookie::build((HELPDESK_SIGNUP, ""))
        .path("/")
        .domain(domain)
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}
