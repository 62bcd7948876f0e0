//! Session tokens and cookies for the helpdesk service.
//!
//! Two JWT scopes exist: the login session and the pending-signup scope used
//! between signup and OTP verification. A `purpose` claim keeps them
//! non-interchangeable.

pub mod cookie;
pub mod token;
