//! Shared HTTP plumbing for the helpdesk service.
//!
//! Health handlers, request-id and host-filtering middleware, tracing setup,
//! and serde helpers. No domain logic lives here.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
