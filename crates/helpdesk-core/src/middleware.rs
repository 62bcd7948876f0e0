use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderName, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_http::request_id::{MakeRequestId, RequestId, SetRequestIdLayer};
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct MakeUuidRequestId;

impl MakeRequestId for MakeUuidRequestId {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(id.parse().unwrap()))
    }
}

/// Build the request-id layer. Apply with `.layer(request_id_layer())` in router.
pub fn request_id_layer() -> SetRequestIdLayer<MakeUuidRequestId> {
    SetRequestIdLayer::new(
        HeaderName::from_static("x-request-id"),
        MakeUuidRequestId,
    )
}

/// Host allow-list checked against the `Host` header (port ignored).
///
/// An empty list permits every host.
#[derive(Clone)]
pub struct AllowedHosts(Arc<[String]>);

impl AllowedHosts {
    pub fn new(hosts: Vec<String>) -> Self {
        Self(hosts.into())
    }

    pub fn permits(&self, host: &str) -> bool {
        if self.0.is_empty() {
            return true;
        }
        let bare = host.rsplit_once(':').map_or(host, |(h, _)| h);
        self.0.iter().any(|allowed| allowed.eq_ignore_ascii_case(bare))
    }
}

/// Middleware rejecting requests whose `Host` header is not allow-listed.
/// Apply with `axum::middleware::from_fn_with_state(allowed, filter_host)`.
pub async fn filter_host(
    State(allowed): State<AllowedHosts>,
    request: Request,
    next: Next,
) -> Response {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if allowed.permits(host) {
        next.run(request).await
    } else {
        StatusCode::BAD_REQUEST.into_response()
    }
}
