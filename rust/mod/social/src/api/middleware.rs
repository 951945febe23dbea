use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use chirp_core::ServiceError;

use crate::api::AppState;
use crate::service::SocialError;

/// Bearer-token middleware for the protected routes.
///
/// A missing header, a header without a token part, or a token that fails
/// verification all yield 401 "Invalid JWT Token". On success the decoded
/// `Claims` are stored for handlers to extract via `Extension<Claims>`.
pub async fn auth_middleware(
    State(svc): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let claims = match extract_bearer(req.headers()) {
        Some(token) => svc.verify_token(token),
        None => Err(SocialError::InvalidCredential("missing bearer token".into())),
    }
    .inspect_err(|e| debug!(path = %req.uri().path(), "rejected credential: {}", e))?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Extract the Bearer token from the Authorization header.
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
