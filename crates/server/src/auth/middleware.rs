use axum::extract::Request;
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;

use super::jwt::validate_access_token;

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Permissive auth middleware.
///
/// Validates the Bearer token when present and inserts its `Claims` into
/// request extensions. Does NOT reject unauthenticated requests; handlers
/// opt in through the `AuthRequired` extractor.
pub async fn auth_middleware(mut req: Request, next: Next) -> Response {
    if let Some(token) = extract_bearer_token(req.headers()) {
        match validate_access_token(token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Rejected bearer token");
            }
        }
    }

    next.run(req).await
}
