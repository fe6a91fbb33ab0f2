use axum::{extract::FromRequestParts, http::request::Parts};
use shared_types::AppError;

use super::jwt::Claims;

/// Extractor that requires authentication. Returns 401 if no valid token.
///
/// Handlers pass `claims.sub` on to the service layer as the owner id.
pub struct AuthRequired(pub Claims);

impl AuthRequired {
    pub fn user_id(&self) -> i64 {
        self.0.sub
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthRequired {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthRequired)
            .ok_or_else(|| AppError::unauthorized("Unauthenticated."))
    }
}
