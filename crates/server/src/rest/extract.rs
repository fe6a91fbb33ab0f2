use axum::extract::FromRequest;
use shared_types::AppError;

/// `axum::Json` whose rejections are rendered as `AppError`, so a body of
/// the wrong shape gets the same field-keyed 422 as a failed validation.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
