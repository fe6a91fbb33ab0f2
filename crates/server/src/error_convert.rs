use shared_types::AppError;

/// PostgreSQL foreign key violation. The only foreign key on `to_do_lists`
/// is the owning user.
const FOREIGN_KEY_VIOLATION: &str = "23503";

pub const UNKNOWN_USER: &str = "The selected user id is invalid.";

/// Convert a sqlx::Error into an AppError.
pub fn sqlx_to_app_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::RowNotFound => AppError::not_found("Resource not found"),
        sqlx::Error::Database(db_err)
            if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) =>
        {
            AppError::field("user_id", UNKNOWN_USER)
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            tracing::error!(error = %err, "Database pool unavailable");
            AppError::internal("Database unavailable")
        }
        _ => {
            tracing::error!(error = %err, "Database error");
            AppError::database(err.to_string())
        }
    }
}

/// Extension trait providing `.into_app_error()` on sqlx::Error.
pub trait SqlxErrorExt {
    fn into_app_error(self) -> AppError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_app_error(self) -> AppError {
        sqlx_to_app_error(self)
    }
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}
