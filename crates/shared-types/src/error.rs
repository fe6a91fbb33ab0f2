use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Top-level message carried by every validation failure.
pub const VALIDATION_MESSAGE: &str = "The given data was invalid.";

/// Categorization of application errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AppErrorKind {
    NotFound,
    ValidationError,
    DatabaseError,
    Unauthorized,
    RateLimited,
    PayloadTooLarge,
    InternalError,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::NotFound => write!(f, "NotFound"),
            AppErrorKind::ValidationError => write!(f, "ValidationError"),
            AppErrorKind::DatabaseError => write!(f, "DatabaseError"),
            AppErrorKind::Unauthorized => write!(f, "Unauthorized"),
            AppErrorKind::RateLimited => write!(f, "RateLimited"),
            AppErrorKind::PayloadTooLarge => write!(f, "PayloadTooLarge"),
            AppErrorKind::InternalError => write!(f, "InternalError"),
        }
    }
}

/// Structured application error returned by every layer of the API.
///
/// Serializes as `{"kind": ..., "message": ..., "errors": {field: [msg, ...]}}`.
/// The `errors` map is omitted when empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(
        rename = "errors",
        default,
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub field_errors: HashMap<String, Vec<String>>,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::NotFound,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::RateLimited,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn validation(
        message: impl Into<String>,
        field_errors: HashMap<String, Vec<String>>,
    ) -> Self {
        Self {
            kind: AppErrorKind::ValidationError,
            message: message.into(),
            field_errors,
        }
    }

    /// Validation error with a single message on a single field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::validation(VALIDATION_MESSAGE, HashMap::new()).with_field_error(field, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::DatabaseError,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::Unauthorized,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::PayloadTooLarge,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::InternalError,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    /// Append a message to a field's error list.
    pub fn with_field_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.field_errors
            .entry(field.into())
            .or_default()
            .push(message.into());
        self
    }

    /// Merge another error's field messages into this one.
    pub fn merge(mut self, other: AppError) -> Self {
        for (field, messages) in other.field_errors {
            self.field_errors.entry(field).or_default().extend(messages);
        }
        self
    }

    #[cfg_attr(not(feature = "server"), allow(dead_code))]
    fn status_code_u16(&self) -> u16 {
        match self.kind {
            AppErrorKind::NotFound => 404,
            AppErrorKind::ValidationError => 422,
            AppErrorKind::DatabaseError => 500,
            AppErrorKind::Unauthorized => 401,
            AppErrorKind::RateLimited => 429,
            AppErrorKind::PayloadTooLarge => 413,
            AppErrorKind::InternalError => 500,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(feature = "validation")]
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors: HashMap<String, Vec<String>> = HashMap::new();
        for (field, errs) in errors.field_errors() {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("The {} field is invalid.", field))
                })
                .collect();
            field_errors.insert(field.to_string(), messages);
        }
        AppError::validation(VALIDATION_MESSAGE, field_errors)
    }
}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::from_u16(self.status_code_u16())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(self)).into_response()
    }
}

/// Prefix axum puts in front of serde errors for a well-formed body of the
/// wrong shape.
#[cfg_attr(not(feature = "server"), allow(dead_code))]
const JSON_DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// Top-level field named by a body deserialization error, if any.
///
/// Serde reports the failing path before the first `": "` (`title`,
/// `tags[0]`, `meta.owner`); a path of `.` means the body itself and yields
/// `None`.
#[cfg_attr(not(feature = "server"), allow(dead_code))]
fn field_from_deserialize_error(text: &str) -> Option<&str> {
    let detail = text.strip_prefix(JSON_DATA_ERROR_PREFIX).unwrap_or(text);
    let (path, _) = detail.split_once(": ")?;
    let is_path = !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
    if !is_path {
        return None;
    }
    path.split(['.', '['])
        .next()
        .filter(|field| !field.is_empty())
}

/// Body rejections become structured errors: a field of the wrong type is
/// reported under that field, anything else unreadable under `body`.
#[cfg(feature = "server")]
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        use axum::extract::rejection::JsonRejection;

        if rejection.status() == axum::http::StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::payload_too_large(rejection.body_text());
        }

        match rejection {
            JsonRejection::JsonDataError(e) => {
                let text = e.body_text();
                match field_from_deserialize_error(&text) {
                    Some(field) => AppError::field(
                        field,
                        format!("The {} field is invalid.", field.replace('_', " ")),
                    ),
                    None => AppError::field("body", "The request body has an invalid shape."),
                }
            }
            JsonRejection::JsonSyntaxError(_) => {
                AppError::field("body", "The request body must be valid JSON.")
            }
            JsonRejection::MissingJsonContentType(_) => AppError::field(
                "body",
                "The request body must be sent as application/json.",
            ),
            other => AppError::field("body", other.body_text()),
        }
    }
}
