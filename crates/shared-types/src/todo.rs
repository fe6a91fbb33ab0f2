use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire and storage format for `deadline_at` (`YYYY-MM-DD HH:MM:SS`).
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const TITLE_REQUIRED: &str = "The title field is required.";
pub const DESCRIPTION_REQUIRED: &str = "The description field is required.";
pub const DEADLINE_FORMAT_MISMATCH: &str =
    "The deadline at does not match the format Y-m-d H:i:s.";

// ---------------------------------------------------------------------------
// Domain model
// ---------------------------------------------------------------------------

/// A to-do item as stored in the `to_do_lists` table.
///
/// `user_id` is the owning user; it is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct ToDoItem {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub deadline_at: Option<NaiveDateTime>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parse a deadline in the exact `YYYY-MM-DD HH:MM:SS` form.
///
/// Rejects anything chrono would accept loosely (single-digit fields,
/// trailing text, extra year digits) by requiring the value to survive a
/// format round-trip unchanged.
pub fn parse_deadline_at(value: &str) -> Option<NaiveDateTime> {
    let parsed = NaiveDateTime::parse_from_str(value, DEADLINE_FORMAT).ok()?;
    if parsed.format(DEADLINE_FORMAT).to_string() == value {
        Some(parsed)
    } else {
        None
    }
}

pub fn format_deadline_at(value: &NaiveDateTime) -> String {
    value.format(DEADLINE_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// Request/Response DTOs
// ---------------------------------------------------------------------------

/// API response for a to-do item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ToDoItemResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS`, or null when the item has no deadline.
    pub deadline_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ToDoItem> for ToDoItemResponse {
    fn from(t: ToDoItem) -> Self {
        Self {
            id: t.id,
            user_id: t.user_id,
            title: t.title,
            description: t.description,
            deadline_at: t.deadline_at.as_ref().map(format_deadline_at),
            created_at: t.created_at.to_rfc3339(),
            updated_at: t.updated_at.to_rfc3339(),
        }
    }
}

/// Request body for creating a to-do item.
///
/// Only these fields are read from the body. `user_id` may be sent for
/// compatibility but must name the authenticated user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
#[serde(default)]
pub struct CreateToDoItemRequest {
    #[cfg_attr(
        feature = "validation",
        validate(
            required(message = "The title field is required."),
            custom(function = "validate_not_blank", message = "The title field is required.")
        )
    )]
    pub title: Option<String>,
    pub description: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(custom(
            function = "validate_deadline_at",
            message = "The deadline at does not match the format Y-m-d H:i:s."
        ))
    )]
    pub deadline_at: Option<String>,
    pub user_id: Option<i64>,
}

/// Request body for a partial update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
#[serde(default)]
pub struct UpdateToDoItemRequest {
    #[cfg_attr(
        feature = "validation",
        validate(custom(function = "validate_not_blank", message = "The title field is required."))
    )]
    pub title: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(custom(
            function = "validate_not_blank",
            message = "The description field is required."
        ))
    )]
    pub description: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(custom(
            function = "validate_deadline_at",
            message = "The deadline at does not match the format Y-m-d H:i:s."
        ))
    )]
    pub deadline_at: Option<String>,
    pub user_id: Option<i64>,
}

#[cfg(feature = "validation")]
fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("not_blank"));
    }
    Ok(())
}

#[cfg(feature = "validation")]
fn validate_deadline_at(value: &str) -> Result<(), validator::ValidationError> {
    match parse_deadline_at(value) {
        Some(_) => Ok(()),
        None => Err(validator::ValidationError::new("date_format")),
    }
}
