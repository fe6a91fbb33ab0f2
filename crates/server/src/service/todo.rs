use chrono::NaiveDateTime;
use shared_types::{
    parse_deadline_at, AppError, CreateToDoItemRequest, ToDoItem, UpdateToDoItemRequest,
};

use crate::error_convert::ValidateRequest;

pub const OWNER_MISMATCH: &str = "The user id must match the authenticated user.";

// ── Store seam ──────────────────────────────────────────────────────

/// Fields accepted when creating an item. Built from a validated request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewToDoItem {
    pub title: String,
    pub description: Option<String>,
    pub deadline_at: Option<NaiveDateTime>,
}

/// Fields accepted when updating an item. `None` leaves the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToDoItemChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline_at: Option<NaiveDateTime>,
}

/// Persistence operations for to-do items.
///
/// Every lookup and mutation is keyed by both the item id and the owner id,
/// so an item owned by someone else behaves exactly like a missing one.
#[allow(async_fn_in_trait)]
pub trait ToDoStore: Send + Sync {
    /// All items of an owner, earliest deadline first, undated items last.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<ToDoItem>, AppError>;

    /// Persist a new item. Fails with a `user_id` validation error when the
    /// owner does not exist.
    async fn insert(&self, owner_id: i64, item: NewToDoItem) -> Result<ToDoItem, AppError>;

    async fn find_owned(&self, owner_id: i64, id: i64) -> Result<Option<ToDoItem>, AppError>;

    /// Apply changes atomically. Returns None if no such owned item exists.
    async fn update_owned(
        &self,
        owner_id: i64,
        id: i64,
        changes: ToDoItemChanges,
    ) -> Result<Option<ToDoItem>, AppError>;

    /// Returns true if an owned item was removed.
    async fn delete_owned(&self, owner_id: i64, id: i64) -> Result<bool, AppError>;
}

// ── Service ─────────────────────────────────────────────────────────

/// Owner-scoped CRUD over to-do items.
///
/// The owner id is always passed explicitly by the caller; the service
/// never resolves identity itself.
pub struct ToDoItemService<S> {
    store: S,
}

impl<S: ToDoStore> ToDoItemService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self, owner_id: i64) -> Result<Vec<ToDoItem>, AppError> {
        self.store.list_by_owner(owner_id).await
    }

    pub async fn create(
        &self,
        owner_id: i64,
        req: CreateToDoItemRequest,
    ) -> Result<ToDoItem, AppError> {
        validate(&req, owner_id, req.user_id)?;

        let item = NewToDoItem {
            // `validate` guarantees a non-blank title.
            title: req.title.unwrap_or_default(),
            description: req.description,
            deadline_at: req.deadline_at.as_deref().and_then(parse_deadline_at),
        };

        let created = self.store.insert(owner_id, item).await?;
        tracing::info!(owner_id, item_id = created.id, "Created to-do item");
        Ok(created)
    }

    pub async fn get(&self, owner_id: i64, id: i64) -> Result<ToDoItem, AppError> {
        self.store
            .find_owned(owner_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn update(
        &self,
        owner_id: i64,
        id: i64,
        req: UpdateToDoItemRequest,
    ) -> Result<ToDoItem, AppError> {
        validate(&req, owner_id, req.user_id)?;

        let changes = ToDoItemChanges {
            title: req.title,
            description: req.description,
            deadline_at: req.deadline_at.as_deref().and_then(parse_deadline_at),
        };

        let updated = self
            .store
            .update_owned(owner_id, id, changes)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(owner_id, item_id = id, "Updated to-do item");
        Ok(updated)
    }

    pub async fn delete(&self, owner_id: i64, id: i64) -> Result<(), AppError> {
        if !self.store.delete_owned(owner_id, id).await? {
            return Err(not_found(id));
        }
        tracing::info!(owner_id, item_id = id, "Deleted to-do item");
        Ok(())
    }
}

/// Same error whether the item is missing or belongs to another owner.
fn not_found(id: i64) -> AppError {
    AppError::not_found(format!("To-do item {} not found", id))
}

/// Run field validation plus the ownership rule on `user_id`, reporting
/// every violation at once.
fn validate<R: ValidateRequest>(
    req: &R,
    owner_id: i64,
    claimed_user_id: Option<i64>,
) -> Result<(), AppError> {
    let mut error = match req.validate_request() {
        Ok(()) => None,
        Err(e) => Some(e),
    };

    if claimed_user_id.is_some_and(|claimed| claimed != owner_id) {
        let mismatch = AppError::field("user_id", OWNER_MISMATCH);
        error = Some(match error {
            Some(e) => e.merge(mismatch),
            None => mismatch,
        });
    }

    match error {
        Some(e) => {
            tracing::debug!(
                owner_id,
                fields = ?e.field_errors.keys().collect::<Vec<_>>(),
                "Rejected to-do payload"
            );
            Err(e)
        }
        None => Ok(()),
    }
}
