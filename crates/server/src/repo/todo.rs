use chrono::NaiveDateTime;
use shared_types::{AppError, ToDoItem};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;
use crate::service::todo::{NewToDoItem, ToDoItemChanges, ToDoStore};

const COLUMNS: &str = "id, user_id, title, description, deadline_at, created_at, updated_at";

/// Insert a new to-do item owned by `user_id`.
pub async fn create(
    pool: &Pool<Postgres>,
    user_id: i64,
    title: &str,
    description: Option<&str>,
    deadline_at: Option<NaiveDateTime>,
) -> Result<ToDoItem, AppError> {
    sqlx::query_as::<_, ToDoItem>(&format!(
        r#"
        INSERT INTO to_do_lists (user_id, title, description, deadline_at)
        VALUES ($1, $2, $3, $4)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(title)
    .bind(description)
    .bind(deadline_at)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Find a to-do by ID, scoped to its owner.
pub async fn find_by_id(
    pool: &Pool<Postgres>,
    user_id: i64,
    id: i64,
) -> Result<Option<ToDoItem>, AppError> {
    sqlx::query_as::<_, ToDoItem>(&format!(
        "SELECT {COLUMNS} FROM to_do_lists WHERE id = $1 AND user_id = $2"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// List all to-dos of a user, earliest deadline first. Undated items last.
pub async fn list_by_user(pool: &Pool<Postgres>, user_id: i64) -> Result<Vec<ToDoItem>, AppError> {
    sqlx::query_as::<_, ToDoItem>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM to_do_lists
        WHERE user_id = $1
        ORDER BY deadline_at ASC NULLS LAST, id ASC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Partially update a to-do. `None` fields keep their stored value.
/// Returns None when no row with that id belongs to the user.
pub async fn update(
    pool: &Pool<Postgres>,
    user_id: i64,
    id: i64,
    title: Option<&str>,
    description: Option<&str>,
    deadline_at: Option<NaiveDateTime>,
) -> Result<Option<ToDoItem>, AppError> {
    sqlx::query_as::<_, ToDoItem>(&format!(
        r#"
        UPDATE to_do_lists SET
            title       = COALESCE($3, title),
            description = COALESCE($4, description),
            deadline_at = COALESCE($5, deadline_at),
            updated_at  = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(user_id)
    .bind(title)
    .bind(description)
    .bind(deadline_at)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Delete a to-do. Returns true if a row was actually deleted.
pub async fn delete(pool: &Pool<Postgres>, user_id: i64, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM to_do_lists WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(result.rows_affected() > 0)
}

/// PostgreSQL-backed [`ToDoStore`].
#[derive(Clone)]
pub struct PgToDoStore {
    pool: Pool<Postgres>,
}

impl PgToDoStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

impl ToDoStore for PgToDoStore {
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<ToDoItem>, AppError> {
        list_by_user(&self.pool, owner_id).await
    }

    async fn insert(&self, owner_id: i64, item: NewToDoItem) -> Result<ToDoItem, AppError> {
        create(
            &self.pool,
            owner_id,
            &item.title,
            item.description.as_deref(),
            item.deadline_at,
        )
        .await
    }

    async fn find_owned(&self, owner_id: i64, id: i64) -> Result<Option<ToDoItem>, AppError> {
        find_by_id(&self.pool, owner_id, id).await
    }

    async fn update_owned(
        &self,
        owner_id: i64,
        id: i64,
        changes: ToDoItemChanges,
    ) -> Result<Option<ToDoItem>, AppError> {
        update(
            &self.pool,
            owner_id,
            id,
            changes.title.as_deref(),
            changes.description.as_deref(),
            changes.deadline_at,
        )
        .await
    }

    async fn delete_owned(&self, owner_id: i64, id: i64) -> Result<bool, AppError> {
        delete(&self.pool, owner_id, id).await
    }
}
