use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{AppError, CreateToDoItemRequest, ToDoItemResponse, UpdateToDoItemRequest};
use super::extract::JsonBody;
use crate::auth::extractors::AuthRequired;
use crate::repo::todo::PgToDoStore;
use crate::service::todo::ToDoItemService;

fn service(pool: Pool<Postgres>) -> ToDoItemService<PgToDoStore> {
    ToDoItemService::new(PgToDoStore::new(pool))
}

/// Parse the `{id}` path segment. Anything that is not an integer id cannot
/// name an item, so it is reported as not found.
fn parse_id(id: &str) -> Result<i64, AppError> {
    id.parse::<i64>()
        .map_err(|_| AppError::not_found(format!("To-do item {} not found", id)))
}

// ---------------------------------------------------------------------------
// GET /to_do_lists
// ---------------------------------------------------------------------------

/// List the authenticated user's to-do items.
#[utoipa::path(
    get,
    path = "/to_do_lists",
    responses(
        (status = 200, description = "To-do items of the caller", body = Vec<ToDoItemResponse>),
        (status = 401, description = "Unauthenticated", body = AppError)
    ),
    tag = "to_do_lists"
)]
pub async fn list_to_do_items(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
) -> Result<Json<Vec<ToDoItemResponse>>, AppError> {
    let items = service(pool).list(auth.user_id()).await?;
    let response: Vec<ToDoItemResponse> = items.into_iter().map(ToDoItemResponse::from).collect();
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// POST /to_do_lists
// ---------------------------------------------------------------------------

/// Create a to-do item owned by the authenticated user.
#[utoipa::path(
    post,
    path = "/to_do_lists",
    request_body = CreateToDoItemRequest,
    responses(
        (status = 201, description = "To-do item created", body = ToDoItemResponse),
        (status = 401, description = "Unauthenticated", body = AppError),
        (status = 422, description = "Invalid payload", body = AppError)
    ),
    tag = "to_do_lists"
)]
pub async fn create_to_do_item(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    JsonBody(body): JsonBody<CreateToDoItemRequest>,
) -> Result<(StatusCode, Json<ToDoItemResponse>), AppError> {
    let item = service(pool).create(auth.user_id(), body).await?;
    Ok((StatusCode::CREATED, Json(ToDoItemResponse::from(item))))
}

// ---------------------------------------------------------------------------
// GET /to_do_lists/{id}
// ---------------------------------------------------------------------------

/// Get one of the authenticated user's to-do items.
#[utoipa::path(
    get,
    path = "/to_do_lists/{id}",
    params(
        ("id" = i64, Path, description = "To-do item ID")
    ),
    responses(
        (status = 200, description = "To-do item found", body = ToDoItemResponse),
        (status = 401, description = "Unauthenticated", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "to_do_lists"
)]
pub async fn get_to_do_item(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Path(id): Path<String>,
) -> Result<Json<ToDoItemResponse>, AppError> {
    let id = parse_id(&id)?;
    let item = service(pool).get(auth.user_id(), id).await?;
    Ok(Json(ToDoItemResponse::from(item)))
}

// ---------------------------------------------------------------------------
// PUT/PATCH /to_do_lists/{id}
// ---------------------------------------------------------------------------

/// Update one of the authenticated user's to-do items.
///
/// Only the fields present in the body change. PATCH is routed to the same
/// handler.
#[utoipa::path(
    put,
    path = "/to_do_lists/{id}",
    params(
        ("id" = i64, Path, description = "To-do item ID")
    ),
    request_body = UpdateToDoItemRequest,
    responses(
        (status = 202, description = "To-do item updated", body = ToDoItemResponse),
        (status = 401, description = "Unauthenticated", body = AppError),
        (status = 404, description = "Not found", body = AppError),
        (status = 422, description = "Invalid payload", body = AppError)
    ),
    tag = "to_do_lists"
)]
pub async fn update_to_do_item(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateToDoItemRequest>,
) -> Result<(StatusCode, Json<ToDoItemResponse>), AppError> {
    let id = parse_id(&id)?;
    let item = service(pool).update(auth.user_id(), id, body).await?;
    Ok((StatusCode::ACCEPTED, Json(ToDoItemResponse::from(item))))
}

// ---------------------------------------------------------------------------
// DELETE /to_do_lists/{id}
// ---------------------------------------------------------------------------

/// Delete one of the authenticated user's to-do items.
#[utoipa::path(
    delete,
    path = "/to_do_lists/{id}",
    params(
        ("id" = i64, Path, description = "To-do item ID")
    ),
    responses(
        (status = 204, description = "To-do item deleted"),
        (status = 401, description = "Unauthenticated", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "to_do_lists"
)]
pub async fn delete_to_do_item(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    service(pool).delete(auth.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
