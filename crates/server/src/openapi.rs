use axum::Router;
use shared_types::{
    AppError, AppErrorKind, CreateToDoItemRequest, ToDoItemResponse, UpdateToDoItemRequest,
};
use sqlx::{Pool, Postgres};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::db::AppState;
use crate::health;
use crate::rest;

/// OpenAPI documentation for the API.
#[derive(OpenApi)]
#[openapi(
    paths(
        rest::todo::list_to_do_items,
        rest::todo::create_to_do_item,
        rest::todo::get_to_do_item,
        rest::todo::update_to_do_item,
        rest::todo::delete_to_do_item,
        health::health_check,
    ),
    components(schemas(
        AppError, AppErrorKind,
        ToDoItemResponse, CreateToDoItemRequest, UpdateToDoItemRequest,
        health::HealthResponse,
    )),
    tags(
        (name = "to_do_lists", description = "Per-user to-do items. Requires a Bearer access token."),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "To-Do List API",
        description = "Per-user to-do list management",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Build the application router: REST API, `/health`, and the API docs at
/// `/docs` when the `docs` feature flag is on.
///
/// Rate limiting is applied to the REST routes when the `rate_limit` flag is
/// on. Authentication and transport layers are added by the caller.
pub fn app_router(pool: Pool<Postgres>) -> Router {
    let state = AppState { pool };
    let flags = crate::config::feature_flags();

    let api = if flags.rate_limit {
        rest::api_router_with_rate_limit(crate::rate_limit::RateLimitState::from_settings(
            &crate::config::app_config().rate_limit,
        ))
    } else {
        rest::api_router()
    };

    let router = Router::new()
        .merge(api)
        .route("/health", axum::routing::get(health::health_check))
        .with_state(state);

    if flags.docs {
        router.merge(Scalar::with_url("/docs", ApiDoc::openapi()))
    } else {
        router
    }
}
