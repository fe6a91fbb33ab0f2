pub mod extract;
pub mod todo;

use axum::{routing::get, Router};
use crate::db::AppState;

/// Build the REST API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route(
            "/to_do_lists",
            get(todo::list_to_do_items).post(todo::create_to_do_item),
        )
        .route(
            "/to_do_lists/{id}",
            get(todo::get_to_do_item)
                .put(todo::update_to_do_item)
                .patch(todo::update_to_do_item)
                .delete(todo::delete_to_do_item),
        )
}

/// REST API router with per-user rate limiting applied.
pub fn api_router_with_rate_limit(
    rate_limit: crate::rate_limit::RateLimitState,
) -> Router<AppState> {
    api_router().layer(axum::middleware::from_fn_with_state(
        rate_limit,
        crate::rate_limit::rate_limit_middleware,
    ))
}
