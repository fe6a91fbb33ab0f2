use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{create_test_item, get_authed, test_app, ALICE};

#[tokio::test]
async fn show_returns_owned_item() {
    let (app, _pool, _guard) = test_app().await;

    let created = create_test_item(&app, ALICE, "Read me", Some("2030-07-04 12:00:00")).await;
    let id = created["id"].as_i64().unwrap();

    let (status, resp) = get_authed(&app, &format!("/to_do_lists/{}", id), ALICE).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["title"], "Read me");
    assert_eq!(resp["deadline_at"], "2030-07-04 12:00:00");
}

#[tokio::test]
async fn show_missing_id_returns_404() {
    let (app, _pool, _guard) = test_app().await;

    let (status, resp) = get_authed(&app, "/to_do_lists/424242", ALICE).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(resp["kind"], "NotFound");
}

#[tokio::test]
async fn show_non_numeric_id_returns_404() {
    let (app, _pool, _guard) = test_app().await;

    let (status, _) = get_authed(&app, "/to_do_lists/not-a-number", ALICE).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
