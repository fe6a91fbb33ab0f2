use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{count_items, create_test_item, delete_authed, get_authed, test_app, ALICE};

#[tokio::test]
async fn delete_returns_204_with_empty_body() {
    let (app, pool, _guard) = test_app().await;

    let created = create_test_item(&app, ALICE, "Done", None).await;
    let id = created["id"].as_i64().unwrap();

    let (status, resp) = delete_authed(&app, &format!("/to_do_lists/{}", id), ALICE).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(resp.is_null());
    assert_eq!(count_items(&pool).await, 0);
}

#[tokio::test]
async fn deleted_item_is_gone() {
    let (app, _pool, _guard) = test_app().await;

    let created = create_test_item(&app, ALICE, "Ephemeral", None).await;
    let id = created["id"].as_i64().unwrap();

    delete_authed(&app, &format!("/to_do_lists/{}", id), ALICE).await;

    let (status, _) = get_authed(&app, &format!("/to_do_lists/{}", id), ALICE).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete_authed(&app, &format!("/to_do_lists/{}", id), ALICE).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_only_removes_target() {
    let (app, pool, _guard) = test_app().await;

    let keep = create_test_item(&app, ALICE, "Keep", None).await;
    let gone = create_test_item(&app, ALICE, "Drop", None).await;

    delete_authed(&app, &format!("/to_do_lists/{}", gone["id"]), ALICE).await;

    assert_eq!(count_items(&pool).await, 1);
    let (_, list) = get_authed(&app, "/to_do_lists", ALICE).await;
    assert_eq!(list[0]["id"], keep["id"]);
}

#[tokio::test]
async fn delete_not_found() {
    let (app, _pool, _guard) = test_app().await;

    let (status, _) = delete_authed(&app, "/to_do_lists/424242", ALICE).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
