use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{
    count_items, create_test_item, delete_authed, get_authed, put_json_authed, test_app, ALICE,
    BOB,
};

#[tokio::test]
async fn other_users_item_is_not_visible() {
    let (app, _pool, _guard) = test_app().await;

    let created = create_test_item(&app, ALICE, "Alice private", None).await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = get_authed(&app, &format!("/to_do_lists/{}", id), BOB).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = get_authed(&app, "/to_do_lists", BOB).await;
    assert_eq!(list, serde_json::json!([]));
}

#[tokio::test]
async fn other_users_item_cannot_be_updated() {
    let (app, _pool, _guard) = test_app().await;

    let created = create_test_item(&app, ALICE, "Alice private", None).await;
    let id = created["id"].as_i64().unwrap();

    let body = serde_json::json!({ "title": "Hijack" });
    let (status, _) = put_json_authed(&app, &format!("/to_do_lists/{}", id), &body, BOB).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, current) = get_authed(&app, &format!("/to_do_lists/{}", id), ALICE).await;
    assert_eq!(current["title"], "Alice private");
}

#[tokio::test]
async fn other_users_item_cannot_be_deleted() {
    let (app, pool, _guard) = test_app().await;

    let created = create_test_item(&app, ALICE, "Alice private", None).await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = delete_authed(&app, &format!("/to_do_lists/{}", id), BOB).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(count_items(&pool).await, 1);
}

#[tokio::test]
async fn foreign_and_missing_ids_look_the_same() {
    let (app, _pool, _guard) = test_app().await;

    let created = create_test_item(&app, ALICE, "Alice private", None).await;
    let id = created["id"].as_i64().unwrap();

    let (foreign_status, foreign) = get_authed(&app, &format!("/to_do_lists/{}", id), BOB).await;
    let (missing_status, missing) = get_authed(&app, "/to_do_lists/424242", BOB).await;
    assert_eq!(foreign_status, missing_status);
    assert_eq!(foreign["kind"], missing["kind"]);
}
