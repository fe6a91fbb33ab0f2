use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{
    create_test_item, get_authed, patch_json_authed, put_json_authed, test_app, ALICE, BOB,
};

#[tokio::test]
async fn update_title() {
    let (app, _pool, _guard) = test_app().await;

    let created = create_test_item(&app, ALICE, "Original Title", None).await;
    let id = created["id"].as_i64().unwrap();

    let body = serde_json::json!({ "title": "Updated Title" });
    let (status, resp) = put_json_authed(&app, &format!("/to_do_lists/{}", id), &body, ALICE).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(resp["title"], "Updated Title");
    assert_eq!(resp["id"], id);
}

#[tokio::test]
async fn update_multiple_fields() {
    let (app, _pool, _guard) = test_app().await;

    let created = create_test_item(&app, ALICE, "File taxes", None).await;
    let id = created["id"].as_i64().unwrap();

    let body = serde_json::json!({
        "title": "File amended taxes",
        "description": "Form 1040-X",
        "deadline_at": "2030-04-15 17:00:00"
    });
    let (status, resp) = put_json_authed(&app, &format!("/to_do_lists/{}", id), &body, ALICE).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(resp["title"], "File amended taxes");
    assert_eq!(resp["description"], "Form 1040-X");
    assert_eq!(resp["deadline_at"], "2030-04-15 17:00:00");
}

#[tokio::test]
async fn update_preserves_unchanged_fields() {
    let (app, _pool, _guard) = test_app().await;

    let created = create_test_item(&app, ALICE, "Original", Some("2030-01-01 08:00:00")).await;
    let id = created["id"].as_i64().unwrap();

    let body = serde_json::json!({ "description": "Just a note" });
    let (status, resp) = put_json_authed(&app, &format!("/to_do_lists/{}", id), &body, ALICE).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(resp["title"], "Original");
    assert_eq!(resp["description"], "Just a note");
    assert_eq!(resp["deadline_at"], "2030-01-01 08:00:00");
    assert_eq!(resp["created_at"], created["created_at"]);
}

#[tokio::test]
async fn update_is_visible_to_later_reads() {
    let (app, _pool, _guard) = test_app().await;

    let created = create_test_item(&app, ALICE, "Before", None).await;
    let id = created["id"].as_i64().unwrap();

    let body = serde_json::json!({ "title": "After" });
    put_json_authed(&app, &format!("/to_do_lists/{}", id), &body, ALICE).await;

    let (_, resp) = get_authed(&app, &format!("/to_do_lists/{}", id), ALICE).await;
    assert_eq!(resp["title"], "After");
}

#[tokio::test]
async fn patch_behaves_like_put() {
    let (app, _pool, _guard) = test_app().await;

    let created = create_test_item(&app, ALICE, "Patch me", None).await;
    let id = created["id"].as_i64().unwrap();

    let body = serde_json::json!({ "deadline_at": "2030-09-09 09:09:09" });
    let (status, resp) = patch_json_authed(&app, &format!("/to_do_lists/{}", id), &body, ALICE).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(resp["title"], "Patch me");
    assert_eq!(resp["deadline_at"], "2030-09-09 09:09:09");
}

#[tokio::test]
async fn update_not_found() {
    let (app, _pool, _guard) = test_app().await;

    let body = serde_json::json!({ "title": "Doesn't matter" });
    let (status, _) = put_json_authed(&app, "/to_do_lists/424242", &body, ALICE).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_blank_fields_return_422_and_change_nothing() {
    let (app, _pool, _guard) = test_app().await;

    let created = create_test_item(&app, ALICE, "Keep me", None).await;
    let id = created["id"].as_i64().unwrap();

    let body = serde_json::json!({ "title": "", "description": " " });
    let (status, resp) = put_json_authed(&app, &format!("/to_do_lists/{}", id), &body, ALICE).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["errors"]["title"][0], "The title field is required.");
    assert_eq!(resp["errors"]["description"][0], "The description field is required.");

    let (_, current) = get_authed(&app, &format!("/to_do_lists/{}", id), ALICE).await;
    assert_eq!(current, created);
}

#[tokio::test]
async fn update_bad_deadline_returns_422() {
    let (app, _pool, _guard) = test_app().await;

    let created = create_test_item(&app, ALICE, "Dated", None).await;
    let id = created["id"].as_i64().unwrap();

    let body = serde_json::json!({ "deadline_at": "15/04/2030" });
    let (status, resp) = put_json_authed(&app, &format!("/to_do_lists/{}", id), &body, ALICE).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp["errors"]["deadline_at"].is_array());
}

#[tokio::test]
async fn update_cannot_transfer_ownership() {
    let (app, _pool, _guard) = test_app().await;

    let created = create_test_item(&app, ALICE, "Mine", None).await;
    let id = created["id"].as_i64().unwrap();

    let body = serde_json::json!({ "user_id": BOB });
    let (status, resp) = put_json_authed(&app, &format!("/to_do_lists/{}", id), &body, ALICE).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp["errors"]["user_id"].is_array());

    let (_, current) = get_authed(&app, &format!("/to_do_lists/{}", id), ALICE).await;
    assert_eq!(current["user_id"], ALICE);
}

#[tokio::test]
async fn update_wrongly_typed_deadline_returns_field_error() {
    let (app, _pool, _guard) = test_app().await;

    let created = create_test_item(&app, ALICE, "Typed", None).await;
    let id = created["id"].as_i64().unwrap();

    let body = serde_json::json!({ "deadline_at": 20300415 });
    let (status, resp) = put_json_authed(&app, &format!("/to_do_lists/{}", id), &body, ALICE).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["message"], "The given data was invalid.");
    assert_eq!(resp["errors"]["deadline_at"][0], "The deadline at field is invalid.");

    let (_, current) = get_authed(&app, &format!("/to_do_lists/{}", id), ALICE).await;
    assert_eq!(current, created);
}
