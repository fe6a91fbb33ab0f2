use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{count_items, send_anonymous, send_with_token, test_app};

#[tokio::test]
async fn every_route_requires_authentication() {
    let (app, _pool, _guard) = test_app().await;

    let body = serde_json::json!({ "title": "Anonymous" });
    for (method, uri, body) in [
        ("GET", "/to_do_lists", None),
        ("POST", "/to_do_lists", Some(&body)),
        ("GET", "/to_do_lists/1", None),
        ("PUT", "/to_do_lists/1", Some(&body)),
        ("PATCH", "/to_do_lists/1", Some(&body)),
        ("DELETE", "/to_do_lists/1", None),
    ] {
        let (status, resp) = send_anonymous(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(resp["kind"], "Unauthorized");
    }
}

#[tokio::test]
async fn anonymous_create_persists_nothing() {
    let (app, pool, _guard) = test_app().await;

    let body = serde_json::json!({ "title": "Anonymous" });
    send_anonymous(&app, "POST", "/to_do_lists", Some(&body)).await;
    assert_eq!(count_items(&pool).await, 0);
}

#[tokio::test]
async fn invalid_token_is_unauthenticated() {
    let (app, _pool, _guard) = test_app().await;

    let (status, _) = send_with_token(&app, "GET", "/to_do_lists", "not.a.jwt").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
