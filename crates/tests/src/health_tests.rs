use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{send_anonymous, test_app};

#[tokio::test]
async fn health_reports_database_connected() {
    let (app, _pool, _guard) = test_app().await;

    let (status, resp) = send_anonymous(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["db"], "connected");
    assert!(resp["version"].is_string());
}
