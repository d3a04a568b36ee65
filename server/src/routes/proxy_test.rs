use super::*;
use crate::config::Timeouts;
use crate::routes::api_routes;
use crate::upstream::Upstream;
use axum::Router;
use axum::http::header::CONTENT_DISPOSITION;
use axum::routing::{get, post};
use serde_json::Value;
use tokio::net::TcpListener;

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn host_for(backend_url: &str) -> String {
    let timeouts = Timeouts { request_secs: 5, connect_secs: 2 };
    let upstream = Upstream::with_timeouts(backend_url, timeouts).unwrap();
    serve(api_routes(AppState::new(upstream))).await
}

fn mock_backend() -> Router {
    Router::new()
        .route("/extract", post(|body: String| async move { body }))
        .route(
            "/ask",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "backend exploded") }),
        )
        .route(
            "/history",
            get(|| async {
                (
                    [(CONTENT_TYPE, "application/json")],
                    r#"{"success":true,"history":{}}"#,
                )
            }),
        )
        .route(
            "/download",
            get(|| async {
                (
                    [
                        (CONTENT_TYPE, "text/plain"),
                        (CONTENT_DISPOSITION, "attachment; filename=website_content.txt"),
                    ],
                    "page text",
                )
            }),
        )
}

#[tokio::test]
async fn post_body_is_relayed_verbatim() {
    let backend = serve(mock_backend()).await;
    let host = host_for(&backend).await;

    let response = reqwest::Client::new()
        .post(format!("{host}/extract"))
        .json(&serde_json::json!({ "url": "example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let echoed: Value = response.json().await.unwrap();
    assert_eq!(echoed["url"], "example.com");
}

#[tokio::test]
async fn backend_status_is_preserved() {
    let backend = serve(mock_backend()).await;
    let host = host_for(&backend).await;

    let response = reqwest::Client::new()
        .post(format!("{host}/ask"))
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text().await.unwrap(), "backend exploded");
}

#[tokio::test]
async fn json_content_type_comes_back() {
    let backend = serve(mock_backend()).await;
    let host = host_for(&backend).await;

    let response = reqwest::get(format!("{host}/history")).await.unwrap();
    assert_eq!(
        response.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
}

#[tokio::test]
async fn download_keeps_content_disposition() {
    let backend = serve(mock_backend()).await;
    let host = host_for(&backend).await;

    let response = reqwest::get(format!("{host}/download")).await.unwrap();
    assert_eq!(
        response.headers().get(CONTENT_DISPOSITION).and_then(|v| v.to_str().ok()),
        Some("attachment; filename=website_content.txt")
    );
    assert_eq!(response.text().await.unwrap(), "page text");
}

#[tokio::test]
async fn unreachable_backend_is_bad_gateway_with_error_payload() {
    let host = host_for("http://127.0.0.1:1").await;

    let response = reqwest::get(format!("{host}/content")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Backend unavailable"));
}

#[tokio::test]
async fn wrong_method_is_rejected_locally() {
    let host = host_for("http://127.0.0.1:1").await;
    let response = reqwest::get(format!("{host}/extract")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn healthz_is_ok() {
    let host = host_for("http://127.0.0.1:1").await;
    let response = reqwest::get(format!("{host}/healthz")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
}
