//! Routing and validation tests that run without any infrastructure.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use common::offline_app;

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = offline_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = offline_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(doc["paths"].get("/api/profiles").is_some());
    assert!(doc["paths"].get("/api/stats").is_some());
    assert!(doc["paths"].get("/api/export/csv").is_some());
}

#[tokio::test]
async fn malformed_query_params_return_400() {
    let app = offline_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/profiles?limit=abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_without_name_is_rejected_before_any_io() {
    let app = offline_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/profiles")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"zone":"North"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "name is required");
}

#[tokio::test]
async fn empty_bulk_delete_is_rejected() {
    let app = offline_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/profiles/bulk-delete")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"ids":[]}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
