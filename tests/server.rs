//! Router tests for the demo service.

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use axum::Router;
use json_envelope::http::server::AppState;
use json_envelope::HttpServer;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

fn app() -> (Router, common::CapturedLogs) {
    let (dispatcher, logs) = common::capturing_dispatcher();
    (HttpServer::build_router(AppState { dispatcher }), logs)
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "application/json");
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_root() {
    let (router, _logs) = app();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let (status, body) = send(router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Request was successful");
    assert_eq!(body["data"]["status"], "running");
}

#[tokio::test]
async fn test_health() {
    let (router, _logs) = app();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, body) = send(router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "success", "status_code": 200, "message": "Service is healthy", "data": {"status": "ok"}})
    );
}

#[tokio::test]
async fn test_echo_reports_client_address() {
    let (router, logs) = app();
    let mut request = Request::builder()
        .uri("/echo?x=1")
        .header("user-agent", "curl/8.0")
        .header("x-real-ip", "7.7.7.7")
        .body(Body::empty())
        .unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo("10.0.0.5:40000".parse::<SocketAddr>().unwrap()));

    let (status, body) = send(router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"method": "GET", "path": "/echo", "user_agent": "curl/8.0", "remote_ip": "7.7.7.7"})
    );

    let record = logs.last();
    assert_eq!(record["fields"]["remote_ip"], "7.7.7.7");
}

#[tokio::test]
async fn test_echo_falls_back_to_connection_address() {
    let (router, _logs) = app();
    let mut request = Request::builder().uri("/echo").body(Body::empty()).unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo("6.6.6.6:1234".parse::<SocketAddr>().unwrap()));

    let (_, body) = send(router, request).await;
    assert_eq!(body["data"]["remote_ip"], "6.6.6.6");
}

#[tokio::test]
async fn test_validate_rejects_bad_email() {
    let (router, logs) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/validate")
        .body(Body::from(r#"{"email":"nope"}"#))
        .unwrap();

    let (status, body) = send(router, request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "error");
    assert_eq!(
        body["error"],
        json!({"type": "unprocessable_entity", "details": {"email": "must be a valid email address"}})
    );
    assert!(body.get("data").is_none());

    let record = logs.last();
    assert_eq!(record["level"], "WARN");
    assert_eq!(record["fields"]["method"], "POST");
    assert_eq!(record["fields"]["path"], "/validate");
}

#[tokio::test]
async fn test_validate_accepts_good_email() {
    let (router, _logs) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/validate")
        .body(Body::from(r#"{"email":"a@b.c"}"#))
        .unwrap();

    let (status, body) = send(router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"email": "a@b.c"}));
}

#[tokio::test]
async fn test_validate_rejects_non_json() {
    let (router, _logs) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/validate")
        .body(Body::from("email=a@b.c"))
        .unwrap();

    let (status, body) = send(router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Request body must be a JSON object");
    assert_eq!(body["error"]["type"], "validation_error");
}

#[tokio::test]
async fn test_unknown_route_is_404_envelope() {
    let (router, logs) = app();
    let request = Request::builder().uri("/missing").body(Body::empty()).unwrap();

    let (status, body) = send(router, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "status": "error",
            "status_code": 404,
            "message": "The requested resource was not found",
            "error": {"type": "not_found"}
        })
    );

    let record = logs.last();
    assert_eq!(record["level"], "INFO");
    assert_eq!(record["fields"]["message"], "HTTP client error response sent");
}

#[tokio::test]
async fn test_wrong_method_is_405_envelope() {
    let (router, logs) = app();
    let request = Request::builder().uri("/validate").body(Body::empty()).unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let headers = response.headers();
    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(
        headers.get("cache-control").unwrap(),
        "no-cache, no-store, must-revalidate"
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        json!({
            "status": "error",
            "status_code": 405,
            "message": "The requested method is not allowed for this resource",
            "error": {"type": "method_not_allowed"}
        })
    );

    let record = logs.last();
    assert_eq!(record["level"], "WARN");
    assert_eq!(record["fields"]["status_code"], 405);
    assert_eq!(record["fields"]["method"], "GET");
    assert_eq!(record["fields"]["path"], "/validate");
}

#[tokio::test]
async fn test_validate_rejects_oversized_body() {
    let (router, logs) = app();
    let oversized = vec![b' '; 64 * 1024 + 1];
    let request = Request::builder()
        .method("POST")
        .uri("/validate")
        .body(Body::from(oversized))
        .unwrap();

    let (status, body) = send(router, request).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["status_code"], 413);
    assert_eq!(body["message"], "Request body exceeds 65536 bytes");
    assert_eq!(body["error"]["type"], "unknown_error");

    let record = logs.last();
    assert_eq!(record["fields"]["message"], "HTTP client error response sent");
}
