use axum::{
    body::Body,
    extract::Extension,
    http::{header, Request, StatusCode},
    routing::{get, post},
    Router,
};
use http_body_util::BodyExt;
use tower::util::ServiceExt;

use api_ingress::request_id::XRequestId;
use api_ingress::{ApiIngress, ApiIngressConfig};

fn api() -> Router {
    Router::new()
        .route(
            "/echo-id",
            get(|Extension(rid): Extension<XRequestId>| async move { rid.0 }),
        )
        .route("/upload", post(|body: String| async move { body.len().to_string() }))
}

fn app(cfg: ApiIngressConfig) -> Router {
    ApiIngress::new(cfg).build_router(api())
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_healthy() {
    let resp = app(ApiIngressConfig::default())
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let v = body_json(resp).await;
    assert_eq!(v["status"], "healthy");
    assert!(v["timestamp"].is_string());
}

#[tokio::test]
async fn generates_request_id_when_missing() {
    let resp = app(ApiIngressConfig::default())
        .oneshot(Request::get("/echo-id").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let header_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap();
    assert!(!header_id.is_empty());

    // handlers see the same id through extensions
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(std::str::from_utf8(&bytes).unwrap(), header_id);
}

#[tokio::test]
async fn preserves_incoming_request_id() {
    let resp = app(ApiIngressConfig::default())
        .oneshot(
            Request::get("/health")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        resp.headers().get("x-request-id").unwrap().to_str().unwrap(),
        "abc-123"
    );
}

#[tokio::test]
async fn unknown_route_uses_failure_envelope() {
    let resp = app(ApiIngressConfig::default())
        .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let v = body_json(resp).await;
    assert_eq!(v["success"], false);
    assert_eq!(v["message"], "Route not found");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let cfg = ApiIngressConfig {
        body_limit_bytes: 16,
        ..Default::default()
    };
    let payload = "x".repeat(64);
    let resp = app(cfg)
        .oneshot(
            Request::post("/upload")
                .header(header::CONTENT_LENGTH, payload.len())
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[test]
fn server_timeout_overrides_module_default() {
    let ingress = ApiIngress::default();
    ingress.override_request_timeout(0);
    assert_eq!(ingress.get_config().request_timeout_sec, 30);
    ingress.override_request_timeout(5);
    assert_eq!(ingress.get_config().request_timeout_sec, 5);
}
