//! The reqwest transport against a live local server.

use axum::http::{HeaderMap, Method as HttpMethod, StatusCode, Uri};
use axum::routing::{any, get};
use axum::{Json, Router};
use clinica::client::{ApiClient, ErrorKind, ReqwestTransport};
use clinica::token::MemoryTokenStore;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

async fn echo(method: HttpMethod, uri: Uri, headers: HeaderMap, body: String) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "authorization": header("authorization"),
        "content_type": header("content-type"),
        "body": body,
    }))
}

/// Local test traffic must not go through an environment proxy
fn transport(timeout: Option<Duration>) -> ReqwestTransport {
    let mut builder = reqwest::Client::builder().no_proxy();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    ReqwestTransport::from_client(builder.build().unwrap())
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/", get(|| async { Json(json!({"message": "INAAQC backend OK"})) }))
        .route(
            "/pacientes/99",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({"detail": "Paciente no encontrado"})),
                )
            }),
        )
        .route("/slow", get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        }))
        .route("/empty", any(|| async { StatusCode::NO_CONTENT }))
        .fallback(echo);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_bearer_and_json_reach_the_server() {
    let base = spawn_backend().await;
    let client = ApiClient::new(
        base,
        transport(None),
        Arc::new(MemoryTokenStore::with_token("abc123")),
    );

    let response = client.post("/roles", &json!({"name": "admin"})).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body["method"], "POST");
    assert_eq!(response.body["path"], "/roles");
    assert_eq!(response.body["authorization"], "Bearer abc123");
    assert_eq!(response.body["content_type"], "application/json");
    let sent: Value = serde_json::from_str(response.body["body"].as_str().unwrap()).unwrap();
    assert_eq!(sent, json!({"name": "admin"}));
}

#[tokio::test]
async fn test_no_token_no_header() {
    let base = spawn_backend().await;
    let client = ApiClient::new(base, transport(None), Arc::new(MemoryTokenStore::new()));

    let response = client.get("/pacientes").await.unwrap();
    assert_eq!(response.body["method"], "GET");
    assert!(response.body["authorization"].is_null());
}

#[tokio::test]
async fn test_status_errors_and_empty_bodies() {
    let base = spawn_backend().await;
    let client = ApiClient::new(base, transport(None), Arc::new(MemoryTokenStore::new()));

    let err = client.get("/pacientes/99").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Status);
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("Paciente no encontrado"));

    let response = client.delete("/empty").await.unwrap();
    assert_eq!(response.status, 204);
    assert!(response.body.is_null());

    assert_eq!(client.ping().await.unwrap(), "INAAQC backend OK");
}

#[tokio::test]
async fn test_timeout_is_a_network_error() {
    let base = spawn_backend().await;
    let client = ApiClient::new(
        base,
        transport(Some(Duration::from_millis(200))),
        Arc::new(MemoryTokenStore::new()),
    );

    match client.get("/slow").await.unwrap_err() {
        clinica::ApiError::Network { timeout, .. } => assert!(timeout),
        other => panic!("expected network error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_backend() {
    // Bind then drop to get a port nobody listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(
        format!("http://{}", addr),
        transport(None),
        Arc::new(MemoryTokenStore::new()),
    );
    let err = client.get("/").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.status(), None);
}
