use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use taskboard::api::{AppState, router};
use taskboard::model::{Task, TaskFields, TaskId};
use taskboard::store::{MemoryTaskStore, StoreError, TaskStore};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::new(Arc::new(MemoryTaskStore::new())))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Sends `body` verbatim with an optional content type and returns the
/// response content type alongside the decoded body.
async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header(header::CONTENT_TYPE, ct);
    }
    let resp = app
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let ct = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, ct, serde_json::from_slice(&bytes).unwrap())
}

async fn list_len(app: &Router) -> usize {
    let (status, body) = send(app, "GET", "/api/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().unwrap().len()
}

#[tokio::test]
async fn create_assigns_id_and_defaults() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({"title": "Buy milk", "due_date": "2024-01-01"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["title"], "Buy milk");
    assert_eq!(body["description"], "");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["due_date"], "2024-01-01T00:00:00.000Z");

    let (_, list) = send(&app, "GET", "/api/tasks", None).await;
    assert_eq!(list[0]["id"], body["id"]);
}

#[tokio::test]
async fn update_of_unknown_id_is_404_and_creates_nothing() {
    let app = app();
    let (status, body) = send(
        &app,
        "PUT",
        "/api/tasks/does-not-exist",
        Some(json!({"title": "x", "due_date": "2024-01-01"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Task not found"}));
    assert_eq!(list_len(&app).await, 0);
}

#[tokio::test]
async fn create_without_required_fields_is_rejected() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({"description": "no title"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Title and due_date are required."}));
    assert_eq!(list_len(&app).await, 0);
}

#[tokio::test]
async fn invalid_fields_never_persist() {
    let app = app();
    for payload in [
        json!({"title": "   ", "due_date": "2024-01-01"}),
        json!({"title": "Buy milk", "due_date": "someday"}),
        json!({"title": "Buy milk", "due_date": "2024-01-01", "status": "done"}),
    ] {
        let (status, body) = send(&app, "POST", "/api/tasks", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Task validation failed"));
    }
    assert_eq!(list_len(&app).await, 0);
}

#[tokio::test]
async fn unreadable_bodies_get_the_json_missing_fields_error() {
    let app = app();
    let cases = [
        // no content type
        (None, r#"{"description":"no title"}"#),
        // wrong field types
        (Some("application/json"), r#"{"title":5,"due_date":"2024-01-01"}"#),
        // not JSON at all
        (Some("application/json"), "{not json"),
    ];
    for (content_type, body) in cases {
        for (method, uri) in [("POST", "/api/tasks"), ("PUT", "/api/tasks/any-id")] {
            let (status, ct, value) = send_raw(&app, method, uri, content_type, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {body}");
            assert_eq!(ct.as_deref(), Some("application/json"), "{method} {body}");
            assert_eq!(value, json!({"error": "Title and due_date are required."}));
        }
    }
    assert_eq!(list_len(&app).await, 0);
}

#[tokio::test]
async fn update_keeps_id_and_omitted_fields() {
    let app = app();
    let (_, created) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({"title": "Buy milk", "description": "2 litres", "due_date": "2024-01-01"})),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/tasks/{id}"),
        Some(json!({"title": "Buy oat milk", "due_date": "2024-01-02", "status": "completed"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["title"], "Buy oat milk");
    assert_eq!(updated["description"], "2 litres");
    assert_eq!(updated["status"], "completed");
    assert_eq!(updated["due_date"], "2024-01-02T00:00:00.000Z");
    assert_eq!(list_len(&app).await, 1);
}

#[tokio::test]
async fn delete_removes_once_then_404s() {
    let app = app();
    let (_, created) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({"title": "Buy milk", "due_date": "2024-01-01"})),
    )
    .await;
    let uri = format!("/api/tasks/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Task deleted"}));
    assert_eq!(list_len(&app).await, 0);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Task not found"}));
}

#[tokio::test]
async fn ids_are_unique() {
    let app = app();
    let mut ids = Vec::new();
    for i in 0..5 {
        let (_, body) = send(
            &app,
            "POST",
            "/api/tasks",
            Some(json!({"title": format!("Task {i}"), "due_date": "2024-01-01"})),
        )
        .await;
        ids.push(body["id"].as_str().unwrap().to_string());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 5);
}

#[tokio::test]
async fn health_reports_version() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

/// Store whose backend is always down.
struct BrokenStore;

#[async_trait]
impl TaskStore for BrokenStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        Err(StoreError::Backend("disk on fire".to_string()))
    }
    async fn insert(&self, _: TaskFields) -> Result<Task, StoreError> {
        Err(StoreError::Backend("disk on fire".to_string()))
    }
    async fn replace(&self, _: &TaskId, _: TaskFields) -> Result<Task, StoreError> {
        Err(StoreError::Backend("disk on fire".to_string()))
    }
    async fn delete(&self, _: &TaskId) -> Result<Task, StoreError> {
        Err(StoreError::Backend("disk on fire".to_string()))
    }
}

#[tokio::test]
async fn backend_failures_hide_internal_text() {
    let app = router(AppState::new(Arc::new(BrokenStore)));

    let (status, body) = send(&app, "GET", "/api/tasks", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Server error"}));

    let (status, body) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({"title": "Buy milk", "due_date": "2024-01-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["error"].as_str().unwrap().contains("disk on fire"));

    let (status, _) = send(&app, "DELETE", "/api/tasks/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
