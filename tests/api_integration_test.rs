mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::mock_backend::MockBackend;
use http_body_util::BodyExt;
use momentum::config::{BackendSettings, ConsoleSettings, ServerSettings, Settings};
use serde_json::{json, Value};
use tower::util::ServiceExt;

fn settings(backend_url: &str) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        backend: BackendSettings {
            url: backend_url.to_string(),
        },
        console: ConsoleSettings {
            default_resource: "workouts".to_string(),
            default_operation: "view".to_string(),
        },
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = momentum::create_app(&settings("http://127.0.0.1:8080"));

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend_url"], "http://127.0.0.1:8080");
    assert!(body["uptime_seconds"].is_number());
}

#[tokio::test]
async fn test_console_defaults_come_from_settings() {
    let mut settings = settings("http://127.0.0.1:8080");
    settings.console.default_resource = "exercises".to_string();
    settings.console.default_operation = "add".to_string();
    let app = momentum::create_app(&settings);

    let request = Request::builder()
        .uri("/api/console/defaults")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"resource": "exercises", "operation": "add"})
    );
}

#[tokio::test]
async fn test_view_is_forwarded() {
    let backend = MockBackend::start().await;
    let app = momentum::create_app(&settings(&backend.base_url));

    let request = Request::builder()
        .uri("/admin/view/workouts")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body[0]["type"], "run");
    assert_eq!(body[0]["duration"], 1815);
}

#[tokio::test]
async fn test_write_body_is_forwarded() {
    let backend = MockBackend::start().await;
    let app = momentum::create_app(&settings(&backend.base_url));

    let request = Request::builder()
        .uri("/admin/delete/exercises")
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(json!({"id": 7}).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        backend.writes(),
        vec![(
            "delete".to_string(),
            "exercises".to_string(),
            Some(json!({"id": 7}))
        )]
    );
}

#[tokio::test]
async fn test_backend_status_is_passed_through() {
    let backend = MockBackend::start().await;
    let app = momentum::create_app(&settings(&backend.base_url));

    let request = Request::builder()
        .uri("/workout/last/weights?type=push")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unreachable_backend_is_bad_gateway() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let app = momentum::create_app(&settings(&url));
    let request = Request::builder()
        .uri("/admin/view/workouts")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("Backend unreachable"));
}
