mod common;

use common::mock_backend::MockBackend;
use momentum::cli::AdminArgs;
use momentum::config::{BackendSettings, ConsoleSettings, ServerSettings, Settings};
use serde_json::json;

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

fn args(resource: &str, operation: &str, fields: &[(&str, &str)], yes: bool) -> AdminArgs {
    AdminArgs {
        resource: Some(resource.to_string()),
        operation: Some(operation.to_string()),
        fields: fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        yes,
    }
}

async fn run(backend: &MockBackend, args: &AdminArgs, answer: &str) -> (anyhow::Result<()>, String) {
    let mut out = Vec::new();
    let result = momentum::console::run_with(&settings(&backend.base_url), args, &mut answer.as_bytes(), &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_view_prints_grid() {
    let backend = MockBackend::start().await;
    let (result, output) = run(&backend, &AdminArgs {
        resource: None,
        operation: None,
        fields: vec![],
        yes: false,
    }, "").await;

    result.unwrap();
    assert!(output.contains("View Workouts: no input fields"));
    assert!(output.contains("30m 15s"));
    assert!(backend.writes().is_empty());
}

#[tokio::test]
async fn test_add_workout() {
    let backend = MockBackend::start().await;
    let add = args(
        "workouts",
        "add",
        &[
            ("type", "run"),
            ("duration_minutes", "30"),
            ("duration_seconds", "15"),
            ("distance", "5.5"),
            ("date", "2024-01-01T08:00:00+01:00"),
        ],
        false,
    );
    let (result, output) = run(&backend, &add, "").await;

    result.unwrap();
    assert!(output.contains("--field distance=<"));
    assert!(output.contains("add operation on workouts table was successful!"));
    assert_eq!(
        backend.writes(),
        vec![(
            "add".to_string(),
            "workouts".to_string(),
            Some(json!({
                "type": "run",
                "duration": 1815,
                "distance": 5.5,
                "date": "2024-01-01T07:00:00.000Z"
            }))
        )]
    );
}

#[tokio::test]
async fn test_declined_empty_sends_nothing() {
    let backend = MockBackend::start().await;
    let (result, output) = run(&backend, &args("exercises", "empty", &[], false), "n\n").await;

    result.unwrap();
    assert!(output.contains("Are you sure you want to empty the exercises table? [y/N]"));
    assert!(output.contains("Cancelled"));
    assert!(backend.writes().is_empty());
}

#[tokio::test]
async fn test_confirmed_empty() {
    let backend = MockBackend::start().await;
    let (result, output) = run(&backend, &args("exercises", "empty", &[], true), "").await;

    result.unwrap();
    assert!(output.contains("Emptied exercises table successfully!"));
    assert!(output.contains("No data available"));
    assert_eq!(
        backend.writes(),
        vec![("empty".to_string(), "exercises".to_string(), None)]
    );
}

#[tokio::test]
async fn test_invalid_id_is_not_sent() {
    let backend = MockBackend::start().await;
    let update = args("exercises", "delete", &[("id", "seven")], false);
    let (result, output) = run(&backend, &update, "").await;

    assert!(result.is_err());
    assert!(output.contains("error: Invalid value for field 'id'"));
    assert!(backend.writes().is_empty());
}
