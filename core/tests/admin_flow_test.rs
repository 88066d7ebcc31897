mod common;

use chrono::FixedOffset;
use common::ScriptedTransport;
use momentum_core::{
    AdminError, CardioHistory, HttpMethod, Notice, Operation, Orchestrator, Phase, Resource, ResultView,
    SubmitOutcome, WeightsHistory,
};
use serde_json::json;
use std::rc::Rc;

fn cet() -> FixedOffset {
    FixedOffset::east_opt(3600).unwrap()
}

fn orchestrator(
    transport: &Rc<ScriptedTransport>,
    resource: Resource,
    operation: Operation,
) -> Orchestrator<Rc<ScriptedTransport>, FixedOffset> {
    Orchestrator::with_timezone(transport.clone(), resource, operation, cet())
}

#[tokio::test]
async fn test_add_workout_end_to_end() {
    let transport = Rc::new(ScriptedTransport::new());
    transport.respond(
        "/admin/view/workouts",
        200,
        r#"[{"id":1,"type":"run","duration":1815,"distance":5.5,"date":"2024-01-01T07:00:00Z"}]"#,
    );

    let mut admin = orchestrator(&transport, Resource::Workouts, Operation::Add);
    admin.add_summary(Box::new(CardioHistory::new(transport.clone())));
    admin.add_summary(Box::new(WeightsHistory::new(transport.clone())));
    admin.start().await.unwrap();
    transport.clear();

    admin.set_field("type", "run");
    admin.set_field("duration_minutes", "30");
    admin.set_field("duration_seconds", "15");
    admin.set_field("distance", "5.5");
    admin.set_field("date", "2024-01-01T08:00");

    let outcome = admin.submit().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Applied);

    let requests = transport.requests();
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].path, "/admin/add/workouts");
    assert_eq!(
        requests[0].body,
        Some(json!({
            "type": "run",
            "duration": 1815,
            "distance": 5.5,
            "date": "2024-01-01T07:00:00.000Z"
        }))
    );
    assert_eq!(requests[1].path, "/admin/view/workouts");
    assert_eq!(transport.requests_to("/workout/logs/cardio").len(), 1);
    assert_eq!(transport.requests_to("/workout/logs/weights").len(), 1);

    let state = admin.state();
    assert_eq!(state.phase(), Phase::ResultShown);
    assert!(state.fields().is_empty());
    assert!(state.form().is_empty());
    assert_eq!(
        state.notice(),
        Some(&Notice::Success("add operation on workouts table was successful!".into()))
    );
    match state.view() {
        Some(ResultView::Grid(grid)) => {
            assert_eq!(grid.columns, vec!["id", "type", "duration", "distance", "date"]);
            assert_eq!(grid.rows[0][2], "30m 15s");
        }
        other => panic!("expected a grid, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_exercise_sends_integer_id() {
    let transport = Rc::new(ScriptedTransport::new());
    let mut admin = orchestrator(&transport, Resource::Exercises, Operation::Update);
    admin.start().await.unwrap();
    transport.clear();

    admin.set_field("id", "7");
    admin.set_field("weights_log_id", "3");
    admin.set_field("name", "Bench Press");
    admin.set_field("set1", "40");
    admin.set_field("set2", "42.5");
    admin.set_field("set3", "45");

    // set2 is an integer field
    let err = admin.submit().await.unwrap_err();
    assert!(err.is_user_correctable());
    assert!(transport.requests().is_empty());
    assert_eq!(admin.state().value("name"), "Bench Press");

    admin.set_field("set2", "42");
    admin.submit().await.unwrap();

    let sent = transport.requests_to("/admin/update/exercises");
    assert_eq!(sent.len(), 1);
    let body = sent[0].body.clone().unwrap();
    assert_eq!(body["id"], json!(7));
    assert!(body["id"].is_i64());
    assert_eq!(body["weights_log_id"], json!(3));
    assert_eq!(body["set2"], json!(42));
    assert_eq!(body["name"], json!("Bench Press"));
}

#[tokio::test]
async fn test_delete_sends_only_id() {
    let transport = Rc::new(ScriptedTransport::new());
    let mut admin = orchestrator(&transport, Resource::Wods, Operation::Delete);
    admin.start().await.unwrap();

    admin.set_field("id", "12");
    admin.submit().await.unwrap();

    let sent = transport.requests_to("/admin/delete/wods");
    assert_eq!(sent[0].body, Some(json!({"id": 12})));
}

#[tokio::test]
async fn test_declined_empty_sends_nothing() {
    let transport = Rc::new(ScriptedTransport::new());
    let mut admin = orchestrator(&transport, Resource::Workouts, Operation::Empty);
    admin.start().await.unwrap();
    transport.clear();

    let pending = match admin.submit().await.unwrap() {
        SubmitOutcome::NeedsConfirmation(pending) => pending,
        other => panic!("expected a confirmation request, got {:?}", other),
    };
    assert_eq!(pending.prompt(), "Are you sure you want to empty the workouts table?");
    admin.cancel_empty();

    assert!(!admin.confirm_empty(pending).await.unwrap());
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_confirmed_empty_posts_once() {
    let transport = Rc::new(ScriptedTransport::new());
    let mut admin = orchestrator(&transport, Resource::WeightWorkouts, Operation::Empty);
    admin.start().await.unwrap();
    transport.clear();

    let pending = admin.request_empty();
    assert!(admin.confirm_empty(pending).await.unwrap());
    // A second answer to the same prompt is ignored
    assert!(!admin.confirm_empty(pending).await.unwrap());

    let sent = transport.requests_to("/admin/empty/weight_workouts");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, HttpMethod::Post);
    assert!(sent[0].body.is_none());
    assert_eq!(
        admin.state().notice(),
        Some(&Notice::Success("Emptied weight_workouts table successfully!".into()))
    );
}

#[tokio::test]
async fn test_server_error_keeps_form() {
    let transport = Rc::new(ScriptedTransport::new());
    transport.respond("/admin/add/weight_workouts", 503, "unavailable");
    let mut admin = orchestrator(&transport, Resource::WeightWorkouts, Operation::Add);
    admin.start().await.unwrap();

    admin.set_field("workout_type", "push");
    admin.set_field("exercise", "Dips");
    let err = admin.submit().await.unwrap_err();

    assert!(matches!(err, AdminError::Server { status: 503, .. }));
    assert_eq!(admin.state().phase(), Phase::SchemaShown);
    assert_eq!(admin.state().value("exercise"), "Dips");
    assert_eq!(
        admin.state().notice(),
        Some(&Notice::Error("Failed to add weight_workouts (server status 503).".into()))
    );
    assert!(transport.requests_to("/workout/logs/cardio").is_empty());
}

#[tokio::test]
async fn test_failed_empty_reports_status() {
    let transport = Rc::new(ScriptedTransport::new());
    transport.respond("/admin/empty/wods", 500, "boom");
    let mut admin = orchestrator(&transport, Resource::Wods, Operation::Empty);
    admin.start().await.unwrap();

    let pending = admin.request_empty();
    assert!(admin.confirm_empty(pending).await.is_err());
    assert_eq!(
        admin.state().notice(),
        Some(&Notice::Error("Failed to empty wods table (server status 500).".into()))
    );
}

#[tokio::test]
async fn test_view_tolerates_schema_drift() {
    let transport = Rc::new(ScriptedTransport::new());
    transport.respond(
        "/admin/view/weight_workouts",
        200,
        r#"[{"id":1,"workout_type":"push","exercise":"Dips","rest":90},{"id":2}]"#,
    );
    let mut admin = orchestrator(&transport, Resource::WeightWorkouts, Operation::View);
    admin.start().await.unwrap();

    match admin.state().view() {
        Some(ResultView::Grid(grid)) => {
            assert_eq!(grid.columns, vec!["id", "workout_type", "exercise", "rest"]);
            assert_eq!(grid.rows[0][3], "90");
            assert_eq!(grid.rows[1], vec!["2", "", "", ""]);
        }
        other => panic!("expected a grid, got {:?}", other),
    }
}

#[tokio::test]
async fn test_null_view_shows_placeholder() {
    let transport = Rc::new(ScriptedTransport::new());
    transport.respond("/admin/view/exercises", 200, "null");
    let mut admin = orchestrator(&transport, Resource::Exercises, Operation::View);
    admin.start().await.unwrap();

    let view = admin.state().view().unwrap();
    assert_eq!(view.placeholder(), Some("No data available"));
}

#[tokio::test]
async fn test_unreachable_server_reports_error() {
    let transport = Rc::new(ScriptedTransport::new());
    transport.refuse("/admin/view/wods");
    let mut admin = orchestrator(&transport, Resource::Wods, Operation::View);
    admin.start().await.unwrap();

    assert!(admin.state().view().is_none());
    assert!(admin.state().notice().unwrap().is_error());
}

#[tokio::test]
async fn test_failed_summary_refresh_does_not_fail_write() {
    let transport = Rc::new(ScriptedTransport::new());
    transport.refuse("/workout/logs/cardio");
    let mut admin = orchestrator(&transport, Resource::WeightsLogs, Operation::Delete);
    admin.add_summary(Box::new(CardioHistory::new(transport.clone())));
    admin.start().await.unwrap();

    admin.set_field("id", "5");
    assert_eq!(admin.submit().await.unwrap(), SubmitOutcome::Applied);
    assert!(!admin.state().notice().unwrap().is_error());
}

#[tokio::test]
async fn test_view_submit_refetches() {
    let transport = Rc::new(ScriptedTransport::new());
    let mut admin = orchestrator(&transport, Resource::Workouts, Operation::View);
    admin.start().await.unwrap();
    transport.clear();

    assert_eq!(admin.submit().await.unwrap(), SubmitOutcome::Refreshed);
    assert_eq!(transport.requests_to("/admin/view/workouts").len(), 1);
}

#[tokio::test]
async fn test_resource_switch_fetches_new_table() {
    let transport = Rc::new(ScriptedTransport::new());
    let mut admin = orchestrator(&transport, Resource::Workouts, Operation::Add);
    admin.start().await.unwrap();
    admin.select_resource(Resource::Exercises).await.unwrap();

    assert_eq!(admin.state().resource(), Resource::Exercises);
    assert_eq!(admin.state().fields().len(), 5);
    assert_eq!(transport.requests_to("/admin/view/exercises").len(), 1);
}
