use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// A recorded write: `(operation, resource, body)`
pub type Write = (String, String, Option<Value>);

/// Stand-in for the workout persistence service on a random port
pub struct MockBackend {
    pub addr: SocketAddr,
    pub base_url: String,
    writes: Arc<Mutex<Vec<Write>>>,
}

#[derive(Clone)]
struct BackendState {
    writes: Arc<Mutex<Vec<Write>>>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let state = BackendState { writes: writes.clone() };

        let app = Router::new()
            .route("/admin/view/:resource", get(view))
            .route("/admin/:operation/:resource", post(write))
            .route("/workout/logs/cardio", get(|| async { Json(json!([])) }))
            .route("/workout/logs/weights", get(|| async { Json(Value::Null) }))
            .route("/workout/last/weights", get(|| async { StatusCode::NOT_FOUND }))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockBackend { addr, base_url, writes }
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }
}

async fn view(Path(resource): Path<String>) -> impl IntoResponse {
    match resource.as_str() {
        "workouts" => Json(json!([
            {"id": 1, "type": "run", "duration": 1815, "distance": 5.5, "date": "2024-01-01T07:00:00Z"}
        ]))
        .into_response(),
        "exercises" => Json(Value::Null).into_response(),
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn write(
    State(state): State<BackendState>,
    Path((operation, resource)): Path<(String, String)>,
    body: Option<Json<Value>>,
) -> impl IntoResponse {
    state
        .writes
        .lock()
        .unwrap()
        .push((operation, resource, body.map(|Json(v)| v)));
    StatusCode::OK
}
