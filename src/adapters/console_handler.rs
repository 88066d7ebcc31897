use axum::{extract::State, Json};
use momentum_core::ConsoleDefaults;

/// `GET /api/console/defaults`: the configured opening table and operation
pub async fn defaults(State(defaults): State<ConsoleDefaults>) -> Json<ConsoleDefaults> {
    Json(defaults)
}
