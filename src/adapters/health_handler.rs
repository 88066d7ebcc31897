use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::Settings;

/// Body of `GET /health`
#[derive(Debug, Serialize, Deserialize)]
pub struct HostHealth {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub started_at: DateTime<Utc>,
    /// Persistence service the `/admin` and `/workout` routes are relayed to
    pub backend_url: String,
    pub default_table: String,
}

pub struct HealthHandler {
    backend_url: String,
    default_table: String,
    booted: Instant,
    started_at: DateTime<Utc>,
}

impl HealthHandler {
    pub fn new(settings: &Settings) -> Self {
        Self {
            backend_url: settings.backend.url.clone(),
            default_table: settings.console.default_resource.clone(),
            booted: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Reports the host only. The persistence service is not probed.
    pub async fn health(&self) -> impl IntoResponse {
        Json(HostHealth {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.booted.elapsed().as_secs(),
            started_at: self.started_at,
            backend_url: self.backend_url.clone(),
            default_table: self.default_table.clone(),
        })
    }

    pub async fn live(&self) -> impl IntoResponse {
        (StatusCode::OK, Json(serde_json::json!({ "status": "alive" })))
    }
}
