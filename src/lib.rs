//! # Momentum - fitness tracker host
//!
//! Serves the compiled web console, forwards its API calls to the workout
//! persistence service and offers a terminal admin console built on the same
//! `momentum-core` orchestrator.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clap::Parser;
//! use momentum::{cli::Cli, config::Settings};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::new_with_cli(&Cli::parse())?;
//!     let app = momentum::create_app(&settings);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod console;

use crate::adapters::console_handler;
use crate::adapters::health_handler::HealthHandler;
use crate::adapters::proxy_handler::{self, ProxyState};
use crate::adapters::ui_handler::UIHandler;
use crate::config::Settings;
use axum::{
    routing::{any, get},
    Router,
};
use momentum_core::ConsoleDefaults;
use std::sync::Arc;

/// Creates the Axum application router with all endpoints configured.
pub fn create_app(settings: &Settings) -> Router {
    let health_handler = Arc::new(HealthHandler::new(settings));

    let public_router = Router::new()
        .route("/health", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.health().await }
            }
        }))
        .route("/health/live", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.live().await }
            }
        }));

    let defaults = settings.console.defaults().unwrap_or_else(|e| {
        tracing::warn!("Invalid console defaults, using workouts/view: {}", e);
        ConsoleDefaults::default()
    });
    let console_router = Router::new()
        .route("/api/console/defaults", get(console_handler::defaults))
        .with_state(defaults);

    // Persistence service routes, relayed as-is
    let proxy_router = Router::new()
        .route("/admin/*path", any(proxy_handler::forward))
        .route("/workout/*path", any(proxy_handler::forward))
        .with_state(ProxyState::new(&settings.backend));

    public_router
        .merge(console_router)
        .merge(proxy_router)
        // UI endpoint (catch-all for SPA)
        .fallback(UIHandler::serve)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
}
