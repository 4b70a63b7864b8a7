// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the complaint API.

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use civiq_core::CiviqError;
use civiq_intake::{AdminQueryService, IntakePipeline};

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The intake pipeline behind POST /analyze.
    pub pipeline: Arc<IntakePipeline>,
    /// The query/update facade behind the read and admin routes.
    pub admin: Arc<AdminQueryService>,
    /// Pending-count threshold for the alert endpoint.
    pub alert_threshold: i64,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

/// Gateway server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the full route table.
///
/// `/api/complaints/{key}` serves both the by-email listing and the by-id
/// detail: the handler tries the integer parse first. The static
/// `department` segment takes precedence over the `{key}` capture.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/analyze", post(handlers::post_analyze))
        .route("/api/complaints/{key}", get(handlers::get_complaints_by_key))
        .route(
            "/api/complaints/department/{department}",
            get(handlers::get_complaints_by_department),
        )
        .route("/api/admin/complaints", get(handlers::get_all_complaints))
        .route("/api/admin/alert", get(handlers::get_pending_alert))
        .route(
            "/api/admin/complaint/{serial_no}/status",
            put(handlers::put_complaint_status),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server and serve until the task is dropped.
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<(), CiviqError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener =
        tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| CiviqError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| CiviqError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
