// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use breakdesk_agent::DialogueDriver;
use breakdesk_core::{BreakdeskError, ImageHost};
use breakdesk_report::ReportService;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::handlers;
use crate::sessions::{sweep_idle_sessions, SessionStore};

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub driver: Arc<DialogueDriver>,
    pub reports: Arc<ReportService>,
    /// `None` when no image-host key is configured; uploads are refused.
    pub image_host: Option<Arc<dyn ImageHost>>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(
        driver: Arc<DialogueDriver>,
        reports: Arc<ReportService>,
        image_host: Option<Arc<dyn ImageHost>>,
    ) -> Self {
        Self {
            driver,
            reports,
            image_host,
            sessions: Arc::new(SessionStore::new()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body; bounds photo uploads.
    pub max_body_bytes: usize,
    /// Sessions untouched this long are dropped.
    pub session_idle: Duration,
}

/// Builds the application router.
///
/// - GET / (chat page), GET /health
/// - POST /api/sessions, GET|DELETE /api/sessions/{id}
/// - PUT /api/sessions/{id}/email
/// - POST /api/sessions/{id}/{photo,messages,submit,decline}
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::get_health))
        .route("/api/sessions", post(handlers::create_session))
        .route(
            "/api/sessions/{id}",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/api/sessions/{id}/email", put(handlers::put_email))
        .route("/api/sessions/{id}/photo", post(handlers::post_photo))
        .route("/api/sessions/{id}/messages", post(handlers::post_message))
        .route("/api/sessions/{id}/submit", post(handlers::post_submit))
        .route("/api/sessions/{id}/decline", post(handlers::post_decline))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::disable())
                .map_response(axum::response::IntoResponse::into_response)
                .layer(RequestBodyLimitLayer::new(max_body_bytes)),
        )
}

/// Binds `host:port` and serves until `shutdown` resolves. Idle sessions are
/// swept in the background for as long as the server runs.
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), BreakdeskError> {
    let sessions = Arc::clone(&state.sessions);
    let app = router(state, config.max_body_bytes);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| BreakdeskError::Internal(format!("failed to bind {addr}: {e}")))?;

    tracing::info!("Breakdesk listening on http://{addr}");

    let sweeper = tokio::spawn(sweep_idle_sessions(sessions, config.session_idle));
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;
    sweeper.abort();

    served.map_err(|e| BreakdeskError::Internal(format!("server error: {e}")))
}
