// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the chat page and its JSON API.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use breakdesk_agent::{DialogueState, Session};
use breakdesk_core::{BreakdeskError, ChatMessage, HealthStatus, PluginAdapter, Report};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::error;

use crate::server::AppState;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// An error with the HTTP status it maps to.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<BreakdeskError> for ApiError {
    fn from(err: BreakdeskError) -> Self {
        let status = match &err {
            BreakdeskError::Session(_) => StatusCode::CONFLICT,
            BreakdeskError::Provider { .. }
            | BreakdeskError::ImageHost { .. }
            | BreakdeskError::Webhook { .. } => StatusCode::BAD_GATEWAY,
            BreakdeskError::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
            BreakdeskError::ReportLog { .. } | BreakdeskError::Internal(_) => {
                error!(error = %err, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.to_string())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::new(err.status(), err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// What the page renders for one session.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    /// Transcript without system entries.
    pub messages: Vec<ChatMessage>,
    pub state: DialogueState,
    pub awaiting_confirmation: bool,
}

impl SessionView {
    fn new(id: &str, session: &Session) -> Self {
        Self {
            session_id: id.to_string(),
            email: session.submitter_email().map(str::to_string),
            photo_url: session.current_photo_url().map(str::to_string),
            messages: session.visible_messages().cloned().collect(),
            state: session.state(),
            awaiting_confirmation: session.awaiting_confirmation(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub reply: String,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct PhotoResponse {
    pub photo_url: String,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub report_id: String,
    /// Confirmation text for the user.
    pub message: String,
    pub report: Report,
    /// Set when the report was saved but the webhook could not be notified.
    pub webhook_error: Option<String>,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct AdapterHealth {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok" or "degraded".
    pub status: String,
    pub version: String,
    pub sessions: usize,
    pub adapters: Vec<AdapterHealth>,
}

fn lookup(state: &AppState, id: &str) -> Result<Arc<Mutex<Session>>, ApiError> {
    state
        .sessions
        .get(id)
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, format!("session {id} not found")))
}

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// POST /api/sessions
pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionView>) {
    let session = state.driver.new_session();
    let view_session = session.clone();
    let id = state.sessions.insert(session);
    tracing::debug!(session_id = %id, "session created");
    (StatusCode::CREATED, Json(SessionView::new(&id, &view_session)))
}

/// GET /api/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let session = lookup(&state, &id)?;
    let session = session.lock().await;
    Ok(Json(SessionView::new(&id, &session)))
}

/// DELETE /api/sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.remove(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::new(
            StatusCode::NOT_FOUND,
            format!("session {id} not found"),
        ))
    }
}

/// PUT /api/sessions/{id}/email
pub async fn put_email(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<EmailRequest>,
) -> Result<Json<SessionView>, ApiError> {
    if body.email.trim().is_empty() {
        return Err(ApiError::bad_request("email address must not be empty"));
    }
    let session = lookup(&state, &id)?;
    let mut session = session.lock().await;
    session.set_submitter_email(&body.email)?;
    Ok(Json(SessionView::new(&id, &session)))
}

/// POST /api/sessions/{id}/photo
///
/// Multipart upload; the image is read from the `image` field.
pub async fn post_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<PhotoResponse>, ApiError> {
    let session = lookup(&state, &id)?;
    let Some(host) = state.image_host.clone() else {
        return Err(ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "photo upload is not configured",
        ));
    };

    let mut image = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("image") {
            image = Some(field.bytes().await?);
            break;
        }
    }
    let image = image
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| ApiError::bad_request("multipart field `image` with image data is required"))?;

    let mut session = session.lock().await;
    let url = state
        .driver
        .attach_photo(&mut session, &*host, image.to_vec())
        .await?;
    Ok(Json(PhotoResponse {
        photo_url: url,
        session: SessionView::new(&id, &session),
    }))
}

/// POST /api/sessions/{id}/messages
pub async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<MessageRequest>,
) -> Result<Json<TurnResponse>, ApiError> {
    if body.content.trim().is_empty() {
        return Err(ApiError::bad_request("message must not be empty"));
    }
    let session = lookup(&state, &id)?;
    let mut session = session.lock().await;
    let turn = state.driver.send(&mut session, &body.content).await?;
    Ok(Json(TurnResponse {
        reply: turn.reply,
        session: SessionView::new(&id, &session),
    }))
}

/// POST /api/sessions/{id}/submit
pub async fn post_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let session = lookup(&state, &id)?;
    let mut session = session.lock().await;
    let outcome = state.driver.confirm(&mut session, &state.reports).await?;
    let report_id = outcome.report.report_id.clone();
    Ok(Json(SubmitResponse {
        message: format!("Report {report_id} submitted successfully!"),
        report_id,
        report: outcome.report,
        webhook_error: outcome.webhook_error,
        session: SessionView::new(&id, &session),
    }))
}

/// POST /api/sessions/{id}/decline
pub async fn post_decline(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let session = lookup(&state, &id)?;
    let mut session = session.lock().await;
    state.driver.decline(&mut session);
    Ok(Json(SessionView::new(&id, &session)))
}

async fn adapter_health<A: PluginAdapter + ?Sized>(adapter: &A) -> AdapterHealth {
    let (status, detail) = match adapter.health_check().await {
        Ok(HealthStatus::Healthy) => ("healthy", None),
        Ok(HealthStatus::Degraded(why)) => ("degraded", Some(why)),
        Ok(HealthStatus::Unhealthy(why)) => ("unhealthy", Some(why)),
        Err(e) => ("unhealthy", Some(e.to_string())),
    };
    AdapterHealth {
        name: adapter.name().to_string(),
        status: status.to_string(),
        detail,
    }
}

/// GET /health
///
/// Reports adapter configuration state. The image host and webhook are
/// optional; a missing image host marks the service degraded.
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut adapters = vec![adapter_health(&**state.driver.provider()).await];

    match &state.image_host {
        Some(host) => adapters.push(adapter_health(&**host).await),
        None => adapters.push(AdapterHealth {
            name: "image-host".to_string(),
            status: "disabled".to_string(),
            detail: Some("no image-host API key configured".to_string()),
        }),
    }
    match state.reports.notifier() {
        Some(notifier) => adapters.push(adapter_health(&**notifier).await),
        None => adapters.push(AdapterHealth {
            name: "webhook".to_string(),
            status: "disabled".to_string(),
            detail: Some("no webhook URL configured".to_string()),
        }),
    }

    let degraded = state.image_host.is_none()
        || adapters
            .iter()
            .any(|a| a.status == "degraded" || a.status == "unhealthy");

    Json(HealthResponse {
        status: if degraded { "degraded" } else { "ok" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        sessions: state.sessions.len(),
        adapters,
    })
}
