// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router-level tests driving the JSON API with `tower::ServiceExt::oneshot`.

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use breakdesk_gateway::{router, AppState};
use breakdesk_test_utils::{CaptureNotifier, TestHarness, TEST_PHOTO_URL};
use serde_json::{json, Value};
use tower::ServiceExt;

const SUMMARY: &str = "Here is the summary:\n\
    Equipment Type: Dump Truck\n\
    Equipment ID: 743\n\
    Problem: Brakes fading on descent\n\
    Date: today\n\
    Photo URL: (none)\n\n\
    Would you like me to submit this report?";

const LIMIT: usize = 64 * 1024;

fn app(harness: &TestHarness) -> (Router, AppState) {
    let state = AppState::new(
        harness.driver.clone(),
        harness.reports.clone(),
        harness.image_host_dyn(),
    );
    (router(state.clone(), LIMIT), state)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn multipart(field: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    let boundary = "breakdesk-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"p.png\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}

async fn upload(app: &Router, id: &str, field: &str, bytes: &[u8]) -> (StatusCode, Value) {
    let (content_type, body) = multipart(field, bytes);
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/sessions/{id}/photo"))
                .header("content-type", content_type)
                .header("content-length", body.len())
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn new_session(app: &Router) -> String {
    let (status, view) = call(app, "POST", "/api/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    view["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn index_serves_chat_page() {
    let harness = TestHarness::builder().build().unwrap();
    let (app, _) = app(&harness);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Create Breakdown Report"));
    assert!(html.contains("Confirm Submission"));
}

#[tokio::test]
async fn page_keeps_session_across_back_forward_cache() {
    let harness = TestHarness::builder().build().unwrap();
    let (app, _) = app(&harness);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();

    let pagehide = html
        .split("addEventListener('pagehide'")
        .nth(1)
        .expect("pagehide handler");
    let delete_at = pagehide.find("method: 'DELETE'").expect("session delete");
    let persisted_at = pagehide.find("ev.persisted").expect("bfcache check");
    assert!(persisted_at < delete_at);

    let pageshow = html
        .split("addEventListener('pageshow'")
        .nth(1)
        .expect("pageshow handler");
    assert!(pageshow.contains("ev.persisted"));
    assert!(pageshow.contains("startSession()"));
}

#[tokio::test]
async fn chat_is_gated_on_email() {
    let harness = TestHarness::builder().build().unwrap();
    let (app, _) = app(&harness);
    let id = new_session(&app).await;

    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/sessions/{id}/messages"),
        Some(json!({"content": "My truck broke"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("email"));

    let (status, _) = call(
        &app,
        "PUT",
        &format!("/api/sessions/{id}/email"),
        Some(json!({"email": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, view) = call(
        &app,
        "PUT",
        &format!("/api/sessions/{id}/email"),
        Some(json!({"email": "lee@mineco.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["email"], "lee@mineco.com");
}

#[tokio::test]
async fn full_interview_submits_report() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["What is the equipment ID?".into(), SUMMARY.into()])
        .with_notifier(CaptureNotifier::new())
        .build()
        .unwrap();
    let (app, _) = app(&harness);
    let id = new_session(&app).await;
    call(
        &app,
        "PUT",
        &format!("/api/sessions/{id}/email"),
        Some(json!({"email": "lee@mineco.com"})),
    )
    .await;

    let (status, turn) = call(
        &app,
        "POST",
        &format!("/api/sessions/{id}/messages"),
        Some(json!({"content": "Dump truck brakes"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(turn["reply"], "What is the equipment ID?");
    assert_eq!(turn["session"]["awaiting_confirmation"], false);

    let (status, photo) = upload(&app, &id, "image", b"\x89PNG fake").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(photo["photo_url"], TEST_PHOTO_URL);

    let (_, turn) = call(
        &app,
        "POST",
        &format!("/api/sessions/{id}/messages"),
        Some(json!({"content": "743, today"})),
    )
    .await;
    assert_eq!(turn["session"]["awaiting_confirmation"], true);
    assert_eq!(turn["session"]["state"], "confirm_pending");
    let messages = turn["session"]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert!(messages.iter().all(|m| m["role"] != "system"));

    let (status, submitted) = call(&app, "POST", &format!("/api/sessions/{id}/submit"), None).await;
    assert_eq!(status, StatusCode::OK);
    let report_id = submitted["report_id"].as_str().unwrap();
    assert_eq!(report_id.len(), 8);
    assert_eq!(
        submitted["message"],
        format!("Report {report_id} submitted successfully!")
    );
    assert!(submitted["webhook_error"].is_null());
    assert_eq!(submitted["report"]["equipment_type"], "Dump Truck");
    assert_eq!(submitted["report"]["photo_url"], TEST_PHOTO_URL);
    assert_eq!(submitted["report"]["submitted_by"], "lee@mineco.com");
    assert_eq!(submitted["session"]["awaiting_confirmation"], false);

    let rows = harness.log_records().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], report_id);
    assert_eq!(harness.notifier.as_ref().unwrap().delivered().await.len(), 1);

    let (status, _) = call(&app, "POST", &format!("/api/sessions/{id}/submit"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn webhook_failure_is_reported_inside_success() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec![SUMMARY.into()])
        .with_notifier(CaptureNotifier::failing("connection refused"))
        .build()
        .unwrap();
    let (app, _) = app(&harness);
    let id = new_session(&app).await;
    call(&app, "PUT", &format!("/api/sessions/{id}/email"), Some(json!({"email": "a@b.c"}))).await;
    call(&app, "POST", &format!("/api/sessions/{id}/messages"), Some(json!({"content": "go"}))).await;

    let (status, submitted) = call(&app, "POST", &format!("/api/sessions/{id}/submit"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        submitted["webhook_error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to send to webhook")
    );
    assert_eq!(harness.log_records().unwrap().len(), 1);
}

#[tokio::test]
async fn provider_failure_is_bad_gateway_and_rolls_back() {
    let harness = TestHarness::builder().build().unwrap();
    harness.provider.fail_next("quota exceeded").await;
    let (app, _) = app(&harness);
    let id = new_session(&app).await;
    call(&app, "PUT", &format!("/api/sessions/{id}/email"), Some(json!({"email": "a@b.c"}))).await;

    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/sessions/{id}/messages"),
        Some(json!({"content": "hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("quota exceeded"));

    let (_, view) = call(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(view["messages"], json!([]));
}

#[tokio::test]
async fn decline_clears_confirmation() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec![SUMMARY.into()])
        .build()
        .unwrap();
    let (app, _) = app(&harness);
    let id = new_session(&app).await;
    call(&app, "PUT", &format!("/api/sessions/{id}/email"), Some(json!({"email": "a@b.c"}))).await;
    call(&app, "POST", &format!("/api/sessions/{id}/messages"), Some(json!({"content": "go"}))).await;

    let (status, view) = call(&app, "POST", &format!("/api/sessions/{id}/decline"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["awaiting_confirmation"], false);
    assert!(harness.log_records().unwrap().is_empty());
}

#[tokio::test]
async fn photo_upload_errors() {
    let harness = TestHarness::builder().build().unwrap();
    let (app, _) = app(&harness);
    let id = new_session(&app).await;

    let (status, _) = upload(&app, &id, "attachment", b"data").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    harness
        .image_host
        .as_ref()
        .unwrap()
        .fail_next("unsupported image format")
        .await;
    let (status, body) = upload(&app, &id, "image", b"not an image").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("unsupported image format"));

    let (_, view) = call(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert!(view["photo_url"].is_null());
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let harness = TestHarness::builder().build().unwrap();
    let (app, _) = app(&harness);
    let id = new_session(&app).await;

    let (status, _) = upload(&app, &id, "image", &vec![0u8; LIMIT + 1]).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn upload_without_image_host_is_unavailable() {
    let harness = TestHarness::builder().without_image_host().build().unwrap();
    let (app, _) = app(&harness);
    let id = new_session(&app).await;

    let (status, _) = upload(&app, &id, "image", b"png").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, health) = call(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "degraded");
    assert_eq!(health["sessions"], 1);
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let harness = TestHarness::builder().build().unwrap();
    let (app, state) = app(&harness);

    let (status, _) = call(&app, "GET", "/api/sessions/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, "POST", "/api/sessions/missing/submit", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let id = new_session(&app).await;
    let (status, _) = call(&app, "DELETE", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn evicted_session_is_not_found() {
    let harness = TestHarness::builder().build().unwrap();
    let (app, state) = app(&harness);

    let id = new_session(&app).await;
    let (status, _) = call(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(state.sessions.evict_idle(Duration::ZERO), 1);
    let (status, body) = call(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn health_lists_adapters() {
    let harness = TestHarness::builder()
        .with_notifier(CaptureNotifier::new())
        .build()
        .unwrap();
    let (app, _) = app(&harness);

    let (status, health) = call(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");
    let names: Vec<&str> = health["adapters"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["mock-provider", "mock-image-host", "capture-notifier"]);
}
