use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tower::ServiceExt;

use countdown_ring::{
    create_router, render::ChannelRenderer, AppState, ManualClock, MemoryStore, TimerEngine,
    DEFAULT_CADENCE,
};

const T0: i64 = 1_700_000_000_000;

fn app(clock: &ManualClock) -> Router {
    let (renderer, frame_rx) = ChannelRenderer::new();
    let engine = Arc::new(TimerEngine::new(
        Arc::new(MemoryStore::new()),
        Arc::new(clock.clone()),
        Arc::new(renderer),
        DEFAULT_CADENCE,
    ));
    engine.restore();
    create_router(Arc::new(AppState::new(engine, frame_rx, 0, "127.0.0.1".to_string())))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if body.is_some() {
        request = request.header("content-type", "application/json");
    }
    let request = request
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test(start_paused = true)]
async fn start_then_status_reports_running_countdown() {
    let clock = ManualClock::new(T0);
    let app = app(&clock);

    let (status, body) = send(&app, "POST", "/timer/start", Some(r#"{"minutes":1,"seconds":30}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["timer"]["status"], "running");
    assert_eq!(body["timer"]["remaining_ms"], 90_000);

    clock.advance(30_000);
    let (status, body) = send(&app, "GET", "/timer", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["display"], "01:00");
    assert_eq!(body["last_action"], "start");
}

#[tokio::test(start_paused = true)]
async fn zero_duration_is_rejected() {
    let app = app(&ManualClock::new(T0));

    let (status, body) = send(&app, "POST", "/timer/start", Some(r#"{"seconds":0}"#)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "error");
    assert_eq!(body["timer"]["status"], "idle");
}

#[tokio::test(start_paused = true)]
async fn pause_and_resume_round_trip() {
    let clock = ManualClock::new(T0);
    let app = app(&clock);
    send(&app, "POST", "/timer/start", Some(r#"{"seconds":60}"#)).await;

    clock.advance(15_000);
    let (_, body) = send(&app, "POST", "/timer/pause", None).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Timer paused");
    assert_eq!(body["timer"]["status"], "paused");
    assert_eq!(body["timer"]["remaining_ms"], 45_000);

    let (_, status) = send(&app, "GET", "/timer", None).await;
    assert_eq!(status["frame"]["display"], "00:45");
    assert_eq!(status["frame"]["progress"], 0.75);

    clock.advance(60_000);
    let (_, body) = send(&app, "POST", "/timer/resume", None).await;
    assert_eq!(body["timer"]["status"], "running");
    assert_eq!(body["timer"]["remaining_ms"], 45_000);
    assert_eq!(body["timer"]["total_ms"], 60_000);
}

#[tokio::test(start_paused = true)]
async fn pause_after_expiry_reports_finish() {
    let clock = ManualClock::new(T0);
    let app = app(&clock);
    send(&app, "POST", "/timer/start", Some(r#"{"seconds":1}"#)).await;

    clock.advance(1_500);
    let (status, body) = send(&app, "POST", "/timer/pause", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Timer finished before it could be paused");
    assert_eq!(body["timer"]["status"], "idle");

    let (_, status) = send(&app, "GET", "/timer", None).await;
    assert_eq!(status["frame"]["screen"], "done");
    assert_eq!(status["frame"]["completions"], 1);
}

#[tokio::test(start_paused = true)]
async fn out_of_order_operations_are_ignored() {
    let app = app(&ManualClock::new(T0));

    let (status, body) = send(&app, "POST", "/timer/pause", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");

    let (_, body) = send(&app, "POST", "/timer/resume", None).await;
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["timer"]["status"], "idle");
}

#[tokio::test(start_paused = true)]
async fn reset_returns_to_setup() {
    let app = app(&ManualClock::new(T0));
    send(&app, "POST", "/timer/start", Some(r#"{"hours":1}"#)).await;

    let (_, body) = send(&app, "POST", "/timer/reset", None).await;
    assert_eq!(body["timer"]["status"], "idle");

    let (_, status) = send(&app, "GET", "/timer", None).await;
    assert_eq!(status["frame"]["screen"], "setup");
    assert_eq!(status["last_action"], "reset");
}

#[tokio::test(start_paused = true)]
async fn health_reports_version() {
    let app = app(&ManualClock::new(T0));

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
