//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{info, warn};

use crate::{
    state::{AppState, TimerStatus},
    utils::DurationInput,
};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

type ApiResult = Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)>;

/// Handle POST /timer/start - Start a new countdown
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<DurationInput>,
) -> ApiResult {
    let duration_ms = match input.total_ms() {
        Ok(ms) => ms,
        Err(e) => {
            warn!("Rejected start request {:?}: {}", input, e);
            return Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::error(e.to_string(), state.engine.snapshot())),
            ));
        }
    };

    state.engine.start(duration_ms, None);
    state.record_action("start");
    info!("Start endpoint called - {}ms countdown", duration_ms);

    Ok(Json(ApiResponse::ok("Timer started", state.engine.snapshot())))
}

/// Handle POST /timer/pause - Freeze a running countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    if state.engine.snapshot().status != TimerStatus::Running {
        return Ok(Json(ApiResponse::ignored("No running timer to pause", state.engine.snapshot())));
    }

    state.engine.pause();
    state.record_action("pause");
    info!("Pause endpoint called");

    // The countdown may have run out since the check above
    let after = state.engine.snapshot();
    let message = match after.status {
        TimerStatus::Paused => "Timer paused",
        _ => "Timer finished before it could be paused",
    };
    Ok(Json(ApiResponse::ok(message, after)))
}

/// Handle POST /timer/resume - Continue a paused countdown
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    if state.engine.snapshot().status != TimerStatus::Paused {
        return Ok(Json(ApiResponse::ignored("No paused timer to resume", state.engine.snapshot())));
    }

    state.engine.resume();
    state.record_action("resume");
    info!("Resume endpoint called");

    Ok(Json(ApiResponse::ok("Timer resumed", state.engine.snapshot())))
}

/// Handle POST /timer/reset - Drop any countdown
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    state.engine.reset();
    state.record_action("reset");
    info!("Reset endpoint called");

    Ok(Json(ApiResponse::ok("Timer reset", state.engine.snapshot())))
}

/// Handle GET /timer - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.engine.snapshot(),
        frame: state.latest_frame(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
