//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    state::AppState,
    tasks::TimerCommand,
    timer::Mode,
};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

type CommandResult = Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)>;

/// Apply a command and wrap the resulting snapshot
async fn run_command(state: &AppState, command: TimerCommand, message: String) -> CommandResult {
    match state.apply(command).await {
        Ok(snapshot) => {
            info!("{}", message);
            Ok(Json(ApiResponse::from_snapshot(message, snapshot)))
        }
        Err(e) => {
            error!("Failed to apply {} command: {}", command, e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::error(e, state.get_timer_snapshot())),
            ))
        }
    }
}

/// Handle POST /start - Start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    run_command(&state, TimerCommand::Start, "Timer started".to_string()).await
}

/// Handle POST /pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    run_command(&state, TimerCommand::Pause, "Timer paused".to_string()).await
}

/// Handle POST /reset - Restore the current mode's duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    run_command(&state, TimerCommand::Reset, "Timer reset".to_string()).await
}

/// Handle POST /mode/:mode - Switch to a preset mode
pub async fn mode_handler(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
) -> CommandResult {
    let mode = match mode.parse::<Mode>() {
        Ok(mode) => mode,
        Err(e) => {
            warn!("Rejected mode switch: {}", e);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(e, state.get_timer_snapshot())),
            ));
        }
    };

    run_command(
        &state,
        TimerCommand::SetMode(mode),
        format!("Switched to {} mode", mode.label()),
    )
    .await
}

/// Handle POST /toggle-work-rest - Flip between work and rest
pub async fn toggle_work_rest_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    run_command(&state, TimerCommand::ToggleWorkRest, "Work/rest variant toggled".to_string()).await
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let title = match state.get_window_title() {
        Ok(title) => title,
        Err(e) => {
            error!("Failed to get window title: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer: state.get_timer_snapshot(),
        title,
        notification_permission: state.notification_permission(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
