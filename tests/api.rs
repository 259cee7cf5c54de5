use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tokio::{sync::watch, task::JoinHandle};
use tower::ServiceExt;

use pomodoro_timer::{
    api::create_router,
    services::NotificationPermission,
    state::AppState,
    tasks::spawn_timer_engine,
    timer::{DurationPresets, TICK_PERIOD},
};

fn app() -> (Router, JoinHandle<()>) {
    let (timer, task) = spawn_timer_engine(DurationPresets::default(), TICK_PERIOD);
    let (_permission_tx, permission_rx) = watch::channel(NotificationPermission::Pending);
    let state = Arc::new(AppState::new(
        20554,
        "127.0.0.1".to_string(),
        "Pomodoro Timer".to_string(),
        timer,
        permission_rx,
    ));
    (create_router(state), task)
}

async fn call(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn start_reports_running() {
    let (app, _task) = app();

    let (status, body) = call(&app, "POST", "/start").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["timer"]["running"], true);
    assert_eq!(body["timer"]["active_selector"], "pomodoro");
}

#[tokio::test]
async fn pause_reports_idle() {
    let (app, _task) = app();

    call(&app, "POST", "/start").await;
    let (status, body) = call(&app, "POST", "/pause").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "idle");
    assert_eq!(body["timer"]["running"], false);
}

#[tokio::test]
async fn mode_switch_loads_preset_and_marks_selector() {
    let (app, _task) = app();

    call(&app, "POST", "/start").await;
    let (status, body) = call(&app, "POST", "/mode/shortBreak").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "idle");
    assert_eq!(body["timer"]["mode"], "shortBreak");
    assert_eq!(body["timer"]["active_selector"], "shortBreak");
    assert_eq!(body["timer"]["remaining_seconds"], 300);
    assert_eq!(body["timer"]["clock"], "05:00");
}

#[tokio::test]
async fn unknown_mode_is_rejected() {
    let (app, _task) = app();

    let (status, body) = call(&app, "POST", "/mode/lunch").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["timer"]["mode"], "pomodoro");
}

#[tokio::test]
async fn toggle_switches_to_rest() {
    let (app, _task) = app();

    let (status, body) = call(&app, "POST", "/toggle-work-rest").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["variant"], "rest");
    assert_eq!(body["timer"]["variant_icon"], "coffee");
    assert_eq!(body["timer"]["rest_style"], true);
    assert_eq!(body["timer"]["remaining_seconds"], 300);
}

#[tokio::test]
async fn reset_restores_mode_duration() {
    let (app, _task) = app();

    call(&app, "POST", "/mode/long-break").await;
    call(&app, "POST", "/toggle-work-rest").await;
    let (status, body) = call(&app, "POST", "/reset").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["remaining_seconds"], 900);
    assert_eq!(body["timer"]["variant"], "rest");
}

#[tokio::test]
async fn status_reports_last_action() {
    let (app, _task) = app();

    call(&app, "POST", "/mode/longBreak").await;
    let (status, body) = call(&app, "GET", "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["last_action"], "mode:longBreak");
    assert_eq!(body["title"], "Pomodoro Timer");
    assert_eq!(body["notification_permission"], "pending");
    assert_eq!(body["timer"]["remaining_seconds"], 900);
}

#[tokio::test]
async fn stopped_engine_is_unavailable() {
    let (app, task) = app();
    task.abort();
    let _ = task.await;

    let (status, body) = call(&app, "POST", "/start").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn health_is_ok() {
    let (app, _task) = app();

    let (status, body) = call(&app, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
