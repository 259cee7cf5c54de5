//! Pomodoro Timer - A countdown timer daemon for the Pomodoro technique
//!
//! This is the main entry point for the pomodoro-timer application.

use std::{sync::Arc, time::Duration};
use tokio::{net::TcpListener, sync::watch};
use tracing::{info, warn};

use pomodoro_timer::{
    api::create_router,
    config::Config,
    services::{request_notification_permission, NotificationPermission},
    state::AppState,
    tasks::{presentation_task, spawn_timer_engine, stop_timer_tasks},
    timer::{DurationPresets, TICK_PERIOD},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_timer={},tower_http=info", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting pomodoro-timer v{}", env!("CARGO_PKG_VERSION"));

    let presets = DurationPresets::default();
    info!(
        "Presets: pomodoro={}min, short break={}min, long break={}min, work={}min, rest={}min",
        presets.pomodoro, presets.short_break, presets.long_break, presets.work, presets.rest
    );

    // Permission bootstrap runs on its own; its result is only read at alert time
    let (permission_tx, permission_rx) = watch::channel(NotificationPermission::Pending);
    if config.no_notifications {
        info!("Desktop notifications disabled by configuration");
        permission_tx.send_replace(NotificationPermission::Denied);
    } else {
        tokio::spawn(request_notification_permission(permission_tx));
    }

    let (timer, engine) = spawn_timer_engine(presets, TICK_PERIOD);

    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.title.clone(),
        timer,
        permission_rx,
    ));

    let presentation_state = Arc::clone(&state);
    let presentation_config = config.presentation();
    let presentation = tokio::spawn(async move {
        presentation_task(presentation_state, presentation_config).await;
    });

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Control server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start            - Start the countdown");
    info!("  POST /pause            - Pause the countdown");
    info!("  POST /reset            - Reset to the current mode");
    info!("  POST /mode/:mode       - Switch to pomodoro, shortBreak or longBreak");
    info!("  POST /toggle-work-rest - Toggle the work/rest variant");
    info!("  GET  /status           - Current timer status");
    info!("  GET  /health           - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // The server dropped the router's state; the presentation task holds the last handle
    if let Err(e) = stop_timer_tasks(presentation, engine, Duration::from_secs(2)).await {
        warn!("{}", e);
    }

    info!("Timer shutdown complete");
    Ok(())
}
