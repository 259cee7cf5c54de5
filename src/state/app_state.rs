//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use super::TimerSnapshot;
use crate::{
    services::NotificationPermission,
    tasks::{TimerCommand, TimerHandle},
    timer::TimerEvent,
};

/// Application state shared between the HTTP handlers and background tasks
#[derive(Debug)]
pub struct AppState {
    /// Handle to the timer engine task
    pub timer: TimerHandle,
    /// Result of the notification permission bootstrap
    pub notification_permission: watch::Receiver<NotificationPermission>,
    /// Base window title and the title currently shown
    pub title: String,
    pub window_title: Arc<Mutex<String>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    pub fn new(
        port: u16,
        host: String,
        title: String,
        timer: TimerHandle,
        notification_permission: watch::Receiver<NotificationPermission>,
    ) -> Self {
        Self {
            timer,
            notification_permission,
            window_title: Arc::new(Mutex::new(title.clone())),
            title,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Apply a timer command and record it as the last action
    pub async fn apply(&self, command: TimerCommand) -> Result<TimerSnapshot, String> {
        info!("Timer command received: {}", command);
        let snapshot = self.timer.send(command).await?;

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(command.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(snapshot)
    }

    /// Get current timer snapshot
    pub fn get_timer_snapshot(&self) -> TimerSnapshot {
        self.timer.snapshot()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<TimerEvent> {
        self.timer.subscribe()
    }

    pub fn notification_permission(&self) -> NotificationPermission {
        *self.notification_permission.borrow()
    }

    pub fn set_window_title(&self, title: &str) {
        match self.window_title.lock() {
            Ok(mut window_title) => {
                if *window_title != title {
                    *window_title = title.to_string();
                }
            }
            Err(e) => warn!("Failed to lock window title: {}", e),
        }
    }

    pub fn get_window_title(&self) -> Result<String, String> {
        self.window_title
            .lock()
            .map(|title| title.clone())
            .map_err(|e| format!("Failed to lock window title: {}", e))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
