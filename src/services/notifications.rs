//! Desktop notification permission and delivery

use notify_rust::Notification;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::timer::Variant;

/// Summary line of completion notifications
pub const NOTIFICATION_SUMMARY: &str = "Pomodoro Timer";

/// Whether desktop notifications may be raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPermission {
    /// Bootstrap has not finished yet
    Pending,
    Granted,
    Denied,
}

impl NotificationPermission {
    pub fn is_granted(&self) -> bool {
        matches!(self, NotificationPermission::Granted)
    }
}

/// Probe the notification facility once and publish the result.
///
/// Fire-and-forget: the engine never waits on this, the result is only
/// consulted when a session completes.
pub async fn request_notification_permission(permission_tx: watch::Sender<NotificationPermission>) {
    debug!("Requesting desktop notification permission");

    let permission = match tokio::task::spawn_blocking(probe_notification_server).await {
        Ok(permission) => permission,
        Err(e) => {
            warn!("Notification permission probe failed: {}", e);
            NotificationPermission::Denied
        }
    };

    match permission {
        NotificationPermission::Granted => info!("Desktop notifications enabled"),
        _ => warn!("Desktop notifications unavailable, completion alerts will be audio only"),
    }

    permission_tx.send_replace(permission);
}

#[cfg(all(unix, not(target_os = "macos")))]
fn probe_notification_server() -> NotificationPermission {
    match notify_rust::get_server_information() {
        Ok(server) => {
            debug!("Notification server: {} {} ({})", server.name, server.version, server.vendor);
            NotificationPermission::Granted
        }
        Err(e) => {
            debug!("No notification server reachable: {}", e);
            NotificationPermission::Denied
        }
    }
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn probe_notification_server() -> NotificationPermission {
    NotificationPermission::Granted
}

/// Body text for a completed session
pub fn completion_message(variant: Variant) -> String {
    format!("{} session completed!", variant.label())
}

/// Raise the completion notification. Blocks on the notification bus.
pub fn send_completion_notification(variant: Variant) -> Result<(), String> {
    Notification::new()
        .summary(NOTIFICATION_SUMMARY)
        .body(&completion_message(variant))
        .show()
        .map(|_| ())
        .map_err(|e| format!("Failed to show notification: {}", e))
}
