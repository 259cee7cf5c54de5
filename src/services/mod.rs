//! External collaborators module
//!
//! This module contains the sinks the presentation layer drives: the
//! terminal display, the audible alarm and desktop notifications.

pub mod alarm;
pub mod notifications;
pub mod terminal;

// Re-export main functions
pub use alarm::ring_bell;
pub use notifications::{
    completion_message, request_notification_permission, send_completion_notification,
    NotificationPermission,
};
pub use terminal::TerminalDisplay;
