//! Pomodoro Timer - A countdown timer daemon for the Pomodoro technique
//!
//! The core is a small state machine ([`timer::TimerEngine`]) driven by a
//! one-second repeating tick. It emits events that a separate presentation
//! layer turns into a terminal display, a window title, a bell and desktop
//! notifications, and it is controlled over a local HTTP API.

pub mod config;
pub mod timer;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use timer::{DurationPresets, Mode, TimerEngine, TimerEvent, Variant};
pub use utils::signals::shutdown_signal;
