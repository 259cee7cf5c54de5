//! State management module
//!
//! This module contains the shared application state and the timer snapshot
//! published by the engine task.

pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use timer_state::TimerSnapshot;
