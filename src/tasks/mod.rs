//! Background tasks module
//!
//! This module contains the tasks that run alongside the HTTP server: the
//! timer engine itself and the presentation layer fed by its events.

pub mod engine_task;
pub mod presentation;

// Re-export main functions
pub use engine_task::{spawn_timer_engine, stop_timer_tasks, timer_engine_task, EngineRequest, TimerCommand, TimerHandle};
pub use presentation::{presentation_task, PresentationConfig, Presenter};
