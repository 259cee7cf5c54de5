//! Countdown timer core
//!
//! This module contains the timer state machine and everything it needs to
//! run independently of any presentation layer.

pub mod display;
pub mod engine;
pub mod events;
pub mod presets;
pub mod scheduler;

// Re-export main types
pub use display::{project, DisplayFrame};
pub use engine::{TimerEngine, TICK_PERIOD};
pub use events::TimerEvent;
pub use presets::{DurationPresets, Mode, Variant};
pub use scheduler::{IntervalScheduler, ManualScheduler, TickId, TickScheduler};
