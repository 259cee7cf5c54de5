//! Timer snapshot shared with the API and presentation layers

use serde::{Deserialize, Serialize};

use crate::timer::{project, DisplayFrame, Mode, Variant};

/// Point-in-time view of the timer engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub running: bool,
    pub remaining_seconds: u64,
    pub total_seconds: u64,
    pub mode: Mode,
    pub variant: Variant,
    /// Id of the mode selector to mark active
    pub active_selector: String,
    /// Icon for the work/rest toggle
    pub variant_icon: String,
    /// Whether the toggle should be styled as rest
    pub rest_style: bool,
    pub clock: String,
    pub display: DisplayFrame,
}

impl TimerSnapshot {
    pub fn new(
        running: bool,
        remaining_seconds: u64,
        total_seconds: u64,
        mode: Mode,
        variant: Variant,
    ) -> Self {
        let display = project(remaining_seconds, total_seconds);
        Self {
            running,
            remaining_seconds,
            total_seconds,
            mode,
            variant,
            active_selector: mode.id().to_string(),
            variant_icon: variant.icon().to_string(),
            rest_style: variant == Variant::Rest,
            clock: display.clock(),
            display,
        }
    }

    /// Status string used in API responses
    pub fn status(&self) -> &'static str {
        if self.running {
            "running"
        } else {
            "idle"
        }
    }
}
