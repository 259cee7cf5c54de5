//! Events emitted by the timer engine

use serde::{Deserialize, Serialize};

use super::{DisplayFrame, Mode, Variant};

/// Discrete engine output consumed by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEvent {
    /// The countdown display changed
    TickUpdated { display: DisplayFrame },
    /// The countdown reached zero
    Completed { variant: Variant },
    ModeChanged { mode: Mode },
    VariantChanged { variant: Variant },
    Started,
    Paused,
    /// The countdown was restored to the current mode's preset
    Reset,
}

impl TimerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TimerEvent::TickUpdated { .. } => "tick-updated",
            TimerEvent::Completed { .. } => "completed",
            TimerEvent::ModeChanged { .. } => "mode-changed",
            TimerEvent::VariantChanged { .. } => "variant-changed",
            TimerEvent::Started => "started",
            TimerEvent::Paused => "paused",
            TimerEvent::Reset => "reset",
        }
    }
}
