//! Duration presets for timer modes and the work/rest variant

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Pomodoro technique mode, each backed by a duration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Pomodoro, Mode::ShortBreak, Mode::LongBreak];

    /// Selector id reported to the UI for the active mode
    pub fn id(&self) -> &'static str {
        match self {
            Mode::Pomodoro => "pomodoro",
            Mode::ShortBreak => "shortBreak",
            Mode::LongBreak => "longBreak",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Pomodoro => "Pomodoro",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "pomodoro" => Ok(Mode::Pomodoro),
            "shortbreak" => Ok(Mode::ShortBreak),
            "longbreak" => Ok(Mode::LongBreak),
            _ => Err(format!("Unknown timer mode: {}", s)),
        }
    }
}

/// Work/rest duration override, tracked independently of [`Mode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Variant {
    Work,
    Rest,
}

impl Variant {
    pub fn toggled(self) -> Self {
        match self {
            Variant::Work => Variant::Rest,
            Variant::Rest => Variant::Work,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Variant::Work => "Work",
            Variant::Rest => "Rest",
        }
    }

    /// Icon name for the toggle control
    pub fn icon(&self) -> &'static str {
        match self {
            Variant::Work => "laptop",
            Variant::Rest => "coffee",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Variant::Work => "💻",
            Variant::Rest => "☕",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable table of preset durations in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationPresets {
    pub pomodoro: u64,
    pub short_break: u64,
    pub long_break: u64,
    pub work: u64,
    pub rest: u64,
}

impl DurationPresets {
    /// Build a preset table. Every duration must be positive.
    pub fn new(pomodoro: u64, short_break: u64, long_break: u64, work: u64, rest: u64) -> Self {
        let presets = Self {
            pomodoro,
            short_break,
            long_break,
            work,
            rest,
        };
        presets.assert_positive();
        presets
    }

    fn assert_positive(&self) {
        assert!(
            self.pomodoro > 0
                && self.short_break > 0
                && self.long_break > 0
                && self.work > 0
                && self.rest > 0,
            "invariant violation: duration presets must be positive, got {:?}",
            self
        );
    }

    pub fn minutes_for_mode(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Pomodoro => self.pomodoro,
            Mode::ShortBreak => self.short_break,
            Mode::LongBreak => self.long_break,
        }
    }

    pub fn minutes_for_variant(&self, variant: Variant) -> u64 {
        match variant {
            Variant::Work => self.work,
            Variant::Rest => self.rest,
        }
    }

    pub fn seconds_for_mode(&self, mode: Mode) -> u64 {
        self.minutes_for_mode(mode) * 60
    }

    pub fn seconds_for_variant(&self, variant: Variant) -> u64 {
        self.minutes_for_variant(variant) * 60
    }
}

impl Default for DurationPresets {
    fn default() -> Self {
        Self::new(25, 5, 15, 25, 5)
    }
}
