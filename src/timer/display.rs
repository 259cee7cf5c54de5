//! Display projection of the countdown state

use serde::{Deserialize, Serialize};

/// What the display sink renders for a given `(remaining, total)` pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayFrame {
    pub minutes: u64,
    pub seconds: u64,
    /// Elapsed share of the run in `[0, 1]`
    pub progress: f64,
}

/// Project countdown state into minutes, seconds and progress.
///
/// Panics when `total_seconds` is zero: presets are positive, so a zero
/// total can only come from a programming error.
pub fn project(remaining_seconds: u64, total_seconds: u64) -> DisplayFrame {
    assert!(
        total_seconds > 0,
        "invariant violation: division by zero projecting progress (total_seconds == 0)"
    );

    let elapsed = total_seconds.saturating_sub(remaining_seconds);
    let progress = (elapsed as f64 / total_seconds as f64).clamp(0.0, 1.0);

    DisplayFrame {
        minutes: remaining_seconds / 60,
        seconds: remaining_seconds % 60,
        progress,
    }
}

impl DisplayFrame {
    pub fn minutes_string(&self) -> String {
        format!("{:02}", self.minutes)
    }

    pub fn seconds_string(&self) -> String {
        format!("{:02}", self.seconds)
    }

    /// `MM:SS`
    pub fn clock(&self) -> String {
        format!("{}:{}", self.minutes_string(), self.seconds_string())
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress * 100.0
    }

    /// Width of the progress bar in percent; the bar shrinks as time elapses
    pub fn bar_width_percent(&self) -> f64 {
        100.0 - self.progress_percent()
    }

    /// Window title prefixed with the remaining time
    pub fn window_title(&self, title: &str) -> String {
        format!("({}) {}", self.clock(), title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halfway_is_half_progress() {
        let frame = project(750, 1500);
        assert_eq!(frame.progress, 0.5);
        assert_eq!(frame.clock(), "12:30");
    }

    #[test]
    fn fresh_run_shows_full_clock() {
        let frame = project(1500, 1500);
        assert_eq!(frame.minutes_string(), "25");
        assert_eq!(frame.seconds_string(), "00");
        assert_eq!(frame.progress_percent(), 0.0);
        assert_eq!(frame.bar_width_percent(), 100.0);
    }

    #[test]
    fn one_minute_into_pomodoro_is_four_percent() {
        let frame = project(1440, 1500);
        assert_eq!(frame.clock(), "24:00");
        assert!((frame.progress_percent() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn finished_run_is_complete() {
        let frame = project(0, 300);
        assert_eq!(frame.clock(), "00:00");
        assert_eq!(frame.progress, 1.0);
    }

    #[test]
    fn title_carries_remaining_time() {
        assert_eq!(
            project(65, 300).window_title("Pomodoro Timer"),
            "(01:05) Pomodoro Timer"
        );
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn zero_total_fails_loudly() {
        project(0, 0);
    }
}
