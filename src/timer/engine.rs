//! Countdown state machine
//!
//! States are `Idle` and `Running`. Running is defined as holding a
//! [`TickId`]: the engine schedules a repeating tick on `start` and cancels
//! it on every path back to idle, so a running engine always has exactly one
//! live tick and an idle engine has none.

use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{debug, info};

use super::{
    display::project,
    events::TimerEvent,
    presets::{DurationPresets, Mode, Variant},
    scheduler::{TickId, TickScheduler},
};
use crate::state::TimerSnapshot;

/// Period between countdown ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

pub struct TimerEngine<S: TickScheduler> {
    presets: DurationPresets,
    remaining_seconds: u64,
    total_seconds: u64,
    mode: Mode,
    variant: Variant,
    ticker: Option<TickId>,
    tick_period: Duration,
    scheduler: S,
    events: broadcast::Sender<TimerEvent>,
}

impl<S: TickScheduler> TimerEngine<S> {
    /// Create an idle engine in pomodoro mode with the work variant selected
    pub fn new(presets: DurationPresets, scheduler: S, events: broadcast::Sender<TimerEvent>) -> Self {
        let total_seconds = presets.seconds_for_mode(Mode::Pomodoro);
        let engine = Self {
            presets,
            remaining_seconds: total_seconds,
            total_seconds,
            mode: Mode::Pomodoro,
            variant: Variant::Work,
            ticker: None,
            tick_period: TICK_PERIOD,
            scheduler,
            events,
        };
        engine.check_invariants();
        engine
    }

    pub fn with_tick_period(mut self, tick_period: Duration) -> Self {
        self.tick_period = tick_period;
        self
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn presets(&self) -> &DurationPresets {
        &self.presets
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::new(
            self.is_running(),
            self.remaining_seconds,
            self.total_seconds,
            self.mode,
            self.variant,
        )
    }

    /// Begin counting down. Starting a running engine does nothing.
    ///
    /// A finished countdown is refilled to its full duration first.
    pub fn start(&mut self) {
        if self.ticker.is_some() {
            debug!("Start requested while already running, ignoring");
            return;
        }

        if self.remaining_seconds == 0 {
            self.remaining_seconds = self.total_seconds;
            self.emit_display();
        }

        self.ticker = Some(self.scheduler.schedule(self.tick_period));
        info!(
            "Timer started: {} remaining in {} mode ({} variant)",
            project(self.remaining_seconds, self.total_seconds).clock(),
            self.mode,
            self.variant
        );
        self.emit(TimerEvent::Started);
    }

    /// Cancel the scheduled tick, if any, and go idle
    pub fn pause(&mut self) {
        if let Some(id) = self.ticker.take() {
            self.scheduler.cancel(id);
            info!("Timer paused at {}", project(self.remaining_seconds, self.total_seconds).clock());
            self.emit(TimerEvent::Paused);
        }
    }

    /// Restore the current mode's full duration
    pub fn reset(&mut self) {
        self.pause();
        self.load_duration(self.presets.seconds_for_mode(self.mode));
        info!("Timer reset to {} mode", self.mode);
        self.emit_display();
        self.emit(TimerEvent::Reset);
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.pause();
        self.mode = mode;
        self.load_duration(self.presets.seconds_for_mode(mode));
        info!("Switched to {} mode ({} min)", mode, self.presets.minutes_for_mode(mode));
        self.emit_display();
        self.emit(TimerEvent::ModeChanged { mode });
    }

    pub fn toggle_work_rest(&mut self) {
        self.pause();
        self.variant = self.variant.toggled();
        self.load_duration(self.presets.seconds_for_variant(self.variant));
        info!(
            "Switched to {} variant ({} min)",
            self.variant,
            self.presets.minutes_for_variant(self.variant)
        );
        self.emit_display();
        self.emit(TimerEvent::VariantChanged { variant: self.variant });
    }

    /// Deliver a tick from the scheduler. Ticks from a cancelled schedule
    /// are discarded. Returns whether the tick was applied.
    pub fn handle_tick(&mut self, id: TickId) -> bool {
        if self.ticker != Some(id) {
            debug!("Discarding stale tick {:?} (active: {:?})", id, self.ticker);
            return false;
        }
        self.tick();
        true
    }

    /// Decrement the countdown by one second. Completes and goes idle in the
    /// same tick that reaches zero. Ignored while idle.
    pub fn tick(&mut self) {
        if self.ticker.is_none() {
            debug!("Tick while idle, ignoring");
            return;
        }

        assert!(
            self.remaining_seconds > 0,
            "invariant violation: ticking with no time remaining"
        );
        self.remaining_seconds -= 1;
        self.check_invariants();
        debug!("Tick: {} seconds remaining", self.remaining_seconds);
        self.emit_display();

        if self.remaining_seconds == 0 {
            info!("{} session completed", self.variant);
            self.emit(TimerEvent::Completed { variant: self.variant });
            self.pause();
        }
    }

    fn load_duration(&mut self, seconds: u64) {
        self.remaining_seconds = seconds;
        self.total_seconds = seconds;
        self.check_invariants();
    }

    fn check_invariants(&self) {
        assert!(
            self.total_seconds > 0,
            "invariant violation: total_seconds must be positive"
        );
        assert!(
            self.remaining_seconds <= self.total_seconds,
            "invariant violation: remaining_seconds {} exceeds total_seconds {}",
            self.remaining_seconds,
            self.total_seconds
        );
    }

    fn emit_display(&self) {
        let display = project(self.remaining_seconds, self.total_seconds);
        self.emit(TimerEvent::TickUpdated { display });
    }

    fn emit(&self, event: TimerEvent) {
        if let Err(e) = self.events.send(event) {
            debug!("No listeners for {} event", e.0.name());
        }
    }
}

impl<S: TickScheduler> Drop for TimerEngine<S> {
    fn drop(&mut self) {
        if let Some(id) = self.ticker.take() {
            self.scheduler.cancel(id);
        }
    }
}
