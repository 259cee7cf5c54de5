//! Presentation background task
//!
//! Consumes engine events and drives the display and completion sinks.

use std::{
    io::{self, Write},
    sync::Arc,
};

use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::{
    services::{ring_bell, send_completion_notification, NotificationPermission, TerminalDisplay},
    state::{AppState, TimerSnapshot},
    timer::{DisplayFrame, Mode, TimerEvent, Variant},
};

/// Which presentation side effects are enabled
#[derive(Debug, Clone)]
pub struct PresentationConfig {
    pub title: String,
    pub sound: bool,
    pub terminal: bool,
}

/// Title shown once a session has finished
pub fn time_is_up_title(title: &str) -> String {
    format!("🔔 Time is up! - {}", title)
}

/// Variant to raise a desktop notification for, if permission allows it.
/// The audible alert does not depend on this.
pub fn completion_notification(permission: NotificationPermission, completed: Option<Variant>) -> Option<Variant> {
    completed.filter(|_| permission.is_granted())
}

/// Applies timer events to the display sink and rings the alarm.
///
/// Sink failures are logged and never hide a completion from the caller.
pub struct Presenter<W: Write> {
    title: String,
    window_title: String,
    /// Bell output, `None` when sound is disabled
    alarm: Option<W>,
    display: Option<TerminalDisplay<W>>,
    frame: DisplayFrame,
    mode: Mode,
    variant: Variant,
}

impl<W: Write> Presenter<W> {
    pub fn new(
        title: String,
        alarm: Option<W>,
        display: Option<TerminalDisplay<W>>,
        initial: &TimerSnapshot,
    ) -> Self {
        Self {
            window_title: title.clone(),
            title,
            alarm,
            display,
            frame: initial.display,
            mode: initial.mode,
            variant: initial.variant,
        }
    }

    pub fn window_title(&self) -> &str {
        &self.window_title
    }

    /// Draw the current frame and title
    pub fn redraw(&mut self) -> io::Result<()> {
        if let Some(display) = self.display.as_mut() {
            display.render(&self.frame, self.mode, self.variant)?;
            display.set_window_title(&self.window_title)?;
        }
        Ok(())
    }

    /// Apply one event. Returns the completed variant when the event is a
    /// completion, whether or not the display and bell writes succeeded.
    pub fn handle(&mut self, event: &TimerEvent) -> Option<Variant> {
        let mut completed = None;

        match event {
            TimerEvent::TickUpdated { display } => {
                self.frame = *display;
                self.window_title = display.window_title(&self.title);
            }
            TimerEvent::Reset => {
                self.window_title = self.title.clone();
            }
            TimerEvent::ModeChanged { mode } => {
                self.mode = *mode;
            }
            TimerEvent::VariantChanged { variant } => {
                self.variant = *variant;
            }
            TimerEvent::Completed { variant } => {
                completed = Some(*variant);
                self.window_title = time_is_up_title(&self.title);
                if let Some(alarm) = self.alarm.as_mut() {
                    if let Err(e) = ring_bell(alarm) {
                        warn!("Failed to ring completion bell: {}", e);
                    }
                }
            }
            TimerEvent::Started | TimerEvent::Paused => {}
        }

        if let Err(e) = self.redraw() {
            warn!("Failed to render {} event: {}", event.name(), e);
        }
        completed
    }
}

/// Render engine events until the event channel closes
pub async fn presentation_task(state: Arc<AppState>, config: PresentationConfig) {
    info!("Starting presentation task");

    let mut events = state.subscribe_events();
    let alarm = config.sound.then(io::stdout);
    let display = config.terminal.then(|| TerminalDisplay::new(io::stdout()));
    let mut presenter = Presenter::new(config.title, alarm, display, &state.get_timer_snapshot());

    if let Err(e) = presenter.redraw() {
        warn!("Failed to draw initial display: {}", e);
    }
    state.set_window_title(presenter.window_title());

    loop {
        match events.recv().await {
            Ok(event) => {
                debug!("Presenting {} event", event.name());

                let completed = presenter.handle(&event);
                state.set_window_title(presenter.window_title());

                if let Some(variant) = completion_notification(state.notification_permission(), completed) {
                    raise_notification(variant);
                } else if completed.is_some() {
                    debug!("Notification permission not granted, skipping desktop notification");
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Presentation fell behind, skipped {} event(s)", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Event channel closed, stopping presentation task");
                break;
            }
        }
    }
}

fn raise_notification(variant: Variant) {
    tokio::task::spawn_blocking(move || {
        if let Err(e) = send_completion_notification(variant) {
            warn!("{}", e);
        }
    });
}
