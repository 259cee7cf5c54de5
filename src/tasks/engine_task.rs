//! Timer engine background task
//!
//! The engine is owned by a single task. User commands and scheduler ticks
//! arrive as messages and are applied one at a time, so a command always
//! runs to completion before the next tick is looked at.

use std::{fmt, time::Duration};

use tokio::{
    sync::{broadcast, mpsc, oneshot, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    state::TimerSnapshot,
    timer::{DurationPresets, IntervalScheduler, Mode, TickId, TimerEngine, TimerEvent},
};

/// User-initiated timer operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Start,
    Pause,
    Reset,
    SetMode(Mode),
    ToggleWorkRest,
}

impl fmt::Display for TimerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerCommand::Start => f.write_str("start"),
            TimerCommand::Pause => f.write_str("pause"),
            TimerCommand::Reset => f.write_str("reset"),
            TimerCommand::SetMode(mode) => write!(f, "mode:{}", mode),
            TimerCommand::ToggleWorkRest => f.write_str("toggle-work-rest"),
        }
    }
}

/// A command plus the channel its resulting snapshot is sent back on
#[derive(Debug)]
pub struct EngineRequest {
    pub command: TimerCommand,
    pub reply: oneshot::Sender<TimerSnapshot>,
}

/// Cloneable handle for talking to a running engine task
#[derive(Debug, Clone)]
pub struct TimerHandle {
    command_tx: mpsc::Sender<EngineRequest>,
    snapshot_rx: watch::Receiver<TimerSnapshot>,
    events_tx: broadcast::Sender<TimerEvent>,
}

impl TimerHandle {
    /// Apply a command and wait for the resulting snapshot
    pub async fn send(&self, command: TimerCommand) -> Result<TimerSnapshot, String> {
        let (reply, reply_rx) = oneshot::channel();
        self.command_tx
            .send(EngineRequest { command, reply })
            .await
            .map_err(|_| "Timer engine is not running".to_string())?;

        reply_rx
            .await
            .map_err(|_| format!("Timer engine dropped the {} request", command))
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_rx.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.events_tx.subscribe()
    }
}

/// Build an engine around a tokio interval scheduler and spawn its task.
/// Must be called from within a tokio runtime.
pub fn spawn_timer_engine(presets: DurationPresets, tick_period: Duration) -> (TimerHandle, JoinHandle<()>) {
    let (events_tx, _) = broadcast::channel(256);
    let (command_tx, command_rx) = mpsc::channel(32);
    let (tick_tx, tick_rx) = mpsc::unbounded_channel();

    let engine = TimerEngine::new(presets, IntervalScheduler::new(tick_tx), events_tx.clone())
        .with_tick_period(tick_period);
    let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());

    let task = tokio::spawn(timer_engine_task(engine, command_rx, tick_rx, snapshot_tx));

    let handle = TimerHandle {
        command_tx,
        snapshot_rx,
        events_tx,
    };
    (handle, task)
}

/// Run the engine until every command sender is gone
pub async fn timer_engine_task(
    mut engine: TimerEngine<IntervalScheduler>,
    mut command_rx: mpsc::Receiver<EngineRequest>,
    mut tick_rx: mpsc::UnboundedReceiver<TickId>,
    snapshot_tx: watch::Sender<TimerSnapshot>,
) {
    info!("Starting timer engine task");

    loop {
        tokio::select! {
            request = command_rx.recv() => {
                let Some(EngineRequest { command, reply }) = request else {
                    info!("All timer handles dropped, stopping timer engine task");
                    break;
                };

                debug!("Applying timer command: {}", command);
                apply_command(&mut engine, command);

                let snapshot = engine.snapshot();
                snapshot_tx.send_replace(snapshot.clone());
                if reply.send(snapshot).is_err() {
                    warn!("Caller went away before the {} reply was sent", command);
                }
            }

            Some(id) = tick_rx.recv() => {
                if engine.handle_tick(id) {
                    snapshot_tx.send_replace(engine.snapshot());
                }
            }
        }
    }

    engine.pause();
    debug!(
        "Timer engine stopped with {} interval task(s) alive",
        engine.scheduler().active_tasks()
    );
}

/// Stop the presentation task, then wait for the engine task to exit.
///
/// The engine only exits once every [`TimerHandle`] is gone, so callers must
/// release their own handles (and any `AppState`) first. The presentation
/// task holds one through its state and is aborted here.
pub async fn stop_timer_tasks(
    presentation: JoinHandle<()>,
    engine: JoinHandle<()>,
    grace: Duration,
) -> Result<(), String> {
    presentation.abort();
    if let Err(e) = presentation.await {
        if !e.is_cancelled() {
            warn!("Presentation task ended abnormally: {}", e);
        }
    }

    match tokio::time::timeout(grace, engine).await {
        Ok(Ok(())) => {
            info!("Timer engine task stopped");
            Ok(())
        }
        Ok(Err(e)) => Err(format!("Timer engine task failed: {}", e)),
        Err(_) => Err(format!("Timer engine task still running after {:?}", grace)),
    }
}

fn apply_command(engine: &mut TimerEngine<IntervalScheduler>, command: TimerCommand) {
    match command {
        TimerCommand::Start => engine.start(),
        TimerCommand::Pause => engine.pause(),
        TimerCommand::Reset => engine.reset(),
        TimerCommand::SetMode(mode) => engine.set_mode(mode),
        TimerCommand::ToggleWorkRest => engine.toggle_work_rest(),
    }
}
