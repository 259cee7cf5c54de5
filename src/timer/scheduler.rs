//! Repeating tick scheduling
//!
//! The engine never sleeps itself. It asks a [`TickScheduler`] for a
//! repeating callback and holds the returned [`TickId`] while running.

use std::{collections::HashMap, time::Duration};

use serde::Serialize;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

/// Identifies one scheduled repeating tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TickId(u64);

impl TickId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Platform facility that fires a repeating tick until cancelled
pub trait TickScheduler {
    fn schedule(&mut self, period: Duration) -> TickId;
    fn cancel(&mut self, id: TickId);
}

/// Tokio-backed scheduler: one interval task per schedule, each forwarding
/// its [`TickId`] into a channel read by the engine task.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct IntervalScheduler {
    tick_tx: mpsc::UnboundedSender<TickId>,
    tasks: HashMap<TickId, JoinHandle<()>>,
    next_id: u64,
}

impl IntervalScheduler {
    pub fn new(tick_tx: mpsc::UnboundedSender<TickId>) -> Self {
        Self {
            tick_tx,
            tasks: HashMap::new(),
            next_id: 0,
        }
    }

    /// Number of interval tasks currently alive
    pub fn active_tasks(&self) -> usize {
        self.tasks.len()
    }
}

impl TickScheduler for IntervalScheduler {
    fn schedule(&mut self, period: Duration) -> TickId {
        self.next_id += 1;
        let id = TickId(self.next_id);
        let tick_tx = self.tick_tx.clone();

        let handle = tokio::spawn(async move {
            // First tick lands one full period after scheduling
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if tick_tx.send(id).is_err() {
                    debug!("Tick receiver dropped, stopping interval {:?}", id);
                    break;
                }
            }
        });

        debug!("Scheduled repeating tick {:?} every {:?}", id, period);
        self.tasks.insert(id, handle);
        id
    }

    fn cancel(&mut self, id: TickId) {
        if let Some(handle) = self.tasks.remove(&id) {
            handle.abort();
            debug!("Cancelled repeating tick {:?}", id);
        }
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

/// Scheduler that never fires on its own; ticks are issued by hand.
/// Records every schedule/cancel call for inspection.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    active: Vec<TickId>,
    pub scheduled: usize,
    pub cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &[TickId] {
        &self.active
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, _period: Duration) -> TickId {
        self.next_id += 1;
        let id = TickId(self.next_id);
        self.scheduled += 1;
        self.active.push(id);
        id
    }

    fn cancel(&mut self, id: TickId) {
        let before = self.active.len();
        self.active.retain(|active| *active != id);
        if self.active.len() != before {
            self.cancelled += 1;
        }
    }
}
