//! One-second tick source with an owned, cancel-on-drop handle.
//!
//! At most one tick stream is armed at a time. Each stream stamps its ticks
//! with a generation number; cancelling bumps the generation, so ticks that
//! were already queued when the stream was cancelled are recognisably stale.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Wall-clock spacing between ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

/// Owns the task driving one tick stream. Dropping it stops the stream.
#[derive(Debug)]
pub struct TickHandle {
    generation: u64,
    task: JoinHandle<()>,
}

impl TickHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    generation: u64,
    armed: Option<TickHandle>,
    tx: mpsc::UnboundedSender<Tick>,
}

impl Ticker {
    /// Create a disarmed ticker and the receiving end of its ticks.
    pub fn new(period: Duration) -> (Self, mpsc::UnboundedReceiver<Tick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let ticker = Self {
            period,
            generation: 0,
            armed: None,
            tx,
        };
        (ticker, rx)
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a fresh stream, replacing any armed one. The first tick arrives
    /// one full period from now. Must be called inside a tokio runtime.
    pub fn arm(&mut self) {
        self.cancel();
        let generation = self.generation;
        let period = self.period;
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(Tick { generation }).is_err() {
                    break;
                }
            }
        });
        self.armed = Some(TickHandle { generation, task });
    }

    /// Stop the armed stream, if any, and invalidate its queued ticks.
    pub fn cancel(&mut self) {
        self.armed = None;
        self.generation += 1;
    }

    /// Whether `tick` came from the currently armed stream.
    pub fn accepts(&self, tick: Tick) -> bool {
        self.armed
            .as_ref()
            .is_some_and(|handle| handle.generation() == tick.generation)
    }
}
