//! Drives a [`PomodoroTimer`] from user commands and a one-second ticker.
//!
//! Every command that stops the countdown cancels the tick stream before it
//! touches the widget, and a new stream is armed only after the widget has
//! become active. Ticks from a cancelled stream are dropped on arrival.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::trace;

use crate::error::Result;
use crate::events::Event;
use crate::storage::KeyValueStore;
use crate::ticker::{Tick, Ticker, TICK_PERIOD};
use crate::timer::Mode;
use crate::widget::PomodoroTimer;

/// User-facing actions on the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Toggle,
    Reset,
    SwitchMode(Mode),
    SetGoal(String),
    SetSound(bool),
    ToggleSound,
}

pub struct TimerRuntime<S> {
    widget: PomodoroTimer<S>,
    ticker: Ticker,
    ticks: mpsc::UnboundedReceiver<Tick>,
}

impl<S: KeyValueStore> TimerRuntime<S> {
    pub fn new(widget: PomodoroTimer<S>) -> Self {
        Self::with_period(widget, TICK_PERIOD)
    }

    pub fn with_period(widget: PomodoroTimer<S>, period: Duration) -> Self {
        let (ticker, ticks) = Ticker::new(period);
        Self {
            widget,
            ticker,
            ticks,
        }
    }

    pub fn widget(&self) -> &PomodoroTimer<S> {
        &self.widget
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }

    /// Apply one command. Returns the resulting event, or `None` when the
    /// command changed nothing (e.g. pausing a paused timer, invalid goal).
    pub fn dispatch(&mut self, command: Command) -> Result<Option<Event>> {
        match command {
            Command::Start => Ok(self.start()),
            Command::Pause => {
                self.ticker.cancel();
                Ok(self.widget.pause())
            }
            Command::Toggle => {
                if self.widget.is_active() {
                    self.ticker.cancel();
                    Ok(self.widget.pause())
                } else {
                    Ok(self.start())
                }
            }
            Command::Reset => {
                self.ticker.cancel();
                Ok(self.widget.reset())
            }
            Command::SwitchMode(mode) => {
                self.ticker.cancel();
                Ok(self.widget.switch_mode(mode))
            }
            Command::SetGoal(input) => self.widget.apply_goal(&input),
            Command::SetSound(enabled) => self.widget.set_sound_enabled(enabled).map(Some),
            Command::ToggleSound => self.widget.toggle_sound().map(Some),
        }
    }

    fn start(&mut self) -> Option<Event> {
        let event = self.widget.start();
        if event.is_some() {
            self.ticker.arm();
        }
        event
    }

    /// Wait for the next live tick and apply it.
    ///
    /// Returns `Ok(Some(_))` when the tick completed an interval. Never
    /// resolves while the timer is paused, so it is safe to race against
    /// user input.
    pub async fn next_tick(&mut self) -> Result<Option<Event>> {
        loop {
            let Some(tick) = self.ticks.recv().await else {
                return Ok(None);
            };
            if !self.ticker.accepts(tick) {
                trace!(generation = tick.generation, "dropping stale tick");
                continue;
            }
            let completed = self.widget.tick();
            if !self.widget.is_active() {
                self.ticker.cancel();
            }
            return completed;
        }
    }

    /// Stop ticking and hand the widget back.
    pub fn shutdown(mut self) -> PomodoroTimer<S> {
        self.ticker.cancel();
        self.widget
    }
}
