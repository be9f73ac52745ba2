//! Timer engine implementation.
//!
//! The engine is a countdown state machine over whole seconds. It does not
//! own a clock or a thread: the caller delivers one `tick()` per elapsed
//! second while the timer is active.
//!
//! ## State Transitions
//!
//! ```text
//! Paused --start--> Active --pause--> Paused
//! Active --tick (remaining hits 0)--> Paused + TimerCompleted
//! any --reset | switch_mode--> Paused at full duration
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(Mode::Work);
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event::TimerCompleted) when the interval ends
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::mode::Mode;
use crate::events::Event;

/// Observable state of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub mode: Mode,
    pub remaining_seconds: u32,
    pub active: bool,
}

/// Core timer engine.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    state: TimerState,
}

impl TimerEngine {
    /// Create a paused engine at the full duration of `mode`.
    pub fn new(mode: Mode) -> Self {
        Self {
            state: TimerState {
                mode,
                remaining_seconds: mode.duration_secs(),
                active: false,
            },
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn remaining_secs(&self) -> u32 {
        self.state.remaining_seconds
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.state.active || self.state.remaining_seconds == 0 {
            return None;
        }
        self.state.active = true;
        Some(Event::TimerStarted {
            mode: self.state.mode,
            remaining_secs: self.state.remaining_seconds,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.active {
            return None;
        }
        self.state.active = false;
        Some(Event::TimerPaused {
            mode: self.state.mode,
            remaining_secs: self.state.remaining_seconds,
            at: Utc::now(),
        })
    }

    /// Start when paused, pause when running.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.state.active {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.state.active = false;
        self.state.remaining_seconds = self.state.mode.duration_secs();
        Some(Event::TimerReset {
            mode: self.state.mode,
            at: Utc::now(),
        })
    }

    pub fn switch_mode(&mut self, mode: Mode) -> Option<Event> {
        let from = self.state.mode;
        self.state = TimerState {
            mode,
            remaining_seconds: mode.duration_secs(),
            active: false,
        };
        Some(Event::ModeSwitched {
            from,
            to: mode,
            at: Utc::now(),
        })
    }

    /// Advance one second. Returns `Some(Event::TimerCompleted)` exactly once,
    /// on the tick that brings the countdown to zero.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.state.active || self.state.remaining_seconds == 0 {
            return None;
        }
        self.state.remaining_seconds -= 1;
        if self.state.remaining_seconds == 0 {
            self.state.active = false;
            return Some(Event::TimerCompleted {
                mode: self.state.mode,
                at: Utc::now(),
            });
        }
        None
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(Mode::Work)
    }
}
