use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Mode;

/// Every state change in the widget produces an Event.
/// The front-end logs them and re-renders on each one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: Mode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: Mode,
        at: DateTime<Utc>,
    },
    ModeSwitched {
        from: Mode,
        to: Mode,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero. Emitted by the engine only.
    TimerCompleted {
        mode: Mode,
        at: DateTime<Utc>,
    },
    /// An interval finished and the widget moved on to `next_mode`, paused.
    IntervalCompleted {
        mode: Mode,
        next_mode: Mode,
        completed_today: u32,
        completed_in_run: u32,
        at: DateTime<Utc>,
    },
    GoalUpdated {
        goal: u32,
        at: DateTime<Utc>,
    },
    SoundToggled {
        enabled: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Short machine name, used as the log field for transitions.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::TimerStarted { .. } => "timer_started",
            Event::TimerPaused { .. } => "timer_paused",
            Event::TimerReset { .. } => "timer_reset",
            Event::ModeSwitched { .. } => "mode_switched",
            Event::TimerCompleted { .. } => "timer_completed",
            Event::IntervalCompleted { .. } => "interval_completed",
            Event::GoalUpdated { .. } => "goal_updated",
            Event::SoundToggled { .. } => "sound_toggled",
        }
    }
}
