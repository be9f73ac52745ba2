//! Work-interval counting and break selection.

use crate::timer::Mode;

/// Completed work intervals per cycle; the last one earns a long break.
pub const POMODOROS_UNTIL_LONG_BREAK: u32 = 4;

/// Counts completed work intervals in the current run.
///
/// The count lives in memory only. A restart begins a fresh cycle even if
/// the persisted daily total says otherwise.
#[derive(Debug, Clone, Default)]
pub struct SessionTracker {
    completed_in_run: u32,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completed_in_run(&self) -> u32 {
        self.completed_in_run
    }

    /// Record a finished interval of `mode` and return the mode to switch to.
    pub fn complete(&mut self, mode: Mode) -> Mode {
        match mode {
            Mode::Work => {
                self.completed_in_run += 1;
                if self.completed_in_run % POMODOROS_UNTIL_LONG_BREAK == 0 {
                    Mode::LongBreak
                } else {
                    Mode::ShortBreak
                }
            }
            Mode::ShortBreak | Mode::LongBreak => Mode::Work,
        }
    }
}
