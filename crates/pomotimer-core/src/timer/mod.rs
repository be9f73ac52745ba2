mod engine;
mod mode;

pub use engine::{TimerEngine, TimerState};
pub use mode::{Mode, LONG_BREAK_SECS, SHORT_BREAK_SECS, WORK_SECS};
