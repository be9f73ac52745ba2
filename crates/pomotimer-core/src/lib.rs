//! # pomotimer Core Library
//!
//! This library provides the core logic for the pomotimer Pomodoro timer:
//! a single widget that counts down fixed work and break intervals, tracks
//! completed work intervals against a daily goal, and persists that progress
//! in a local key-value store.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a whole-second countdown state machine that requires
//!   the caller to invoke `tick()` once per second while active
//! - **Session Tracker**: counts work intervals in the current run and picks
//!   a long break after every fourth
//! - **Storage**: one JSON record in a SQLite key-value table, rolled over at
//!   the start of each day, plus TOML front-end configuration
//! - **Runtime**: owns the tick source and guarantees it is cancelled before
//!   any pause, reset or mode switch
//!
//! ## Key Components
//!
//! - [`PomodoroTimer`]: the widget and its named transitions
//! - [`TimerRuntime`]: async driver feeding ticks and commands to the widget
//! - [`ProgressStore`]: daily record persistence
//! - [`Config`]: application configuration management

pub mod alarm;
pub mod clock;
pub mod error;
pub mod events;
pub mod runtime;
pub mod session;
pub mod storage;
pub mod ticker;
pub mod timer;
pub mod view;
pub mod widget;

pub use alarm::{Alarm, CommandAlarm, SilentAlarm};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{AlarmError, ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use runtime::{Command, TimerRuntime};
pub use session::{SessionTracker, POMODOROS_UNTIL_LONG_BREAK};
pub use storage::{
    Config, DailyProgress, DailyRecord, Database, KeyValueStore, MemoryStore, ProgressStore,
};
pub use ticker::{TickHandle, Ticker, TICK_PERIOD};
pub use timer::{Mode, TimerEngine, TimerState};
pub use view::TimerView;
pub use widget::{parse_goal, PomodoroTimer};
