//! The Pomodoro widget: timer engine, session tracker and daily progress
//! wired together behind named transitions.
//!
//! ```text
//! tick ──(remaining hits 0)──> complete_interval
//!                                 ├─ play alarm (if enabled, failures ignored)
//!                                 ├─ work: count it, persist the record
//!                                 └─ switch_mode(next), paused
//! ```
//!
//! The widget never schedules ticks itself; see [`crate::runtime`].

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::alarm::Alarm;
use crate::clock::Clock;
use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::session::SessionTracker;
use crate::storage::{DailyProgress, KeyValueStore, ProgressStore};
use crate::timer::{Mode, TimerEngine, TimerState};
use crate::view::TimerView;

pub struct PomodoroTimer<S> {
    engine: TimerEngine,
    tracker: SessionTracker,
    progress: DailyProgress,
    store: ProgressStore<S>,
    clock: Box<dyn Clock>,
    alarm: Box<dyn Alarm>,
}

impl<S: KeyValueStore> PomodoroTimer<S> {
    /// Mount the widget: load today's progress (rolling over a stale record)
    /// and start paused in work mode.
    ///
    /// # Errors
    /// Fails if the stored record cannot be read or parsed.
    pub fn load(store: S, clock: Box<dyn Clock>, alarm: Box<dyn Alarm>) -> Result<Self> {
        let store = ProgressStore::new(store);
        let progress = store.load(clock.today())?;
        debug!(?progress, "progress loaded");
        Ok(Self {
            engine: TimerEngine::new(Mode::Work),
            tracker: SessionTracker::new(),
            progress,
            store,
            clock,
            alarm,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.engine.state()
    }

    pub fn progress(&self) -> DailyProgress {
        self.progress
    }

    pub fn completed_in_run(&self) -> u32 {
        self.tracker.completed_in_run()
    }

    pub fn is_active(&self) -> bool {
        self.engine.is_active()
    }

    pub fn view(&self) -> TimerView {
        TimerView::new(self.engine.state(), self.progress)
    }

    // ── Timer transitions ────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        logged(self.engine.start())
    }

    pub fn pause(&mut self) -> Option<Event> {
        logged(self.engine.pause())
    }

    pub fn toggle(&mut self) -> Option<Event> {
        logged(self.engine.toggle())
    }

    pub fn reset(&mut self) -> Option<Event> {
        logged(self.engine.reset())
    }

    pub fn switch_mode(&mut self, mode: Mode) -> Option<Event> {
        logged(self.engine.switch_mode(mode))
    }

    /// Advance one second. When the countdown expires the interval is
    /// completed in the same call and its event returned.
    pub fn tick(&mut self) -> Result<Option<Event>> {
        match self.engine.tick() {
            Some(Event::TimerCompleted { .. }) => self.complete_interval().map(Some),
            _ => Ok(None),
        }
    }

    /// Finish the current interval and move to the next mode, paused.
    ///
    /// # Errors
    /// Fails if the record cannot be written after a work interval. The
    /// widget has already moved on to the next mode by then.
    pub fn complete_interval(&mut self) -> Result<Event> {
        let mode = self.engine.mode();

        if self.progress.sound_enabled {
            if let Err(e) = self.alarm.play() {
                warn!(error = %e, "alarm failed");
            }
        }

        let next_mode = self.tracker.complete(mode);
        let saved = if mode == Mode::Work {
            self.progress.completed_count += 1;
            self.store.save_completion(self.clock.today(), self.progress)
        } else {
            Ok(())
        };

        self.engine.switch_mode(next_mode);
        info!(
            %mode,
            %next_mode,
            completed_today = self.progress.completed_count,
            completed_in_run = self.tracker.completed_in_run(),
            "interval completed"
        );
        saved?;

        Ok(Event::IntervalCompleted {
            mode,
            next_mode,
            completed_today: self.progress.completed_count,
            completed_in_run: self.tracker.completed_in_run(),
            at: Utc::now(),
        })
    }

    // ── Preferences ──────────────────────────────────────────────────

    /// Apply a goal typed by the user. Input that is not a non-negative
    /// integer is ignored: `Ok(None)`, nothing changes, nothing is written.
    pub fn apply_goal(&mut self, input: &str) -> Result<Option<Event>> {
        let goal = match parse_goal(input) {
            Ok(goal) => goal,
            Err(e) => {
                debug!(error = %e, "goal input ignored");
                return Ok(None);
            }
        };
        self.store.set_goal(self.clock.today(), goal)?;
        self.progress.goal = goal;
        Ok(logged(Some(Event::GoalUpdated {
            goal,
            at: Utc::now(),
        })))
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) -> Result<Event> {
        self.store.set_sound_enabled(enabled)?;
        self.progress.sound_enabled = enabled;
        let event = Event::SoundToggled {
            enabled,
            at: Utc::now(),
        };
        debug!(event = event.kind(), enabled);
        Ok(event)
    }

    pub fn toggle_sound(&mut self) -> Result<Event> {
        self.set_sound_enabled(!self.progress.sound_enabled)
    }
}

fn logged(event: Option<Event>) -> Option<Event> {
    if let Some(ref e) = event {
        debug!(event = e.kind(), "timer transition");
    }
    event
}

/// Parse goal input the way a numeric form field would: optional leading
/// whitespace and sign, then digits; trailing junk after the digits is
/// dropped. Negative values and input without leading digits are rejected.
pub fn parse_goal(input: &str) -> Result<u32, ValidationError> {
    let invalid = || ValidationError::InvalidGoal {
        input: input.to_string(),
    };

    let trimmed = input.trim_start();
    let (negative, rest) = if let Some(rest) = trimmed.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = trimmed.strip_prefix('+') {
        (false, rest)
    } else {
        (false, trimmed)
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return Err(invalid());
    }
    if negative && digits.bytes().any(|b| b != b'0') {
        return Err(invalid());
    }
    digits.parse::<u32>().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::SilentAlarm;
    use crate::clock::FixedClock;
    use crate::error::AlarmError;
    use crate::storage::{MemoryStore, PROGRESS_KEY};
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct CountingAlarm {
        plays: Arc<AtomicUsize>,
        fail: bool,
    }

    impl Alarm for CountingAlarm {
        fn play(&self) -> std::result::Result<(), AlarmError> {
            self.plays.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AlarmError::MissingAsset("alarm.wav".into()));
            }
            Ok(())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn widget(store: &MemoryStore) -> PomodoroTimer<&MemoryStore> {
        PomodoroTimer::load(
            store,
            Box::new(FixedClock::new(today())),
            Box::new(SilentAlarm),
        )
        .unwrap()
    }

    fn run_out(w: &mut PomodoroTimer<&MemoryStore>) -> Event {
        w.start();
        loop {
            if let Some(event) = w.tick().unwrap() {
                return event;
            }
        }
    }

    #[test]
    fn fresh_work_interval_expires_into_short_break() {
        let store = MemoryStore::new();
        let mut w = widget(&store);
        let event = run_out(&mut w);

        assert!(matches!(
            event,
            Event::IntervalCompleted {
                mode: Mode::Work,
                next_mode: Mode::ShortBreak,
                completed_today: 1,
                completed_in_run: 1,
                ..
            }
        ));
        assert_eq!(w.progress().completed_count, 1);
        assert_eq!(w.completed_in_run(), 1);
        assert_eq!(
            w.state(),
            TimerState {
                mode: Mode::ShortBreak,
                remaining_seconds: 300,
                active: false
            }
        );

        let raw = store.get(PROGRESS_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["pomodoros"], 1);
        assert_eq!(json["date"], "2024-03-01");
    }

    #[test]
    fn break_completion_returns_to_work_without_counting() {
        let store = MemoryStore::new();
        let mut w = widget(&store);
        w.switch_mode(Mode::LongBreak);
        let event = run_out(&mut w);
        assert!(matches!(
            event,
            Event::IntervalCompleted {
                mode: Mode::LongBreak,
                next_mode: Mode::Work,
                completed_today: 0,
                ..
            }
        ));
        assert_eq!(w.state().remaining_seconds, 1500);
        assert!(store.get(PROGRESS_KEY).unwrap().is_none());
    }

    #[test]
    fn alarm_plays_on_every_completion_when_enabled() {
        let store = MemoryStore::new();
        let alarm = CountingAlarm {
            fail: true,
            ..Default::default()
        };
        let mut w = PomodoroTimer::load(
            &store,
            Box::new(FixedClock::new(today())),
            Box::new(alarm.clone()),
        )
        .unwrap();

        run_out(&mut w);
        run_out(&mut w);
        assert_eq!(alarm.plays.load(Ordering::SeqCst), 2, "failures ignored");

        w.set_sound_enabled(false).unwrap();
        run_out(&mut w);
        assert_eq!(alarm.plays.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn goal_input_validation() {
        let store = MemoryStore::new();
        let mut w = widget(&store);

        assert!(w.apply_goal("5").unwrap().is_some());
        assert_eq!(w.progress().goal, 5);

        assert!(w.apply_goal("-1").unwrap().is_none());
        assert!(w.apply_goal("abc").unwrap().is_none());
        assert!(w.apply_goal("").unwrap().is_none());
        assert_eq!(w.progress().goal, 5);

        let view = w.view();
        assert_eq!(view.goal, 5);
        assert_eq!(view.progress_pct, 0.0);
    }

    #[test]
    fn ignored_goal_does_not_write() {
        let store = MemoryStore::new();
        let mut w = widget(&store);
        w.apply_goal("nope").unwrap();
        assert!(store.get(PROGRESS_KEY).unwrap().is_none());
    }

    #[test]
    fn toggle_sound_flips_and_persists() {
        let store = MemoryStore::new();
        let mut w = widget(&store);
        assert!(w.progress().sound_enabled);
        w.toggle_sound().unwrap();
        assert!(!w.progress().sound_enabled);

        let reloaded = widget(&store);
        assert!(!reloaded.progress().sound_enabled);
    }

    #[test]
    fn parse_goal_follows_numeric_field_rules() {
        assert_eq!(parse_goal("5"), Ok(5));
        assert_eq!(parse_goal("  12"), Ok(12));
        assert_eq!(parse_goal("+3"), Ok(3));
        assert_eq!(parse_goal("7 pomodoros"), Ok(7));
        assert_eq!(parse_goal("4.9"), Ok(4));
        assert_eq!(parse_goal("0"), Ok(0));
        assert_eq!(parse_goal("-0"), Ok(0));
        assert!(parse_goal("-1").is_err());
        assert!(parse_goal("abc").is_err());
        assert!(parse_goal("-").is_err());
        assert!(parse_goal("99999999999").is_err());
    }
}
