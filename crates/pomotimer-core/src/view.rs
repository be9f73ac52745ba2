//! Render-ready snapshot of the widget.

use serde::Serialize;

use crate::storage::DailyProgress;
use crate::timer::{Mode, TimerState};

/// Everything a front-end needs to draw the widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerView {
    pub mode: Mode,
    pub mode_label: &'static str,
    pub countdown: String,
    pub remaining_secs: u32,
    pub active: bool,
    pub completed_today: u32,
    pub goal: u32,
    pub progress_pct: f64,
    pub goal_achieved: bool,
    pub sound_enabled: bool,
    pub title: String,
}

impl TimerView {
    pub fn new(timer: TimerState, progress: DailyProgress) -> Self {
        let countdown = format_countdown(timer.remaining_seconds);
        let title = format!("{} - {}", countdown, timer.mode.title_name());
        Self {
            mode: timer.mode,
            mode_label: timer.mode.label(),
            countdown,
            remaining_secs: timer.remaining_seconds,
            active: timer.active,
            completed_today: progress.completed_count,
            goal: progress.goal,
            progress_pct: progress_pct(progress.completed_count, progress.goal),
            goal_achieved: progress.goal > 0 && progress.completed_count >= progress.goal,
            sound_enabled: progress.sound_enabled,
            title,
        }
    }

    /// Whether a goal is configured and progress should be shown.
    pub fn has_goal(&self) -> bool {
        self.goal > 0
    }
}

/// `MM:SS`, both fields zero-padded. Minutes are not wrapped into hours.
pub fn format_countdown(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Percentage of the goal reached, capped at 100. Zero when no goal is set.
pub fn progress_pct(completed: u32, goal: u32) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    (completed as f64 / goal as f64 * 100.0).min(100.0)
}

/// Fixed-width text bar, e.g. `[#####-----]` for 50% at width 10.
pub fn progress_bar(pct: f64, width: usize) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_pads_fields() {
        assert_eq!(format_countdown(1500), "25:00");
        assert_eq!(format_countdown(299), "04:59");
        assert_eq!(format_countdown(7), "00:07");
        assert_eq!(format_countdown(0), "00:00");
    }

    #[test]
    fn progress_is_capped() {
        assert_eq!(progress_pct(0, 0), 0.0);
        assert_eq!(progress_pct(3, 0), 0.0);
        assert_eq!(progress_pct(1, 4), 25.0);
        assert_eq!(progress_pct(9, 4), 100.0);
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(progress_bar(50.0, 10), "[#####-----]");
        assert_eq!(progress_bar(0.0, 4), "[----]");
        assert_eq!(progress_bar(250.0, 4), "[####]");
    }

    #[test]
    fn view_reports_goal_state() {
        let timer = TimerState {
            mode: Mode::ShortBreak,
            remaining_seconds: 300,
            active: false,
        };
        let view = TimerView::new(
            timer,
            DailyProgress {
                goal: 2,
                completed_count: 2,
                sound_enabled: true,
            },
        );
        assert_eq!(view.title, "05:00 - ShortBreak");
        assert!(view.goal_achieved);
        assert_eq!(view.progress_pct, 100.0);

        let no_goal = TimerView::new(timer, DailyProgress::default());
        assert!(!no_goal.has_goal());
        assert!(!no_goal.goal_achieved);
    }
}
