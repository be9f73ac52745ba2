//! Daily progress persistence.
//!
//! Reads and writes the single [`DailyRecord`] under [`PROGRESS_KEY`],
//! rolling the completed count over when the calendar date changes.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use super::record::DailyRecord;
use super::KeyValueStore;
use crate::error::{Result, StorageError};

/// Fixed store key of the daily record.
pub const PROGRESS_KEY: &str = "pomodoroData";

/// The fields of the record the widget works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyProgress {
    pub goal: u32,
    pub completed_count: u32,
    pub sound_enabled: bool,
}

impl Default for DailyProgress {
    fn default() -> Self {
        Self {
            goal: 0,
            completed_count: 0,
            sound_enabled: true,
        }
    }
}

/// Persistence adapter over any [`KeyValueStore`].
pub struct ProgressStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Raw stored record, if any.
    ///
    /// # Errors
    /// A record that is not valid JSON yields [`StorageError::MalformedRecord`].
    pub fn read(&self) -> Result<Option<DailyRecord>> {
        let Some(raw) = self.store.get(PROGRESS_KEY)? else {
            return Ok(None);
        };
        let record = serde_json::from_str(&raw).map_err(|source| StorageError::MalformedRecord {
            key: PROGRESS_KEY.to_string(),
            source,
        })?;
        Ok(Some(record))
    }

    fn write(&self, record: &DailyRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        self.store.set(PROGRESS_KEY, &json)?;
        Ok(())
    }

    /// Load today's progress.
    ///
    /// A record from another day keeps its goal and sound preference but has
    /// its count reset, and is rewritten for `today` straight away. With no
    /// record at all the defaults are returned and nothing is written.
    pub fn load(&self, today: NaiveDate) -> Result<DailyProgress> {
        let Some(mut record) = self.read()? else {
            debug!("no stored progress, using defaults");
            return Ok(DailyProgress::default());
        };

        if !record.is_for(today) {
            info!(
                from = ?record.date,
                to = %today,
                dropped = record.completed_count,
                "new day, resetting completed count"
            );
            record.set_date(today);
            record.completed_count = 0;
            self.write(&record)?;
        }

        Ok(DailyProgress {
            goal: record.goal,
            completed_count: record.completed_count,
            sound_enabled: record.sound_enabled,
        })
    }

    /// Overwrite the record after a completed work interval.
    pub fn save_completion(&self, today: NaiveDate, progress: DailyProgress) -> Result<()> {
        let record = DailyRecord {
            date: Some(today.to_string()),
            goal: progress.goal,
            completed_count: progress.completed_count,
            sound_enabled: progress.sound_enabled,
            extra: serde_json::Map::new(),
        };
        self.write(&record)
    }

    /// Merge a new goal (and today's date) into the stored record.
    pub fn set_goal(&self, today: NaiveDate, goal: u32) -> Result<()> {
        let mut record = self.read()?.unwrap_or_default();
        record.set_date(today);
        record.goal = goal;
        self.write(&record)
    }

    /// Merge the sound preference into the stored record.
    ///
    /// The stored date is left untouched, so a record written on an earlier
    /// day stays dated to that day until the next load or completion.
    pub fn set_sound_enabled(&self, enabled: bool) -> Result<()> {
        let mut record = self.read()?.unwrap_or_default();
        record.sound_enabled = enabled;
        self.write(&record)
    }
}
