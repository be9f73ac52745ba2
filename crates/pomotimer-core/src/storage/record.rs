//! The persisted daily progress record.
//!
//! Stored as one JSON object:
//!
//! ```json
//! {"date": "2024-03-01", "goal": 6, "pomodoros": 2, "soundEnabled": true}
//! ```
//!
//! Any well-formed JSON object loads. `date` is kept as the stored text and
//! only ever compared for equality, so a date in another format simply reads
//! as "not today". A `null` field reads as that type's zero value.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

fn default_true() -> bool {
    true
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Goal and progress scoped to one calendar date.
///
/// Missing fields read as defaults. Fields this version does not know about
/// are carried in `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// `YYYY-MM-DD` when written by this crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Daily target; 0 means no goal is configured.
    #[serde(default, deserialize_with = "null_as_default")]
    pub goal: u32,
    /// Work intervals completed on `date`.
    #[serde(default, rename = "pomodoros", deserialize_with = "null_as_default")]
    pub completed_count: u32,
    /// Absent means on; an explicit `null` means off.
    #[serde(default = "default_true", deserialize_with = "null_as_default")]
    pub sound_enabled: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for DailyRecord {
    fn default() -> Self {
        Self {
            date: None,
            goal: 0,
            completed_count: 0,
            sound_enabled: true,
            extra: serde_json::Map::new(),
        }
    }
}

impl DailyRecord {
    pub fn is_for(&self, day: NaiveDate) -> bool {
        self.date.as_deref() == Some(day.to_string().as_str())
    }

    pub fn set_date(&mut self, day: NaiveDate) {
        self.date = Some(day.to_string());
    }
}
