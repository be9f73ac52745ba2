//! Calendar source for daily rollover.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{NaiveDate, Utc};

/// Supplies "today" to the persistence layer.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Today's date in UTC, matching the `YYYY-MM-DD` prefix of an ISO timestamp.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A settable clock. Clones share the same date.
#[derive(Debug, Clone)]
pub struct FixedClock {
    day: Arc<Mutex<NaiveDate>>,
}

impl FixedClock {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day: Arc::new(Mutex::new(day)),
        }
    }

    pub fn set(&self, day: NaiveDate) {
        *self.day.lock().unwrap_or_else(PoisonError::into_inner) = day;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.day.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_clones_share_date() {
        let d1 = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let clock = FixedClock::new(d1);
        let handle = clock.clone();
        handle.set(d2);
        assert_eq!(clock.today(), d2);
    }
}
