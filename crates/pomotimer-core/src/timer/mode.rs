use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Work interval length in seconds.
pub const WORK_SECS: u32 = 25 * 60;
/// Short break length in seconds.
pub const SHORT_BREAK_SECS: u32 = 5 * 60;
/// Long break length in seconds.
pub const LONG_BREAK_SECS: u32 = 15 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    Work,
    ShortBreak,
    LongBreak,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Work, Mode::ShortBreak, Mode::LongBreak];

    /// Full length of an interval in this mode, in seconds.
    pub fn duration_secs(self) -> u32 {
        match self {
            Mode::Work => WORK_SECS,
            Mode::ShortBreak => SHORT_BREAK_SECS,
            Mode::LongBreak => LONG_BREAK_SECS,
        }
    }

    /// Button label shown next to the countdown.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Work => "Pomodoro",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    /// Capitalised stored name, used in the window title.
    pub fn title_name(self) -> &'static str {
        match self {
            Mode::Work => "Work",
            Mode::ShortBreak => "ShortBreak",
            Mode::LongBreak => "LongBreak",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Work => "work",
            Mode::ShortBreak => "short-break",
            Mode::LongBreak => "long-break",
        };
        f.write_str(name)
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" | "pomodoro" | "w" => Ok(Mode::Work),
            "short-break" | "shortbreak" | "short" | "s" => Ok(Mode::ShortBreak),
            "long-break" | "longbreak" | "long" | "l" => Ok(Mode::LongBreak),
            _ => Err(ValidationError::UnknownMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_match_the_classic_technique() {
        assert_eq!(Mode::Work.duration_secs(), 1500);
        assert_eq!(Mode::ShortBreak.duration_secs(), 300);
        assert_eq!(Mode::LongBreak.duration_secs(), 900);
    }

    #[test]
    fn parses_cli_and_stored_names() {
        assert_eq!("work".parse::<Mode>().unwrap(), Mode::Work);
        assert_eq!("shortBreak".parse::<Mode>().unwrap(), Mode::ShortBreak);
        assert_eq!("long-break".parse::<Mode>().unwrap(), Mode::LongBreak);
        assert!("lunch".parse::<Mode>().is_err());
    }

    #[test]
    fn title_name_capitalises_stored_name() {
        for mode in Mode::ALL {
            let stored = serde_json::to_value(mode).unwrap();
            let stored = stored.as_str().unwrap();
            let mut chars = stored.chars();
            let first = chars.next().unwrap().to_ascii_uppercase();
            assert_eq!(mode.title_name(), format!("{first}{}", chars.as_str()));
        }
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&Mode::ShortBreak).unwrap();
        assert_eq!(json, "\"shortBreak\"");
    }
}
