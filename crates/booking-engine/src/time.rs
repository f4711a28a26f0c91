//! Clock-time arithmetic on an abstract reference day.
//!
//! Times of day are stored as whole minutes since midnight. There is no date,
//! no timezone and no DST: `09:00` is always 540, so interval comparisons are
//! plain integer comparisons.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

/// Minutes in a day. `24:00` is representable as an end-of-day bound.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day at minute resolution.
///
/// Parsed from `HH:MM:SS` or `HH:MM` (seconds are truncated). Displays as
/// `HH:MM`, which is the format slot lists are returned in; [`ClockTime::to_hms`]
/// gives the `HH:MM:SS` interchange form used by serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);
    pub const END_OF_DAY: ClockTime = ClockTime(MINUTES_PER_DAY as u16);

    /// Build from minutes since midnight. Returns `None` past `24:00`.
    pub fn from_minutes(minutes: u32) -> Option<ClockTime> {
        (minutes <= MINUTES_PER_DAY).then_some(ClockTime(minutes as u16))
    }

    /// Build from hour and minute components.
    pub fn from_hm(hour: u32, minute: u32) -> Option<ClockTime> {
        if minute > 59 {
            return None;
        }
        ClockTime::from_minutes(hour.checked_mul(60)?.checked_add(minute)?)
    }

    /// Parse `HH:MM:SS` or `HH:MM`.
    ///
    /// # Errors
    /// Returns `BookingError::InvalidTime` for anything else, including
    /// out-of-range components and times after `24:00`.
    pub fn parse(s: &str) -> Result<ClockTime> {
        let invalid = || BookingError::InvalidTime(s.to_string());

        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(invalid());
        }

        let hour = parse_component(parts[0], 1..=2).ok_or_else(invalid)?;
        let minute = parse_component(parts[1], 2..=2).ok_or_else(invalid)?;
        let second = match parts.get(2) {
            Some(sec) => parse_component(sec, 2..=2).ok_or_else(invalid)?,
            None => 0,
        };
        if second > 59 {
            return Err(invalid());
        }
        // 24:00:00 closes the day; 24:00:30 does not exist.
        if hour == 24 && second != 0 {
            return Err(invalid());
        }

        ClockTime::from_hm(hour, minute).ok_or_else(invalid)
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    /// Add a number of minutes, returning `None` if the result passes `24:00`.
    pub fn checked_add_minutes(self, minutes: u32) -> Option<ClockTime> {
        ClockTime::from_minutes(self.minutes().checked_add(minutes)?)
    }

    /// Render as `HH:MM:SS`.
    pub fn to_hms(self) -> String {
        format!("{}:00", self)
    }
}

fn parse_component(s: &str, digits: std::ops::RangeInclusive<usize>) -> Option<u32> {
    if !digits.contains(&s.len()) || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for ClockTime {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self> {
        ClockTime::parse(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = BookingError;

    fn try_from(s: String) -> Result<Self> {
        ClockTime::parse(&s)
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> String {
        t.to_hms()
    }
}

/// Parse an ISO `YYYY-MM-DD` calendar date.
///
/// # Errors
/// Returns `BookingError::InvalidDate` if the string is not a real date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| BookingError::InvalidDate(s.to_string()))
}
