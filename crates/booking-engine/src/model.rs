//! Plain-data types consumed by the slot calculator and overlap detector.
//!
//! Fields are private and every constructor validates its invariants, so the
//! computations themselves never have to: a `Service` always has a positive
//! duration and every window or booking interval has `start < end`.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};
use crate::time::ClockTime;

/// A bookable service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    id: u64,
    name: String,
    description: Option<String>,
    #[serde(rename = "duration")]
    duration_minutes: u32,
    #[serde(rename = "buffer_time")]
    buffer_minutes: u32,
    price: Option<f64>,
}

impl Service {
    /// # Errors
    /// Returns `BookingError::InvalidDuration` if `duration_minutes` is zero.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        duration_minutes: u32,
        buffer_minutes: u32,
    ) -> Result<Self> {
        if duration_minutes == 0 {
            return Err(BookingError::InvalidDuration(duration_minutes));
        }
        Ok(Self {
            id,
            name: name.into(),
            description: None,
            duration_minutes,
            buffer_minutes,
            price: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Length of one booking, in minutes. Always positive.
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Idle minutes enforced after each booking before the next slot starts.
    pub fn buffer_minutes(&self) -> u32 {
        self.buffer_minutes
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    /// Distance between consecutive candidate slot starts. Always positive.
    pub fn step_minutes(&self) -> u32 {
        self.duration_minutes.saturating_add(self.buffer_minutes)
    }
}

/// The open/close range of a service on one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WindowRecord")]
pub struct AvailabilityWindow {
    weekday: Weekday,
    start: ClockTime,
    end: ClockTime,
}

#[derive(Deserialize)]
struct WindowRecord {
    weekday: Weekday,
    start: ClockTime,
    end: ClockTime,
}

impl TryFrom<WindowRecord> for AvailabilityWindow {
    type Error = BookingError;

    fn try_from(r: WindowRecord) -> Result<Self> {
        AvailabilityWindow::new(r.weekday, r.start, r.end)
    }
}

impl AvailabilityWindow {
    /// # Errors
    /// Returns `BookingError::InvalidInterval` unless `start < end`.
    pub fn new(weekday: Weekday, start: ClockTime, end: ClockTime) -> Result<Self> {
        check_ordered(start, end)?;
        Ok(Self {
            weekday,
            start,
            end,
        })
    }

    /// Parse `HH:MM:SS` open and close times.
    pub fn parse(weekday: Weekday, start: &str, end: &str) -> Result<Self> {
        AvailabilityWindow::new(weekday, ClockTime::parse(start)?, ClockTime::parse(end)?)
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    pub fn length_minutes(&self) -> u32 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    /// Whether at least one booking of `duration_minutes` fits in the window.
    pub fn fits(&self, duration_minutes: u32) -> bool {
        duration_minutes <= self.length_minutes()
    }
}

/// A half-open `[start, end)` time-of-day interval occupied by a booking,
/// scoped by the caller to one service and one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "IntervalRecord")]
pub struct BookingInterval {
    start: ClockTime,
    end: ClockTime,
}

#[derive(Deserialize)]
struct IntervalRecord {
    start: ClockTime,
    end: ClockTime,
}

impl TryFrom<IntervalRecord> for BookingInterval {
    type Error = BookingError;

    fn try_from(r: IntervalRecord) -> Result<Self> {
        BookingInterval::new(r.start, r.end)
    }
}

impl BookingInterval {
    /// # Errors
    /// Returns `BookingError::InvalidInterval` unless `start < end`.
    pub fn new(start: ClockTime, end: ClockTime) -> Result<Self> {
        check_ordered(start, end)?;
        Ok(Self { start, end })
    }

    /// Parse from `HH:MM:SS` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        BookingInterval::new(ClockTime::parse(start)?, ClockTime::parse(end)?)
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    /// Half-open intersection: `self.start < other.end && self.end > other.start`.
    ///
    /// Touching intervals (one ends exactly when the other starts) do not overlap.
    pub fn overlaps(&self, other: &BookingInterval) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Minutes shared with `other`, zero when they do not overlap.
    pub fn overlap_minutes(&self, other: &BookingInterval) -> u32 {
        if !self.overlaps(other) {
            return 0;
        }
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        end.minutes() - start.minutes()
    }
}

fn check_ordered(start: ClockTime, end: ClockTime) -> Result<()> {
    if start >= end {
        return Err(BookingError::InvalidInterval {
            start: start.to_hms(),
            end: end.to_hms(),
        });
    }
    Ok(())
}
