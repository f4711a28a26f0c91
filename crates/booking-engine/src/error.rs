//! Error types for booking-engine operations.

use thiserror::Error;

use crate::time::ClockTime;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid duration: {0} (must be a positive number of minutes)")]
    InvalidDuration(u32),

    #[error("Invalid interval: start {start} must be before end {end}")]
    InvalidInterval { start: String, end: String },

    #[error("Service not found: {0}")]
    UnknownService(u64),

    #[error("Duplicate service id: {0}")]
    DuplicateService(u64),

    #[error("Service {service_id} already has an availability window on {weekday}")]
    DuplicateWindow {
        service_id: u64,
        weekday: chrono::Weekday,
    },

    #[error("Duplicate booking id: {0}")]
    DuplicateBooking(u64),

    #[error("Booking ids exhausted")]
    IdExhausted,

    /// The candidate booking intersects an existing one for the same service and date.
    #[error("Booking {start}-{end} overlaps existing booking {existing_start}-{existing_end}")]
    Overlap {
        start: ClockTime,
        end: ClockTime,
        existing_start: ClockTime,
        existing_end: ClockTime,
    },
}

impl BookingError {
    /// Malformed caller input: bad time/date text, zero duration, or an
    /// interval whose end is not after its start.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            BookingError::InvalidTime(_)
                | BookingError::InvalidDate(_)
                | BookingError::InvalidDuration(_)
                | BookingError::InvalidInterval { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BookingError::UnknownService(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, BookingError::Overlap { .. })
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
