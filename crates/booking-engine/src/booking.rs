//! Booking requests and an in-memory ledger that accepts them.
//!
//! The ledger is the reference caller of the overlap detector: the lookup of
//! same-service same-date bookings, the overlap check and the insert all run
//! under one lock, so two concurrent requests for the same slot cannot both
//! succeed.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::conflict::find_conflicts;
use crate::error::{BookingError, Result};
use crate::model::BookingInterval;
use crate::time::{parse_date, ClockTime};

/// An unvalidated booking request, as received from a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub user_id: u64,
    pub service_id: u64,
    /// ISO `YYYY-MM-DD`.
    pub booking_date: String,
    /// `HH:MM:SS`.
    pub start_time: String,
    /// `HH:MM:SS`.
    pub end_time: String,
}

/// A request whose date and times have been parsed and checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewBooking {
    pub user_id: u64,
    pub service_id: u64,
    pub date: NaiveDate,
    pub interval: BookingInterval,
}

impl BookingRequest {
    /// # Errors
    /// Returns an invalid-input error for a malformed date or time, or when
    /// the end time is not after the start time.
    pub fn validate(&self) -> Result<NewBooking> {
        let date = parse_date(&self.booking_date)?;
        let interval = BookingInterval::parse(&self.start_time, &self.end_time)?;
        Ok(NewBooking {
            user_id: self.user_id,
            service_id: self.service_id,
            date,
            interval,
        })
    }
}

/// A stored booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BookingRow", try_from = "BookingRow")]
pub struct Booking {
    pub id: u64,
    pub user_id: u64,
    pub service_id: u64,
    pub date: NaiveDate,
    pub interval: BookingInterval,
}

/// Flat row shape used on the wire and in ledger files.
#[derive(Serialize, Deserialize)]
struct BookingRow {
    id: u64,
    user_id: u64,
    service_id: u64,
    booking_date: NaiveDate,
    start_time: ClockTime,
    end_time: ClockTime,
}

impl From<Booking> for BookingRow {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            service_id: b.service_id,
            booking_date: b.date,
            start_time: b.interval.start(),
            end_time: b.interval.end(),
        }
    }
}

impl TryFrom<BookingRow> for Booking {
    type Error = BookingError;

    fn try_from(row: BookingRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            service_id: row.service_id,
            date: row.booking_date,
            interval: BookingInterval::new(row.start_time, row.end_time)?,
        })
    }
}

#[derive(Debug)]
struct LedgerState {
    /// `None` once the id after `u64::MAX` has been requested.
    next_id: Option<u64>,
    bookings: BTreeMap<u64, Booking>,
}

impl LedgerState {
    fn intervals_for(&self, service_id: u64, date: NaiveDate) -> Vec<BookingInterval> {
        self.bookings
            .values()
            .filter(|b| b.service_id == service_id && b.date == date)
            .map(|b| b.interval)
            .collect()
    }
}

/// Thread-safe in-memory booking store.
#[derive(Debug)]
pub struct BookingLedger {
    state: Mutex<LedgerState>,
}

impl Default for BookingLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingLedger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LedgerState {
                next_id: Some(1),
                bookings: BTreeMap::new(),
            }),
        }
    }

    /// Rebuild a ledger from previously stored bookings. New ids continue
    /// after the highest existing one.
    ///
    /// Stored bookings are taken as-is; they are not re-checked for overlaps.
    ///
    /// # Errors
    /// Returns `BookingError::DuplicateBooking` if two bookings share an id.
    pub fn from_bookings(bookings: impl IntoIterator<Item = Booking>) -> Result<Self> {
        let mut by_id = BTreeMap::new();
        for booking in bookings {
            if by_id.insert(booking.id, booking).is_some() {
                return Err(BookingError::DuplicateBooking(booking.id));
            }
        }
        let next_id = match by_id.keys().next_back() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };
        Ok(Self {
            state: Mutex::new(LedgerState {
                next_id,
                bookings: by_id,
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        // Every mutation completes before the guard drops, so a poisoned
        // state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Check `booking` against same-service same-date bookings and store it.
    ///
    /// # Errors
    /// Returns `BookingError::Overlap` naming the first clashing booking, or
    /// `BookingError::IdExhausted` once `u64::MAX` has been handed out.
    /// Nothing is stored in either case.
    pub fn book(&self, booking: NewBooking) -> Result<Booking> {
        let mut state = self.lock();

        let existing = state.intervals_for(booking.service_id, booking.date);
        if let Some(conflict) = find_conflicts(&booking.interval, &existing).first() {
            warn!(
                service_id = booking.service_id,
                date = %booking.date,
                start = %booking.interval.start(),
                end = %booking.interval.end(),
                overlap_minutes = conflict.overlap_minutes,
                "booking rejected: overlaps existing booking"
            );
            return Err(BookingError::Overlap {
                start: booking.interval.start(),
                end: booking.interval.end(),
                existing_start: conflict.existing.start(),
                existing_end: conflict.existing.end(),
            });
        }

        let id = state.next_id.ok_or(BookingError::IdExhausted)?;
        state.next_id = id.checked_add(1);
        let stored = Booking {
            id,
            user_id: booking.user_id,
            service_id: booking.service_id,
            date: booking.date,
            interval: booking.interval,
        };
        state.bookings.insert(id, stored);

        info!(
            id,
            user_id = stored.user_id,
            service_id = stored.service_id,
            date = %stored.date,
            start = %stored.interval.start(),
            end = %stored.interval.end(),
            "booking created"
        );
        Ok(stored)
    }

    /// Validate a raw request and book it.
    pub fn book_request(&self, request: &BookingRequest) -> Result<Booking> {
        self.book(request.validate()?)
    }

    /// Intervals already booked for a service on a date, in id order.
    pub fn intervals_for(&self, service_id: u64, date: NaiveDate) -> Vec<BookingInterval> {
        self.lock().intervals_for(service_id, date)
    }

    /// Every booking, in id order.
    pub fn all(&self) -> Vec<Booking> {
        self.lock().bookings.values().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().bookings.is_empty()
    }
}
