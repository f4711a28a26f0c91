//! # booking-engine
//!
//! Deterministic availability-slot computation and booking-conflict detection.
//!
//! The engine works on plain data: a service's duration and buffer, a day's
//! availability window, the bookings already taken, and a date. It performs no
//! I/O. All times of day are integer minutes from midnight, so there is no
//! timezone or DST drift in any comparison.
//!
//! ## Modules
//!
//! - [`slots`] - Ordered open slot start times for a service on a date
//! - [`conflict`] - Half-open overlap detection between booking intervals
//! - [`catalog`] - Services and their per-weekday availability windows
//! - [`booking`] - Booking requests and an in-memory ledger with atomic check-and-insert
//! - [`holiday`] - Injected holiday blackout dates
//! - [`model`] - Validated service, window and interval types
//! - [`time`] - `HH:MM:SS` clock-time codec and ISO date parsing
//! - [`error`] - Error types

pub mod booking;
pub mod catalog;
pub mod conflict;
pub mod error;
pub mod holiday;
pub mod model;
pub mod slots;
pub mod time;

pub use booking::{Booking, BookingLedger, BookingRequest, NewBooking};
pub use catalog::Catalog;
pub use conflict::{find_conflicts, has_overlap, Conflict};
pub use error::BookingError;
pub use holiday::HolidaySet;
pub use model::{AvailabilityWindow, BookingInterval, Service};
pub use slots::{compute_slot_intervals, compute_slots, Slot};
pub use time::{parse_date, ClockTime};
