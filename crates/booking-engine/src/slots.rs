//! Compute bookable slot start times for one service on one date.
//!
//! Candidates are generated from the window start at a fixed cadence of
//! `duration + buffer` minutes; a candidate is kept when its occupied interval
//! `[start, start + duration)` fits inside the window and intersects no
//! existing booking.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::holiday::HolidaySet;
use crate::model::{AvailabilityWindow, BookingInterval, Service};
use crate::time::ClockTime;

/// A bookable slot, spanning exactly the service duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub start: ClockTime,
    pub end: ClockTime,
}

/// Find the open slots for `service` on `date`, returned as start times in
/// increasing order.
///
/// Returns an empty list when `date` is a holiday (checked first, so it
/// overrides any window) or when there is no availability window for the day.
///
/// Bookings may be given in any order. A candidate touching a booking (ending
/// exactly as it starts, or starting exactly as it ends) is still available.
pub fn compute_slots(
    service: &Service,
    availability: Option<&AvailabilityWindow>,
    bookings: &[BookingInterval],
    date: NaiveDate,
    holidays: &HolidaySet,
) -> Vec<ClockTime> {
    compute_slot_intervals(service, availability, bookings, date, holidays)
        .into_iter()
        .map(|slot| slot.start)
        .collect()
}

/// Same as [`compute_slots`], but returns each slot's full occupied interval.
pub fn compute_slot_intervals(
    service: &Service,
    availability: Option<&AvailabilityWindow>,
    bookings: &[BookingInterval],
    date: NaiveDate,
    holidays: &HolidaySet,
) -> Vec<Slot> {
    if holidays.contains(date) {
        debug!(service_id = service.id(), %date, "holiday, no slots");
        return Vec::new();
    }

    let Some(window) = availability else {
        debug!(service_id = service.id(), %date, "no availability window");
        return Vec::new();
    };

    let step = service.step_minutes();
    let mut slots = Vec::new();
    let mut candidates = 0usize;
    let mut cursor = window.start();

    // `checked_add_minutes` fails past 24:00, which is also past any window end.
    while let Some(end) = cursor.checked_add_minutes(service.duration_minutes()) {
        if end > window.end() {
            break;
        }
        candidates += 1;

        let occupied = Slot { start: cursor, end };
        if !bookings.iter().any(|b| intersects(&occupied, b)) {
            slots.push(occupied);
        }

        match cursor.checked_add_minutes(step) {
            Some(next) => cursor = next,
            None => break,
        }
    }

    debug!(
        service_id = service.id(),
        %date,
        window_start = %window.start(),
        window_end = %window.end(),
        step,
        candidates,
        available = slots.len(),
        "computed slots"
    );

    slots
}

fn intersects(slot: &Slot, booking: &BookingInterval) -> bool {
    slot.start < booking.end() && slot.end > booking.start()
}
