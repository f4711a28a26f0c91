//! Detect overlapping bookings for the same service and date.
//!
//! Compares a candidate interval against every existing one. Adjacent bookings
//! (where one ends exactly when another starts) are NOT conflicts.

use serde::Serialize;

use crate::model::BookingInterval;

/// An existing booking that the candidate intersects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub existing: BookingInterval,
    pub overlap_minutes: u32,
}

/// Whether `candidate` overlaps any interval in `existing`.
///
/// Two intervals overlap when `a.start < b.end && a.end > b.start`. The whole
/// list is scanned; no ordering is assumed.
///
/// This check alone cannot stop two concurrent requests from both passing and
/// both inserting. Callers must run it and the insert under the same lock or
/// transaction for the `(service, date)` pair; see
/// [`BookingLedger::book`](crate::booking::BookingLedger::book).
pub fn has_overlap(candidate: &BookingInterval, existing: &[BookingInterval]) -> bool {
    existing.iter().any(|b| candidate.overlaps(b))
}

/// Find every existing interval that `candidate` overlaps, in input order.
///
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_conflicts(candidate: &BookingInterval, existing: &[BookingInterval]) -> Vec<Conflict> {
    existing
        .iter()
        .filter(|b| candidate.overlaps(b))
        .map(|b| Conflict {
            existing: *b,
            overlap_minutes: candidate.overlap_minutes(b),
        })
        .collect()
}
