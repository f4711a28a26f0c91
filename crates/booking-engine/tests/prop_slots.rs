//! Property-based tests for slot computation and overlap detection using proptest.
//!
//! These tests verify invariants that should hold for *any* valid service,
//! window and booking set, not just the specific examples in `slot_tests.rs`.

use booking_engine::{
    compute_slots, has_overlap, AvailabilityWindow, BookingInterval, ClockTime, HolidaySet,
    Service,
};
use chrono::{NaiveDate, Weekday};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies - generate valid engine inputs
// ---------------------------------------------------------------------------

fn arb_service() -> impl Strategy<Value = Service> {
    (1u32..=180, 0u32..=60).prop_map(|(duration, buffer)| {
        Service::new(1, "prop", duration, buffer).expect("duration is positive")
    })
}

/// Any `[start, end)` within the day with `start < end`, at 5-minute resolution.
fn arb_interval() -> impl Strategy<Value = (u32, u32)> {
    (0u32..288)
        .prop_flat_map(|start| (Just(start), (start + 1)..=288))
        .prop_map(|(start, end)| (start * 5, end * 5))
}

fn arb_window() -> impl Strategy<Value = AvailabilityWindow> {
    arb_interval().prop_map(|(s, e)| {
        AvailabilityWindow::new(Weekday::Mon, clock(s), clock(e)).expect("start < end")
    })
}

fn arb_booking() -> impl Strategy<Value = BookingInterval> {
    arb_interval().prop_map(|(s, e)| BookingInterval::new(clock(s), clock(e)).expect("start < end"))
}

fn arb_bookings() -> impl Strategy<Value = Vec<BookingInterval>> {
    prop::collection::vec(arb_booking(), 0..8)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn clock(minutes: u32) -> ClockTime {
    ClockTime::from_minutes(minutes).expect("within the day")
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Without bookings, slots step by duration + buffer inside the window
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn unbooked_slots_follow_cadence(service in arb_service(), window in arb_window()) {
        let slots = compute_slots(&service, Some(&window), &[], monday(), &HolidaySet::new());

        if window.fits(service.duration_minutes()) {
            prop_assert_eq!(slots.first().copied(), Some(window.start()));
        } else {
            prop_assert!(slots.is_empty());
        }

        for pair in slots.windows(2) {
            prop_assert_eq!(
                pair[1].minutes() - pair[0].minutes(),
                service.step_minutes()
            );
        }

        for slot in &slots {
            prop_assert!(*slot >= window.start());
            prop_assert!(slot.minutes() + service.duration_minutes() <= window.end().minutes());
        }

        // The next candidate after the last slot would not fit.
        if let Some(last) = slots.last() {
            prop_assert!(
                last.minutes() + service.step_minutes() + service.duration_minutes()
                    > window.end().minutes()
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: No returned slot overlaps any booking; output strictly increasing
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_never_overlap_bookings(
        service in arb_service(),
        window in arb_window(),
        bookings in arb_bookings(),
    ) {
        let slots = compute_slots(&service, Some(&window), &bookings, monday(), &HolidaySet::new());

        for pair in slots.windows(2) {
            prop_assert!(pair[0] < pair[1], "slots not strictly increasing");
        }

        for slot in &slots {
            let occupied = BookingInterval::new(
                *slot,
                clock(slot.minutes() + service.duration_minutes()),
            ).expect("duration is positive");
            prop_assert!(
                !has_overlap(&occupied, &bookings),
                "slot {} overlaps a booking",
                slot
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Bookings only remove candidates, never add or shift them
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn booked_slots_are_subset_of_unbooked(
        service in arb_service(),
        window in arb_window(),
        bookings in arb_bookings(),
    ) {
        let free = compute_slots(&service, Some(&window), &[], monday(), &HolidaySet::new());
        let booked = compute_slots(&service, Some(&window), &bookings, monday(), &HolidaySet::new());

        for slot in &booked {
            prop_assert!(free.contains(slot));
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: Holidays and absent windows always yield nothing
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn holiday_or_closed_day_is_empty(
        service in arb_service(),
        window in arb_window(),
        bookings in arb_bookings(),
    ) {
        let holidays: HolidaySet = [monday()].into_iter().collect();
        prop_assert!(compute_slots(&service, Some(&window), &bookings, monday(), &holidays).is_empty());
        prop_assert!(compute_slots(&service, None, &bookings, monday(), &HolidaySet::new()).is_empty());
    }
}

// ---------------------------------------------------------------------------
// Property 5: Overlap matches the half-open rule and is symmetric
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn overlap_matches_half_open_rule(a in arb_booking(), b in arb_booking()) {
        let expected = a.start() < b.end() && b.start() < a.end();
        prop_assert_eq!(has_overlap(&a, &[b]), expected);
        prop_assert_eq!(has_overlap(&b, &[a]), expected);

        if a.end() == b.start() || b.end() == a.start() {
            prop_assert!(!has_overlap(&a, &[b]), "touching intervals must not overlap");
        }
    }
}
