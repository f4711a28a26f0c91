//! Tests for slot computation.

use booking_engine::{
    compute_slot_intervals, compute_slots, AvailabilityWindow, BookingInterval, ClockTime,
    HolidaySet, Service,
};
use chrono::{NaiveDate, Weekday};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn service(duration: u32, buffer: u32) -> Service {
    Service::new(1, "Test Service", duration, buffer).unwrap()
}

fn window(start: &str, end: &str) -> AvailabilityWindow {
    AvailabilityWindow::parse(Weekday::Sun, start, end).unwrap()
}

fn booking(start: &str, end: &str) -> BookingInterval {
    BookingInterval::parse(start, end).unwrap()
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn render(slots: &[ClockTime]) -> Vec<String> {
    slots.iter().map(|t| t.to_string()).collect()
}

// ── Cadence ─────────────────────────────────────────────────────────────────

#[test]
fn duration_plus_buffer_cadence_without_bookings() {
    // 60-min service with 15-min buffer, 09:00-17:00 → 75-min cadence.
    // 16:30 would end at 17:30, past close, so 15:15 is the last slot.
    let slots = compute_slots(
        &service(60, 15),
        Some(&window("09:00:00", "17:00:00")),
        &[],
        date("2023-10-15"),
        &HolidaySet::new(),
    );

    assert_eq!(
        render(&slots),
        vec!["09:00", "10:15", "11:30", "12:45", "14:00", "15:15"]
    );
}

#[test]
fn zero_buffer_fills_window_back_to_back() {
    let slots = compute_slots(
        &service(60, 0),
        Some(&window("09:00:00", "17:00:00")),
        &[],
        date("2023-10-15"),
        &HolidaySet::new(),
    );

    assert_eq!(slots.len(), 8);
    assert_eq!(slots[0].to_string(), "09:00");
    assert_eq!(slots[7].to_string(), "16:00", "16:00-17:00 ends exactly at close");
}

#[test]
fn last_slot_may_end_exactly_at_close() {
    let slots = compute_slots(
        &service(30, 0),
        Some(&window("09:00:00", "10:00:00")),
        &[],
        date("2023-10-15"),
        &HolidaySet::new(),
    );
    assert_eq!(render(&slots), vec!["09:00", "09:30"]);
}

#[test]
fn window_ending_at_midnight() {
    let slots = compute_slots(
        &service(60, 0),
        Some(&window("22:00:00", "24:00:00")),
        &[],
        date("2023-10-15"),
        &HolidaySet::new(),
    );
    assert_eq!(render(&slots), vec!["22:00", "23:00"]);
}

// ── Existing bookings ───────────────────────────────────────────────────────

#[test]
fn booked_hour_is_excluded_neighbours_kept() {
    let slots = compute_slots(
        &service(60, 0),
        Some(&window("09:00:00", "17:00:00")),
        &[booking("10:00:00", "11:00:00")],
        date("2023-10-15"),
        &HolidaySet::new(),
    );

    let rendered = render(&slots);
    assert!(rendered.contains(&"09:00".to_string()), "09:00 ends as booking starts");
    assert!(!rendered.contains(&"10:00".to_string()), "10:00 is booked");
    assert!(rendered.contains(&"11:00".to_string()), "11:00 starts as booking ends");
    assert_eq!(slots.len(), 7);
}

#[test]
fn partial_overlap_excludes_candidate() {
    // Booking 10:30-11:30 clips both the 10:00 and 11:00 candidates.
    let slots = compute_slots(
        &service(60, 0),
        Some(&window("09:00:00", "13:00:00")),
        &[booking("10:30:00", "11:30:00")],
        date("2023-10-15"),
        &HolidaySet::new(),
    );
    assert_eq!(render(&slots), vec!["09:00", "12:00"]);
}

#[test]
fn booking_inside_candidate_excludes_candidate() {
    // A short booking strictly inside the 10:00-11:00 candidate.
    let slots = compute_slots(
        &service(60, 0),
        Some(&window("09:00:00", "12:00:00")),
        &[booking("10:15:00", "10:45:00")],
        date("2023-10-15"),
        &HolidaySet::new(),
    );
    assert_eq!(render(&slots), vec!["09:00", "11:00"]);
}

#[test]
fn unordered_bookings_are_handled() {
    let slots = compute_slots(
        &service(60, 0),
        Some(&window("09:00:00", "14:00:00")),
        &[
            booking("13:00:00", "14:00:00"),
            booking("09:00:00", "10:00:00"),
            booking("11:00:00", "12:00:00"),
        ],
        date("2023-10-15"),
        &HolidaySet::new(),
    );
    assert_eq!(render(&slots), vec!["10:00", "12:00"]);
}

#[test]
fn fully_booked_window_yields_nothing() {
    let slots = compute_slots(
        &service(60, 0),
        Some(&window("09:00:00", "12:00:00")),
        &[booking("08:00:00", "13:00:00")],
        date("2023-10-15"),
        &HolidaySet::new(),
    );
    assert!(slots.is_empty());
}

// ── Empty results ───────────────────────────────────────────────────────────

#[test]
fn holiday_yields_no_slots() {
    let holidays = HolidaySet::parse_all(&["2023-12-25"]).unwrap();
    let slots = compute_slots(
        &service(60, 15),
        Some(&window("09:00:00", "17:00:00")),
        &[],
        date("2023-12-25"),
        &holidays,
    );
    assert!(slots.is_empty(), "holiday overrides availability");
}

#[test]
fn non_holiday_date_unaffected_by_holiday_set() {
    let holidays = HolidaySet::parse_all(&["2023-12-25"]).unwrap();
    let slots = compute_slots(
        &service(60, 15),
        Some(&window("09:00:00", "17:00:00")),
        &[],
        date("2023-12-26"),
        &holidays,
    );
    assert_eq!(slots.len(), 6);
}

#[test]
fn absent_availability_yields_no_slots() {
    let slots = compute_slots(
        &service(60, 15),
        None,
        &[],
        date("2023-10-15"),
        &HolidaySet::new(),
    );
    assert!(slots.is_empty());
}

#[test]
fn window_shorter_than_duration_yields_no_slots() {
    let slots = compute_slots(
        &service(90, 0),
        Some(&window("09:00:00", "10:00:00")),
        &[],
        date("2023-10-15"),
        &HolidaySet::new(),
    );
    assert!(slots.is_empty());
}

#[test]
fn buffer_larger_than_window_yields_single_slot() {
    let slots = compute_slots(
        &service(30, 240),
        Some(&window("09:00:00", "12:00:00")),
        &[],
        date("2023-10-15"),
        &HolidaySet::new(),
    );
    assert_eq!(render(&slots), vec!["09:00"]);
}

#[test]
fn one_minute_service_over_whole_day_terminates() {
    let slots = compute_slots(
        &service(1, 0),
        Some(&window("00:00:00", "24:00:00")),
        &[],
        date("2023-10-15"),
        &HolidaySet::new(),
    );
    assert_eq!(slots.len(), 1440);
    assert_eq!(slots.first().map(|t| t.minutes()), Some(0));
    assert_eq!(slots.last().map(|t| t.minutes()), Some(1439));
}

#[test]
fn zero_duration_service_cannot_be_built() {
    assert!(Service::new(1, "Test Service", 0, 0).is_err());
}

// ── Slot intervals ──────────────────────────────────────────────────────────

#[test]
fn slot_intervals_span_exactly_the_duration() {
    let slots = compute_slot_intervals(
        &service(45, 15),
        Some(&window("09:00:00", "12:00:00")),
        &[],
        date("2023-10-15"),
        &HolidaySet::new(),
    );

    assert_eq!(slots.len(), 3);
    for slot in &slots {
        assert_eq!(slot.end.minutes() - slot.start.minutes(), 45);
    }
    assert_eq!(slots[2].start.to_string(), "11:00");
    assert_eq!(slots[2].end.to_string(), "11:45");
}
