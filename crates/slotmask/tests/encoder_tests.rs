//! Tests for encoding single events into per-date masks.

use chrono::{NaiveDate, Weekday};
use slotmask::{encode_event, DayMask, Event, RawEventRecord, SlotConfig, SlotError};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn config() -> SlotConfig {
    SlotConfig::default()
}

fn hourly() -> SlotConfig {
    SlotConfig::new(60, 8, 20, chrono_tz::Asia::Tokyo, vec![Weekday::Wed, Weekday::Thu]).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn timed(start: &str, end: &str) -> Event {
    let record = RawEventRecord::timed("busy", start, end);
    Event::from_raw("cal-a", "A", &record, chrono_tz::Asia::Tokyo).unwrap()
}

fn all_day(start: &str, end: &str) -> Event {
    let record = RawEventRecord::all_day("off", start, end);
    Event::from_raw("cal-a", "A", &record, chrono_tz::Asia::Tokyo).unwrap()
}

/// Mask of the inclusive slot range `[first, last]`.
fn slots(first: u32, last: u32) -> DayMask {
    DayMask::empty().with_range(first, last + 1)
}

// ── Timed events ────────────────────────────────────────────────────────────

#[test]
fn hour_long_event_marks_two_half_hour_slots() {
    let event = timed("2026-03-16T09:00:00+09:00", "2026-03-16T10:00:00+09:00");

    let masks = encode_event(&event, &config()).unwrap();

    assert_eq!(masks.len(), 1);
    assert_eq!(masks[&date(2026, 3, 16)], slots(18, 19));
}

#[test]
fn half_hour_start_rounds_into_its_slot() {
    let event = timed("2026-03-16T08:30:00+09:00", "2026-03-16T09:30:00+09:00");

    let masks = encode_event(&event, &config()).unwrap();

    assert_eq!(masks[&date(2026, 3, 16)], slots(17, 18));
}

#[test]
fn unaligned_edges_cover_every_touched_slot() {
    // 10:15 falls in slot 20, 10:45 in slot 21.
    let event = timed("2026-03-16T10:15:00+09:00", "2026-03-16T10:45:00+09:00");

    let masks = encode_event(&event, &config()).unwrap();

    assert_eq!(masks[&date(2026, 3, 16)], slots(20, 21));
}

#[test]
fn end_on_half_hour_does_not_mark_following_slot() {
    let event = timed("2026-03-16T10:00:00+09:00", "2026-03-16T10:30:00+09:00");

    let masks = encode_event(&event, &config()).unwrap();

    assert_eq!(masks[&date(2026, 3, 16)], slots(20, 20));
}

#[test]
fn end_past_half_hour_rounds_up() {
    let event = timed("2026-03-16T10:00:00+09:00", "2026-03-16T10:31:00+09:00");

    let masks = encode_event(&event, &config()).unwrap();

    assert_eq!(masks[&date(2026, 3, 16)], slots(20, 21));
}

#[test]
fn zero_length_event_marks_nothing() {
    let event = timed("2026-03-16T10:00:00+09:00", "2026-03-16T10:00:00+09:00");

    let masks = encode_event(&event, &config()).unwrap();

    assert!(masks.is_empty(), "zero-length event must not occupy a slot");
}

#[test]
fn inverted_event_marks_nothing() {
    let event = timed("2026-03-16T11:00:00+09:00", "2026-03-16T10:00:00+09:00");

    assert!(encode_event(&event, &config()).unwrap().is_empty());
}

#[test]
fn event_crossing_midnight_keeps_only_start_date_part() {
    let event = timed("2026-03-16T23:00:00+09:00", "2026-03-17T01:00:00+09:00");

    let masks = encode_event(&event, &config()).unwrap();

    assert_eq!(masks.len(), 1);
    assert_eq!(masks[&date(2026, 3, 16)], slots(46, 47));
    assert!(!masks.contains_key(&date(2026, 3, 17)));
}

#[test]
fn event_ending_at_midnight_reaches_last_slot() {
    let event = timed("2026-03-16T22:00:00+09:00", "2026-03-17T00:00:00+09:00");

    let masks = encode_event(&event, &config()).unwrap();

    assert_eq!(masks[&date(2026, 3, 16)], slots(44, 47));
}

#[test]
fn foreign_offset_is_placed_in_configured_zone() {
    // 00:00Z-01:00Z is 09:00-10:00 in Tokyo.
    let event = timed("2026-03-16T00:00:00Z", "2026-03-16T01:00:00Z");

    let masks = encode_event(&event, &config()).unwrap();

    assert_eq!(masks[&date(2026, 3, 16)], slots(18, 19));
}

#[test]
fn hourly_slots_round_to_whole_hours() {
    let event = timed("2026-03-16T09:00:00+09:00", "2026-03-16T10:30:00+09:00");

    let masks = encode_event(&event, &hourly()).unwrap();

    assert_eq!(masks[&date(2026, 3, 16)], slots(9, 10));
}

// ── All-day events ──────────────────────────────────────────────────────────

#[test]
fn all_day_event_fills_every_spanned_date() {
    let event = all_day("2026-03-16", "2026-03-18");

    let masks = encode_event(&event, &config()).unwrap();

    assert_eq!(masks.len(), 3);
    for day in 16..=18 {
        assert_eq!(masks[&date(2026, 3, day)], DayMask::full(48));
    }
}

#[test]
fn single_date_all_day_event_fills_one_date() {
    let event = all_day("2026-03-16", "2026-03-16");

    let masks = encode_event(&event, &config()).unwrap();

    assert_eq!(masks.len(), 1);
    assert_eq!(masks[&date(2026, 3, 16)], DayMask::full(48));
}

#[test]
fn all_day_mask_width_follows_slot_length() {
    let event = all_day("2026-03-16", "2026-03-16");

    let masks = encode_event(&event, &hourly()).unwrap();

    assert_eq!(masks[&date(2026, 3, 16)], DayMask::full(24));
}

#[test]
fn all_day_event_across_month_end() {
    let event = all_day("2026-03-30", "2026-04-02");

    let masks = encode_event(&event, &config()).unwrap();

    let dates: Vec<NaiveDate> = masks.keys().copied().collect();
    assert_eq!(
        dates,
        vec![date(2026, 3, 30), date(2026, 3, 31), date(2026, 4, 1), date(2026, 4, 2)]
    );
}

// ── DST days ────────────────────────────────────────────────────────────────

fn new_york() -> SlotConfig {
    SlotConfig::new(30, 8, 20, chrono_tz::America::New_York, vec![]).unwrap()
}

fn all_day_in_new_york(start: &str, end: &str) -> Event {
    let record = RawEventRecord::all_day("off", start, end);
    Event::from_raw("cal-a", "A", &record, chrono_tz::America::New_York).unwrap()
}

#[test]
fn all_day_event_on_fall_back_day_fills_one_date() {
    // New York falls back on 2026-11-01, a 25-hour day.
    let event = all_day_in_new_york("2026-11-01", "2026-11-01");

    let masks = encode_event(&event, &new_york()).unwrap();

    let dates: Vec<NaiveDate> = masks.keys().copied().collect();
    assert_eq!(dates, vec![date(2026, 11, 1)]);
}

#[test]
fn all_day_event_across_fall_back_keeps_date_count() {
    let event = all_day_in_new_york("2026-10-31", "2026-11-02");

    let masks = encode_event(&event, &new_york()).unwrap();

    let dates: Vec<NaiveDate> = masks.keys().copied().collect();
    assert_eq!(dates, vec![date(2026, 10, 31), date(2026, 11, 1), date(2026, 11, 2)]);
}

#[test]
fn all_day_event_on_spring_forward_day_fills_one_date() {
    // New York springs forward on 2026-03-08, a 23-hour day.
    let event = all_day_in_new_york("2026-03-08", "2026-03-08");

    let masks = encode_event(&event, &new_york()).unwrap();

    assert_eq!(masks.len(), 1);
    assert_eq!(masks[&date(2026, 3, 8)], DayMask::full(48));
}

// ── Configuration ───────────────────────────────────────────────────────────

#[test]
fn unvalidated_zero_slot_length_is_a_config_error() {
    let event = timed("2026-03-16T09:00:00+09:00", "2026-03-16T10:00:00+09:00");
    let config = SlotConfig {
        slot_minutes: 0,
        ..SlotConfig::default()
    };

    let err = encode_event(&event, &config).unwrap_err();

    assert!(matches!(err, SlotError::Config(_)));
}
