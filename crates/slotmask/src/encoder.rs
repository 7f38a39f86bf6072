//! Slot encoder: one event → per-date occupancy masks.
//!
//! Timed events occupy `[floor(start / Δ), ceil(end / Δ))` in minutes of the
//! day. At Δ = 30 this is the same as rounding the start down to its half hour,
//! dropping the slot that begins exactly at an on-the-hour end, and rounding
//! any other end up to the slot it falls in.
//!
//! A timed event is keyed by its start date only. When it runs past midnight
//! the end is clamped to 24:00 of the start date, so the part after midnight is
//! not encoded.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, Timelike};
use chrono_tz::Tz;

use crate::config::SlotConfig;
use crate::error::Result;
use crate::event::Event;
use crate::mask::DayMask;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Encode one event into the masks it contributes, keyed by local date.
///
/// Dates whose contribution would be empty (zero-length or inverted events)
/// are left out.
///
/// # Errors
/// Returns `SlotError::Config` if `config` does not validate.
pub fn encode_event(event: &Event, config: &SlotConfig) -> Result<BTreeMap<NaiveDate, DayMask>> {
    config.validate()?;
    Ok(encode_validated(event, config))
}

/// [`encode_event`] for a configuration that has already passed
/// [`SlotConfig::validate`].
pub(crate) fn encode_validated(event: &Event, config: &SlotConfig) -> BTreeMap<NaiveDate, DayMask> {
    let start = event.start.with_timezone(&config.timezone);
    let end = event.end.with_timezone(&config.timezone);

    if event.is_all_day {
        encode_all_day(start, end, config)
    } else {
        encode_timed(start, end, config)
    }
}

/// Every local date from the start date through the end date gets a fully
/// occupied mask. Dates are counted on the calendar, not by elapsed hours, so
/// a 25-hour DST day still counts as one date.
fn encode_all_day(
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    config: &SlotConfig,
) -> BTreeMap<NaiveDate, DayMask> {
    let mut masks = BTreeMap::new();
    let first = start.date_naive();
    let days = (end.date_naive() - first).num_days();
    if end < start || days < 0 {
        return masks;
    }

    let full = DayMask::full(config.slots_per_day());
    for offset in 0..=days as u64 {
        if let Some(date) = first.checked_add_days(Days::new(offset)) {
            masks.insert(date, full);
        }
    }
    masks
}

fn encode_timed(
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    config: &SlotConfig,
) -> BTreeMap<NaiveDate, DayMask> {
    let mut masks = BTreeMap::new();
    let date = start.date_naive();
    let end_date = end.date_naive();
    if end_date < date {
        return masks;
    }

    let start_minute = minute_of_day(&start);
    let end_minute = if end_date > date {
        MINUTES_PER_DAY
    } else {
        minute_of_day(&end)
    };

    let (start_bit, end_bit) = slot_range(start_minute, end_minute, config.slot_minutes);
    let mask = DayMask::empty().with_range(start_bit, end_bit);
    if !mask.is_empty() {
        masks.insert(date, mask);
    }
    masks
}

/// Half-open slot range covered by `[start_minute, end_minute)`.
fn slot_range(start_minute: u32, end_minute: u32, slot_minutes: u32) -> (u32, u32) {
    (start_minute / slot_minutes, end_minute.div_ceil(slot_minutes))
}

fn minute_of_day(dt: &DateTime<Tz>) -> u32 {
    dt.hour() * 60 + dt.minute()
}
