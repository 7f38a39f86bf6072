//! Slot decoder: aggregate mask → displayable free-slot list.

use chrono::{Datelike, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::closure::ClosureFilter;
use crate::config::SlotConfig;
use crate::mask::DayMask;
use crate::merger::AggregateBits;
use crate::window::QueryWindow;

/// The date heading of one schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTimeDate {
    /// `2026/03/16`
    pub value: String,
    /// `03/16`
    pub text: String,
    /// `Monday`
    pub weekday: String,
}

/// One free slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTime {
    /// RFC 3339 start of the slot, with offset.
    pub value: String,
    /// `HH:MM`
    pub text: String,
}

/// Free slots of one date, in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTimeSchedule {
    pub date: FreeTimeDate,
    pub times: Vec<FreeTime>,
}

impl FreeTimeDate {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            value: date.format("%Y/%m/%d").to_string(),
            text: date.format("%m/%d").to_string(),
            weekday: weekday_name(date.weekday()).to_string(),
        }
    }
}

/// Decode one date.
///
/// Closed dates come back with no slots. Otherwise every clear bit inside the
/// business range becomes a slot; bits outside it are ignored. Slot starts
/// that do not exist locally (a DST gap) are skipped.
pub fn decode_day(
    date: NaiveDate,
    mask: DayMask,
    closed: bool,
    config: &SlotConfig,
) -> FreeTimeSchedule {
    let mut schedule = FreeTimeSchedule {
        date: FreeTimeDate::new(date),
        times: Vec::new(),
    };
    if closed {
        return schedule;
    }

    let per_hour = config.slots_per_hour();
    for bit in config.business_bits() {
        if mask.is_set(bit) {
            continue;
        }
        let hour = bit / per_hour;
        let minute = (bit % per_hour) * config.slot_minutes;
        let Some(local) = NaiveTime::from_hms_opt(hour, minute, 0).map(|t| date.and_time(t)) else {
            continue;
        };
        let Some(start) = config.timezone.from_local_datetime(&local).earliest() else {
            debug!(%local, "skipping slot that does not exist in the configured zone");
            continue;
        };
        schedule.times.push(FreeTime {
            value: start.to_rfc3339_opts(SecondsFormat::Secs, true),
            text: local.format("%H:%M").to_string(),
        });
    }
    schedule
}

/// Decode every date of the window, in date order.
///
/// A date missing from `aggregate` decodes as all free.
pub fn decode(
    window: &QueryWindow,
    aggregate: &AggregateBits,
    closures: &ClosureFilter,
    config: &SlotConfig,
) -> Vec<FreeTimeSchedule> {
    window
        .dates()
        .map(|date| {
            let mask = aggregate.get(date).unwrap_or_default();
            decode_day(date, mask, closures.is_closed(date), config)
        })
        .collect()
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
