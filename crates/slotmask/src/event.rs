//! Raw calendar records and the normalized [`Event`] the encoder consumes.
//!
//! Raw records follow the shape calendar APIs hand out: each end of an event
//! carries either a `dateTime` (RFC 3339, or a local time plus `timeZone`) or a
//! bare `date` for all-day events.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

const DATE_FORMAT: &str = "%Y-%m-%d";
const LOCAL_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One end of a raw event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventTime {
    /// Timed events: `2026-03-16T09:00:00+09:00`, or `2026-03-16T09:00:00`
    /// together with `time_zone`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// All-day events: `2026-03-16`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// IANA zone for a `date_time` without an offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl RawEventTime {
    pub fn date_time(value: impl Into<String>) -> Self {
        Self {
            date_time: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn date(value: impl Into<String>) -> Self {
        Self {
            date: Some(value.into()),
            ..Self::default()
        }
    }
}

/// An event record as delivered by an event source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEventRecord {
    #[serde(default, alias = "summary")]
    pub title: String,
    #[serde(default)]
    pub start: RawEventTime,
    #[serde(default)]
    pub end: RawEventTime,
}

impl RawEventRecord {
    pub fn timed(title: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            start: RawEventTime::date_time(start),
            end: RawEventTime::date_time(end),
        }
    }

    pub fn all_day(title: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            start: RawEventTime::date(start),
            end: RawEventTime::date(end),
        }
    }
}

/// A normalized event, ready for slot encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub calendar_id: String,
    pub calendar_name: String,
    pub title: String,
    pub is_all_day: bool,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl Event {
    /// Normalize a raw record.
    ///
    /// The timed form wins when both ends parse as datetimes. Otherwise both
    /// ends must parse as dates, and the event becomes all-day, running from
    /// 00:00:00 on the start date to 23:59:59 on the end date in `tz`.
    ///
    /// # Errors
    /// Returns `SlotError::Parse` when neither form can be read.
    pub fn from_raw(
        calendar_id: &str,
        calendar_name: &str,
        record: &RawEventRecord,
        tz: Tz,
    ) -> Result<Self> {
        let (is_all_day, start, end) = match parse_timed(record) {
            Some((start, end)) => (false, start, end),
            None => {
                let (start, end) = parse_all_day(record, tz)?;
                (true, start, end)
            }
        };

        Ok(Self {
            calendar_id: calendar_id.to_string(),
            calendar_name: calendar_name.to_string(),
            title: record.title.clone(),
            is_all_day,
            start,
            end,
        })
    }
}

fn parse_timed(record: &RawEventRecord) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    let start = parse_date_time(&record.start)?;
    let end = parse_date_time(&record.end)?;
    Some((start, end))
}

fn parse_date_time(time: &RawEventTime) -> Option<DateTime<FixedOffset>> {
    let raw = time.date_time.as_deref()?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    // Offset-less local time, placed with the record's own zone.
    let tz: Tz = time.time_zone.as_deref()?.parse().ok()?;
    let local = NaiveDateTime::parse_from_str(raw, LOCAL_DATE_TIME_FORMAT).ok()?;
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.fixed_offset())
}

fn parse_all_day(
    record: &RawEventRecord,
    tz: Tz,
) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    let start_date = parse_date(record.start.date.as_deref(), &record.title)?;
    let end_date = parse_date(record.end.date.as_deref(), &record.title)?;

    let start = tz
        .from_local_datetime(&start_date.and_time(NaiveTime::MIN))
        .earliest()
        .ok_or_else(|| {
            SlotError::Parse(format!("midnight does not exist on {start_date} in {tz}"))
        })?;
    let end = end_date
        .and_hms_opt(23, 59, 59)
        .and_then(|local| tz.from_local_datetime(&local).latest())
        .ok_or_else(|| SlotError::Parse(format!("23:59:59 does not exist on {end_date} in {tz}")))?;

    Ok((start.fixed_offset(), end.fixed_offset()))
}

fn parse_date(value: Option<&str>, title: &str) -> Result<NaiveDate> {
    let raw = value.ok_or_else(|| {
        SlotError::Parse(format!(
            "event '{title}' has neither a valid dateTime nor a date"
        ))
    })?;
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| SlotError::Parse(format!("event '{title}': invalid date '{raw}': {e}")))
}
