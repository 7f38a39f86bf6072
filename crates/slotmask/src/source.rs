//! Interfaces to the collaborators that fetch events and holidays.
//!
//! The engine never talks to a calendar service itself. Implementations hand it
//! fully materialized record lists, or fail with `SlotError::Source`. An empty
//! list is taken at face value: the engine cannot tell "no events" from a
//! fetch that silently returned nothing.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::event::RawEventRecord;

/// The records of one calendar inside a time window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvents {
    /// Display name of the calendar.
    #[serde(default, alias = "summary")]
    pub name: String,
    #[serde(default)]
    pub items: Vec<RawEventRecord>,
}

pub trait EventSource {
    fn fetch_events(
        &self,
        calendar_id: &str,
        window_start: DateTime<FixedOffset>,
        window_end: DateTime<FixedOffset>,
    ) -> Result<CalendarEvents>;
}

pub trait HolidaySource {
    /// Holiday dates as `YYYY-MM-DD` strings.
    fn fetch_holidays(
        &self,
        window_start: DateTime<FixedOffset>,
        window_end: DateTime<FixedOffset>,
    ) -> Result<Vec<String>>;
}

/// In-memory source for already-dumped calendars.
///
/// Unknown calendar ids fail with `SlotError::Source`. Holiday strings that
/// parse as dates are filtered to the requested window; anything else is
/// passed through for the engine to reject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticSource {
    #[serde(default)]
    pub calendars: HashMap<String, CalendarEvents>,
    #[serde(default)]
    pub holidays: Vec<String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calendar(mut self, calendar_id: impl Into<String>, events: CalendarEvents) -> Self {
        self.calendars.insert(calendar_id.into(), events);
        self
    }

    pub fn with_holiday(mut self, date: impl Into<String>) -> Self {
        self.holidays.push(date.into());
        self
    }
}

impl EventSource for StaticSource {
    fn fetch_events(
        &self,
        calendar_id: &str,
        _window_start: DateTime<FixedOffset>,
        _window_end: DateTime<FixedOffset>,
    ) -> Result<CalendarEvents> {
        self.calendars
            .get(calendar_id)
            .cloned()
            .ok_or_else(|| SlotError::Source {
                source_name: calendar_id.to_string(),
                message: "unknown calendar".to_string(),
            })
    }
}

impl HolidaySource for StaticSource {
    fn fetch_holidays(
        &self,
        window_start: DateTime<FixedOffset>,
        window_end: DateTime<FixedOffset>,
    ) -> Result<Vec<String>> {
        let first = window_start.date_naive();
        let last = window_end.date_naive();
        Ok(self
            .holidays
            .iter()
            .filter(|raw| match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => first <= date && date <= last,
                Err(_) => true,
            })
            .cloned()
            .collect())
    }
}
