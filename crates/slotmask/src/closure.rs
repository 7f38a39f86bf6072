//! Full-day closures: recurring closed weekdays and holiday dates.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{Result, SlotError};

/// Holiday dates supplied by a holiday source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `YYYY-MM-DD` strings.
    ///
    /// # Errors
    /// Returns `SlotError::Parse` on the first string that is not a date.
    pub fn parse<S: AsRef<str>>(dates: &[S]) -> Result<Self> {
        dates
            .iter()
            .map(|raw| {
                let raw = raw.as_ref();
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|e| SlotError::Parse(format!("invalid holiday date '{raw}': {e}")))
            })
            .collect()
    }

    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

/// Decides which dates are closed regardless of their masks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosureFilter {
    weekdays: Vec<Weekday>,
    holidays: HolidaySet,
}

impl ClosureFilter {
    pub fn new(weekdays: Vec<Weekday>, holidays: HolidaySet) -> Self {
        Self { weekdays, holidays }
    }

    pub fn is_closed(&self, date: NaiveDate) -> bool {
        self.weekdays.contains(&date.weekday()) || self.holidays.contains(date)
    }

    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }
}
