//! Inclusive date range a query covers.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// The dates one availability query reports on, both ends included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl QueryWindow {
    /// # Errors
    /// Returns `SlotError::Config` if `end` is before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(SlotError::Config(format!(
                "query window ends ({end}) before it starts ({start})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Rolling window starting tomorrow: `today + 1 ..= today + 1 + days`.
    ///
    /// # Errors
    /// Returns `SlotError::Config` if the window runs past the calendar's range.
    pub fn upcoming(today: NaiveDate, days: u32) -> Result<Self> {
        let start = today
            .checked_add_days(Days::new(1))
            .ok_or_else(|| SlotError::Config(format!("no date after {today}")))?;
        let end = start
            .checked_add_days(Days::new(u64::from(days)))
            .ok_or_else(|| SlotError::Config(format!("{days} days after {start} is out of range")))?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of dates in the window.
    pub fn len(&self) -> usize {
        // end >= start is enforced by the constructors.
        (self.end - self.start).num_days() as usize + 1
    }

    /// A window always holds at least one date.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Every date in the window in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.len())
    }

    /// Timestamp bounds handed to event and holiday sources: midnight at the
    /// start of the first date up to the last nanosecond of the last date.
    ///
    /// # Errors
    /// Returns `SlotError::Config` if midnight does not exist in `tz` on either
    /// boundary date.
    pub fn time_bounds(&self, tz: Tz) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let start = local_midnight(tz, self.start)?;
        let after_end = self
            .end
            .succ_opt()
            .ok_or_else(|| SlotError::Config(format!("no date after {}", self.end)))?;
        let end = local_midnight(tz, after_end)? - TimeDelta::nanoseconds(1);
        Ok((start, end))
    }
}

fn local_midnight(tz: Tz, date: NaiveDate) -> Result<DateTime<FixedOffset>> {
    tz.from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| SlotError::Config(format!("midnight does not exist on {date} in {tz}")))
}
