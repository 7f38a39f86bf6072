//! The full pipeline for one query window.
//!
//! [`Availability`] is the aggregation context: it is created per window,
//! accumulates per-calendar masks as events arrive, and is consumed when the
//! schedules are produced. Nothing is shared between windows.
//!
//! ```text
//! raw records ─► Event ─► encode_event ─► CalendarBits (OR per calendar)
//!     ─► complete (all-free defaults) ─► merge (seed, then AND)
//!     ─► ClosureFilter ─► decode ─► Vec<FreeTimeSchedule>
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calendar_bits::CalendarBits;
use crate::closure::{ClosureFilter, HolidaySet};
use crate::config::SlotConfig;
use crate::decoder::{self, FreeTimeSchedule};
use crate::encoder::encode_validated;
use crate::error::Result;
use crate::event::{Event, RawEventRecord};
use crate::merger::{self, AggregateBits};
use crate::source::{EventSource, HolidaySource};
use crate::window::QueryWindow;

/// An event left out of the result because it could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEvent {
    pub calendar_id: String,
    pub title: String,
    pub reason: String,
}

/// Result of one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTimeReport {
    /// One schedule per window date, in date order.
    pub schedules: Vec<FreeTimeSchedule>,
    /// Events that were reported and skipped.
    pub skipped: Vec<SkippedEvent>,
}

/// Aggregation context for a single query window.
#[derive(Debug, Clone)]
pub struct Availability {
    config: SlotConfig,
    calendar_ids: Vec<String>,
    bits: CalendarBits,
    skipped: Vec<SkippedEvent>,
}

impl Availability {
    /// # Errors
    /// Returns `SlotError::Config` if `config` does not validate.
    pub fn new(config: SlotConfig, window: QueryWindow) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            calendar_ids: Vec::new(),
            bits: CalendarBits::new(window),
            skipped: Vec::new(),
        })
    }

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    pub fn window(&self) -> QueryWindow {
        self.bits.window()
    }

    /// Register a calendar so it takes part in the merge even without events.
    pub fn add_calendar(&mut self, calendar_id: &str) {
        if !self.calendar_ids.iter().any(|id| id == calendar_id) {
            self.calendar_ids.push(calendar_id.to_string());
        }
    }

    pub fn calendar_ids(&self) -> &[String] {
        &self.calendar_ids
    }

    /// Encode one event into its calendar's masks.
    pub fn add_event(&mut self, event: &Event) {
        self.add_calendar(&event.calendar_id);
        let masks = encode_validated(event, &self.config);
        self.bits.record_event(&event.calendar_id, &masks);
    }

    /// Normalize and add raw records of one calendar.
    ///
    /// Records that fail to parse are logged, remembered in
    /// [`Availability::skipped`], and left out. Returns how many were added.
    pub fn add_records(
        &mut self,
        calendar_id: &str,
        calendar_name: &str,
        records: &[RawEventRecord],
    ) -> usize {
        self.add_calendar(calendar_id);
        let mut added = 0;
        for record in records {
            match Event::from_raw(calendar_id, calendar_name, record, self.config.timezone) {
                Ok(event) => {
                    self.add_event(&event);
                    added += 1;
                }
                Err(e) => {
                    warn!(calendar_id, title = %record.title, error = %e, "skipping event");
                    self.skipped.push(SkippedEvent {
                        calendar_id: calendar_id.to_string(),
                        title: record.title.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        debug!(calendar_id, added, total = records.len(), "encoded calendar");
        added
    }

    pub fn calendar_bits(&self) -> &CalendarBits {
        &self.bits
    }

    pub fn skipped(&self) -> &[SkippedEvent] {
        &self.skipped
    }

    /// Fill in all-free masks for every registered calendar and window date.
    pub fn complete(&mut self) {
        self.bits.complete(&self.calendar_ids);
    }

    /// Complete the date range, then merge across calendars.
    pub fn aggregate(&mut self) -> AggregateBits {
        self.complete();
        merger::merge(&self.bits)
    }

    /// Produce the schedules and the skipped-event report.
    pub fn finish(mut self, closures: &ClosureFilter) -> FreeTimeReport {
        let aggregate = self.aggregate();
        let window = self.bits.window();
        let schedules = decoder::decode(&window, &aggregate, closures, &self.config);
        FreeTimeReport {
            schedules,
            skipped: self.skipped,
        }
    }
}

/// Fetch, encode, merge, and decode free time for `calendar_ids` over `window`.
///
/// # Errors
/// Returns `SlotError::Config` for an invalid configuration, `SlotError::Source`
/// when a source fails, and `SlotError::Parse` when a holiday date is malformed.
/// Unparseable events do not fail the query; they end up in
/// [`FreeTimeReport::skipped`].
pub fn find_free_time<E, H, S>(
    events: &E,
    holidays: &H,
    calendar_ids: &[S],
    window: QueryWindow,
    config: &SlotConfig,
) -> Result<FreeTimeReport>
where
    E: EventSource + ?Sized,
    H: HolidaySource + ?Sized,
    S: AsRef<str>,
{
    let mut availability = Availability::new(config.clone(), window)?;
    let (window_start, window_end) = window.time_bounds(config.timezone)?;

    let holiday_dates = holidays.fetch_holidays(window_start, window_end)?;
    let closures = ClosureFilter::new(
        config.closed_weekdays.clone(),
        HolidaySet::parse(&holiday_dates)?,
    );

    for id in calendar_ids {
        let id = id.as_ref();
        let calendar = events.fetch_events(id, window_start, window_end)?;
        availability.add_records(id, &calendar.name, &calendar.items);
    }

    Ok(availability.finish(&closures))
}
