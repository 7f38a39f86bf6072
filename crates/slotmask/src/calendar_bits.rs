//! Per-calendar aggregation and date-range completion.
//!
//! [`CalendarBits`] holds one mask per (date, calendar) pair inside a single
//! query window. Events of the same calendar fold together with OR, so
//! overlapping events never cancel each other out.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::mask::DayMask;
use crate::window::QueryWindow;

/// date → (calendar id → mask), bounded to one window.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarBits {
    window: QueryWindow,
    dates: BTreeMap<NaiveDate, BTreeMap<String, DayMask>>,
}

impl CalendarBits {
    pub fn new(window: QueryWindow) -> Self {
        Self {
            window,
            dates: BTreeMap::new(),
        }
    }

    pub fn window(&self) -> QueryWindow {
        self.window
    }

    /// Fold one contribution into the mask of `(date, calendar_id)`.
    ///
    /// The first contribution is stored as is, later ones are ORed in.
    /// Returns `false` and stores nothing when `date` is outside the window.
    pub fn record(&mut self, date: NaiveDate, calendar_id: &str, mask: DayMask) -> bool {
        if !self.window.contains(date) {
            return false;
        }
        let calendars = self.dates.entry(date).or_default();
        match calendars.entry(calendar_id.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(mask);
            }
            Entry::Occupied(mut slot) => {
                let merged = slot.get().union(mask);
                slot.insert(merged);
            }
        }
        true
    }

    /// Fold every date an encoded event touches.
    pub fn record_event(&mut self, calendar_id: &str, masks: &BTreeMap<NaiveDate, DayMask>) {
        for (&date, &mask) in masks {
            if !self.record(date, calendar_id, mask) {
                debug!(%date, calendar_id, "dropping contribution outside the query window");
            }
        }
    }

    /// Give every calendar an explicit mask on every date of the window.
    ///
    /// Missing pairs are filled with an all-free mask: a calendar that
    /// reported nothing for a date counts as available all day.
    pub fn complete<S: AsRef<str>>(&mut self, calendar_ids: &[S]) {
        let mut filled = 0usize;
        for id in calendar_ids {
            let id = id.as_ref();
            for date in self.window.dates() {
                let calendars = self.dates.entry(date).or_default();
                if !calendars.contains_key(id) {
                    calendars.insert(id.to_string(), DayMask::empty());
                    filled += 1;
                }
            }
        }
        debug!(filled, calendars = calendar_ids.len(), "completed date range");
    }

    pub fn get(&self, date: NaiveDate, calendar_id: &str) -> Option<DayMask> {
        self.dates.get(&date)?.get(calendar_id).copied()
    }

    /// The per-calendar masks recorded for `date`.
    pub fn calendars_on(&self, date: NaiveDate) -> Option<&BTreeMap<String, DayMask>> {
        self.dates.get(&date)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &BTreeMap<String, DayMask>)> {
        self.dates.iter()
    }

    /// Total number of (date, calendar) entries.
    pub fn entry_count(&self) -> usize {
        self.dates.values().map(BTreeMap::len).sum()
    }
}
