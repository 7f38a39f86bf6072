//! Cross-calendar merge.
//!
//! A slot in the aggregate is busy only when every calendar is busy there.
//! One free calendar is enough to report the slot as free. The first mask of
//! a date seeds the aggregate and the rest are intersected into it. Starting
//! from an empty mask and intersecting would make every date look free.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::calendar_bits::CalendarBits;
use crate::mask::DayMask;

/// date → merged mask.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateBits {
    dates: BTreeMap<NaiveDate, DayMask>,
}

impl AggregateBits {
    pub fn get(&self, date: NaiveDate) -> Option<DayMask> {
        self.dates.get(&date).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &DayMask)> {
        self.dates.iter()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Merge the per-calendar masks of each date.
pub fn merge(bits: &CalendarBits) -> AggregateBits {
    let dates = bits
        .iter()
        .filter_map(|(&date, calendars)| {
            merge_masks(calendars.values().copied()).map(|mask| (date, mask))
        })
        .collect();
    AggregateBits { dates }
}

/// Seed with the first mask, intersect the rest. `None` for no masks.
pub fn merge_masks<I>(masks: I) -> Option<DayMask>
where
    I: IntoIterator<Item = DayMask>,
{
    masks.into_iter().fold(None, |acc, mask| match acc {
        None => Some(mask),
        Some(merged) => Some(merged.intersect(mask)),
    })
}
