//! Per-day occupancy bitmask.
//!
//! Bit `i` of a [`DayMask`] stands for the slot `[i * Δ, (i + 1) * Δ)` of one
//! calendar date, where `Δ` is the configured slot length. A set bit means the
//! slot is occupied for whatever owns the mask: one event, one calendar, or the
//! cross-calendar aggregate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of slots a single mask can address.
pub const MAX_SLOTS: u32 = u64::BITS;

/// A fixed-width occupancy mask for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayMask(u64);

impl DayMask {
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// A mask with every slot free.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// A mask with the first `slots` slots occupied.
    ///
    /// `slots` is clamped to [`MAX_SLOTS`].
    pub const fn full(slots: u32) -> Self {
        if slots >= MAX_SLOTS {
            Self(u64::MAX)
        } else {
            Self((1u64 << slots) - 1)
        }
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Busy wherever either mask is busy. Used within one calendar.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Busy only where both masks are busy. Used across calendars.
    #[must_use]
    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn is_set(self, slot: u32) -> bool {
        slot < MAX_SLOTS && (self.0 >> slot) & 1 == 1
    }

    /// Mark the half-open slot range `[start, end)` as occupied.
    ///
    /// An empty or inverted range leaves the mask untouched. `end` is clamped
    /// to [`MAX_SLOTS`].
    pub fn set_range(&mut self, start: u32, end: u32) {
        let end = end.min(MAX_SLOTS);
        if start >= end {
            return;
        }
        let upper = Self::full(end).0;
        let lower = Self::full(start).0;
        self.0 |= upper & !lower;
    }

    /// Builder form of [`DayMask::set_range`].
    #[must_use]
    pub fn with_range(mut self, start: u32, end: u32) -> Self {
        self.set_range(start, end);
        self
    }

    /// Number of occupied slots.
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Render the lowest `slots` bits, most significant first, the way the
    /// masks are usually eyeballed when debugging a day.
    pub fn render(self, slots: u32) -> String {
        let slots = slots.min(MAX_SLOTS);
        (0..slots)
            .rev()
            .map(|i| if self.is_set(i) { '1' } else { '0' })
            .collect()
    }
}

impl fmt::Binary for DayMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

impl From<u64> for DayMask {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}
