//! Engine configuration: slot length, business hours, zone, and weekly closures.

use std::ops::Range;

use chrono::Weekday;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::mask::MAX_SLOTS;

pub const DEFAULT_SLOT_MINUTES: u32 = 30;
pub const DEFAULT_BUSINESS_START_HOUR: u32 = 8;
pub const DEFAULT_BUSINESS_END_HOUR: u32 = 20;
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Tokyo;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Configuration shared by every stage of one availability query.
///
/// Deserializes with defaults for missing fields, so `{}` yields
/// [`SlotConfig::default`]. Call [`SlotConfig::validate`] before use; values
/// read from outside are not checked on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    /// Length of one slot in minutes (Δ). Must divide 60.
    pub slot_minutes: u32,
    /// First business hour (inclusive), local time.
    pub business_start_hour: u32,
    /// Last business hour (exclusive), local time.
    pub business_end_hour: u32,
    /// Zone used to place events on dates and slots, and to render output.
    pub timezone: Tz,
    /// Weekdays that are always closed.
    pub closed_weekdays: Vec<Weekday>,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            slot_minutes: DEFAULT_SLOT_MINUTES,
            business_start_hour: DEFAULT_BUSINESS_START_HOUR,
            business_end_hour: DEFAULT_BUSINESS_END_HOUR,
            timezone: DEFAULT_TIMEZONE,
            closed_weekdays: vec![Weekday::Wed, Weekday::Thu],
        }
    }
}

impl SlotConfig {
    /// Build and validate a configuration in one step.
    pub fn new(
        slot_minutes: u32,
        business_start_hour: u32,
        business_end_hour: u32,
        timezone: Tz,
        closed_weekdays: Vec<Weekday>,
    ) -> Result<Self> {
        let config = Self {
            slot_minutes,
            business_start_hour,
            business_end_hour,
            timezone,
            closed_weekdays,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the slot grid fits one mask and the business range is sane.
    ///
    /// # Errors
    /// Returns `SlotError::Config` if the slot length is zero or does not divide
    /// 60, if a day needs more slots than a mask holds, or if the business
    /// range is empty, inverted, or past 24:00.
    pub fn validate(&self) -> Result<()> {
        if self.slot_minutes == 0 || 60 % self.slot_minutes != 0 {
            return Err(SlotError::Config(format!(
                "slot length {} minutes does not evenly divide an hour",
                self.slot_minutes
            )));
        }
        if MINUTES_PER_DAY / self.slot_minutes > MAX_SLOTS {
            return Err(SlotError::Config(format!(
                "slot length {} minutes needs {} slots per day, masks hold {}",
                self.slot_minutes,
                MINUTES_PER_DAY / self.slot_minutes,
                MAX_SLOTS
            )));
        }
        if self.business_end_hour > 24 {
            return Err(SlotError::Config(format!(
                "business end hour {} is past 24:00",
                self.business_end_hour
            )));
        }
        if self.business_start_hour >= self.business_end_hour {
            return Err(SlotError::Config(format!(
                "business hours {}:00-{}:00 are empty or inverted",
                self.business_start_hour, self.business_end_hour
            )));
        }
        Ok(())
    }

    pub fn slots_per_hour(&self) -> u32 {
        60 / self.slot_minutes
    }

    pub fn slots_per_day(&self) -> u32 {
        MINUTES_PER_DAY / self.slot_minutes
    }

    /// Slot indices `[min_bit, max_bit)` that the decoder reports on.
    pub fn business_bits(&self) -> Range<u32> {
        let per_hour = self.slots_per_hour();
        self.business_start_hour * per_hour..self.business_end_hour * per_hour
    }

    pub fn is_closed_weekday(&self, weekday: Weekday) -> bool {
        self.closed_weekdays.contains(&weekday)
    }
}
