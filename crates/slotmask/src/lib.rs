//! # slotmask
//!
//! Which fixed-size time slots over the next few days are free, given several
//! independent calendars?
//!
//! Every event becomes a per-day occupancy bitmask ([`DayMask`]). Masks of one
//! calendar are ORed together. Masks of different calendars are intersected,
//! so a slot counts as free when at least one calendar is free there.
//! Closed weekdays and holidays come out with no slots. The remaining
//! business-hour slots are decoded into displayable [`FreeTimeSchedule`]s.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use slotmask::{find_free_time, CalendarEvents, QueryWindow, RawEventRecord, SlotConfig, StaticSource};
//!
//! let source = StaticSource::new().with_calendar(
//!     "room-a",
//!     CalendarEvents {
//!         name: "Room A".to_string(),
//!         items: vec![RawEventRecord::timed(
//!             "standup",
//!             "2026-03-16T09:00:00+09:00",
//!             "2026-03-16T10:00:00+09:00",
//!         )],
//!     },
//! );
//! let day = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
//! let window = QueryWindow::new(day, day).unwrap();
//!
//! let report = find_free_time(&source, &source, &["room-a"], window, &SlotConfig::default()).unwrap();
//! let times: Vec<&str> = report.schedules[0].times.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(&times[..4], ["08:00", "08:30", "10:00", "10:30"]);
//! ```
//!
//! ## Modules
//!
//! - [`mask`]: `DayMask`, the typed per-day bitmask
//! - [`event`]: raw records → normalized `Event`
//! - [`encoder`]: `Event` → per-date masks
//! - [`calendar_bits`]: per-calendar OR aggregation and date-range completion
//! - [`merger`]: cross-calendar merge (seed, then AND)
//! - [`closure`]: closed weekdays and holidays
//! - [`decoder`]: aggregate mask → `FreeTimeSchedule`
//! - [`availability`]: the per-window context and `find_free_time`
//! - [`source`]: event and holiday source traits
//! - [`config`], [`window`], [`error`]

pub mod availability;
pub mod calendar_bits;
pub mod closure;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod event;
pub mod mask;
pub mod merger;
pub mod source;
pub mod window;

pub use availability::{find_free_time, Availability, FreeTimeReport, SkippedEvent};
pub use calendar_bits::CalendarBits;
pub use closure::{ClosureFilter, HolidaySet};
pub use config::SlotConfig;
pub use decoder::{FreeTime, FreeTimeDate, FreeTimeSchedule};
pub use encoder::encode_event;
pub use error::SlotError;
pub use event::{Event, RawEventRecord, RawEventTime};
pub use mask::DayMask;
pub use merger::{merge, AggregateBits};
pub use source::{CalendarEvents, EventSource, HolidaySource, StaticSource};
pub use window::QueryWindow;
