//! `slotmask` CLI: compute jointly free slots from dumped calendar events.
//!
//! ## Usage
//!
//! ```sh
//! # Free slots for every calendar in the request, next 14 days from tomorrow
//! slotmask schedule -i request.json
//!
//! # Fixed window, hourly slots, 09:00-18:00, closed on weekends
//! slotmask schedule -i request.json --start 2026-03-16 --days 7 \
//!     --slot-minutes 60 --open 9 --close 18 --closed-days sat,sun
//!
//! # Dump the per-calendar and merged masks
//! slotmask bits -i request.json
//! ```
//!
//! The request is JSON:
//!
//! ```json
//! {
//!   "config": { "slot_minutes": 30, "timezone": "Asia/Tokyo" },
//!   "window": { "start": "2026-03-16", "end": "2026-03-22" },
//!   "calendars": {
//!     "room-a": { "name": "Room A", "items": [
//!       { "title": "standup",
//!         "start": { "dateTime": "2026-03-16T09:00:00+09:00" },
//!         "end":   { "dateTime": "2026-03-16T10:00:00+09:00" } }
//!     ] }
//!   },
//!   "holidays": ["2026-03-20"]
//! }
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `warn`); logs go to stderr.

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use slotmask::{find_free_time, Availability, QueryWindow, SlotConfig, StaticSource};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Days covered after tomorrow when neither the request nor the flags set a window.
const DEFAULT_DAYS_RANGE: u32 = 14;

#[derive(Parser)]
#[command(
    name = "slotmask",
    version,
    about = "Find time slots that are free across several calendars"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print free slots per date as JSON
    Schedule {
        #[command(flatten)]
        query: QueryArgs,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print per-calendar and merged occupancy masks
    Bits {
        #[command(flatten)]
        query: QueryArgs,
    },
}

#[derive(Args)]
struct QueryArgs {
    /// Request file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// First date of the window (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Days after the first date to include
    #[arg(long)]
    days: Option<u32>,
    /// Slot length in minutes
    #[arg(long)]
    slot_minutes: Option<u32>,
    /// First business hour
    #[arg(long)]
    open: Option<u32>,
    /// Business hours end (exclusive)
    #[arg(long)]
    close: Option<u32>,
    /// IANA timezone, e.g. Asia/Tokyo
    #[arg(long)]
    timezone: Option<String>,
    /// Comma-separated closed weekdays, e.g. "wed,thu" (empty string for none)
    #[arg(long)]
    closed_days: Option<String>,
}

/// Everything one query needs, as read from the request file.
#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    config: SlotConfig,
    #[serde(default)]
    window: Option<WindowSpec>,
    /// Calendars to merge; defaults to every calendar in the request.
    #[serde(default)]
    calendar_ids: Option<Vec<String>>,
    #[serde(flatten)]
    source: StaticSource,
}

#[derive(Debug, Deserialize)]
struct WindowSpec {
    start: NaiveDate,
    end: NaiveDate,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Schedule { query, output } => {
            let (request, config, window) = load_query(&query)?;
            let ids = calendar_ids(&request);
            info!(calendars = ids.len(), days = window.len(), "computing free time");

            let report = find_free_time(&request.source, &request.source, ids.as_slice(), window, &config)
                .context("Failed to compute free time")?;
            let json = serde_json::to_string_pretty(&report.schedules)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Bits { query } => {
            let (request, config, window) = load_query(&query)?;
            let ids = calendar_ids(&request);
            let slots = config.slots_per_day();

            let mut availability =
                Availability::new(config, window).context("Invalid configuration")?;
            for id in &ids {
                let calendar = request
                    .source
                    .calendars
                    .get(id)
                    .with_context(|| format!("Unknown calendar: {}", id))?;
                availability.add_records(id, &calendar.name, &calendar.items);
            }
            let aggregate = availability.aggregate();

            for (date, calendars) in availability.calendar_bits().iter() {
                println!("{}", date.format("%Y/%m/%d"));
                for (id, mask) in calendars {
                    println!("  {} {}", mask.render(slots), id);
                }
                let merged = aggregate.get(*date).unwrap_or_default();
                println!("  {} (merged)", merged.render(slots));
            }
        }
    }

    Ok(())
}

/// Read the request and apply flag overrides to its config and window.
fn load_query(args: &QueryArgs) -> Result<(Request, SlotConfig, QueryWindow)> {
    let raw = read_input(args.input.as_deref())?;
    let request: Request = serde_json::from_str(&raw).context("Failed to parse request JSON")?;

    let mut config = request.config.clone();
    if let Some(minutes) = args.slot_minutes {
        config.slot_minutes = minutes;
    }
    if let Some(open) = args.open {
        config.business_start_hour = open;
    }
    if let Some(close) = args.close {
        config.business_end_hour = close;
    }
    if let Some(name) = args.timezone.as_deref() {
        config.timezone = name
            .parse::<Tz>()
            .map_err(|_| anyhow::anyhow!("Unknown timezone: '{}'", name))?;
    }
    if let Some(days) = args.closed_days.as_deref() {
        config.closed_weekdays = parse_weekdays(days)?;
    }
    config.validate().context("Invalid configuration")?;

    let window = resolve_window(args, request.window.as_ref(), config.timezone)?;
    Ok((request, config, window))
}

fn resolve_window(args: &QueryArgs, spec: Option<&WindowSpec>, tz: Tz) -> Result<QueryWindow> {
    let window = match (args.start, spec) {
        (Some(start), _) => {
            let days = args.days.unwrap_or(DEFAULT_DAYS_RANGE);
            let end = start
                .checked_add_days(Days::new(u64::from(days)))
                .context("Window end is out of range")?;
            QueryWindow::new(start, end)?
        }
        (None, Some(spec)) => QueryWindow::new(spec.start, spec.end)?,
        (None, None) => {
            let today = Utc::now().with_timezone(&tz).date_naive();
            QueryWindow::upcoming(today, args.days.unwrap_or(DEFAULT_DAYS_RANGE))?
        }
    };
    Ok(window)
}

fn calendar_ids(request: &Request) -> Vec<String> {
    match &request.calendar_ids {
        Some(ids) => ids.clone(),
        None => {
            let mut ids: Vec<String> = request.source.calendars.keys().cloned().collect();
            ids.sort();
            ids
        }
    }
}

/// Parse `wed,thu` style lists. An empty string means no closed weekdays.
fn parse_weekdays(raw: &str) -> Result<Vec<Weekday>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<Weekday>()
                .map_err(|_| anyhow::anyhow!("Unknown weekday: '{}'", part))
        })
        .collect()
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
