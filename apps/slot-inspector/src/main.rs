use std::env;
use std::fs;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use dotenv::dotenv;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use appointment_cell::services::BookingService;
use doctor_cell::models::{AvailableSlot, WeeklySchedule};
use doctor_cell::services::availability::generate_available_slots;
use doctor_cell::services::schedule::{weekday_index, weekday_name};
use shared_config::SchedulingConfig;

const USAGE: &str = "usage: slot-inspector <schedule.json> <YYYY-MM-DD> [HH:mm-HH:mm] [booked,slots]";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SlotGrid<'a> {
    date: NaiveDate,
    weekday: &'a str,
    time_slot_duration: u32,
    slots: Vec<AvailableSlot>,
}

struct Args {
    schedule_path: String,
    date: NaiveDate,
    time_slot: Option<String>,
    booked_slots: Vec<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = env::args().skip(1);

    let schedule_path = args.next().context(USAGE)?;
    let raw_date = args.next().context(USAGE)?;
    let date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", raw_date))?;
    let time_slot = args.next();
    let booked_slots = args
        .next()
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    if args.next().is_some() {
        bail!(USAGE);
    }

    Ok(Args {
        schedule_path,
        date,
        time_slot,
        booked_slots,
    })
}

fn load_schedule(path: &str) -> Result<WeeklySchedule> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read schedule file {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid schedule record in {}", path))
}

fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = SchedulingConfig::from_env();
    let args = parse_args()?;
    let schedule = load_schedule(&args.schedule_path)?;
    let service = BookingService::new(config);

    let output = match &args.time_slot {
        Some(time_slot) => {
            info!("Checking {} on {} for {}", time_slot, args.date, args.schedule_path);
            let result = service.validate_booking(
                Some(&schedule),
                args.date,
                time_slot,
                &args.booked_slots,
                Utc::now(),
            );
            serde_json::to_string_pretty(&result)?
        }
        None => {
            let grid = SlotGrid {
                date: args.date,
                weekday: weekday_name(weekday_index(args.date)),
                time_slot_duration: schedule.time_slot_duration,
                slots: generate_available_slots(
                    &schedule.day_schedule_for(args.date),
                    schedule.time_slot_duration,
                    &args.booked_slots,
                ),
            };
            info!("{} slots on {} ({})", grid.slots.len(), grid.date, grid.weekday);
            serde_json::to_string_pretty(&grid)?
        }
    };

    println!("{}", output);
    Ok(())
}
