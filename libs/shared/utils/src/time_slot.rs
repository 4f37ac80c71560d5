// libs/shared/utils/src/time_slot.rs
//
// "HH:mm" and "HH:mm-HH:mm" arithmetic shared by the doctor and appointment cells.
// Times are compared as minutes since midnight, never as strings.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

static TIME_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("time pattern compiles")
});

static TIME_SLOT_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]-([01][0-9]|2[0-3]):[0-5][0-9]$")
        .expect("time slot pattern compiles")
});

/// A half-open `[start, end)` interval within a day, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: u32,
    pub end: u32,
}

impl TimeSlot {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Lenient parse of "H:mm-H:mm"; only the numeric shape is checked.
    pub fn parse(slot: &str) -> Option<Self> {
        let (start, end) = slot.split_once('-')?;
        Some(Self::new(to_minutes(start)?, to_minutes(end)?))
    }

    /// Parse that first requires the strict "HH:mm-HH:mm" format.
    pub fn parse_strict(slot: &str) -> Option<Self> {
        if !is_valid_time_slot_format(slot) {
            return None;
        }
        Self::parse(slot)
    }

    pub fn duration_minutes(&self) -> i64 {
        i64::from(self.end) - i64::from(self.start)
    }

    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when the slot runs forward and lies entirely inside `[start, end]`.
    pub fn is_within(&self, start: u32, end: u32) -> bool {
        self.start < self.end && self.start >= start && self.end <= end
    }

    pub fn start_time(&self) -> String {
        format_minutes(self.start)
    }

    pub fn end_time(&self) -> String {
        format_minutes(self.end)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_minutes(self.start), format_minutes(self.end))
    }
}

/// Strict "HH:mm" check: HH in 00-23, mm in 00-59, zero padded.
pub fn is_valid_time_format(time: &str) -> bool {
    TIME_FORMAT.is_match(time)
}

/// Strict "HH:mm-HH:mm" check. Does not require start < end.
pub fn is_valid_time_slot_format(slot: &str) -> bool {
    TIME_SLOT_FORMAT.is_match(slot)
}

/// Minutes since midnight. Only the "H:mm" shape is checked, not the ranges.
pub fn to_minutes(time: &str) -> Option<u32> {
    let (hours, minutes) = time.trim().split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    hours.checked_mul(60)?.checked_add(minutes)
}

pub fn format_minutes(total_minutes: u32) -> String {
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// "HH:mm" plus a duration. Rolls past midnight without wrapping ("23:30" + 60 = "24:30").
pub fn calculate_end_time(start_time: &str, duration_minutes: u32) -> Option<String> {
    let start = to_minutes(start_time)?;
    Some(format_minutes(start.checked_add(duration_minutes)?))
}

/// Consecutive slots of `duration_minutes` from `start_time` up to `end_time`.
///
/// A trailing slot that would end after `end_time` is dropped rather than
/// clipped, so the result holds `(end - start) / duration` slots.
pub fn generate_time_slots(start_time: &str, end_time: &str, duration_minutes: u32) -> Vec<String> {
    if duration_minutes == 0 {
        warn!("Refusing to generate time slots with a zero duration");
        return Vec::new();
    }

    let (Some(start), Some(end)) = (to_minutes(start_time), to_minutes(end_time)) else {
        warn!(start_time, end_time, "Cannot generate time slots from malformed bounds");
        return Vec::new();
    };

    let mut slots = Vec::new();
    let mut current = start;

    while current < end {
        let slot_end = match current.checked_add(duration_minutes) {
            Some(slot_end) if slot_end <= end => slot_end,
            _ => break,
        };
        slots.push(TimeSlot::new(current, slot_end).to_string());
        current = slot_end;
    }

    slots
}

/// Half-open overlap test. Malformed slots never overlap anything.
pub fn is_time_slot_overlapping(first: &str, second: &str) -> bool {
    match (TimeSlot::parse(first), TimeSlot::parse(second)) {
        (Some(a), Some(b)) => a.overlaps(&b),
        _ => false,
    }
}

/// The slot must span exactly `duration_minutes`, no tolerance.
pub fn is_valid_time_slot_duration(slot: &str, duration_minutes: u32) -> bool {
    TimeSlot::parse(slot)
        .map(|s| s.duration_minutes() == i64::from(duration_minutes))
        .unwrap_or(false)
}
