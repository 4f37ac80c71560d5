use std::collections::HashSet;

use tracing::debug;

use shared_utils::{generate_time_slots, is_time_slot_overlapping, TimeSlot};

use crate::models::{AvailableSlot, DaySchedule};

/// Full slot grid for one day, in chronological order.
///
/// Slots overlapping a break are flagged `is_break` and never available; slots
/// whose exact string appears in `booked_slots` are unavailable.
pub fn generate_available_slots(
    schedule: &DaySchedule,
    duration_minutes: u32,
    booked_slots: &[String],
) -> Vec<AvailableSlot> {
    if !schedule.is_working_day {
        return Vec::new();
    }
    let (Some(start_time), Some(end_time)) =
        (schedule.start_time.as_deref(), schedule.end_time.as_deref())
    else {
        return Vec::new();
    };

    let booked: HashSet<&str> = booked_slots.iter().map(String::as_str).collect();
    let breaks = schedule.break_slots();

    let slots: Vec<AvailableSlot> = generate_time_slots(start_time, end_time, duration_minutes)
        .into_iter()
        .filter_map(|slot| {
            let parsed = TimeSlot::parse(&slot)?;
            let is_break = breaks.iter().any(|b| is_time_slot_overlapping(&slot, b));
            let is_booked = booked.contains(slot.as_str());

            Some(AvailableSlot {
                time: parsed.start_time(),
                end_time: parsed.end_time(),
                is_available: !is_break && !is_booked,
                is_break,
            })
        })
        .collect();

    debug!(
        "Generated {} slots ({} available) between {} and {}",
        slots.len(),
        slots.iter().filter(|s| s.is_available).count(),
        start_time,
        end_time
    );

    slots
}

/// Whether the doctor works during `time_slot`, ignoring existing bookings.
pub fn is_doctor_available(schedule: &DaySchedule, time_slot: &str) -> bool {
    let (Some(window), Some(slot)) = (schedule.working_window(), TimeSlot::parse(time_slot)) else {
        return false;
    };

    if !slot.is_within(window.start, window.end) {
        return false;
    }

    !schedule
        .break_slots()
        .iter()
        .any(|b| is_time_slot_overlapping(time_slot, b))
}

/// Only the bookable slots of the grid.
pub fn open_slots(
    schedule: &DaySchedule,
    duration_minutes: u32,
    booked_slots: &[String],
) -> Vec<AvailableSlot> {
    generate_available_slots(schedule, duration_minutes, booked_slots)
        .into_iter()
        .filter(|slot| slot.is_available)
        .collect()
}
