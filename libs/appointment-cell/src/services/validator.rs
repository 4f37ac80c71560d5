// libs/appointment-cell/src/services/validator.rs
//
// The accept/reject decision for a requested slot. Pure: bookings are fetched
// by the caller, and the insert that claims the slot is made atomic by the
// storage layer's uniqueness constraint, not here.

use chrono::{Duration, NaiveDate, Utc};
use tracing::{debug, warn};

use doctor_cell::models::DaySchedule;
use shared_utils::{
    is_time_slot_overlapping, is_valid_time_slot_duration, is_valid_time_slot_format, to_minutes,
    TimeSlot,
};

use crate::models::{BookingRejection, ValidationResult};

/// Validate a booking against today's UTC date.
pub fn validate_appointment_time(
    day_schedule: Option<&DaySchedule>,
    date: NaiveDate,
    time_slot: &str,
    booked_slots: &[String],
    duration_minutes: Option<u32>,
) -> ValidationResult {
    let today = Utc::now().date_naive();
    check_appointment_time(day_schedule, date, today, time_slot, booked_slots, duration_minutes).into()
}

/// Checks run in a fixed order and the first failure wins:
/// past date, slot format, slot duration, working day, working hours, breaks,
/// existing bookings.
///
/// A `duration_minutes` of `None` or `Some(0)` skips the duration check. With
/// no `day_schedule` only the schedule-independent checks apply.
pub fn check_appointment_time(
    day_schedule: Option<&DaySchedule>,
    date: NaiveDate,
    today: NaiveDate,
    time_slot: &str,
    booked_slots: &[String],
    duration_minutes: Option<u32>,
) -> Result<(), BookingRejection> {
    let outcome = run_checks(day_schedule, date, today, time_slot, booked_slots, duration_minutes);

    if let Err(reason) = &outcome {
        debug!(%date, time_slot, "Booking rejected: {}", reason);
    }

    outcome
}

fn run_checks(
    day_schedule: Option<&DaySchedule>,
    date: NaiveDate,
    today: NaiveDate,
    time_slot: &str,
    booked_slots: &[String],
    duration_minutes: Option<u32>,
) -> Result<(), BookingRejection> {
    if date < today {
        return Err(BookingRejection::PastDate);
    }

    if !is_valid_time_slot_format(time_slot) {
        return Err(BookingRejection::InvalidSlotFormat);
    }

    if let Some(expected) = duration_minutes.filter(|d| *d > 0) {
        if !is_valid_time_slot_duration(time_slot, expected) {
            return Err(BookingRejection::DurationMismatch { expected });
        }
    }

    if let Some(schedule) = day_schedule {
        check_against_schedule(schedule, time_slot)?;
    }

    if booked_slots.iter().any(|booked| booked == time_slot) {
        return Err(BookingRejection::AlreadyBooked);
    }

    Ok(())
}

fn check_against_schedule(schedule: &DaySchedule, time_slot: &str) -> Result<(), BookingRejection> {
    if !schedule.is_working_day {
        return Err(BookingRejection::NotWorkingDay);
    }

    let working_start = schedule.start_time.as_deref().and_then(to_minutes);
    let working_end = schedule.end_time.as_deref().and_then(to_minutes);
    let (Some(working_start), Some(working_end)) = (working_start, working_end) else {
        return Err(BookingRejection::ScheduleMisconfigured);
    };

    // format was checked by the caller
    let slot = TimeSlot::parse(time_slot).ok_or(BookingRejection::InvalidSlotFormat)?;
    if !slot.is_within(working_start, working_end) {
        return Err(BookingRejection::OutsideWorkingHours);
    }

    if schedule
        .break_slots()
        .iter()
        .any(|b| is_time_slot_overlapping(time_slot, b))
    {
        return Err(BookingRejection::OverlapsBreak);
    }

    Ok(())
}

/// Furthest-ahead date rule, applied once the slot itself has been accepted.
///
/// A window reaching past the last representable date bounds nothing.
pub fn check_booking_window(
    date: NaiveDate,
    today: NaiveDate,
    max_days_ahead: i64,
) -> Result<(), BookingRejection> {
    let last_bookable = Duration::try_days(max_days_ahead).and_then(|d| today.checked_add_signed(d));

    match last_bookable {
        Some(last) if date > last => Err(BookingRejection::BeyondBookingWindow {
            max_days: max_days_ahead,
        }),
        Some(_) => Ok(()),
        None if max_days_ahead < 0 => Err(BookingRejection::BeyondBookingWindow {
            max_days: max_days_ahead,
        }),
        None => {
            warn!("Booking window of {} days overflows the calendar", max_days_ahead);
            Ok(())
        }
    }
}
