use chrono::{DateTime, Duration, NaiveDate, Utc};

use shared_utils::TimeSlot;

use crate::models::AppointmentError;

/// True while `now` is still more than `hours_before` hours ahead of the appointment.
/// A notice period reaching before the first representable instant can never be met.
pub fn can_cancel_or_reschedule(
    appointment_at: DateTime<Utc>,
    hours_before: i64,
    now: DateTime<Utc>,
) -> bool {
    Duration::try_hours(hours_before)
        .and_then(|notice| appointment_at.checked_sub_signed(notice))
        .is_some_and(|cutoff| now < cutoff)
}

pub fn can_cancel_or_reschedule_now(appointment_at: DateTime<Utc>, hours_before: i64) -> bool {
    can_cancel_or_reschedule(appointment_at, hours_before, Utc::now())
}

/// UTC start instant of a booked slot on `date`.
pub fn appointment_start(date: NaiveDate, time_slot: &str) -> Result<DateTime<Utc>, AppointmentError> {
    let invalid = || AppointmentError::InvalidTime(format!("{} {}", date, time_slot));

    let slot = TimeSlot::parse_strict(time_slot).ok_or_else(invalid)?;
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?.and_utc();

    midnight
        .checked_add_signed(Duration::minutes(i64::from(slot.start)))
        .ok_or_else(invalid)
}
