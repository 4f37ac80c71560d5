use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use doctor_cell::models::{AvailableSlot, WeeklySchedule};
use doctor_cell::services::availability::generate_available_slots;
use shared_config::SchedulingConfig;

use crate::models::{Appointment, AppointmentError, ValidationResult};
use crate::services::conflict::booked_slots;
use crate::services::lifecycle::{appointment_start, can_cancel_or_reschedule};
use crate::services::validator::{check_appointment_time, check_booking_window};

/// Booking decisions over a doctor's stored weekly schedule.
///
/// Callers fetch the schedule and the doctor's appointments immediately before
/// calling in; nothing here reads or writes storage.
pub struct BookingService {
    config: SchedulingConfig,
}

impl BookingService {
    pub fn new(config: SchedulingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulingConfig {
        &self.config
    }

    /// Decide whether `time_slot` on `date` can be booked.
    pub fn check_booking(
        &self,
        schedule: Option<&WeeklySchedule>,
        date: NaiveDate,
        time_slot: &str,
        booked_slots: &[String],
        now: DateTime<Utc>,
    ) -> Result<(), AppointmentError> {
        let schedule = schedule.ok_or(AppointmentError::ScheduleNotConfigured)?;
        let today = now.date_naive();
        let day_schedule = schedule.day_schedule_for(date);

        check_appointment_time(
            Some(&day_schedule),
            date,
            today,
            time_slot,
            booked_slots,
            Some(schedule.time_slot_duration),
        )?;
        check_booking_window(date, today, self.config.max_booking_days_ahead)?;

        debug!("Slot {} on {} is bookable", time_slot, date);
        Ok(())
    }

    /// [`BookingService::check_booking`] as the `{isValid, message}` shape
    /// returned to patients.
    pub fn validate_booking(
        &self,
        schedule: Option<&WeeklySchedule>,
        date: NaiveDate,
        time_slot: &str,
        booked_slots: &[String],
        now: DateTime<Utc>,
    ) -> ValidationResult {
        match self.check_booking(schedule, date, time_slot, booked_slots, now) {
            Ok(()) => ValidationResult::valid(),
            Err(AppointmentError::BookingRejected(reason)) => ValidationResult::rejected(&reason),
            Err(other) => ValidationResult {
                is_valid: false,
                message: Some(other.to_string()),
            },
        }
    }

    /// Move `appointment` to `new_date`/`new_slot`. The appointment's own slot
    /// never counts as a conflict.
    pub fn check_reschedule(
        &self,
        schedule: Option<&WeeklySchedule>,
        appointment: &Appointment,
        new_date: NaiveDate,
        new_slot: &str,
        doctor_appointments: &[Appointment],
        now: DateTime<Utc>,
    ) -> Result<(), AppointmentError> {
        if !appointment.status.holds_slot() {
            return Err(AppointmentError::InvalidStatusTransition(appointment.status));
        }

        let starts_at = appointment_start(appointment.date, &appointment.time_slot)?;
        if !can_cancel_or_reschedule(starts_at, self.config.cancellation_notice_hours, now) {
            return Err(AppointmentError::CannotReschedule);
        }

        let taken = booked_slots(
            doctor_appointments,
            appointment.doctor_id,
            new_date,
            Some(appointment.id),
        );
        self.check_booking(schedule, new_date, new_slot, &taken, now)?;

        info!(
            "Appointment {} can move from {} {} to {} {}",
            appointment.id, appointment.date, appointment.time_slot, new_date, new_slot
        );
        Ok(())
    }

    pub fn check_cancellation(
        &self,
        appointment: &Appointment,
        now: DateTime<Utc>,
    ) -> Result<(), AppointmentError> {
        if !appointment.status.holds_slot() {
            return Err(AppointmentError::InvalidStatusTransition(appointment.status));
        }

        let starts_at = appointment_start(appointment.date, &appointment.time_slot)?;
        if !can_cancel_or_reschedule(starts_at, self.config.cancellation_notice_hours, now) {
            return Err(AppointmentError::CannotCancel);
        }

        Ok(())
    }

    /// Slot grid for a doctor on `date`, with their current bookings marked.
    pub fn available_slots_for_date(
        &self,
        schedule: &WeeklySchedule,
        doctor_id: Uuid,
        date: NaiveDate,
        appointments: &[Appointment],
    ) -> Vec<AvailableSlot> {
        let day_schedule = schedule.day_schedule_for(date);
        let taken = booked_slots(appointments, doctor_id, date, None);

        generate_available_slots(&day_schedule, schedule.time_slot_duration, &taken)
    }
}

impl Default for BookingService {
    fn default() -> Self {
        Self::new(SchedulingConfig::default())
    }
}
