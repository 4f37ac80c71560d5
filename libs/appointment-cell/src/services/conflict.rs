use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::models::Appointment;

/// Slot strings already taken for a doctor on a date.
///
/// Only appointments that hold their slot count. `exclude_appointment_id`
/// drops the appointment being rescheduled so it does not conflict with itself.
pub fn booked_slots(
    appointments: &[Appointment],
    doctor_id: Uuid,
    date: NaiveDate,
    exclude_appointment_id: Option<Uuid>,
) -> Vec<String> {
    let slots: Vec<String> = appointments
        .iter()
        .filter(|apt| apt.doctor_id == doctor_id && apt.date == date)
        .filter(|apt| apt.status.holds_slot())
        .filter(|apt| Some(apt.id) != exclude_appointment_id)
        .map(|apt| apt.time_slot.clone())
        .collect();

    debug!("Doctor {} has {} booked slots on {}", doctor_id, slots.len(), date);
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentStatus;

    fn appointment(doctor_id: Uuid, date: NaiveDate, slot: &str, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            doctor_id,
            patient_id: Uuid::new_v4(),
            date,
            time_slot: slot.to_string(),
            status,
        }
    }

    #[test]
    fn test_only_active_appointments_for_doctor_and_date() {
        let doctor = Uuid::new_v4();
        let other_doctor = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        let next_day = NaiveDate::from_ymd_opt(2025, 6, 21).unwrap();

        let appointments = vec![
            appointment(doctor, date, "09:00-09:30", AppointmentStatus::Pending),
            appointment(doctor, date, "09:30-10:00", AppointmentStatus::Confirmed),
            appointment(doctor, date, "10:00-10:30", AppointmentStatus::Cancelled),
            appointment(doctor, date, "10:30-11:00", AppointmentStatus::Rejected),
            appointment(doctor, next_day, "11:00-11:30", AppointmentStatus::Pending),
            appointment(other_doctor, date, "11:30-12:00", AppointmentStatus::Pending),
        ];

        assert_eq!(
            booked_slots(&appointments, doctor, date, None),
            vec!["09:00-09:30", "09:30-10:00"]
        );
    }

    #[test]
    fn test_excludes_rescheduled_appointment_only() {
        let doctor = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        let mine = appointment(doctor, date, "09:00-09:30", AppointmentStatus::Confirmed);
        let appointments = vec![mine.clone(), appointment(doctor, date, "09:30-10:00", AppointmentStatus::Pending)];

        assert_eq!(
            booked_slots(&appointments, doctor, date, Some(mine.id)),
            vec!["09:30-10:00"]
        );
    }
}
