use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_models::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Rejected,
    NoShow,
}

impl AppointmentStatus {
    /// Pending and confirmed appointments hold their slot; every other status frees it.
    pub fn holds_slot(&self) -> bool {
        matches!(self, AppointmentStatus::Pending | AppointmentStatus::Confirmed)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AppointmentStatus::Pending => "PENDING",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::Rejected => "REJECTED",
            AppointmentStatus::NoShow => "NO_SHOW",
        };
        write!(f, "{}", label)
    }
}

/// The slice of a stored appointment the scheduling rules look at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub date: NaiveDate,
    pub time_slot: String,
    pub status: AppointmentStatus,
}

/// Reason a requested slot was refused. The `Display` text is shown to patients verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingRejection {
    #[error("Cannot book appointments in the past")]
    PastDate,

    #[error("Invalid time slot format")]
    InvalidSlotFormat,

    #[error("Time slot duration must be {expected} minutes")]
    DurationMismatch { expected: u32 },

    #[error("Doctor is not available on this day")]
    NotWorkingDay,

    #[error("Doctor schedule not properly configured")]
    ScheduleMisconfigured,

    #[error("Time slot is outside doctor's working hours")]
    OutsideWorkingHours,

    #[error("Time slot overlaps with doctor's break")]
    OverlapsBreak,

    #[error("Time slot is already booked")]
    AlreadyBooked,

    #[error("Appointments can only be booked up to {max_days} days in advance")]
    BeyondBookingWindow { max_days: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    pub fn rejected(reason: &BookingRejection) -> Self {
        Self {
            is_valid: false,
            message: Some(reason.to_string()),
        }
    }
}

impl From<Result<(), BookingRejection>> for ValidationResult {
    fn from(outcome: Result<(), BookingRejection>) -> Self {
        match outcome {
            Ok(()) => Self::valid(),
            Err(reason) => Self::rejected(&reason),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppointmentError {
    #[error("Doctor schedule not configured")]
    ScheduleNotConfigured,

    #[error("{0}")]
    BookingRejected(#[from] BookingRejection),

    #[error("Appointment cannot be cancelled (too close to appointment time)")]
    CannotCancel,

    #[error("Appointment cannot be rescheduled (too close to appointment time)")]
    CannotReschedule,

    #[error("Appointment cannot be modified in current status: {0}")]
    InvalidStatusTransition(AppointmentStatus),

    #[error("Invalid appointment time: {0}")]
    InvalidTime(String),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::BookingRejected(BookingRejection::AlreadyBooked) => {
                AppError::Conflict(err.to_string())
            }
            _ => AppError::BadRequest(err.to_string()),
        }
    }
}
