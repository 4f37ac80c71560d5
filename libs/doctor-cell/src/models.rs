use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_config::DEFAULT_SLOT_DURATION_MINUTES;
use shared_models::AppError;
use shared_utils::TimeSlot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakPeriod {
    pub start: String,
    pub end: String,
}

impl BreakPeriod {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    pub fn as_slot(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

/// One weekday of a doctor's schedule, as stored in the `{isWorkingDay, startTime,
/// endTime, breaks}` JSON shape.
///
/// Values produced by the parser always satisfy: a working day has both times,
/// `startTime < endTime`, and every break has `start < end`. Anything else is
/// normalized to [`DaySchedule::closed`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub is_working_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breaks: Vec<BreakPeriod>,
}

impl DaySchedule {
    pub fn closed() -> Self {
        Self::default()
    }

    pub fn working(start_time: &str, end_time: &str, breaks: Vec<BreakPeriod>) -> Self {
        Self {
            is_working_day: true,
            start_time: Some(start_time.to_string()),
            end_time: Some(end_time.to_string()),
            breaks,
        }
    }

    /// Working window as a slot, when the day is open and both bounds parse.
    pub fn working_window(&self) -> Option<TimeSlot> {
        if !self.is_working_day {
            return None;
        }
        let start = self.start_time.as_deref()?;
        let end = self.end_time.as_deref()?;
        TimeSlot::parse(&format!("{}-{}", start, end))
    }

    pub fn break_slots(&self) -> Vec<String> {
        self.breaks.iter().map(BreakPeriod::as_slot).collect()
    }
}

/// The two stored representations of a day. Older records hold a bare
/// "HH:mm-HH:mm" working window instead of the structured JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayScheduleSource {
    Structured(DaySchedule),
    LegacyRange(TimeSlot),
}

impl DayScheduleSource {
    pub fn into_day_schedule(self) -> DaySchedule {
        match self {
            DayScheduleSource::Structured(day) => day,
            DayScheduleSource::LegacyRange(window) => {
                DaySchedule::working(&window.start_time(), &window.end_time(), Vec::new())
            }
        }
    }
}

fn default_time_slot_duration() -> u32 {
    DEFAULT_SLOT_DURATION_MINUTES
}

/// A doctor's stored weekly schedule record: one raw string per weekday plus a
/// slot duration shared by all days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySchedule {
    #[serde(default)]
    pub sunday: Option<String>,
    #[serde(default)]
    pub monday: Option<String>,
    #[serde(default)]
    pub tuesday: Option<String>,
    #[serde(default)]
    pub wednesday: Option<String>,
    #[serde(default)]
    pub thursday: Option<String>,
    #[serde(default)]
    pub friday: Option<String>,
    #[serde(default)]
    pub saturday: Option<String>,
    #[serde(default = "default_time_slot_duration")]
    pub time_slot_duration: u32,
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self {
            sunday: None,
            monday: None,
            tuesday: None,
            wednesday: None,
            thursday: None,
            friday: None,
            saturday: None,
            time_slot_duration: DEFAULT_SLOT_DURATION_MINUTES,
        }
    }
}

/// Partial schedule write. Days left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleRequest {
    pub sunday: Option<String>,
    pub monday: Option<String>,
    pub tuesday: Option<String>,
    pub wednesday: Option<String>,
    pub thursday: Option<String>,
    pub friday: Option<String>,
    pub saturday: Option<String>,
    pub time_slot_duration: Option<u32>,
}

/// One row of the slot grid shown to patients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlot {
    pub time: String,
    pub end_time: String,
    pub is_available: bool,
    pub is_break: bool,
}

impl AvailableSlot {
    pub fn slot(&self) -> String {
        format!("{}-{}", self.time, self.end_time)
    }
}

/// Why a stored day schedule was read as "not working".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleParseWarning {
    #[error("Schedule is empty")]
    Empty,

    #[error("Failed to parse schedule JSON: {0}")]
    InvalidJson(String),

    #[error("Schedule JSON is not an object")]
    NotAnObject,

    #[error("Invalid {field} format in schedule: {value}")]
    InvalidTimeFormat { field: &'static str, value: String },

    #[error("Missing start or end time for working day")]
    MissingWorkingHours,

    #[error("Start time {start} must be before end time {end}")]
    StartNotBeforeEnd { start: String, end: String },

    #[error("Invalid break at position {index}: {reason}")]
    InvalidBreak { index: usize, reason: String },

    #[error("Breaks must be a list, got {0}")]
    BreaksNotAList(String),

    #[error("Unrecognized schedule format: {0}")]
    UnrecognizedFormat(String),
}

impl ScheduleParseWarning {
    /// An unset day is normal configuration, not something to warn about.
    pub fn is_unset(&self) -> bool {
        matches!(self, ScheduleParseWarning::Empty)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DoctorError {
    #[error("Schedule not found")]
    ScheduleNotFound,

    #[error("Invalid JSON format for {day} schedule")]
    InvalidJson { day: &'static str },

    #[error("Invalid schedule data for {day}: {reason}")]
    InvalidDaySchedule {
        day: &'static str,
        reason: ScheduleParseWarning,
    },

    #[error("Time slot duration must be between {min} and {max} minutes, got {actual}")]
    InvalidSlotDuration { actual: u32, min: u32, max: u32 },
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::ScheduleNotFound => AppError::NotFound(err.to_string()),
            _ => AppError::BadRequest(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_day_serializes_minimally() {
        let json = serde_json::to_string(&DaySchedule::closed()).unwrap();
        assert_eq!(json, r#"{"isWorkingDay":false}"#);
    }

    #[test]
    fn test_working_day_serialization_uses_camel_case() {
        let day = DaySchedule::working("09:00", "17:00", vec![BreakPeriod::new("12:00", "13:00")]);
        let value = serde_json::to_value(&day).unwrap();

        assert_eq!(value["isWorkingDay"], true);
        assert_eq!(value["startTime"], "09:00");
        assert_eq!(value["endTime"], "17:00");
        assert_eq!(value["breaks"][0]["start"], "12:00");
    }

    #[test]
    fn test_working_window() {
        let day = DaySchedule::working("09:00", "17:00", Vec::new());
        assert_eq!(day.working_window(), Some(TimeSlot::new(540, 1020)));

        let misconfigured = DaySchedule {
            is_working_day: true,
            start_time: Some("09:00".to_string()),
            ..DaySchedule::default()
        };
        assert_eq!(misconfigured.working_window(), None);
        assert_eq!(DaySchedule::closed().working_window(), None);
    }

    #[test]
    fn test_legacy_range_becomes_single_window() {
        let day = DayScheduleSource::LegacyRange(TimeSlot::new(480, 960)).into_day_schedule();

        assert_eq!(day, DaySchedule::working("08:00", "16:00", Vec::new()));
    }

    #[test]
    fn test_weekly_schedule_defaults_duration() {
        let weekly: WeeklySchedule = serde_json::from_str(r#"{"monday":"09:00-17:00"}"#).unwrap();

        assert_eq!(weekly.time_slot_duration, 30);
        assert_eq!(weekly.monday.as_deref(), Some("09:00-17:00"));
        assert_eq!(weekly.sunday, None);
    }

    #[test]
    fn test_doctor_error_maps_to_app_error() {
        let err: AppError = DoctorError::InvalidJson { day: "monday" }.into();
        assert_eq!(err, AppError::BadRequest("Invalid JSON format for monday schedule".to_string()));

        let err: AppError = DoctorError::ScheduleNotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
