// libs/doctor-cell/src/services/schedule.rs
//
// Parsing of stored day schedules. Every entry point is fail-closed: a malformed
// day is read as "not working", never as an error the booking flow has to handle.

use chrono::{Datelike, NaiveDate};
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use shared_config::SchedulingConfig;
use shared_utils::{is_valid_time_format, is_valid_time_slot_format, to_minutes, TimeSlot};

use crate::models::{
    BreakPeriod, DaySchedule, DayScheduleSource, DoctorError, ScheduleParseWarning,
    UpdateScheduleRequest, WeeklySchedule,
};

const WEEKDAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// 0 = Sunday .. 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Lowercase weekday name for an index, or "" when out of range.
pub fn weekday_name(day_of_week: u32) -> &'static str {
    WEEKDAY_NAMES
        .get(day_of_week as usize)
        .copied()
        .unwrap_or("")
}

/// Resolve a stored day, trying the structured JSON form first and the legacy
/// bare range second.
pub fn parse_day_schedule(raw: Option<&str>) -> Result<DayScheduleSource, ScheduleParseWarning> {
    let raw = match raw.map(str::trim) {
        None | Some("") | Some("{}") => return Err(ScheduleParseWarning::Empty),
        Some(raw) => raw,
    };

    match serde_json::from_str::<Value>(raw) {
        // A JSON string may itself carry a legacy range, e.g. "\"09:00-17:00\"".
        Ok(Value::String(inner)) => parse_legacy_range(&inner).map(DayScheduleSource::LegacyRange),
        Ok(value) => parse_structured_value(&value).map(DayScheduleSource::Structured),
        Err(json_err) => parse_legacy_range(raw)
            .map(DayScheduleSource::LegacyRange)
            .map_err(|_| ScheduleParseWarning::InvalidJson(json_err.to_string())),
    }
}

/// Structured `{isWorkingDay, startTime, endTime, breaks}` form only.
pub fn parse_structured_day(raw: &str) -> Result<DaySchedule, ScheduleParseWarning> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "{}" {
        return Err(ScheduleParseWarning::Empty);
    }

    let value: Value = serde_json::from_str(raw)
        .map_err(|e| ScheduleParseWarning::InvalidJson(e.to_string()))?;
    parse_structured_value(&value)
}

/// Legacy "HH:mm-HH:mm" form: one working window, no breaks.
pub fn parse_legacy_range(raw: &str) -> Result<TimeSlot, ScheduleParseWarning> {
    let raw = raw.trim();
    if !is_valid_time_slot_format(raw) {
        return Err(ScheduleParseWarning::UnrecognizedFormat(raw.to_string()));
    }

    let window = TimeSlot::parse(raw)
        .ok_or_else(|| ScheduleParseWarning::UnrecognizedFormat(raw.to_string()))?;

    if window.start >= window.end {
        return Err(ScheduleParseWarning::StartNotBeforeEnd {
            start: window.start_time(),
            end: window.end_time(),
        });
    }

    Ok(window)
}

/// Total variant of [`parse_day_schedule`]: logs why a day was closed and
/// returns the closed day instead of an error.
pub fn day_schedule_or_closed(raw: Option<&str>) -> DaySchedule {
    match parse_day_schedule(raw) {
        Ok(source) => source.into_day_schedule(),
        Err(warning) => {
            log_parse_warning(&warning, raw);
            DaySchedule::closed()
        }
    }
}

/// Canonical JSON for a day; reparsing the output yields the same schedule.
pub fn stringify_day_schedule(schedule: &DaySchedule) -> String {
    serde_json::to_string(schedule).unwrap_or_else(|e| {
        error!("Failed to stringify schedule: {}", e);
        r#"{"isWorkingDay":false}"#.to_string()
    })
}

fn log_parse_warning(warning: &ScheduleParseWarning, raw: Option<&str>) {
    match warning {
        _ if warning.is_unset() => debug!("Day schedule not configured"),
        ScheduleParseWarning::InvalidJson(_) => {
            error!(schedule = raw.unwrap_or_default(), "{}", warning)
        }
        _ => warn!(schedule = raw.unwrap_or_default(), "{}", warning),
    }
}

fn parse_structured_value(value: &Value) -> Result<DaySchedule, ScheduleParseWarning> {
    let object = value.as_object().ok_or(ScheduleParseWarning::NotAnObject)?;
    if object.is_empty() {
        return Err(ScheduleParseWarning::Empty);
    }

    if !object.get("isWorkingDay").is_some_and(is_truthy) {
        return Ok(DaySchedule::closed());
    }

    let start_time = time_field(object, "startTime")?;
    let end_time = time_field(object, "endTime")?;

    let (Some(start_time), Some(end_time)) = (start_time, end_time) else {
        return Err(ScheduleParseWarning::MissingWorkingHours);
    };

    if !is_before(&start_time, &end_time) {
        return Err(ScheduleParseWarning::StartNotBeforeEnd {
            start: start_time,
            end: end_time,
        });
    }

    let breaks = parse_breaks(object.get("breaks"))?;

    Ok(DaySchedule {
        is_working_day: true,
        start_time: Some(start_time),
        end_time: Some(end_time),
        breaks,
    })
}

/// `Ok(None)` for an absent or falsy field, an error for anything present but malformed.
fn time_field(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, ScheduleParseWarning> {
    let Some(value) = object.get(field).filter(|v| is_truthy(v)) else {
        return Ok(None);
    };

    match value.as_str() {
        Some(time) if is_valid_time_format(time) => Ok(Some(time.to_string())),
        _ => Err(ScheduleParseWarning::InvalidTimeFormat {
            field,
            value: value.to_string(),
        }),
    }
}

fn parse_breaks(value: Option<&Value>) -> Result<Vec<BreakPeriod>, ScheduleParseWarning> {
    let entries = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(other) => return Err(ScheduleParseWarning::BreaksNotAList(other.to_string())),
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_break(index, entry))
        .collect()
}

fn parse_break(index: usize, entry: &Value) -> Result<BreakPeriod, ScheduleParseWarning> {
    let invalid = |reason: String| ScheduleParseWarning::InvalidBreak { index, reason };

    let object = entry
        .as_object()
        .ok_or_else(|| invalid(format!("expected an object, got {}", entry)))?;

    let start = object.get("start").and_then(Value::as_str).unwrap_or_default();
    let end = object.get("end").and_then(Value::as_str).unwrap_or_default();

    if !is_valid_time_format(start) || !is_valid_time_format(end) {
        return Err(invalid(format!("invalid time format in {}", entry)));
    }

    if !is_before(start, end) {
        return Err(invalid(format!("start {} must be before end {}", start, end)));
    }

    Ok(BreakPeriod::new(start, end))
}

fn is_before(first: &str, second: &str) -> bool {
    match (to_minutes(first), to_minutes(second)) {
        (Some(a), Some(b)) => a < b,
        _ => false,
    }
}

/// Loose truthiness of the stored JSON, matching how the schedule editor writes flags.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl WeeklySchedule {
    pub fn raw_day(&self, day_of_week: u32) -> Option<&str> {
        let raw = match day_of_week {
            0 => &self.sunday,
            1 => &self.monday,
            2 => &self.tuesday,
            3 => &self.wednesday,
            4 => &self.thursday,
            5 => &self.friday,
            6 => &self.saturday,
            _ => return None,
        };
        raw.as_deref()
    }

    pub fn day_schedule(&self, day_of_week: u32) -> DaySchedule {
        day_schedule_or_closed(self.raw_day(day_of_week))
    }

    /// The parsed schedule for the weekday `date` falls on.
    pub fn day_schedule_for(&self, date: NaiveDate) -> DaySchedule {
        let day_of_week = weekday_index(date);
        debug!("Resolving {} schedule for {}", weekday_name(day_of_week), date);
        self.day_schedule(day_of_week)
    }

    /// First write of a doctor's schedule.
    pub fn from_update(
        update: UpdateScheduleRequest,
        config: &SchedulingConfig,
    ) -> Result<Self, DoctorError> {
        let mut schedule = Self {
            time_slot_duration: config.default_slot_duration_minutes,
            ..Self::default()
        };
        schedule.apply_update(update, config)?;
        Ok(schedule)
    }

    /// Validate and merge a partial write. Nothing is changed when any part is invalid.
    pub fn apply_update(
        &mut self,
        update: UpdateScheduleRequest,
        config: &SchedulingConfig,
    ) -> Result<(), DoctorError> {
        if let Some(duration) = update.time_slot_duration {
            if !config.is_slot_duration_allowed(duration) {
                return Err(DoctorError::InvalidSlotDuration {
                    actual: duration,
                    min: config.min_slot_duration_minutes,
                    max: config.max_slot_duration_minutes,
                });
            }
        }

        let days = [
            update.sunday,
            update.monday,
            update.tuesday,
            update.wednesday,
            update.thursday,
            update.friday,
            update.saturday,
        ];

        for (index, raw) in days.iter().enumerate() {
            if let Some(raw) = raw {
                validate_day_update(WEEKDAY_NAMES[index], raw)?;
            }
        }

        let [sunday, monday, tuesday, wednesday, thursday, friday, saturday] = days;
        let slots = [
            (&mut self.sunday, sunday),
            (&mut self.monday, monday),
            (&mut self.tuesday, tuesday),
            (&mut self.wednesday, wednesday),
            (&mut self.thursday, thursday),
            (&mut self.friday, friday),
            (&mut self.saturday, saturday),
        ];
        for (stored, incoming) in slots {
            if incoming.is_some() {
                *stored = incoming;
            }
        }

        if let Some(duration) = update.time_slot_duration {
            self.time_slot_duration = duration;
        }

        debug!("Schedule updated, slot duration {} minutes", self.time_slot_duration);
        Ok(())
    }
}

fn validate_day_update(day: &'static str, raw: &str) -> Result<(), DoctorError> {
    if serde_json::from_str::<Value>(raw).is_err() {
        return Err(DoctorError::InvalidJson { day });
    }

    match parse_structured_day(raw) {
        Ok(_) | Err(ScheduleParseWarning::Empty) => Ok(()),
        Err(reason) => Err(DoctorError::InvalidDaySchedule { day, reason }),
    }
}
