use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{json, Map, Value};

/// 09:00-17:00 with a 12:00-13:00 lunch break.
pub const STANDARD_DAY: &str = r#"{"isWorkingDay":true,"startTime":"09:00","endTime":"17:00","breaks":[{"start":"12:00","end":"13:00"}]}"#;

pub const CLOSED_DAY: &str = r#"{"isWorkingDay":false}"#;

/// Builder for the raw JSON a doctor stores for one weekday.
#[derive(Debug, Clone, Default)]
pub struct DayScheduleFixture {
    pub is_working_day: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub breaks: Vec<(String, String)>,
}

impl DayScheduleFixture {
    pub fn working(start_time: &str, end_time: &str) -> Self {
        Self {
            is_working_day: true,
            start_time: Some(start_time.to_string()),
            end_time: Some(end_time.to_string()),
            breaks: Vec::new(),
        }
    }

    pub fn closed() -> Self {
        Self::default()
    }

    pub fn with_break(mut self, start: &str, end: &str) -> Self {
        self.breaks.push((start.to_string(), end.to_string()));
        self
    }

    pub fn to_value(&self) -> Value {
        let mut day = Map::new();
        day.insert("isWorkingDay".to_string(), json!(self.is_working_day));
        if let Some(start) = &self.start_time {
            day.insert("startTime".to_string(), json!(start));
        }
        if let Some(end) = &self.end_time {
            day.insert("endTime".to_string(), json!(end));
        }
        if !self.breaks.is_empty() {
            let breaks: Vec<Value> = self
                .breaks
                .iter()
                .map(|(start, end)| json!({ "start": start, "end": end }))
                .collect();
            day.insert("breaks".to_string(), Value::Array(breaks));
        }
        Value::Object(day)
    }

    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

/// Builder for a doctor's stored weekly schedule record.
#[derive(Debug, Clone, Default)]
pub struct WeeklyScheduleFixture {
    days: Map<String, Value>,
    time_slot_duration: Option<u32>,
}

impl WeeklyScheduleFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Monday to Friday on [`STANDARD_DAY`], weekend unset.
    pub fn standard_week() -> Self {
        ["monday", "tuesday", "wednesday", "thursday", "friday"]
            .into_iter()
            .fold(Self::new(), |week, day| week.day(day, STANDARD_DAY))
    }

    pub fn day(mut self, name: &str, raw: &str) -> Self {
        self.days.insert(name.to_string(), json!(raw));
        self
    }

    pub fn duration(mut self, minutes: u32) -> Self {
        self.time_slot_duration = Some(minutes);
        self
    }

    pub fn to_value(&self) -> Value {
        let mut record = self.days.clone();
        if let Some(duration) = self.time_slot_duration {
            record.insert("timeSlotDuration".to_string(), json!(duration));
        }
        Value::Object(record)
    }

    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

/// Fixed calendar used across tests so nothing depends on the wall clock.
pub struct TestDates;

impl TestDates {
    /// Monday 2025-06-16.
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 16).expect("valid fixture date")
    }

    pub fn days_from_today(days: i64) -> NaiveDate {
        Self::today() + Duration::days(days)
    }

    pub fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
        date.and_time(NaiveTime::from_hms_opt(hour, minute, 0).expect("valid fixture time"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};

    #[test]
    fn test_day_fixture_matches_standard_day() {
        let built = DayScheduleFixture::working("09:00", "17:00")
            .with_break("12:00", "13:00")
            .to_value();
        let constant: Value = serde_json::from_str(STANDARD_DAY).unwrap();

        assert_eq!(built, constant);
    }

    #[test]
    fn test_closed_fixture() {
        let constant: Value = serde_json::from_str(CLOSED_DAY).unwrap();
        assert_eq!(DayScheduleFixture::closed().to_value(), constant);
    }

    #[test]
    fn test_weekly_fixture_shape() {
        let record = WeeklyScheduleFixture::standard_week().duration(20).to_value();

        assert_eq!(record["timeSlotDuration"], 20);
        assert_eq!(record["monday"], STANDARD_DAY);
        assert!(record.get("sunday").is_none());
    }

    #[test]
    fn test_fixed_today_is_monday() {
        assert_eq!(TestDates::today().weekday(), Weekday::Mon);
        assert_eq!(TestDates::days_from_today(6).weekday(), Weekday::Sun);
    }
}
