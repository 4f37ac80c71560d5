// libs/doctor-cell/tests/schedule_parser_test.rs

use assert_matches::assert_matches;

use doctor_cell::models::{BreakPeriod, DaySchedule, DayScheduleSource, ScheduleParseWarning};
use doctor_cell::services::schedule::{
    day_schedule_or_closed, parse_day_schedule, parse_legacy_range, parse_structured_day,
    stringify_day_schedule,
};
use shared_utils::test_utils::{DayScheduleFixture, STANDARD_DAY};

// ==============================================================================
// EMPTY AND NON-OBJECT INPUT
// ==============================================================================

#[test]
fn test_unset_inputs_are_closed() {
    for raw in [None, Some(""), Some("   "), Some("{}"), Some(" {} ")] {
        assert_eq!(day_schedule_or_closed(raw), DaySchedule::closed(), "input {:?}", raw);
        assert_matches!(parse_day_schedule(raw), Err(ScheduleParseWarning::Empty));
    }
}

#[test]
fn test_json_null_is_closed() {
    assert_eq!(day_schedule_or_closed(Some("null")), DaySchedule::closed());
    assert_matches!(parse_day_schedule(Some("null")), Err(ScheduleParseWarning::NotAnObject));
}

#[test]
fn test_non_object_json_is_closed() {
    for raw in ["[1,2]", "42", "true"] {
        assert_matches!(parse_day_schedule(Some(raw)), Err(ScheduleParseWarning::NotAnObject));
        assert_eq!(day_schedule_or_closed(Some(raw)), DaySchedule::closed());
    }
}

#[test]
fn test_garbage_is_closed() {
    assert_matches!(
        parse_day_schedule(Some("{isWorkingDay: true")),
        Err(ScheduleParseWarning::InvalidJson(_))
    );
    assert_eq!(day_schedule_or_closed(Some("open all day")), DaySchedule::closed());
}

// ==============================================================================
// STRUCTURED FORM
// ==============================================================================

#[test]
fn test_standard_day_parses() {
    let day = parse_structured_day(STANDARD_DAY).unwrap();

    assert_eq!(
        day,
        DaySchedule::working("09:00", "17:00", vec![BreakPeriod::new("12:00", "13:00")])
    );
    assert_matches!(parse_day_schedule(Some(STANDARD_DAY)), Ok(DayScheduleSource::Structured(_)));
}

#[test]
fn test_not_working_ignores_times_and_breaks() {
    let raw = r#"{"isWorkingDay":false,"startTime":"25:99","breaks":"nonsense"}"#;

    assert_eq!(parse_structured_day(raw), Ok(DaySchedule::closed()));
}

#[test]
fn test_missing_working_flag_is_closed() {
    let raw = r#"{"startTime":"09:00","endTime":"17:00"}"#;

    assert_eq!(parse_structured_day(raw), Ok(DaySchedule::closed()));
}

#[test]
fn test_start_after_end_is_closed() {
    let raw = r#"{"isWorkingDay": true, "startTime": "17:00", "endTime": "09:00"}"#;

    assert_matches!(
        parse_structured_day(raw),
        Err(ScheduleParseWarning::StartNotBeforeEnd { .. })
    );
    assert_eq!(day_schedule_or_closed(Some(raw)), DaySchedule::closed());
}

#[test]
fn test_equal_start_and_end_is_closed() {
    let raw = DayScheduleFixture::working("09:00", "09:00").to_json();

    assert_eq!(day_schedule_or_closed(Some(&raw)), DaySchedule::closed());
}

#[test]
fn test_missing_end_time_is_closed() {
    let raw = r#"{"isWorkingDay":true,"startTime":"09:00"}"#;

    assert_matches!(parse_structured_day(raw), Err(ScheduleParseWarning::MissingWorkingHours));
}

#[test]
fn test_malformed_times_are_closed() {
    for (start, end) in [("9:00", "17:00"), ("09:00", "24:00"), ("09:60", "17:00"), ("09.00", "17:00")] {
        let raw = DayScheduleFixture::working(start, end).to_json();
        assert_matches!(
            parse_structured_day(&raw),
            Err(ScheduleParseWarning::InvalidTimeFormat { .. }),
            "{}-{}",
            start,
            end
        );
    }
}

#[test]
fn test_one_bad_break_invalidates_whole_day() {
    let reversed = DayScheduleFixture::working("09:00", "17:00")
        .with_break("10:00", "10:15")
        .with_break("13:00", "12:00")
        .to_json();
    let malformed = DayScheduleFixture::working("09:00", "17:00")
        .with_break("12:00", "1pm")
        .to_json();
    let not_object = r#"{"isWorkingDay":true,"startTime":"09:00","endTime":"17:00","breaks":["12:00-13:00"]}"#;

    assert_matches!(
        parse_structured_day(&reversed),
        Err(ScheduleParseWarning::InvalidBreak { index: 1, .. })
    );
    assert_matches!(
        parse_structured_day(&malformed),
        Err(ScheduleParseWarning::InvalidBreak { index: 0, .. })
    );
    assert_eq!(day_schedule_or_closed(Some(not_object)), DaySchedule::closed());
}

#[test]
fn test_breaks_object_instead_of_list_closes_day() {
    let raw = r#"{"isWorkingDay":true,"startTime":"09:00","endTime":"17:00","breaks":{"start":"12:00","end":"13:00"}}"#;

    assert_matches!(parse_structured_day(raw), Err(ScheduleParseWarning::BreaksNotAList(_)));
    assert_eq!(day_schedule_or_closed(Some(raw)), DaySchedule::closed());
}

#[test]
fn test_unknown_fields_are_dropped() {
    let raw = r#"{"isWorkingDay":true,"startTime":"08:00","endTime":"12:00","room":"B12"}"#;

    assert_eq!(
        parse_structured_day(raw),
        Ok(DaySchedule::working("08:00", "12:00", Vec::new()))
    );
}

// ==============================================================================
// LEGACY RANGE FORM
// ==============================================================================

#[test]
fn test_legacy_range_is_single_window() {
    let day = day_schedule_or_closed(Some("08:30-16:00"));

    assert_eq!(day, DaySchedule::working("08:30", "16:00", Vec::new()));
    assert_matches!(
        parse_day_schedule(Some(" 08:30-16:00 ")),
        Ok(DayScheduleSource::LegacyRange(_))
    );
}

#[test]
fn test_legacy_range_as_json_string() {
    let day = day_schedule_or_closed(Some(r#""10:00-14:00""#));

    assert_eq!(day, DaySchedule::working("10:00", "14:00", Vec::new()));
}

#[test]
fn test_invalid_legacy_ranges() {
    assert_matches!(
        parse_legacy_range("16:00-08:30"),
        Err(ScheduleParseWarning::StartNotBeforeEnd { .. })
    );
    assert_matches!(
        parse_legacy_range("8:30-16:00"),
        Err(ScheduleParseWarning::UnrecognizedFormat(_))
    );
    assert_eq!(day_schedule_or_closed(Some("16:00-08:30")), DaySchedule::closed());
}

// ==============================================================================
// ROUND TRIP
// ==============================================================================

#[test]
fn test_reparse_is_idempotent() {
    let inputs = [
        STANDARD_DAY.to_string(),
        "07:45-11:15".to_string(),
        r#"{"isWorkingDay":1,"startTime":"10:00","endTime":"18:30","breaks":null}"#.to_string(),
        DayScheduleFixture::working("06:00", "22:00")
            .with_break("10:00", "10:30")
            .with_break("14:00", "15:00")
            .to_json(),
        r#"{"isWorkingDay":false,"startTime":"09:00"}"#.to_string(),
    ];

    for raw in inputs {
        let first = day_schedule_or_closed(Some(&raw));
        let reserialized = stringify_day_schedule(&first);
        let second = day_schedule_or_closed(Some(&reserialized));

        assert_eq!(first, second, "round trip of {}", raw);
    }
}
