pub mod availability;
pub mod schedule;

pub use availability::{generate_available_slots, is_doctor_available, open_slots};
pub use schedule::{
    day_schedule_or_closed, parse_day_schedule, parse_legacy_range, parse_structured_day,
    stringify_day_schedule, weekday_index, weekday_name,
};
