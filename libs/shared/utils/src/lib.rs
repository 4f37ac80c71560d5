pub mod time_slot;
pub mod test_utils;

pub use time_slot::{
    calculate_end_time, format_minutes, generate_time_slots, is_time_slot_overlapping,
    is_valid_time_format, is_valid_time_slot_duration, is_valid_time_slot_format, to_minutes,
    TimeSlot,
};
