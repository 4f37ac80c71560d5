pub mod models;
pub mod services;

pub use models::{
    AvailableSlot, BreakPeriod, DaySchedule, DayScheduleSource, DoctorError,
    ScheduleParseWarning, UpdateScheduleRequest, WeeklySchedule,
};
pub use services::*;
