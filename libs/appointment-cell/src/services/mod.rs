pub mod booking;
pub mod conflict;
pub mod lifecycle;
pub mod validator;

pub use booking::BookingService;
pub use conflict::booked_slots;
pub use lifecycle::{appointment_start, can_cancel_or_reschedule, can_cancel_or_reschedule_now};
pub use validator::{check_appointment_time, check_booking_window, validate_appointment_time};
