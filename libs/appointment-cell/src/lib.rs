pub mod models;
pub mod services;

pub use models::{
    Appointment, AppointmentError, AppointmentStatus, BookingRejection, ValidationResult,
};
pub use services::BookingService;
