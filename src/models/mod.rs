// Declare modules
pub mod appointment;
pub mod session;
pub mod stats;
pub mod status;

// Re-export so callers can write `crate::models::Appointment`.
pub use appointment::{
    normalize_records, Appointment, AppointmentDate, AppointmentId, NormalizedBatch, RawAppointment,
    Requester,
};
pub use session::{require_admin, Role, Session, SessionUser};
pub use stats::StatusCounts;
pub use status::{AppointmentStatus, StatusFilter};
