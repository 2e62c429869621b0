//! Backend collaborator.
//!
//! The console only needs two calls: list every appointment and change one
//! appointment's status. The backend re-validates transitions and is the
//! authority; the client-side check in `schedule::transitions` is a fast path.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Appointment, AppointmentId, AppointmentStatus, NormalizedBatch};

pub mod http;

pub use http::HttpAppointmentApi;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentApi: Send + Sync {
    /// Every appointment, already normalized, in backend order.
    async fn list_appointments(&self) -> AppResult<NormalizedBatch>;

    /// Returns the updated record when the backend echoes one.
    async fn update_status(
        &self,
        id: &AppointmentId,
        status: AppointmentStatus,
    ) -> AppResult<Option<Appointment>>;
}
