use chrono::NaiveDate;

use crate::models::{AppointmentId, AppointmentStatus, StatusFilter};

/// Typed user action consumed by the appointment list controller.
///
/// Every click in the console maps onto exactly one of these; the controller
/// never sees widget events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    // ===== Filter Commands =====
    /// Pick a calendar day
    SelectDate(NaiveDate),
    /// Drop the date filter entirely
    ClearDate,
    /// Choose a status filter
    SetStatusFilter(StatusFilter),

    // ===== Calendar Navigation =====
    /// Move the displayed month by the given number of months
    NavigateMonth(i32),

    // ===== Workflow Commands =====
    /// Move an appointment to a new status
    RequestStatusChange {
        id: AppointmentId,
        status: AppointmentStatus,
    },
    /// Fetch the appointment list again
    Reload,
    /// Dismiss the current error or notice
    DismissNotice,

    // ===== Session =====
    Logout,
}
