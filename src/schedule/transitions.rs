//! Appointment status transition rules.
//!
//! | current   | allowed targets       |
//! |-----------|-----------------------|
//! | Pending   | Approved, Rejected    |
//! | Approved  | Completed, Cancelled  |
//! | Rejected  | Pending               |
//! | Cancelled | Pending               |
//! | Completed | (terminal)            |

use std::collections::BTreeSet;

use log::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::AppointmentStatus;

pub fn allowed_transitions(current: AppointmentStatus) -> &'static [AppointmentStatus] {
    use AppointmentStatus::*;

    match current {
        Pending => &[Approved, Rejected],
        Approved => &[Completed, Cancelled],
        Rejected => &[Pending],
        Cancelled => &[Pending],
        Completed => &[],
    }
}

pub fn allowed_set(current: AppointmentStatus) -> BTreeSet<AppointmentStatus> {
    allowed_transitions(current).iter().copied().collect()
}

pub fn is_allowed(current: AppointmentStatus, requested: AppointmentStatus) -> bool {
    allowed_transitions(current).contains(&requested)
}

pub fn is_terminal(status: AppointmentStatus) -> bool {
    allowed_transitions(status).is_empty()
}

/// Refuses any transition outside the table.
pub fn validate_transition(current: AppointmentStatus, requested: AppointmentStatus) -> AppResult<()> {
    debug!("Validating status transition {} -> {}", current, requested);

    if !is_allowed(current, requested) {
        warn!("Invalid status transition attempted: {} -> {}", current, requested);
        return Err(AppError::InvalidTransition {
            from: current,
            to: requested,
        });
    }

    Ok(())
}

/// Buttons the console offers for an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    Approve,
    Reject,
    Complete,
    Cancel,
    ResetToPending,
}

impl StatusAction {
    pub fn for_target(target: AppointmentStatus) -> Self {
        match target {
            AppointmentStatus::Approved => StatusAction::Approve,
            AppointmentStatus::Rejected => StatusAction::Reject,
            AppointmentStatus::Completed => StatusAction::Complete,
            AppointmentStatus::Cancelled => StatusAction::Cancel,
            AppointmentStatus::Pending => StatusAction::ResetToPending,
        }
    }

    pub fn target(&self) -> AppointmentStatus {
        match self {
            StatusAction::Approve => AppointmentStatus::Approved,
            StatusAction::Reject => AppointmentStatus::Rejected,
            StatusAction::Complete => AppointmentStatus::Completed,
            StatusAction::Cancel => AppointmentStatus::Cancelled,
            StatusAction::ResetToPending => AppointmentStatus::Pending,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusAction::Approve => "Approve",
            StatusAction::Reject => "Reject",
            StatusAction::Complete => "Complete",
            StatusAction::Cancel => "Cancel",
            StatusAction::ResetToPending => "Reset to Pending",
        }
    }
}

pub fn available_actions(status: AppointmentStatus) -> Vec<StatusAction> {
    allowed_transitions(status)
        .iter()
        .copied()
        .map(StatusAction::for_target)
        .collect()
}
