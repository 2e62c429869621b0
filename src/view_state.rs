//! Ephemeral view state of the admin console.
//!
//! Lost on reload; nothing here is persisted.

use chrono::NaiveDate;

use crate::error::{AppError, ErrorKind};
use crate::models::StatusFilter;
use crate::schedule::calendar::VisibleMonth;

/// Load phase of the appointment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
}

/// User-visible message slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error { kind: ErrorKind, message: String },
    Info(String),
}

impl Notice {
    pub fn from_error(error: &AppError) -> Self {
        Notice::Error {
            kind: error.kind(),
            message: error.to_safe_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Error { message, .. } => message,
            Notice::Info(message) => message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub status_filter: StatusFilter,

    /// `None` shows every date.
    pub selected_date: Option<NaiveDate>,

    /// Month shown by the calendar, independent of `selected_date`.
    pub visible_month: VisibleMonth,
}

impl ViewState {
    /// Starts on `today`, selected, with no status filter.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            status_filter: StatusFilter::All,
            selected_date: Some(today),
            visible_month: VisibleMonth::containing(today),
        }
    }
}
