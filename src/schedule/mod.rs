//! Scheduling rules: which status changes are allowed, which day an
//! appointment falls on, and how the list and calendar are derived.

pub mod calendar;
pub mod date_matcher;
pub mod filter;
pub mod transitions;

pub use calendar::{CalendarCell, CalendarView, VisibleMonth};
pub use date_matcher::{matches_date, normalized_date, ReferenceZone};
pub use transitions::{available_actions, is_allowed, validate_transition, StatusAction};
