//! Calendar-day matching.
//!
//! All comparisons happen on calendar days in one reference zone. Timestamps
//! are reduced to that zone's day first; plain dates are used as-is.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::models::{Appointment, AppointmentDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceZone {
    /// The zone of the machine running the console.
    #[default]
    Local,
    Named(Tz),
}

impl ReferenceZone {
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            ReferenceZone::Local => instant.with_timezone(&chrono::Local).date_naive(),
            ReferenceZone::Named(tz) => instant.with_timezone(tz).date_naive(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.day_of(Utc::now())
    }
}

impl FromStr for ReferenceZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("local") {
            return Ok(ReferenceZone::Local);
        }
        Tz::from_str(s)
            .map(ReferenceZone::Named)
            .map_err(|e| format!("Unknown time zone '{}': {}", s, e))
    }
}

pub fn normalized_date(date: &AppointmentDate, zone: &ReferenceZone) -> NaiveDate {
    match date {
        AppointmentDate::Day(day) => *day,
        AppointmentDate::Instant(instant) => zone.day_of(*instant),
    }
}

/// No selected date means no date filtering.
pub fn matches_date(
    appointment: &Appointment,
    selected: Option<NaiveDate>,
    zone: &ReferenceZone,
) -> bool {
    match selected {
        None => true,
        Some(day) => normalized_date(&appointment.date, zone) == day,
    }
}
