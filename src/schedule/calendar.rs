//! Month calendar model: which days carry appointments, which day is selected.
//!
//! The month on display and the selected date are independent. Moving between
//! months never touches the selection, and the appointment markers are always
//! computed from the full set so status filters cannot hide them.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::messages::UserCommand;
use crate::models::Appointment;
use crate::schedule::date_matcher::{normalized_date, ReferenceZone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleMonth {
    year: i32,
    month: u32,
}

impl VisibleMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn containing(day: NaiveDate) -> Self {
        Self {
            year: day.year(),
            month: day.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Moves by `delta` months, rolling over year boundaries.
    pub fn navigate(&self, delta: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + delta;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        // month is always 1..=12 and day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.navigate(1).first_day();
        (next - self.first_day()).num_days() as u32
    }

    /// Blank cells before day 1 in a Sunday-first week.
    pub fn first_weekday_offset(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

/// Days of `month` with at least one appointment, regardless of status.
pub fn days_with_appointments(
    month: VisibleMonth,
    appointments: &[Appointment],
    zone: &ReferenceZone,
) -> BTreeSet<u32> {
    appointments
        .iter()
        .map(|a| normalized_date(&a.date, zone))
        .filter(|d| month.contains(*d))
        .map(|d| d.day())
        .collect()
}

pub fn is_selected(day: NaiveDate, selected: Option<NaiveDate>) -> bool {
    selected == Some(day)
}

pub fn on_select_day(day: NaiveDate) -> UserCommand {
    UserCommand::SelectDate(day)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    Blank,
    Day {
        date: NaiveDate,
        has_appointments: bool,
        is_selected: bool,
    },
}

/// Snapshot of one month, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    pub month: VisibleMonth,
    pub marked_days: BTreeSet<u32>,
    pub selected: Option<NaiveDate>,
}

impl CalendarView {
    pub fn build(
        month: VisibleMonth,
        appointments: &[Appointment],
        selected: Option<NaiveDate>,
        zone: &ReferenceZone,
    ) -> Self {
        Self {
            month,
            marked_days: days_with_appointments(month, appointments, zone),
            selected,
        }
    }

    pub fn has_appointments(&self, day: u32) -> bool {
        self.marked_days.contains(&day)
    }

    pub fn cells(&self) -> Vec<CalendarCell> {
        let mut cells = vec![CalendarCell::Blank; self.month.first_weekday_offset() as usize];

        for day in 1..=self.month.days_in_month() {
            if let Some(date) = self.month.day(day) {
                cells.push(CalendarCell::Day {
                    date,
                    has_appointments: self.has_appointments(day),
                    is_selected: is_selected(date, self.selected),
                });
            }
        }

        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentStatus;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_navigate_across_years() {
        let jan = VisibleMonth::new(2024, 1).unwrap();
        assert_eq!(jan.navigate(-1), VisibleMonth::new(2023, 12).unwrap());
        assert_eq!(jan.navigate(12), VisibleMonth::new(2025, 1).unwrap());

        let dec = VisibleMonth::new(2024, 12).unwrap();
        assert_eq!(dec.navigate(1), VisibleMonth::new(2025, 1).unwrap());
        assert_eq!(dec.navigate(-25), VisibleMonth::new(2022, 11).unwrap());
        assert!(VisibleMonth::new(2024, 13).is_none());
    }

    #[test]
    fn test_month_geometry() {
        let feb_leap = VisibleMonth::new(2024, 2).unwrap();
        assert_eq!(feb_leap.days_in_month(), 29);
        assert_eq!(VisibleMonth::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(VisibleMonth::new(2024, 12).unwrap().days_in_month(), 31);

        // May 1st 2024 was a Wednesday
        let may = VisibleMonth::new(2024, 5).unwrap();
        assert_eq!(may.first_weekday_offset(), 3);
        assert_eq!(may.label(), "May 2024");
    }

    #[test]
    fn test_markers_ignore_status_and_other_months() {
        let appointments = vec![
            Appointment::new("1", day(2024, 5, 1), AppointmentStatus::Completed),
            Appointment::new("2", day(2024, 5, 14), AppointmentStatus::Cancelled),
            Appointment::new("3", day(2024, 5, 14), AppointmentStatus::Pending),
            Appointment::new("4", day(2024, 6, 2), AppointmentStatus::Pending),
            Appointment::new("5", day(2023, 5, 3), AppointmentStatus::Pending),
        ];

        let days = days_with_appointments(
            VisibleMonth::new(2024, 5).unwrap(),
            &appointments,
            &ReferenceZone::Local,
        );
        assert_eq!(days.into_iter().collect::<Vec<_>>(), vec![1, 14]);
    }

    #[test]
    fn test_cells_layout() {
        let appointments = vec![Appointment::new("1", day(2024, 5, 14), AppointmentStatus::Pending)];
        let view = CalendarView::build(
            VisibleMonth::new(2024, 5).unwrap(),
            &appointments,
            Some(day(2024, 5, 2)),
            &ReferenceZone::Local,
        );

        let cells = view.cells();
        assert_eq!(cells.len(), 3 + 31);
        assert!(cells[..3].iter().all(|c| *c == CalendarCell::Blank));
        assert_eq!(
            cells[3 + 13],
            CalendarCell::Day {
                date: day(2024, 5, 14),
                has_appointments: true,
                is_selected: false,
            }
        );
        assert_eq!(
            cells[3 + 1],
            CalendarCell::Day {
                date: day(2024, 5, 2),
                has_appointments: false,
                is_selected: true,
            }
        );
    }

    #[test]
    fn test_select_day_emits_exact_date() {
        let date = day(2024, 5, 9);
        assert_eq!(on_select_day(date), UserCommand::SelectDate(date));
        assert!(is_selected(date, Some(date)));
        assert!(!is_selected(date, None));
    }
}
