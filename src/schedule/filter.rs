//! The filter pipeline: full appointment set + view filters -> visible list.

use chrono::NaiveDate;

use crate::models::{Appointment, StatusFilter};
use crate::schedule::date_matcher::{matches_date, ReferenceZone};

pub fn matches_status(appointment: &Appointment, status_filter: StatusFilter) -> bool {
    status_filter.matches(appointment.status)
}

/// Stable filter; output keeps the input's relative order and depends on the
/// arguments alone.
pub fn filter<'a>(
    appointments: &'a [Appointment],
    status_filter: StatusFilter,
    selected_date: Option<NaiveDate>,
    zone: &ReferenceZone,
) -> Vec<&'a Appointment> {
    appointments
        .iter()
        .filter(|a| matches_status(a, status_filter))
        .filter(|a| matches_date(a, selected_date, zone))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentDate, AppointmentStatus};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn fixture() -> Vec<Appointment> {
        let mut appointments = Vec::new();
        for i in 0..30u32 {
            let status = AppointmentStatus::ALL[(i as usize * 7) % 5];
            appointments.push(Appointment::new(i.to_string().as_str(), day(1 + i % 4), status));
        }
        appointments
    }

    #[test]
    fn test_scenario_status_and_date() {
        let appointments = vec![
            Appointment::new("1", day(1), AppointmentStatus::Pending),
            Appointment::new("2", day(1), AppointmentStatus::Approved),
        ];

        let visible = filter(
            &appointments,
            StatusFilter::Only(AppointmentStatus::Approved),
            Some(day(1)),
            &ReferenceZone::Local,
        );
        let ids: Vec<&str> = visible.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn test_output_is_ordered_subsequence_with_exact_count() {
        let appointments = fixture();
        let zone = ReferenceZone::Local;

        let dates = [None, Some(day(1)), Some(day(3)), Some(day(9))];
        for status_filter in StatusFilter::options() {
            for selected in dates {
                let visible = filter(&appointments, status_filter, selected, &zone);

                let expected = appointments
                    .iter()
                    .filter(|a| status_filter.matches(a.status))
                    .filter(|a| selected.map_or(true, |d| a.date == AppointmentDate::Day(d)))
                    .count();
                assert_eq!(visible.len(), expected);

                // every element appears in the input, in increasing position
                let mut cursor = 0;
                for item in &visible {
                    let pos = appointments[cursor..]
                        .iter()
                        .position(|a| std::ptr::eq(a, *item))
                        .expect("element not found after previous match");
                    cursor += pos + 1;
                }
            }
        }
    }

    #[test]
    fn test_rederivable_without_state() {
        let appointments = fixture();
        let zone = ReferenceZone::Local;
        let status_filter = StatusFilter::Only(AppointmentStatus::Pending);

        let first = filter(&appointments, status_filter, Some(day(2)), &zone);
        let _other = filter(&appointments, StatusFilter::All, None, &zone);
        let second = filter(&appointments, status_filter, Some(day(2)), &zone);
        assert_eq!(first, second);
    }

    #[test]
    fn test_all_with_no_date_is_identity() {
        let appointments = fixture();
        let visible = filter(&appointments, StatusFilter::All, None, &ReferenceZone::Local);
        assert_eq!(visible.len(), appointments.len());
    }
}
