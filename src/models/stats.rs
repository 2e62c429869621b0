// file: src/models/stats.rs
use crate::models::{Appointment, AppointmentStatus};

/// Per-status totals over the full, unfiltered appointment set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub cancelled: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn tally<'a, I>(appointments: I) -> Self
    where
        I: IntoIterator<Item = &'a Appointment>,
    {
        let mut counts = Self::default();
        for appointment in appointments {
            *counts.slot(appointment.status) += 1;
        }
        counts
    }

    pub fn get(&self, status: AppointmentStatus) -> usize {
        match status {
            AppointmentStatus::Pending => self.pending,
            AppointmentStatus::Approved => self.approved,
            AppointmentStatus::Rejected => self.rejected,
            AppointmentStatus::Cancelled => self.cancelled,
            AppointmentStatus::Completed => self.completed,
        }
    }

    pub fn total(&self) -> usize {
        self.pending + self.approved + self.rejected + self.cancelled + self.completed
    }

    fn slot(&mut self, status: AppointmentStatus) -> &mut usize {
        match status {
            AppointmentStatus::Pending => &mut self.pending,
            AppointmentStatus::Approved => &mut self.approved,
            AppointmentStatus::Rejected => &mut self.rejected,
            AppointmentStatus::Cancelled => &mut self.cancelled,
            AppointmentStatus::Completed => &mut self.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_tally() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let appointments = vec![
            Appointment::new("1", day, AppointmentStatus::Pending),
            Appointment::new("2", day, AppointmentStatus::Pending),
            Appointment::new("3", day, AppointmentStatus::Completed),
        ];

        let counts = StatusCounts::tally(&appointments);
        assert_eq!(counts.get(AppointmentStatus::Pending), 2);
        assert_eq!(counts.get(AppointmentStatus::Completed), 1);
        assert_eq!(counts.get(AppointmentStatus::Approved), 0);
        assert_eq!(counts.total(), 3);
    }
}
