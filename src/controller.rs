//! Appointment list controller.
//!
//! Owns the cached appointment set and the view state, consumes
//! `UserCommand`s, and tells the caller which network effect to run. Network
//! work is split in two halves (`begin_*` / `complete_*`) so the controller
//! stays synchronous and independent of any runtime or renderer. The visible
//! list is never stored; it is derived from the set and the filters on every
//! read.

use chrono::NaiveDate;
use log::{debug, info, warn};
use std::collections::BTreeMap;

use crate::error::{AppError, AppResult};
use crate::messages::UserCommand;
use crate::models::{
    require_admin, Appointment, AppointmentId, AppointmentStatus, NormalizedBatch, Session,
    SessionUser, StatusCounts,
};
use crate::schedule::calendar::CalendarView;
use crate::schedule::date_matcher::ReferenceZone;
use crate::schedule::{filter, transitions};
use crate::utils::logging;
use crate::view_state::{Notice, Phase, ViewState};

/// Identifies one `load()` round trip. Only the newest ticket may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// A validated status change waiting for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChangeTicket {
    pub id: AppointmentId,
    /// Status the request was validated against.
    pub from: AppointmentStatus,
    pub to: AppointmentStatus,
}

/// Work the caller must perform after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Load(LoadTicket),
    UpdateStatus(StatusChangeTicket),
    SignOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { count: usize, skipped: usize },
    Failed,
    /// A newer load was started; this response was ignored.
    Stale,
}

#[derive(Debug, Clone)]
pub struct AppointmentListController {
    admin: SessionUser,
    zone: ReferenceZone,
    appointments: Vec<Appointment>,
    view: ViewState,
    phase: Phase,
    notice: Option<Notice>,
    load_generation: u64,
    /// Statuses confirmed since the newest load started. Its snapshot may
    /// predate them.
    confirmed_since_load: BTreeMap<AppointmentId, AppointmentStatus>,
}

impl AppointmentListController {
    /// Fails with `AuthDenied` unless the session belongs to an admin.
    pub fn new(session: &Session, zone: ReferenceZone) -> AppResult<Self> {
        Self::with_today(session, zone, zone.today())
    }

    pub fn with_today(session: &Session, zone: ReferenceZone, today: NaiveDate) -> AppResult<Self> {
        let admin = require_admin(session)?.clone();
        logging::log_auth_event("Admin console opened", &admin.username);

        Ok(Self {
            admin,
            zone,
            appointments: Vec::new(),
            view: ViewState::new(today),
            phase: Phase::Loading,
            notice: None,
            load_generation: 0,
            confirmed_since_load: BTreeMap::new(),
        })
    }

    // --- Read side ---

    pub fn admin(&self) -> &SessionUser {
        &self.admin
    }

    pub fn zone(&self) -> &ReferenceZone {
        &self.zone
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn find(&self, id: &AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| &a.id == id)
    }

    pub fn visible(&self) -> Vec<&Appointment> {
        filter::filter(
            &self.appointments,
            self.view.status_filter,
            self.view.selected_date,
            &self.zone,
        )
    }

    pub fn calendar(&self) -> CalendarView {
        CalendarView::build(
            self.view.visible_month,
            &self.appointments,
            self.view.selected_date,
            &self.zone,
        )
    }

    pub fn stats(&self) -> StatusCounts {
        StatusCounts::tally(&self.appointments)
    }

    // --- Commands ---

    pub fn dispatch(&mut self, command: UserCommand) -> Effect {
        debug!("Dispatching {:?}", command);

        match command {
            UserCommand::SelectDate(day) => {
                self.view.selected_date = Some(day);
                Effect::None
            }
            UserCommand::ClearDate => {
                self.view.selected_date = None;
                Effect::None
            }
            UserCommand::SetStatusFilter(status_filter) => {
                self.view.status_filter = status_filter;
                Effect::None
            }
            UserCommand::NavigateMonth(delta) => {
                self.view.visible_month = self.view.visible_month.navigate(delta);
                Effect::None
            }
            UserCommand::RequestStatusChange { id, status } => {
                match self.begin_status_change(&id, status) {
                    Ok(ticket) => Effect::UpdateStatus(ticket),
                    Err(_) => Effect::None,
                }
            }
            UserCommand::Reload => Effect::Load(self.begin_load()),
            UserCommand::DismissNotice => {
                self.notice = None;
                Effect::None
            }
            UserCommand::Logout => {
                logging::log_auth_event("Logout requested", &self.admin.username);
                Effect::SignOut
            }
        }
    }

    // --- Load ---

    /// Starts a load. Any earlier load still in flight becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        self.confirmed_since_load.clear();
        self.notice = None;
        if self.appointments.is_empty() {
            self.phase = Phase::Loading;
        }
        debug!("Load #{} started", self.load_generation);

        LoadTicket {
            generation: self.load_generation,
        }
    }

    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: AppResult<NormalizedBatch>,
    ) -> LoadOutcome {
        if ticket.generation != self.load_generation {
            debug!(
                "Ignoring stale load #{} (current #{})",
                ticket.generation, self.load_generation
            );
            return LoadOutcome::Stale;
        }

        self.phase = Phase::Ready;
        let confirmed = std::mem::take(&mut self.confirmed_since_load);

        match result {
            Ok(batch) => {
                let count = batch.appointments.len();
                let skipped = batch.skipped;
                self.appointments = batch.appointments;
                for appointment in self.appointments.iter_mut() {
                    if let Some(status) = confirmed.get(&appointment.id) {
                        if appointment.status != *status {
                            debug!(
                                "Keeping confirmed status {} for {} over snapshot {}",
                                status, appointment.id, appointment.status
                            );
                            appointment.status = *status;
                        }
                    }
                }
                self.notice = if skipped > 0 {
                    Some(Notice::Info(format!(
                        "{} appointment record(s) could not be read and were skipped.",
                        skipped
                    )))
                } else {
                    None
                };
                info!("Appointment list replaced: {} records", count);
                LoadOutcome::Applied { count, skipped }
            }
            Err(e) => {
                // Previously loaded data stays on screen
                logging::log_network_error("Load appointments", &e);
                self.notice = Some(Notice::from_error(&e));
                LoadOutcome::Failed
            }
        }
    }

    // --- Status changes ---

    /// Looks the appointment up and checks the transition table. On error,
    /// nothing is sent and nothing changes except the notice slot.
    pub fn begin_status_change(
        &mut self,
        id: &AppointmentId,
        status: AppointmentStatus,
    ) -> AppResult<StatusChangeTicket> {
        self.notice = None;

        let result = self
            .find(id)
            .ok_or_else(|| AppError::not_found(id.as_str()))
            .and_then(|current| {
                transitions::validate_transition(current.status, status)?;
                Ok(StatusChangeTicket {
                    id: id.clone(),
                    from: current.status,
                    to: status,
                })
            });

        if let Err(e) = &result {
            warn!("Status change for {} refused: {}", id, e);
            self.notice = Some(Notice::from_error(e));
        }

        result
    }

    /// Applies the backend's answer. The appointment must still hold the
    /// status the request was validated against; otherwise another change won
    /// the race and this one fails with `Conflict`.
    ///
    /// On success `result` holds the record the backend echoed, if any.
    pub fn complete_status_change(
        &mut self,
        ticket: StatusChangeTicket,
        result: AppResult<Option<Appointment>>,
    ) -> AppResult<AppointmentStatus> {
        let outcome = result.and_then(|confirmed| self.apply_status(&ticket, confirmed));

        match &outcome {
            Ok(status) => {
                logging::log_status_change(&ticket.id, ticket.from, *status);
                self.notice = Some(Notice::Info(format!(
                    "Appointment {} successfully!",
                    status.as_str().to_lowercase()
                )));
            }
            Err(e) => {
                warn!("Status change for {} failed: {}", ticket.id, e);
                self.notice = Some(Notice::from_error(e));
            }
        }

        outcome
    }

    fn apply_status(
        &mut self,
        ticket: &StatusChangeTicket,
        confirmed: Option<Appointment>,
    ) -> AppResult<AppointmentStatus> {
        let appointment = self
            .appointments
            .iter_mut()
            .find(|a| a.id == ticket.id)
            .ok_or_else(|| AppError::not_found(ticket.id.as_str()))?;

        // The backend is the authority on the resulting status
        let status = confirmed
            .filter(|record| record.id == ticket.id)
            .map(|record| record.status)
            .unwrap_or(ticket.to);

        // A refresh may already show the committed status
        if appointment.status != ticket.from && appointment.status != status {
            return Err(AppError::Conflict {
                id: ticket.id.to_string(),
                current: appointment.status,
            });
        }

        appointment.status = status;
        self.confirmed_since_load.insert(ticket.id.clone(), status);
        Ok(status)
    }
}
