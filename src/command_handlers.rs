//! Command handlers module
//!
//! Async halves of the controller's effects: the network calls behind a
//! `load()` and a status change. `AppointmentConsole` wires them to a
//! controller for callers that simply await each command in turn.

use log::{error, info};
use std::sync::Arc;

use crate::api::AppointmentApi;
use crate::controller::{AppointmentListController, Effect, LoadOutcome, StatusChangeTicket};
use crate::error::AppResult;
use crate::messages::UserCommand;
use crate::models::{Appointment, AppointmentId, AppointmentStatus, NormalizedBatch};
use crate::utils::retry::{retry_with_exponential_backoff, RetryConfig};

/// Backend operation handlers
#[derive(Clone)]
pub struct CommandHandlers {
    api: Arc<dyn AppointmentApi>,
    retry: RetryConfig,
}

impl CommandHandlers {
    pub fn new(api: Arc<dyn AppointmentApi>, retry: RetryConfig) -> Self {
        Self { api, retry }
    }

    /// Fetch the full appointment list, retrying transient failures
    pub async fn fetch_appointments(&self) -> AppResult<NormalizedBatch> {
        info!("Loading appointments from backend");
        let api = self.api.clone();
        retry_with_exponential_backoff(&self.retry, || {
            let api = api.clone();
            async move { api.list_appointments().await }
        })
        .await
    }

    /// Send one status change. Never retried: the admin decides.
    pub async fn update_status(&self, ticket: &StatusChangeTicket) -> AppResult<Option<Appointment>> {
        info!(
            "Requesting status change for {}: {} -> {}",
            ticket.id, ticket.from, ticket.to
        );
        self.api.update_status(&ticket.id, ticket.to).await
    }
}

/// Controller plus handlers, one command at a time.
pub struct AppointmentConsole {
    controller: AppointmentListController,
    handlers: CommandHandlers,
}

impl AppointmentConsole {
    pub fn new(controller: AppointmentListController, handlers: CommandHandlers) -> Self {
        Self {
            controller,
            handlers,
        }
    }

    pub fn controller(&self) -> &AppointmentListController {
        &self.controller
    }

    pub async fn load(&mut self) -> LoadOutcome {
        let ticket = self.controller.begin_load();
        let result = self.handlers.fetch_appointments().await;
        self.controller.complete_load(ticket, result)
    }

    pub async fn request_status_change(
        &mut self,
        id: &AppointmentId,
        status: AppointmentStatus,
    ) -> AppResult<AppointmentStatus> {
        let ticket = self.controller.begin_status_change(id, status)?;
        let result = self.handlers.update_status(&ticket).await;
        self.controller.complete_status_change(ticket, result)
    }

    /// Runs a command and whatever effect it produces. Returns `SignOut` when
    /// the caller has to end the session; every other effect is consumed.
    pub async fn dispatch(&mut self, command: UserCommand) -> Effect {
        match self.controller.dispatch(command) {
            Effect::Load(ticket) => {
                let result = self.handlers.fetch_appointments().await;
                self.controller.complete_load(ticket, result);
                Effect::None
            }
            Effect::UpdateStatus(ticket) => {
                let result = self.handlers.update_status(&ticket).await;
                if let Err(e) = self.controller.complete_status_change(ticket, result) {
                    error!("Status change failed: {}", e);
                }
                Effect::None
            }
            other => other,
        }
    }
}
