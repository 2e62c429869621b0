// Counsel Console Library
// Appointment administration core: status workflow, date matching,
// filtering, calendar and the list controller that ties them together.

pub mod api;
pub mod command_handlers;
pub mod config;
pub mod controller;
pub mod database;
pub mod error;
pub mod http_config;
pub mod messages;
pub mod models;
pub mod schedule;
pub mod ui;
pub mod utils;
pub mod view_state;

// Re-export commonly used types
pub use api::{AppointmentApi, HttpAppointmentApi};
pub use command_handlers::{AppointmentConsole, CommandHandlers};
pub use config::AppConfig;
pub use controller::{AppointmentListController, Effect, LoadOutcome, LoadTicket, StatusChangeTicket};
pub use database::Database;
pub use error::{AppError, AppResult, ErrorKind};
pub use messages::UserCommand;
pub use models::*;
pub use schedule::ReferenceZone;
pub use view_state::{Notice, Phase, ViewState};
