// Counsel Console - appointment administration for the counseling office
// Main entry point for iced application

use anyhow::{Context, Result};
use log::{error, info, warn};
use std::sync::Arc;

use counsel_console::api::HttpAppointmentApi;
use counsel_console::command_handlers::CommandHandlers;
use counsel_console::config::AppConfig;
use counsel_console::controller::{
    AppointmentListController, Effect, LoadTicket, StatusChangeTicket,
};
use counsel_console::database::Database;
use counsel_console::error::{AppError, AppResult};
use counsel_console::http_config::HttpConfig;
use counsel_console::messages::UserCommand;
use counsel_console::models::{Appointment, NormalizedBatch};
use counsel_console::ui::{self, palette, styles::BackgroundStyle};
use counsel_console::utils::logging;
use counsel_console::view_state::Phase;

use iced::widget::{column, container, row, scrollable, text};
use iced::{Application, Command, Element, Length, Settings as IcedSettings, Theme};

/// Unified application message type
#[derive(Debug, Clone)]
pub enum Message {
    /// Anything the admin clicked
    User(UserCommand),
    /// Appointment list fetched (or failed)
    AppointmentsLoaded(LoadTicket, AppResult<NormalizedBatch>),
    /// Backend answered a status change
    StatusUpdated(StatusChangeTicket, AppResult<Option<Appointment>>),
    /// Stored session removed
    SignedOut(Result<(), String>),
}

pub struct Flags {
    controller: AppointmentListController,
    handlers: CommandHandlers,
    db: Arc<Database>,
}

pub struct ConsoleApp {
    controller: AppointmentListController,
    handlers: CommandHandlers,
    db: Arc<Database>,
}

impl ConsoleApp {
    fn run_effect(&mut self, effect: Effect) -> Command<Message> {
        match effect {
            Effect::None => Command::none(),
            Effect::Load(ticket) => {
                let handlers = self.handlers.clone();
                Command::perform(
                    async move { handlers.fetch_appointments().await },
                    move |result| Message::AppointmentsLoaded(ticket, result),
                )
            }
            Effect::UpdateStatus(ticket) => {
                let handlers = self.handlers.clone();
                let pending = ticket.clone();
                Command::perform(
                    async move { handlers.update_status(&pending).await },
                    move |result| Message::StatusUpdated(ticket, result),
                )
            }
            Effect::SignOut => {
                let db = self.db.clone();
                Command::perform(
                    async move { db.clear_session().await.map_err(|e| e.to_string()) },
                    Message::SignedOut,
                )
            }
        }
    }

    fn view_list(&self) -> Element<'_, Message> {
        if self.controller.phase() == Phase::Loading {
            return container(text("Loading appointments...").size(16).style(palette::TEXT_MUTED))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x()
                .center_y()
                .into();
        }

        let visible = self.controller.visible();
        if visible.is_empty() {
            return container(
                text("No appointments match the current filters")
                    .size(16)
                    .style(palette::TEXT_MUTED),
            )
            .width(Length::Fill)
            .padding(40)
            .center_x()
            .into();
        }

        let zone = *self.controller.zone();
        let cards: Vec<Element<Message>> = visible
            .into_iter()
            .map(|appointment| ui::view_appointment(appointment, &zone).map(Message::User))
            .collect();

        scrollable(column(cards).spacing(12).padding([0, 10]))
            .height(Length::Fill)
            .into()
    }
}

impl Application for ConsoleApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = Flags;

    fn new(flags: Flags) -> (Self, Command<Message>) {
        let mut app = ConsoleApp {
            controller: flags.controller,
            handlers: flags.handlers,
            db: flags.db,
        };

        let ticket = app.controller.begin_load();
        let startup = app.run_effect(Effect::Load(ticket));
        (app, startup)
    }

    fn title(&self) -> String {
        format!("Counsel Console · {}", self.controller.admin().username)
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::User(command) => {
                let effect = self.controller.dispatch(command);
                self.run_effect(effect)
            }
            Message::AppointmentsLoaded(ticket, result) => {
                let outcome = self.controller.complete_load(ticket, result);
                info!("Load finished: {:?}", outcome);
                Command::none()
            }
            Message::StatusUpdated(ticket, result) => {
                if let Err(e) = self.controller.complete_status_change(ticket, result) {
                    warn!("Status change not applied: {}", e);
                }
                Command::none()
            }
            Message::SignedOut(Ok(())) => {
                logging::log_auth_event("Signed out", &self.controller.admin().username);
                iced::window::close(iced::window::Id::MAIN)
            }
            Message::SignedOut(Err(e)) => {
                error!("Failed to clear session: {}", e);
                iced::window::close(iced::window::Id::MAIN)
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let header = row![
            ui::section_header("Appointment Management").map(Message::User),
            iced::widget::horizontal_space(),
            text(format!("Signed in as {}", self.controller.admin().username))
                .size(13)
                .style(palette::TEXT_MUTED),
            iced::widget::button(text("Log out").size(13))
                .padding([6, 12])
                .style(iced::theme::Button::Custom(Box::new(
                    ui::styles::DestructiveButtonStyle
                )))
                .on_press(Message::User(UserCommand::Logout)),
        ]
        .spacing(12)
        .align_items(iced::Alignment::Center);

        let mut main_column = column![
            header,
            ui::view_stats(self.controller.stats()).map(Message::User),
            ui::view_toolbar(self.controller.view()).map(Message::User),
        ]
        .spacing(15);

        if let Some(notice) = self.controller.notice() {
            main_column = main_column.push(ui::view_notice(notice).map(Message::User));
        }
        main_column = main_column.push(self.view_list());

        let content = row![
            main_column.width(Length::FillPortion(3)),
            container(ui::calendar::view_calendar(&self.controller.calendar()).map(Message::User))
                .width(Length::Shrink),
        ]
        .spacing(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(20)
            .style(iced::theme::Container::Custom(Box::new(BackgroundStyle)))
            .into()
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}

async fn bootstrap() -> Result<Flags> {
    let config = AppConfig::from_env().context("Invalid configuration")?;

    let db = Database::open(&config.session_db)
        .await
        .context("Failed to open session store")?;
    let session = db.load_session().await.context("Failed to read session")?;

    // Non-admins never reach the console
    let controller = AppointmentListController::new(&session, config.zone)?;

    let api = HttpAppointmentApi::new(&config).context("Failed to build HTTP client")?;
    let handlers = CommandHandlers::new(Arc::new(api), HttpConfig::backend_api().to_retry_config());

    Ok(Flags {
        controller,
        handlers,
        db: Arc::new(db),
    })
}

#[tokio::main]
async fn main() -> iced::Result {
    logging::init_logging();

    info!("Starting Counsel Console");

    let flags = match bootstrap().await {
        Ok(flags) => flags,
        Err(e) => {
            error!("Startup failed: {:#}", e);
            eprintln!("{:#}", e);
            if matches!(e.downcast_ref::<AppError>(), Some(AppError::AuthDenied(_))) {
                eprintln!("Sign in with an administrator account and try again.");
            }
            std::process::exit(1);
        }
    };

    ConsoleApp::run(IcedSettings {
        flags,
        window: iced::window::Settings {
            size: iced::Size::new(1100.0, 720.0),
            resizable: true,
            ..Default::default()
        },
        id: None,
        fonts: vec![],
        default_font: Default::default(),
        default_text_size: iced::Pixels(16.0),
        antialiasing: false,
    })
}
