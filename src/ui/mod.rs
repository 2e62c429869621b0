// src/ui/mod.rs

use iced::widget::{button, column, container, horizontal_space, pick_list, row, text};
use iced::{Alignment, Background, Border, Color, Element, Length, Shadow, Theme, Vector};

use crate::messages::UserCommand;
use crate::models::{Appointment, AppointmentStatus, StatusCounts, StatusFilter};
use crate::schedule::date_matcher::{normalized_date, ReferenceZone};
use crate::schedule::transitions::{available_actions, StatusAction};
use crate::view_state::{Notice, ViewState};

pub mod calendar;
pub mod styles;

use styles::{BannerStyle, DestructiveButtonStyle, PrimaryButtonStyle};

pub mod palette {
    use iced::Color;

    pub const BACKGROUND: Color = Color::from_rgb(0.98, 0.97, 0.95);
    pub const SURFACE: Color = Color::WHITE;
    pub const TEXT_MAIN: Color = Color::from_rgb(0.2, 0.2, 0.2);
    pub const TEXT_MUTED: Color = Color::from_rgb(0.5, 0.5, 0.5);
    pub const ACCENT: Color = Color::from_rgb(0.45, 0.55, 0.50);
    pub const ACCENT_HOVER: Color = Color::from_rgb(0.35, 0.45, 0.40);
    pub const DANGER: Color = Color::from_rgb(0.8, 0.4, 0.4);
    pub const PENDING: Color = Color::from_rgb(0.72, 0.53, 0.04);
    pub const COMPLETED: Color = Color::from_rgb(0.29, 0.44, 0.65);
}

pub fn card_style(_theme: &Theme) -> container::Appearance {
    container::Appearance {
        background: Some(Background::Color(palette::SURFACE)),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 12.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.05),
            offset: Vector::new(0.0, 4.0),
            blur_radius: 10.0,
        },
        text_color: Some(palette::TEXT_MAIN),
    }
}

/// "Wed, May 01 2024" for the day the appointment falls on in `zone`.
pub fn date_label(appointment: &Appointment, zone: &ReferenceZone) -> String {
    normalized_date(&appointment.date, zone)
        .format("%a, %b %d %Y")
        .to_string()
}

pub fn status_badge<'a>(status: AppointmentStatus) -> Element<'a, UserCommand> {
    let (bg, text_color) = styles::status_colors(status);

    container(text(status.as_str()).size(10).style(iced::theme::Text::Color(text_color)))
        .padding([4, 8])
        .style(container::Appearance {
            background: Some(Background::Color(bg)),
            border: Border {
                radius: 10.0.into(),
                ..Border::default()
            },
            ..Default::default()
        })
        .into()
}

fn action_button<'a>(appointment: &Appointment, action: StatusAction) -> Element<'a, UserCommand> {
    let style = match action {
        StatusAction::Reject | StatusAction::Cancel => {
            iced::theme::Button::Custom(Box::new(DestructiveButtonStyle))
        }
        _ => iced::theme::Button::Custom(Box::new(PrimaryButtonStyle)),
    };

    button(text(action.label()).size(12))
        .padding([6, 12])
        .style(style)
        .on_press(UserCommand::RequestStatusChange {
            id: appointment.id.clone(),
            status: action.target(),
        })
        .into()
}

pub fn view_appointment<'a>(
    appointment: &'a Appointment,
    zone: &ReferenceZone,
) -> Element<'a, UserCommand> {
    let actions: Vec<Element<UserCommand>> = available_actions(appointment.status)
        .into_iter()
        .map(|action| action_button(appointment, action))
        .collect();

    let when = if appointment.preferred_time.is_empty() {
        date_label(appointment, zone)
    } else {
        format!("{} · {}", date_label(appointment, zone), appointment.preferred_time)
    };

    let concern = if appointment.concern_type.is_empty() {
        "General concern"
    } else {
        appointment.concern_type.as_str()
    };

    container(
        column![
            row![
                text(appointment.requester.display()).size(16).style(palette::TEXT_MAIN),
                horizontal_space(),
                status_badge(appointment.status),
            ]
            .spacing(10)
            .align_items(Alignment::Center),
            text(when).size(13).style(palette::TEXT_MUTED),
            text(concern).size(13).style(palette::TEXT_MAIN),
            row(actions).spacing(8),
        ]
        .spacing(6),
    )
    .padding(15)
    .width(Length::Fill)
    .style(card_style)
    .into()
}

fn stat_tile<'a>(value: usize, label: &str, color: Color) -> Element<'a, UserCommand> {
    container(
        column![
            text(value).size(22).style(color),
            text(label).size(11).style(palette::TEXT_MUTED),
        ]
        .spacing(2)
        .align_items(Alignment::Center),
    )
    .padding(10)
    .width(Length::Fill)
    .style(card_style)
    .into()
}

pub fn view_stats<'a>(counts: StatusCounts) -> Element<'a, UserCommand> {
    let mut tiles: Vec<Element<UserCommand>> =
        vec![stat_tile(counts.total(), "Total", palette::TEXT_MAIN)];
    tiles.extend(AppointmentStatus::ALL.iter().map(|status| {
        let (_, color) = styles::status_colors(*status);
        stat_tile(counts.get(*status), status.as_str(), color)
    }));

    row(tiles).spacing(10).into()
}

pub fn view_toolbar<'a>(view: &ViewState) -> Element<'a, UserCommand> {
    let filter = pick_list(
        StatusFilter::options(),
        Some(view.status_filter),
        UserCommand::SetStatusFilter,
    )
    .text_size(13);

    let date_scope: Element<UserCommand> = match view.selected_date {
        Some(day) => row![
            text(format!("Showing {}", day.format("%B %d, %Y")))
                .size(13)
                .style(palette::TEXT_MUTED),
            button(text("All dates").size(12))
                .padding([4, 10])
                .style(iced::theme::Button::Text)
                .on_press(UserCommand::ClearDate),
        ]
        .spacing(8)
        .align_items(Alignment::Center)
        .into(),
        None => text("Showing all dates").size(13).style(palette::TEXT_MUTED).into(),
    };

    row![
        filter,
        date_scope,
        horizontal_space(),
        button(text("Refresh").size(13))
            .padding([6, 12])
            .style(iced::theme::Button::Custom(Box::new(PrimaryButtonStyle)))
            .on_press(UserCommand::Reload),
    ]
    .spacing(12)
    .align_items(Alignment::Center)
    .into()
}

pub fn view_notice(notice: &Notice) -> Element<'_, UserCommand> {
    container(
        row![
            text(notice.message()).size(13),
            horizontal_space(),
            button(text("×").size(14))
                .style(iced::theme::Button::Text)
                .on_press(UserCommand::DismissNotice),
        ]
        .align_items(Alignment::Center),
    )
    .padding([8, 12])
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(BannerStyle {
        is_error: notice.is_error(),
    })))
    .into()
}

pub fn section_header(label: &str) -> Element<'_, UserCommand> {
    text(label).size(20).style(palette::ACCENT).into()
}
