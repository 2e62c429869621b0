// src/ui/calendar.rs

use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Element, Length};

use crate::messages::UserCommand;
use crate::schedule::calendar::{on_select_day, CalendarCell, CalendarView};
use crate::ui::palette;
use crate::ui::styles::DayCellStyle;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const CELL_SIZE: f32 = 40.0;

fn view_cell<'a>(cell: CalendarCell) -> Element<'a, UserCommand> {
    match cell {
        CalendarCell::Blank => Space::new(Length::Fixed(CELL_SIZE), Length::Fixed(CELL_SIZE)).into(),
        CalendarCell::Day {
            date,
            has_appointments,
            is_selected,
        } => {
            let label = chrono::Datelike::day(&date).to_string();
            let marker = if has_appointments { "•" } else { " " };

            button(
                column![text(label).size(14), text(marker).size(10)]
                    .align_items(Alignment::Center)
                    .spacing(0),
            )
            .width(Length::Fixed(CELL_SIZE))
            .height(Length::Fixed(CELL_SIZE))
            .padding(2)
            .style(iced::theme::Button::Custom(Box::new(DayCellStyle {
                is_selected,
                has_appointments,
            })))
            .on_press(on_select_day(date))
            .into()
        }
    }
}

/// Month grid, Sunday first. Clicking a day selects it; the arrows only move
/// the visible month.
pub fn view_calendar<'a>(calendar: &CalendarView) -> Element<'a, UserCommand> {
    let nav_button = |label: &'static str, delta: i32| {
        button(text(label).size(18))
            .on_press(UserCommand::NavigateMonth(delta))
            .padding([5, 15])
            .style(iced::theme::Button::Text)
    };

    let header = row![
        nav_button("‹", -1),
        container(text(calendar.month.label()).size(18).style(palette::TEXT_MAIN))
            .width(Length::Fill)
            .center_x(),
        nav_button("›", 1),
    ]
    .align_items(Alignment::Center);

    let weekday_row = row(WEEKDAYS
        .iter()
        .map(|d| {
            container(text(*d).size(11).style(palette::TEXT_MUTED))
                .width(Length::Fixed(CELL_SIZE))
                .center_x()
                .into()
        })
        .collect::<Vec<Element<UserCommand>>>())
    .spacing(4);

    let cells = calendar.cells();
    let weeks: Vec<Element<UserCommand>> = cells
        .chunks(7)
        .map(|week| {
            row(week.iter().copied().map(view_cell).collect::<Vec<_>>())
                .spacing(4)
                .into()
        })
        .collect();

    container(
        column![header, weekday_row, column(weeks).spacing(4)]
            .spacing(8)
            .align_items(Alignment::Center),
    )
    .padding(15)
    .style(crate::ui::card_style)
    .into()
}
