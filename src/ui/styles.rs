use iced::widget::{button, container};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

use crate::models::AppointmentStatus;
use crate::ui::palette;

/// Badge colors per status: (tint, text).
pub fn status_colors(status: AppointmentStatus) -> (Color, Color) {
    match status {
        AppointmentStatus::Pending => (Color::from_rgba(0.85, 0.65, 0.13, 0.18), palette::PENDING),
        AppointmentStatus::Approved => (Color::from_rgba(0.45, 0.55, 0.50, 0.2), palette::ACCENT),
        AppointmentStatus::Rejected => (Color::from_rgba(0.8, 0.4, 0.4, 0.15), palette::DANGER),
        AppointmentStatus::Cancelled => (Color::from_rgba(0.5, 0.5, 0.5, 0.1), palette::TEXT_MUTED),
        AppointmentStatus::Completed => (Color::from_rgba(0.29, 0.44, 0.65, 0.15), palette::COMPLETED),
    }
}

pub struct BackgroundStyle;
impl container::StyleSheet for BackgroundStyle {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(palette::BACKGROUND)),
            ..Default::default()
        }
    }
}

pub struct BannerStyle {
    pub is_error: bool,
}
impl container::StyleSheet for BannerStyle {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        let color = if self.is_error { palette::DANGER } else { palette::ACCENT };
        container::Appearance {
            background: Some(Background::Color(Color { a: 0.12, ..color })),
            text_color: Some(color),
            border: Border {
                color,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        }
    }
}

pub struct PrimaryButtonStyle;
impl button::StyleSheet for PrimaryButtonStyle {
    type Style = Theme;
    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(palette::ACCENT)),
            text_color: Color::WHITE,
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
    fn hovered(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(palette::ACCENT_HOVER)),
            text_color: Color::WHITE,
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
    fn pressed(&self, style: &Self::Style) -> button::Appearance {
        self.active(style)
    }
    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        self.active(style)
    }
}

/// Outlined button for reject, cancel and sign-out.
pub struct DestructiveButtonStyle;
impl button::StyleSheet for DestructiveButtonStyle {
    type Style = Theme;
    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(Color::WHITE)),
            text_color: palette::DANGER,
            border: Border {
                color: palette::DANGER,
                width: 1.0,
                radius: 6.0.into(),
            },
            ..Default::default()
        }
    }
    fn hovered(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(palette::DANGER)),
            text_color: Color::WHITE,
            border: Border {
                color: palette::DANGER,
                width: 1.0,
                radius: 6.0.into(),
            },
            ..Default::default()
        }
    }
    fn pressed(&self, style: &Self::Style) -> button::Appearance {
        self.active(style)
    }
    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        self.active(style)
    }
}

/// One day in the month grid.
pub struct DayCellStyle {
    pub is_selected: bool,
    pub has_appointments: bool,
}
impl button::StyleSheet for DayCellStyle {
    type Style = Theme;
    fn active(&self, _style: &Self::Style) -> button::Appearance {
        let (background, text_color) = if self.is_selected {
            (Some(Background::Color(palette::ACCENT)), Color::WHITE)
        } else if self.has_appointments {
            (
                Some(Background::Color(Color::from_rgba(0.45, 0.55, 0.50, 0.2))),
                palette::ACCENT_HOVER,
            )
        } else {
            (None, palette::TEXT_MAIN)
        };

        button::Appearance {
            background,
            text_color,
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            shadow: Shadow::default(),
            ..Default::default()
        }
    }
    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        let base = self.active(style);
        if self.is_selected {
            return base;
        }
        button::Appearance {
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.08),
                offset: Vector::new(0.0, 1.0),
                blur_radius: 3.0,
            },
            border: Border {
                color: palette::ACCENT,
                width: 1.0,
                radius: 6.0.into(),
            },
            ..base
        }
    }
    fn pressed(&self, style: &Self::Style) -> button::Appearance {
        self.active(style)
    }
    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        self.active(style)
    }
}
