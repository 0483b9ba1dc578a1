/// Presentational components
///
/// Pure functions from already-fetched state to widgets. Nothing in here
/// talks to the network; every interaction is a `Message`.

pub mod card;
pub mod home;
pub mod detail;
pub mod doctor;
pub mod identify;

use iced::widget::{button, container, row, text};
use iced::{Background, Border, Color, Element, Shadow, Theme, Vector};

use crate::state::view::Navigation;
use crate::Message;

pub const EMERALD_900: Color = Color { r: 0.024, g: 0.306, b: 0.231, a: 1.0 };
pub const EMERALD_600: Color = Color { r: 0.020, g: 0.588, b: 0.412, a: 1.0 };
pub const EMERALD_300: Color = Color { r: 0.431, g: 0.906, b: 0.718, a: 1.0 };
pub const STONE_50: Color = Color { r: 0.980, g: 0.980, b: 0.976, a: 1.0 };
pub const STONE_500: Color = Color { r: 0.471, g: 0.443, b: 0.424, a: 1.0 };
pub const STONE_800: Color = Color { r: 0.161, g: 0.145, b: 0.141, a: 1.0 };
pub const RED_600: Color = Color { r: 0.863, g: 0.149, b: 0.149, a: 1.0 };

/// White rounded panel with a soft shadow
pub fn panel(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::WHITE)),
        text_color: Some(STONE_800),
        border: Border {
            color: Color::from_rgb(0.906, 0.898, 0.894),
            width: 1.0,
            radius: 16.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.06),
            offset: Vector::new(0.0, 2.0),
            blur_radius: 8.0,
        },
    }
}

/// Dark green banner at the top of each screen
pub fn hero(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(EMERALD_900)),
        text_color: Some(Color::WHITE),
        ..container::Style::default()
    }
}

/// Light page background
pub fn page(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(STONE_50)),
        text_color: Some(STONE_800),
        ..container::Style::default()
    }
}

/// Small pill used for tags and the difficulty badge
pub fn chip(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgb(0.925, 0.992, 0.961))),
        text_color: Some(EMERALD_900),
        border: Border {
            radius: 999.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

/// "← 返回" button shared by every sub-screen
pub fn back_button<'a>() -> Element<'a, Message> {
    button(row![text("←").size(18), text("返回").size(16)].spacing(6))
        .on_press(Message::Navigate(Navigation::Back))
        .padding([8, 16])
        .style(button::secondary)
        .into()
}
