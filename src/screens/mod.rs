pub mod attendance;
pub mod courses;
pub mod nav_menu;
pub mod settings;

pub use attendance::attendance_screen;
pub use courses::courses_screen;
pub use nav_menu::nav_menu;
pub use settings::settings_screen;

use iced::{Alignment, Color, Element, Length};
use iced::widget::container::{background, bordered_box};
use iced::widget::{button, horizontal_space, Column, Container, Row, Text};
use crate::app::{App, Message};

/// Dimmed full-screen overlay asking to confirm the pending action.
pub fn confirm_overlay(app: &App) -> Option<Element<Message>> {
    let confirmation = app.pending_confirmation.as_ref()?;

    let dialog = Column::new()
        .spacing(20)
        .push(Text::new(confirmation.prompt()).size(20))
        .push(
            Row::new()
                .spacing(10)
                .push(horizontal_space())
                .push(button("Cancel").on_press(Message::CancelPending))
                .push(button("Confirm").style(button::danger).on_press(Message::ConfirmPending))
        );

    let dialog_container = Container::new(dialog)
        .style(move |_| bordered_box(&app.theme))
        .padding(20)
        .width(Length::Fixed(420.0));

    let overlay = Container::new(Container::new(dialog_container).center(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| background(Color { r: 0.0, g: 0.0, b: 0.0, a: 0.7 }));
    Some(overlay.into())
}

/// Error line with a dismiss button, or nothing.
pub fn error_banner(app: &App) -> Option<Element<Message>> {
    let message = app.error_message.as_ref()?;
    let banner = Row::new()
        .spacing(10)
        .align_y(Alignment::Center)
        .push(Text::new(message).size(16).color(Color::from_rgb8(204, 36, 29)))
        .push(horizontal_space())
        .push(button("x").on_press(Message::DismissError));
    Some(Container::new(banner).padding(5).width(Length::Fill).into())
}
