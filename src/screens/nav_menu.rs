use iced::{widget::{button, column}, Alignment, Element, Length, Renderer, Theme};
use iced::widget::{text, vertical_space, Container, Row};
use iced_font_awesome::fa_icon_solid;
use crate::app::{Message, App};

fn icon_button_content<'a>(
    icon_element: impl Into<Element<'a, Message, Theme, Renderer>>,
    label: &'a str,
) -> Row<'a, Message> {
    Row::new()
        .align_y(Alignment::Center)
        .spacing(5)
        .push(icon_element)
        .push(text(label))
}

pub fn nav_menu(app: &App) -> Container<Message> {
    let content = column![
        button(icon_button_content(
            fa_icon_solid("graduation-cap").style(move |_| text::base(&app.theme)),
            "Courses"
        )).on_press(Message::GoToCourses).width(Length::Fill),
        vertical_space(),
        button(icon_button_content(
            fa_icon_solid("gear").style(move |_| text::base(&app.theme)),
            "Settings"
        )).on_press(Message::GoToSettings).width(Length::Fill),
    ]
        .spacing(10);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(10)
}
