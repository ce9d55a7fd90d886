use iced::{widget::{button, column, text, Container, vertical_space}, Length, Center, Theme};
use iced::widget::pick_list;
use attendance_app::config::theme_to_str;
use crate::app::{App, Message};

pub fn settings_screen(app: &App) -> Container<Message> {
    let current_name = theme_to_str(&app.theme);
    let theme_names: Vec<&'static str> = Theme::ALL.iter().map(theme_to_str).collect();
    let storage_path = app.config.storage_path();
    let content = column![
        text("Settings").size(30),
        vertical_space(),
        pick_list(theme_names, Some(current_name), Message::ThemeSelected)
            .placeholder("Choose a theme"),
        text(format!("Data file: {}", storage_path.display())).size(16),
        button("Back up storage now").on_press(Message::BackupNow),
        text(app.status_message.clone().unwrap_or_default()).size(16),
        text(app.error_message.clone().unwrap_or_default()).size(16),
    ]
        .spacing(15)
        .align_x(Center);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(40)
}
