use iced::Length;
use iced::widget::{Container, Row};
use crate::app::state::Screen;
use crate::screens::{attendance_screen, courses_screen, nav_menu, settings_screen};
use super::{App, Message};

impl App {
    pub fn view(&self) -> Row<Message> {
        Row::new()
            .spacing(20)
            .push(
                Container::new(nav_menu(self))
                    .width(Length::Fixed(200.0))
                    .height(Length::Fill)
                    .padding(10)
            )
            .push(
                match &self.current_screen {
                    Screen::CoursesList => courses_screen(self),
                    Screen::Attendance(course_id) => match self.store.course(course_id) {
                        Some(course) => attendance_screen(self, course),
                        // Deleted underneath the screen; show the list instead
                        None => courses_screen(self),
                    },
                    Screen::Settings => settings_screen(self),
                }
                    .width(Length::Fill),
            )
    }
}
