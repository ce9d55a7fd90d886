use iced::{
    widget::{Button, Column, Container, Row, Stack, Text, TextInput, Scrollable},
    Alignment, Length
};
use iced::widget::container::bordered_box;
use iced::widget::{button, horizontal_space, row, text};
use attendance_app::Course;
use crate::app::{App, Message};
use crate::app::state::Confirmation;
use crate::screens::{confirm_overlay, error_banner};

fn headrbar(course: &Course) -> Row<'static, Message> {
    row![
        text(course.name.clone()).size(24),
        horizontal_space(),
        row![
            button("Open").on_press(Message::OpenCourse(course.id.clone())),
            button("Edit").on_press(Message::StartEditingCourse(course.id.clone())),
            button("Delete")
                .style(button::danger)
                .on_press(Message::RequestConfirmation(Confirmation::DeleteCourse(course.id.clone()))),
        ].spacing(10),
    ]
        .width(Length::Fill)
        .align_y(Alignment::Center)
}

fn content(course: &Course) -> Column<'static, Message> {
    let mut content_col = Column::new()
        .spacing(5)
        .push(Text::new(format!("Time slot: {}", course.time_slot)).size(18))
        .push(Text::new(format!(
            "Total hours: {} | Completed: {} | Remaining: {}",
            course.total_hours, course.completed_hours, course.remaining_hours
        )).size(16))
        .push(Text::new(format!("Students: {}", course.students.len())).size(16));
    if !course.description.is_empty() {
        content_col = content_col.push(Text::new(course.description.clone()).size(16));
    }
    content_col.padding(10)
}

fn course_form(app: &App) -> Container<Message> {
    let is_editing = app.editing_course_id.is_some();
    let title = if is_editing { "Edit course" } else { "Add course" };
    let submit_text = if is_editing { "Save changes" } else { "Add course" };

    let mut buttons = Row::new()
        .spacing(10)
        .push(Button::new(Text::new(submit_text)).on_press(Message::SubmitCourse));
    if is_editing {
        buttons = buttons.push(Button::new(Text::new("Cancel")).on_press(Message::CancelEditingCourse));
    }

    let form = Column::new()
        .spacing(10)
        .push(Text::new(title).size(22))
        .push(
            TextInput::new("Course name", &app.course_name)
                .on_input(Message::CourseNameChanged)
                .on_submit(Message::SubmitCourse)
                .padding(10)
        )
        .push(
            TextInput::new("Description", &app.course_description)
                .on_input(Message::CourseDescriptionChanged)
                .padding(10)
        )
        .push(
            TextInput::new("Time slot, e.g. Mon 14:00-16:00", &app.course_time_slot)
                .on_input(Message::CourseTimeSlotChanged)
                .padding(10)
        )
        .push(buttons);

    Container::new(form)
        .padding(15)
        .width(Length::Fill)
        .style(move |_| bordered_box(&app.theme))
}

pub fn courses_screen(app: &App) -> Container<Message> {
    let mut courses_column = Column::new().spacing(15).padding(20);

    courses_column = courses_column.push(
        Row::new()
            .align_y(Alignment::Center)
            .push(Text::new("Courses").size(30))
            .push(horizontal_space())
            .push(
                button("Reset data")
                    .style(button::danger)
                    .on_press(Message::RequestConfirmation(Confirmation::ResetData))
            )
    );
    if let Some(banner) = error_banner(app) {
        courses_column = courses_column.push(banner);
    }
    if let Some(status) = &app.status_message {
        courses_column = courses_column.push(Text::new(status).size(16));
    }
    courses_column = courses_column
        .push(course_form(app))
        .push(Text::new("Course list").size(22));

    if app.store.courses().is_empty() {
        courses_column = courses_column.push(Text::new("No courses yet.").size(16));
    }
    for course in app.store.courses() {
        let course_content = Container::new(
            Column::new()
                .push(Container::new(headrbar(course)).padding(10))
                .push(content(course))
        )
            .style(move |_| bordered_box(&app.theme))
            .padding(5)
            .width(Length::Fill);
        courses_column = courses_column.push(course_content);
    }

    let scrollable_courses = Scrollable::new(courses_column)
        .width(Length::Fill)
        .height(Length::Fill);

    let base_ui = Container::new(scrollable_courses)
        .align_y(Alignment::Start)
        .width(Length::Fill)
        .height(Length::Fill);

    let mut ui_stack = Stack::new().push(base_ui);
    if let Some(overlay) = confirm_overlay(app) {
        ui_stack = ui_stack.push(overlay);
    }
    Container::new(ui_stack)
        .center_x(Length::Fill).center_y(Length::Fill)
}
