use iced::{Alignment, Length};
use iced::widget::container::bordered_box;
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{
    button, checkbox, horizontal_space, pick_list, text_input, Button, Column, Container, Row,
    Scrollable, Stack, Text,
};
use iced_aw::date_picker;
use attendance_app::attendance::status_for;
use attendance_app::{AttendanceStatus, Course, Student};
use crate::app::{App, Message};
use crate::app::state::Confirmation;
use crate::screens::{confirm_overlay, error_banner};

const SELECT_WIDTH: f32 = 30.0;
const NAME_WIDTH: f32 = 340.0;
const DATE_WIDTH: f32 = 140.0;

fn course_info(course: &Course) -> Column<'_, Message> {
    let mut info = Column::new()
        .spacing(5)
        .push(Text::new(&course.name).size(26));
    if !course.description.is_empty() {
        info = info.push(Text::new(format!("Description: {}", course.description)).size(16));
    }
    info.push(Text::new(format!("Time slot: {}", course.time_slot)).size(16))
}

fn student_inputs(app: &App) -> Column<Message> {
    Column::new()
        .spacing(10)
        .push(
            Row::new()
                .spacing(10)
                .align_y(Alignment::Center)
                .push(
                    text_input("Student name", &app.student_name)
                        .on_input(Message::StudentNameChanged)
                        .on_submit(Message::AddStudent)
                        .padding(10)
                        .width(Length::Fixed(350.0))
                )
                .push(button("Add student").on_press(Message::AddStudent))
        )
        .push(
            Row::new()
                .spacing(10)
                .align_y(Alignment::Center)
                .push(
                    text_input("Batch add, name:hours separated by commas, e.g. Ann:15,Bob:12", &app.batch_students)
                        .on_input(Message::BatchStudentsChanged)
                        .on_submit(Message::AddStudentsBatch)
                        .padding(10)
                        .width(Length::Fill)
                )
                .push(button("Batch add").on_press(Message::AddStudentsBatch))
        )
}

fn date_controls(app: &App) -> Row<Message> {
    let picker_button = Button::new(Text::new("Pick date")).on_press(Message::ChooseDate);
    Row::new()
        .spacing(10)
        .align_y(Alignment::Center)
        .push(Text::new(app.picked_date()).size(18))
        .push(date_picker(app.show_picker, app.date, picker_button, Message::CancelDate, Message::SubmitDate))
        .push(button("Add attendance date").on_press(Message::AddAttendanceDate))
}

fn batch_actions(app: &App) -> Container<Message> {
    let status_buttons = Row::new()
        .spacing(10)
        .push(Text::new(format!("For {}:", app.picked_date())))
        .push(button("All present").on_press(Message::BatchSetAttendance(AttendanceStatus::Present)))
        .push(button("All absent").style(button::danger).on_press(Message::BatchSetAttendance(AttendanceStatus::Absent)))
        .push(button("All late").style(button::secondary).on_press(Message::BatchSetAttendance(AttendanceStatus::Late)));

    let delete_students = (!app.selected_students.is_empty())
        .then(|| Message::RequestConfirmation(Confirmation::DeleteSelectedStudents));
    let delete_dates = (!app.selected_dates.is_empty())
        .then(|| Message::RequestConfirmation(Confirmation::DeleteSelectedDates));
    let delete_buttons = Row::new()
        .spacing(10)
        .push(
            button(Text::new(format!("Delete selected students ({})", app.selected_students.len())))
                .style(button::danger)
                .on_press_maybe(delete_students)
        )
        .push(
            button(Text::new(format!("Delete selected dates ({})", app.selected_dates.len())))
                .style(button::danger)
                .on_press_maybe(delete_dates)
        );

    Container::new(
        Column::new()
            .spacing(10)
            .push(Text::new("Batch actions").size(18))
            .push(status_buttons)
            .push(delete_buttons)
    )
        .padding(15)
        .width(Length::Fill)
        .style(move |_| bordered_box(&app.theme))
}

fn hours_cell<'a>(app: &'a App, student: &'a Student) -> Column<'a, Message> {
    let hours_row = if app.editing_student_id.as_deref() == Some(student.id.as_str()) {
        Row::new()
            .spacing(5)
            .align_y(Alignment::Center)
            .push(
                text_input("0", &app.editing_total_hours)
                    .on_input(Message::EditTotalHoursChanged)
                    .on_submit(Message::SaveTotalHours)
                    .size(14)
                    .width(Length::Fixed(60.0))
            )
            .push(button(Text::new("Save").size(12)).on_press(Message::SaveTotalHours))
            .push(button(Text::new("Cancel").size(12)).on_press(Message::CancelEditingTotalHours))
    } else {
        Row::new()
            .spacing(5)
            .align_y(Alignment::Center)
            .push(Text::new(format!("Total: {}", student.total_hours)).size(14))
            .push(
                button(Text::new("Edit").size(12))
                    .style(button::secondary)
                    .on_press(Message::StartEditingTotalHours(student.id.clone()))
            )
            .push(Text::new(format!(
                "| Completed: {} | Remaining: {}",
                student.completed_hours, student.remaining_hours
            )).size(14))
    };

    Column::new()
        .spacing(4)
        .push(Text::new(&student.name).size(18))
        .push(hours_row)
}

fn attendance_grid<'a>(app: &'a App, course: &'a Course, dates: &[String]) -> Column<'a, Message> {
    let all_selected = !course.students.is_empty() && app.selected_students.len() == course.students.len();

    let mut header = Row::new()
        .spacing(10)
        .align_y(Alignment::Center)
        .push(
            Container::new(checkbox("", all_selected).on_toggle(Message::ToggleAllStudents))
                .width(Length::Fixed(SELECT_WIDTH))
        )
        .push(Text::new("Student").size(18).width(Length::Fixed(NAME_WIDTH)));
    for date in dates {
        let date_for_toggle = date.clone();
        header = header.push(
            Row::new()
                .spacing(5)
                .align_y(Alignment::Center)
                .width(Length::Fixed(DATE_WIDTH))
                .push(
                    checkbox("", app.selected_dates.contains(date))
                        .on_toggle(move |_| Message::ToggleDateSelected(date_for_toggle.clone()))
                )
                .push(Text::new(date.clone()).size(16))
        );
    }

    let mut grid = Column::new().spacing(8).push(header);
    for student in &course.students {
        let student_id = student.id.clone();
        let mut student_row = Row::new()
            .spacing(10)
            .align_y(Alignment::Center)
            .push(
                Container::new(
                    checkbox("", app.selected_students.contains(&student.id))
                        .on_toggle(move |_| Message::ToggleStudentSelected(student_id.clone()))
                )
                    .width(Length::Fixed(SELECT_WIDTH))
            )
            .push(Container::new(hours_cell(app, student)).width(Length::Fixed(NAME_WIDTH)));

        for date in dates {
            let current = status_for(&course.attendance_records, &student.id, date);
            let student_id = student.id.clone();
            let date = date.clone();
            student_row = student_row.push(
                Container::new(
                    pick_list(AttendanceStatus::ALL.to_vec(), current, move |status| Message::StatusChanged {
                        student_id: student_id.clone(),
                        date: date.clone(),
                        status,
                    })
                        .placeholder("Select")
                        .width(Length::Fill)
                )
                    .width(Length::Fixed(DATE_WIDTH))
            );
        }
        grid = grid.push(
            Container::new(student_row)
                .padding(5)
                .style(move |_| bordered_box(&app.theme))
        );
    }
    grid
}

pub fn attendance_screen<'a>(app: &'a App, course: &'a Course) -> Container<'a, Message> {
    let dates = app.grid_dates(course);

    let mut main_column = Column::new()
        .spacing(20)
        .padding(20)
        .width(Length::Fill)
        .push(
            Row::new()
                .align_y(Alignment::Center)
                .push(Text::new("Attendance").size(30))
                .push(horizontal_space())
                .push(button("Back to courses").on_press(Message::GoToCourses))
        )
        .push(course_info(course));

    if let Some(banner) = error_banner(app) {
        main_column = main_column.push(banner);
    }
    main_column = main_column
        .push(student_inputs(app))
        .push(date_controls(app));

    if !dates.is_empty() {
        main_column = main_column.push(batch_actions(app));
    }

    if course.students.is_empty() {
        main_column = main_column.push(
            Container::new(Text::new("Add students to this course first.").size(18))
                .padding(20)
                .width(Length::Fill)
                .style(move |_| bordered_box(&app.theme))
        );
    } else {
        main_column = main_column.push(
            Scrollable::new(attendance_grid(app, course, &dates))
                .direction(Direction::Horizontal(Scrollbar::default()))
                .width(Length::Fill)
        );
    }

    let base_ui = Container::new(Scrollable::new(main_column).height(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill);

    let mut ui_stack = Stack::new().push(base_ui);
    if let Some(overlay) = confirm_overlay(app) {
        ui_stack = ui_stack.push(overlay);
    }
    Container::new(ui_stack)
        .width(Length::Fill)
        .height(Length::Fill)
}
