use iced::Task;
use tracing::{error, info, warn};
use attendance_app::config::{backup_storage_now, save_config, theme_from_str, theme_to_str};
use attendance_app::store::parse_batch_students;
use attendance_app::{CourseDraft, Error, Result};
use crate::app::state::{Confirmation, Screen};
use super::{App, Message};

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::GoToCourses => {
                self.current_screen = Screen::CoursesList;
                self.clear_attendance_state();
            }
            Message::GoToSettings => {
                self.current_screen = Screen::Settings;
                self.clear_attendance_state();
            }
            Message::OpenCourse(course_id) => {
                self.clear_attendance_state();
                if self.store.course(&course_id).is_some() {
                    self.error_message = None;
                    self.current_screen = Screen::Attendance(course_id);
                } else {
                    warn!(course_id = %course_id, "course no longer exists");
                    self.current_screen = Screen::CoursesList;
                }
            }
            Message::CourseNameChanged(v) => self.course_name = v,
            Message::CourseDescriptionChanged(v) => self.course_description = v,
            Message::CourseTimeSlotChanged(v) => self.course_time_slot = v,
            Message::SubmitCourse => {
                if self.course_name.trim().is_empty() {
                    return Task::none();
                }
                let draft = CourseDraft {
                    name: self.course_name.clone(),
                    description: self.course_description.clone(),
                    time_slot: self.course_time_slot.clone(),
                    // Hours are set per student
                    total_hours: 0,
                };
                let result = match self.editing_course_id.clone() {
                    Some(course_id) => self.store.update_course(&course_id, draft),
                    None => self.store.add_course(draft).map(|_| ()),
                };
                if self.report("save course", result).is_some() {
                    self.clear_course_form();
                }
            }
            Message::StartEditingCourse(course_id) => {
                if let Some(course) = self.store.course(&course_id) {
                    self.course_name = course.name.clone();
                    self.course_description = course.description.clone();
                    self.course_time_slot = course.time_slot.clone();
                    self.editing_course_id = Some(course_id);
                }
            }
            Message::CancelEditingCourse => self.clear_course_form(),
            Message::RequestConfirmation(confirmation) => {
                self.pending_confirmation = Some(confirmation);
            }
            Message::CancelPending => self.pending_confirmation = None,
            Message::ConfirmPending => {
                if let Some(confirmation) = self.pending_confirmation.take() {
                    self.run_confirmed(confirmation);
                }
            }
            Message::StudentNameChanged(v) => self.student_name = v,
            Message::AddStudent => {
                let Some(course_id) = self.current_course_id() else {
                    return Task::none();
                };
                if self.student_name.trim().is_empty() {
                    return Task::none();
                }
                let result = self.store.add_student(&course_id, &self.student_name);
                if self.report("add student", result).is_some() {
                    self.student_name.clear();
                }
            }
            Message::BatchStudentsChanged(v) => self.batch_students = v,
            Message::AddStudentsBatch => {
                let Some(course_id) = self.current_course_id() else {
                    return Task::none();
                };
                let entries = parse_batch_students(&self.batch_students);
                if entries.is_empty() {
                    return Task::none();
                }
                let result = self.store.add_students_batch(&course_id, &entries);
                if self.report("add students", result).is_some() {
                    self.batch_students.clear();
                }
            }
            Message::ChooseDate => self.show_picker = true,
            Message::SubmitDate(date) => {
                self.date = date;
                self.show_picker = false;
            }
            Message::CancelDate => self.show_picker = false,
            Message::AddAttendanceDate => {
                let date = self.picked_date();
                let known = self.current_course().map(|course| self.grid_dates(course).contains(&date));
                if known == Some(false) {
                    self.pending_dates.push(date);
                }
            }
            Message::BatchSetAttendance(status) => {
                let Some(course_id) = self.current_course_id() else {
                    return Task::none();
                };
                let date = self.picked_date();
                let result = self.store.batch_set_attendance(&course_id, &date, status);
                self.report("set attendance", result);
            }
            Message::StatusChanged { student_id, date, status } => {
                let Some(course_id) = self.current_course_id() else {
                    return Task::none();
                };
                let result = self.store.record_attendance(&course_id, &date, &student_id, status);
                self.report("record attendance", result);
            }
            Message::StartEditingTotalHours(student_id) => {
                let total = self
                    .current_course()
                    .and_then(|c| c.student(&student_id))
                    .map(|s| s.total_hours);
                if let Some(total) = total {
                    self.editing_total_hours = total.to_string();
                    self.editing_student_id = Some(student_id);
                }
            }
            Message::EditTotalHoursChanged(v) => {
                if v.chars().all(|c| c.is_ascii_digit()) {
                    self.editing_total_hours = v;
                }
            }
            Message::SaveTotalHours => {
                let (Some(course_id), Some(student_id)) = (self.current_course_id(), self.editing_student_id.clone()) else {
                    return Task::none();
                };
                let total_hours = self.editing_total_hours.parse().unwrap_or(0);
                let result = self.store.update_student_total_hours(&course_id, &student_id, total_hours);
                if self.report("update total hours", result).is_some() {
                    self.editing_student_id = None;
                    self.editing_total_hours.clear();
                }
            }
            Message::CancelEditingTotalHours => {
                self.editing_student_id = None;
                self.editing_total_hours.clear();
            }
            Message::ToggleStudentSelected(student_id) => {
                toggle(&mut self.selected_students, student_id);
            }
            Message::ToggleAllStudents(checked) => {
                self.selected_students = match (checked, self.current_course()) {
                    (true, Some(course)) => course.students.iter().map(|s| s.id.clone()).collect(),
                    _ => vec![],
                };
            }
            Message::ToggleDateSelected(date) => {
                toggle(&mut self.selected_dates, date);
            }
            Message::ThemeSelected(name) => {
                if let Some(theme) = theme_from_str(name) {
                    self.config.theme_name = theme_to_str(&theme).to_string();
                    if let Err(e) = save_config(&self.config) {
                        error!(error = %e, "failed to save config");
                    }
                    self.theme = theme;
                }
            }
            Message::BackupNow => {
                let result = backup_storage_now(&self.config.storage_path(), &self.config.backup_folder());
                if let Some(path) = self.report("backup", result) {
                    info!(path = %path.display(), "storage backed up");
                    self.status_message = Some(format!("Backup saved to {}", path.display()));
                }
            }
            Message::DismissError => self.error_message = None,
        }
        Task::none()
    }

    fn run_confirmed(&mut self, confirmation: Confirmation) {
        match confirmation {
            Confirmation::DeleteCourse(course_id) => {
                let result = self.store.delete_course(&course_id);
                if self.report("delete course", result).is_some()
                    && self.editing_course_id.as_deref() == Some(course_id.as_str())
                {
                    self.clear_course_form();
                }
            }
            Confirmation::DeleteSelectedStudents => {
                let Some(course_id) = self.current_course_id() else { return };
                let selected = std::mem::take(&mut self.selected_students);
                if self.editing_student_id.as_ref().is_some_and(|id| selected.contains(id)) {
                    self.editing_student_id = None;
                }
                let result = self.store.delete_students(&course_id, &selected);
                self.report("delete students", result);
            }
            Confirmation::DeleteSelectedDates => {
                let Some(course_id) = self.current_course_id() else { return };
                let selected = std::mem::take(&mut self.selected_dates);
                let result = self.store.delete_dates(&course_id, &selected);
                if self.report("delete dates", result).is_some() {
                    self.pending_dates.retain(|d| !selected.contains(d));
                }
            }
            Confirmation::ResetData => {
                let result = self.store.reset();
                if self.report("reset data", result).is_some() {
                    self.clear_course_form();
                    self.status_message = Some("All data cleared. Add courses again.".to_string());
                }
            }
        }
    }

    fn current_course_id(&self) -> Option<String> {
        match &self.current_screen {
            Screen::Attendance(course_id) => Some(course_id.clone()),
            _ => None,
        }
    }

    /// Logs a failed operation and shows it on screen. A course that vanished
    /// sends the user back to the list.
    fn report<T>(&mut self, action: &str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.error_message = None;
                Some(value)
            }
            Err(e) => {
                if e.is_not_found() {
                    warn!(action, error = %e, "stale id");
                } else {
                    error!(action, error = %e, "operation failed");
                }
                if matches!(e, Error::CourseNotFound(_)) && matches!(self.current_screen, Screen::Attendance(_)) {
                    self.current_screen = Screen::CoursesList;
                    self.clear_attendance_state();
                }
                self.error_message = Some(format!("Could not {action}: {e}"));
                None
            }
        }
    }
}

fn toggle(selection: &mut Vec<String>, id: String) {
    if let Some(index) = selection.iter().position(|s| *s == id) {
        selection.remove(index);
    } else {
        selection.push(id);
    }
}
