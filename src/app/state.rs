use iced::Theme;
use iced_aw::date_picker::Date;
use attendance_app::attendance::attendance_dates;
use attendance_app::config::Config;
use attendance_app::storage::FileStorage;
use attendance_app::{Course, CourseStore};

pub struct App {
    pub config: Config,
    pub theme: Theme,
    pub store: CourseStore,
    //
    pub current_screen: Screen,
    pub error_message: Option<String>,
    pub status_message: Option<String>,
    pub pending_confirmation: Option<Confirmation>,
    // Course form
    pub course_name: String,
    pub course_description: String,
    pub course_time_slot: String,
    pub editing_course_id: Option<String>,
    // Attendance screen
    pub student_name: String,
    pub batch_students: String,
    pub date: Date,
    pub show_picker: bool,
    pub pending_dates: Vec<String>,
    pub editing_student_id: Option<String>,
    pub editing_total_hours: String,
    pub selected_students: Vec<String>,
    pub selected_dates: Vec<String>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let storage = FileStorage::new(config.storage_path());
        Self::with_store(config, CourseStore::load(Box::new(storage)))
    }

    pub fn with_store(config: Config, store: CourseStore) -> Self {
        Self {
            theme: config.theme(),
            store,
            config,
            current_screen: Screen::default(),
            error_message: None,
            status_message: None,
            pending_confirmation: None,
            course_name: String::new(),
            course_description: String::new(),
            course_time_slot: String::new(),
            editing_course_id: None,
            student_name: String::new(),
            batch_students: String::new(),
            date: Date::today(),
            show_picker: false,
            pending_dates: vec![],
            editing_student_id: None,
            editing_total_hours: String::new(),
            selected_students: vec![],
            selected_dates: vec![],
        }
    }

    pub fn current_course(&self) -> Option<&Course> {
        match &self.current_screen {
            Screen::Attendance(course_id) => self.store.course(course_id),
            _ => None,
        }
    }

    /// Picked date in the `YYYY-MM-DD` form used as record key.
    pub fn picked_date(&self) -> String {
        format_date(&self.date)
    }

    /// Recorded dates plus dates added in the UI that have no records yet.
    pub fn grid_dates(&self, course: &Course) -> Vec<String> {
        let mut dates = attendance_dates(&course.attendance_records);
        for date in &self.pending_dates {
            if !dates.contains(date) {
                dates.push(date.clone());
            }
        }
        dates.sort();
        dates
    }

    pub fn clear_course_form(&mut self) {
        self.course_name.clear();
        self.course_description.clear();
        self.course_time_slot.clear();
        self.editing_course_id = None;
    }

    pub fn clear_attendance_state(&mut self) {
        self.student_name.clear();
        self.batch_students.clear();
        self.show_picker = false;
        self.pending_dates.clear();
        self.editing_student_id = None;
        self.editing_total_hours.clear();
        self.selected_students.clear();
        self.selected_dates.clear();
    }
}

pub fn format_date(date: &Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year, date.month, date.day)
}

/// Destructive actions wait in this state until the user confirms them.
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    DeleteCourse(String),
    DeleteSelectedStudents,
    DeleteSelectedDates,
    ResetData,
}

impl Confirmation {
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirmation::DeleteCourse(_) => "Delete this course?",
            Confirmation::DeleteSelectedStudents => "Delete the selected students?",
            Confirmation::DeleteSelectedDates => "Delete the selected dates?",
            Confirmation::ResetData => "Clear all course data? This cannot be undone.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Screen {
    #[default]
    CoursesList,
    Attendance(String),
    Settings,
}
