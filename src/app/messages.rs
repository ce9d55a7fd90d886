use iced_aw::date_picker::Date;
use attendance_app::AttendanceStatus;
use crate::app::state::Confirmation;

#[derive(Debug, Clone)]
pub enum Message {
    GoToCourses,
    GoToSettings,
    OpenCourse(String),
    //
    CourseNameChanged(String),
    CourseDescriptionChanged(String),
    CourseTimeSlotChanged(String),
    SubmitCourse,
    StartEditingCourse(String),
    CancelEditingCourse,
    //
    RequestConfirmation(Confirmation),
    ConfirmPending,
    CancelPending,
    // Attendance grid
    StudentNameChanged(String),
    AddStudent,
    BatchStudentsChanged(String),
    AddStudentsBatch,
    ChooseDate,
    SubmitDate(Date),
    CancelDate,
    AddAttendanceDate,
    BatchSetAttendance(AttendanceStatus),
    StatusChanged {
        student_id: String,
        date: String,
        status: AttendanceStatus,
    },
    StartEditingTotalHours(String),
    EditTotalHoursChanged(String),
    SaveTotalHours,
    CancelEditingTotalHours,
    ToggleStudentSelected(String),
    ToggleAllStudents(bool),
    ToggleDateSelected(String),
    //
    ThemeSelected(&'static str),
    BackupNow,
    DismissError,
}
