pub mod attendance;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;

pub use error::{Error, Result};
pub use model::{AttendanceRecord, AttendanceStatus, Course, CourseDraft, Student};
pub use store::CourseStore;
