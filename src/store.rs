//! The course collection and every mutation on it.
//!
//! Mutations never edit the live collection in place: each one builds the
//! next collection, writes it to storage under [`COURSES_KEY`], and only
//! then swaps it in. A failed write leaves the in-memory state untouched.

use regex::Regex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use crate::attendance::{recompute_all, recompute_student};
use crate::error::{Error, Result};
use crate::model::{AttendanceRecord, AttendanceStatus, Course, CourseDraft, Student};
use crate::storage::KeyValueStorage;

pub const COURSES_KEY: &str = "courses";

/// One `name:hours` entry of a batch enrollment. `hours == 0` means
/// "use the course default".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub name: String,
    pub hours: u32,
}

/// Parses `"Ann:15, Bob:12, Cid"` into batch entries.
pub fn parse_batch_students(text: &str) -> Vec<BatchEntry> {
    let token_re = Regex::new(r"^(.+?):([0-9]+)$").ok();
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| match token_re.as_ref().and_then(|re| re.captures(token)) {
            Some(caps) => BatchEntry {
                name: caps[1].trim().to_string(),
                hours: caps[2].parse().unwrap_or(0),
            },
            None => BatchEntry {
                name: token.to_string(),
                hours: 0,
            },
        })
        .filter(|entry| !entry.name.is_empty())
        .collect()
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

pub struct CourseStore {
    courses: Vec<Course>,
    storage: Box<dyn KeyValueStorage>,
}

impl CourseStore {
    /// Reads the collection from storage. Missing or unreadable data yields
    /// an empty collection; the stored value is left as it is.
    pub fn load(storage: Box<dyn KeyValueStorage>) -> Self {
        let courses = match storage.get_item(COURSES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Course>>(&raw) {
                Ok(courses) => {
                    debug!(count = courses.len(), "courses loaded");
                    courses
                }
                Err(e) => {
                    warn!(error = %e, "stored courses are malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                error!(error = %e, "failed to read storage, starting empty");
                Vec::new()
            }
        };
        Self { courses, storage }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == course_id)
    }

    pub fn storage(&self) -> &dyn KeyValueStorage {
        self.storage.as_ref()
    }

    fn commit(&mut self, next: Vec<Course>) -> Result<()> {
        let json = serde_json::to_string(&next)?;
        self.storage.set_item(COURSES_KEY, &json)?;
        self.courses = next;
        Ok(())
    }

    /// Rebuilds one course with `f` and commits the resulting collection.
    fn replace_course<F>(&mut self, course_id: &str, f: F) -> Result<()>
    where
        F: FnOnce(&Course) -> Result<Course>,
    {
        let current = self
            .course(course_id)
            .ok_or_else(|| Error::CourseNotFound(course_id.to_string()))?;
        let updated = f(current)?;
        let next = self
            .courses
            .iter()
            .map(|c| if c.id == course_id { updated.clone() } else { c.clone() })
            .collect();
        self.commit(next)
    }

    pub fn add_course(&mut self, draft: CourseDraft) -> Result<String> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(Error::invalid_input("course name is empty"));
        }
        let course = Course {
            id: new_id(),
            name: name.to_string(),
            description: draft.description,
            time_slot: draft.time_slot,
            total_hours: draft.total_hours,
            completed_hours: 0,
            remaining_hours: draft.total_hours,
            students: Vec::new(),
            attendance_records: Vec::new(),
        };
        let id = course.id.clone();
        let mut next = self.courses.clone();
        next.push(course);
        self.commit(next)?;
        info!(course_id = %id, "course added");
        Ok(id)
    }

    /// Edits name, description and time slot. Hours, students and records
    /// are kept.
    pub fn update_course(&mut self, course_id: &str, draft: CourseDraft) -> Result<()> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::invalid_input("course name is empty"));
        }
        self.replace_course(course_id, |course| {
            Ok(Course {
                name,
                description: draft.description,
                time_slot: draft.time_slot,
                ..course.clone()
            })
        })?;
        info!(course_id, "course updated");
        Ok(())
    }

    pub fn delete_course(&mut self, course_id: &str) -> Result<()> {
        if self.course(course_id).is_none() {
            return Err(Error::CourseNotFound(course_id.to_string()));
        }
        let next = self
            .courses
            .iter()
            .filter(|c| c.id != course_id)
            .cloned()
            .collect();
        self.commit(next)?;
        info!(course_id, "course deleted");
        Ok(())
    }

    pub fn add_student(&mut self, course_id: &str, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::invalid_input("student name is empty"));
        }
        let id = new_id();
        self.replace_course(course_id, |course| {
            let mut students = course.students.clone();
            students.push(Student::new(id.clone(), name.to_string(), course.total_hours));
            Ok(Course {
                students,
                ..course.clone()
            })
        })?;
        info!(course_id, student_id = %id, "student added");
        Ok(id)
    }

    /// Enrolls several students at once. Returns how many were added.
    pub fn add_students_batch(&mut self, course_id: &str, entries: &[BatchEntry]) -> Result<usize> {
        let entries: Vec<&BatchEntry> = entries.iter().filter(|e| !e.name.trim().is_empty()).collect();
        if entries.is_empty() {
            return Ok(0);
        }
        self.replace_course(course_id, |course| {
            let mut students = course.students.clone();
            students.extend(entries.iter().map(|entry| {
                let hours = if entry.hours > 0 { entry.hours } else { course.total_hours };
                Student::new(new_id(), entry.name.trim().to_string(), hours)
            }));
            Ok(Course {
                students,
                ..course.clone()
            })
        })?;
        info!(course_id, count = entries.len(), "students added in batch");
        Ok(entries.len())
    }

    /// Sets one student's status on one date, replacing an existing record
    /// for the same date in place.
    pub fn record_attendance(
        &mut self,
        course_id: &str,
        date: &str,
        student_id: &str,
        status: AttendanceStatus,
    ) -> Result<()> {
        if date.trim().is_empty() {
            return Err(Error::invalid_input("attendance date is empty"));
        }
        self.replace_course(course_id, |course| {
            if course.student(student_id).is_none() {
                return Err(Error::StudentNotFound(student_id.to_string()));
            }
            let records = upsert_record(&course.attendance_records, date, student_id, status);
            let students = course
                .students
                .iter()
                .map(|s| if s.id == student_id { recompute_student(s, &records) } else { s.clone() })
                .collect();
            Ok(Course {
                attendance_records: records,
                students,
                ..course.clone()
            })
        })?;
        debug!(course_id, date, student_id, status = status.as_str(), "attendance recorded");
        Ok(())
    }

    /// Sets the same status for every enrolled student on `date`.
    pub fn batch_set_attendance(&mut self, course_id: &str, date: &str, status: AttendanceStatus) -> Result<()> {
        if date.trim().is_empty() {
            return Err(Error::invalid_input("attendance date is empty"));
        }
        self.replace_course(course_id, |course| {
            let records = course
                .students
                .iter()
                .fold(course.attendance_records.clone(), |records, student| {
                    upsert_record(&records, date, &student.id, status)
                });
            let students = recompute_all(&course.students, &records);
            Ok(Course {
                attendance_records: records,
                students,
                ..course.clone()
            })
        })?;
        info!(course_id, date, status = status.as_str(), "attendance set for all students");
        Ok(())
    }

    pub fn update_student_total_hours(&mut self, course_id: &str, student_id: &str, total_hours: u32) -> Result<()> {
        self.replace_course(course_id, |course| {
            if course.student(student_id).is_none() {
                return Err(Error::StudentNotFound(student_id.to_string()));
            }
            let students = course
                .students
                .iter()
                .map(|s| {
                    if s.id == student_id {
                        let edited = Student { total_hours, ..s.clone() };
                        recompute_student(&edited, &course.attendance_records)
                    } else {
                        s.clone()
                    }
                })
                .collect();
            Ok(Course {
                students,
                ..course.clone()
            })
        })?;
        info!(course_id, student_id, total_hours, "student total hours updated");
        Ok(())
    }

    /// Removes students and every record that belongs to them.
    pub fn delete_students(&mut self, course_id: &str, student_ids: &[String]) -> Result<()> {
        if student_ids.is_empty() {
            return Ok(());
        }
        self.replace_course(course_id, |course| {
            let remaining: Vec<Student> = course
                .students
                .iter()
                .filter(|s| !student_ids.contains(&s.id))
                .cloned()
                .collect();
            let records: Vec<AttendanceRecord> = course
                .attendance_records
                .iter()
                .filter(|r| !student_ids.contains(&r.student_id))
                .cloned()
                .collect();
            Ok(Course {
                students: recompute_all(&remaining, &records),
                attendance_records: records,
                ..course.clone()
            })
        })?;
        info!(course_id, count = student_ids.len(), "students deleted");
        Ok(())
    }

    /// Removes every record on the given dates and recomputes all students.
    pub fn delete_dates(&mut self, course_id: &str, dates: &[String]) -> Result<()> {
        if dates.is_empty() {
            return Ok(());
        }
        self.replace_course(course_id, |course| {
            let records: Vec<AttendanceRecord> = course
                .attendance_records
                .iter()
                .filter(|r| !dates.contains(&r.date))
                .cloned()
                .collect();
            Ok(Course {
                students: recompute_all(&course.students, &records),
                attendance_records: records,
                ..course.clone()
            })
        })?;
        info!(course_id, count = dates.len(), "attendance dates deleted");
        Ok(())
    }

    /// Wipes the whole storage, not only the courses key.
    pub fn reset(&mut self) -> Result<()> {
        self.storage.clear()?;
        self.courses.clear();
        warn!("all course data cleared");
        Ok(())
    }
}

fn upsert_record(
    records: &[AttendanceRecord],
    date: &str,
    student_id: &str,
    status: AttendanceStatus,
) -> Vec<AttendanceRecord> {
    let record = AttendanceRecord {
        date: date.to_string(),
        student_id: student_id.to_string(),
        status,
    };
    let mut next = records.to_vec();
    match next.iter().position(|r| r.date == date && r.student_id == student_id) {
        Some(index) => next[index] = record,
        None => next.push(record),
    }
    next
}
