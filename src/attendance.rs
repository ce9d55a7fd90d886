//! Hour aggregation over attendance records.
//!
//! A student's completed hours are the number of distinct dates on which
//! they were marked present. Remaining hours never go below zero.

use std::collections::BTreeSet;
use crate::model::{AttendanceRecord, AttendanceStatus, Student};

pub fn completed_hours(records: &[AttendanceRecord], student_id: &str) -> u32 {
    let present_dates: BTreeSet<&str> = records
        .iter()
        .filter(|r| r.student_id == student_id && r.status == AttendanceStatus::Present)
        .map(|r| r.date.as_str())
        .collect();
    present_dates.len() as u32
}

pub fn remaining_hours(total_hours: u32, completed_hours: u32) -> u32 {
    total_hours.saturating_sub(completed_hours)
}

pub fn recompute_student(student: &Student, records: &[AttendanceRecord]) -> Student {
    let completed = completed_hours(records, &student.id);
    Student {
        completed_hours: completed,
        remaining_hours: remaining_hours(student.total_hours, completed),
        ..student.clone()
    }
}

pub fn recompute_all(students: &[Student], records: &[AttendanceRecord]) -> Vec<Student> {
    students
        .iter()
        .map(|s| recompute_student(s, records))
        .collect()
}

/// Distinct record dates, ascending. These are the grid columns.
pub fn attendance_dates(records: &[AttendanceRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.date.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn status_for(records: &[AttendanceRecord], student_id: &str, date: &str) -> Option<AttendanceStatus> {
    records
        .iter()
        .find(|r| r.student_id == student_id && r.date == date)
        .map(|r| r.status)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, student_id: &str, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            date: date.to_string(),
            student_id: student_id.to_string(),
            status,
        }
    }

    #[test]
    fn counts_only_present_dates_for_student() {
        let records = vec![
            record("2024-01-01", "a", AttendanceStatus::Present),
            record("2024-01-02", "a", AttendanceStatus::Absent),
            record("2024-01-03", "a", AttendanceStatus::Late),
            record("2024-01-04", "a", AttendanceStatus::Present),
            record("2024-01-01", "b", AttendanceStatus::Present),
        ];
        assert_eq!(completed_hours(&records, "a"), 2);
        assert_eq!(completed_hours(&records, "b"), 1);
        assert_eq!(completed_hours(&records, "c"), 0);
    }

    #[test]
    fn duplicate_present_dates_count_once() {
        let records = vec![
            record("2024-01-01", "a", AttendanceStatus::Present),
            record("2024-01-01", "a", AttendanceStatus::Present),
        ];
        assert_eq!(completed_hours(&records, "a"), 1);
    }

    #[test]
    fn remaining_never_negative() {
        assert_eq!(remaining_hours(3, 5), 0);
        assert_eq!(remaining_hours(5, 3), 2);
        assert_eq!(remaining_hours(0, 0), 0);
    }

    #[test]
    fn recompute_student_keeps_identity() {
        let student = Student::new("a".into(), "Ann".into(), 2);
        let records = vec![
            record("2024-01-01", "a", AttendanceStatus::Present),
            record("2024-01-02", "a", AttendanceStatus::Present),
            record("2024-01-03", "a", AttendanceStatus::Present),
        ];
        let updated = recompute_student(&student, &records);
        assert_eq!(updated.id, "a");
        assert_eq!(updated.name, "Ann");
        assert_eq!(updated.total_hours, 2);
        assert_eq!(updated.completed_hours, 3);
        assert_eq!(updated.remaining_hours, 0);
    }

    #[test]
    fn dates_are_distinct_and_sorted() {
        let records = vec![
            record("2024-02-01", "a", AttendanceStatus::Present),
            record("2024-01-15", "b", AttendanceStatus::Absent),
            record("2024-02-01", "b", AttendanceStatus::Late),
        ];
        assert_eq!(attendance_dates(&records), vec!["2024-01-15", "2024-02-01"]);
    }

    #[test]
    fn status_lookup() {
        let records = vec![record("2024-02-01", "a", AttendanceStatus::Late)];
        assert_eq!(status_for(&records, "a", "2024-02-01"), Some(AttendanceStatus::Late));
        assert_eq!(status_for(&records, "a", "2024-02-02"), None);
    }
}
