use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

// Field names match the persisted JSON layout (camelCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub time_slot: String,
    #[serde(default)]
    pub total_hours: u32,
    #[serde(default)]
    pub completed_hours: u32,
    #[serde(default)]
    pub remaining_hours: u32,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub attendance_records: Vec<AttendanceRecord>,
}

impl Course {
    pub fn student(&self, student_id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == student_id)
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub total_hours: u32,
    #[serde(default)]
    pub completed_hours: u32,
    #[serde(default)]
    pub remaining_hours: u32,
}

impl Student {
    /// A freshly enrolled student with no attended hours.
    pub fn new(id: String, name: String, total_hours: u32) -> Self {
        Self {
            id,
            name,
            total_hours,
            completed_hours: 0,
            remaining_hours: total_hours,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub date: String,
    pub student_id: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub const ALL: &'static [AttendanceStatus] = &[
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Late,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
        }
    }
}

// Label shown in the grid pick lists
impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Late => "Late",
        })
    }
}

impl FromStr for AttendanceStatus {
    type Err = ();

    fn from_str(input: &str) -> Result<AttendanceStatus, Self::Err> {
        match input {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            _ => Err(()),
        }
    }
}

/// Editable course fields, as entered in the course form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseDraft {
    pub name: String,
    pub description: String,
    pub time_slot: String,
    pub total_hours: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_serializes_camel_case() {
        let course = Course {
            id: "1".into(),
            name: "Piano".into(),
            description: String::new(),
            time_slot: "Mon 14:00-16:00".into(),
            total_hours: 10,
            completed_hours: 0,
            remaining_hours: 10,
            students: vec![Student::new("s1".into(), "Ann".into(), 10)],
            attendance_records: vec![AttendanceRecord {
                date: "2024-03-01".into(),
                student_id: "s1".into(),
                status: AttendanceStatus::Late,
            }],
        };
        let json = serde_json::to_value(&course).unwrap();
        assert_eq!(json["timeSlot"], "Mon 14:00-16:00");
        assert_eq!(json["remainingHours"], 10);
        assert_eq!(json["attendanceRecords"][0]["studentId"], "s1");
        assert_eq!(json["attendanceRecords"][0]["status"], "late");
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let json = r#"[{"id":"1","name":"Math","description":"","timeSlot":"",
            "totalHours":0,"completedHours":0,"remainingHours":0}]"#;
        let courses: Vec<Course> = serde_json::from_str(json).unwrap();
        assert!(courses[0].students.is_empty());
        assert!(courses[0].attendance_records.is_empty());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("present".parse(), Ok(AttendanceStatus::Present));
        assert_eq!("late".parse(), Ok(AttendanceStatus::Late));
        assert!("excused".parse::<AttendanceStatus>().is_err());
        for status in AttendanceStatus::ALL {
            assert_eq!(status.as_str().parse(), Ok(*status));
        }
    }
}
