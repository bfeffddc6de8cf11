//! Committed course placement.
//!
//! Binds one course, its instructor, one room and one slot. Records are
//! created only by a validated `Schedule::add_course` (or the explicit
//! bulk-load bypass) and live until `Schedule::remove_course`.

use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Course, Instructor, Resource, TimeSlot};

/// A course committed to a slot.
///
/// Identity is the course id: equality and hashing ignore every other
/// field, so one course can hold at most one record in any set or map.
#[derive(Debug, Clone, Serialize)]
pub struct CourseSchedule {
    pub course: Course,
    pub instructor: Instructor,
    pub resource: Resource,
    pub slot: TimeSlot,
    /// When the record was committed.
    pub scheduled_at: DateTime<Utc>,
}

impl CourseSchedule {
    /// Creates a record stamped with the current time.
    pub fn new(course: Course, instructor: Instructor, resource: Resource, slot: TimeSlot) -> Self {
        Self {
            course,
            instructor,
            resource,
            slot,
            scheduled_at: Utc::now(),
        }
    }

    /// Course id (record identity).
    #[inline]
    pub fn id(&self) -> &str {
        &self.course.id
    }

    #[inline]
    pub fn instructor_id(&self) -> &str {
        &self.instructor.id
    }

    #[inline]
    pub fn resource_id(&self) -> &str {
        &self.resource.id
    }

    /// Whether the two records share an instant.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.slot.overlaps(&other.slot)
    }
}

impl PartialEq for CourseSchedule {
    fn eq(&self, other: &Self) -> bool {
        self.course.id == other.course.id
    }
}

impl Eq for CourseSchedule {}

impl Hash for CourseSchedule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.course.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::collections::HashSet;

    fn record(course_id: &str, start: &str, end: &str) -> CourseSchedule {
        CourseSchedule::new(
            Course::new(course_id, "Course", "I1"),
            Instructor::new("I1", "Dr. Smith"),
            Resource::new("R1", 30),
            TimeSlot::parse(Weekday::Mon, start, end).unwrap(),
        )
    }

    #[test]
    fn test_identity_by_course_id() {
        let a = record("C1", "09:00", "10:00");
        let b = record("C1", "14:00", "15:00");
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
        assert!(set.insert(record("C2", "09:00", "10:00")));
    }

    #[test]
    fn test_overlap() {
        let a = record("C1", "09:00", "10:00");
        let b = record("C2", "09:30", "10:30");
        let c = record("C3", "10:00", "11:00");
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert_eq!(a.instructor_id(), "I1");
        assert_eq!(a.resource_id(), "R1");
    }
}
