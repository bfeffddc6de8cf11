//! Conflict records.
//!
//! A conflict is an audit entry produced when a committed slot no longer
//! matches the availability of its instructor or resources. Entries are
//! immutable once created.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An availability conflict detected for a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConflict {
    /// Affected course.
    pub course_id: String,
    /// Type of conflict.
    pub conflict_type: ConflictType,
    /// Human-readable description.
    pub description: String,
    /// Detection time.
    pub timestamp: DateTime<Utc>,
}

/// Classification of conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    /// Course holds no committed slot.
    NoSchedule,
    /// Instructor cannot teach at the committed slot.
    InstructorUnavailable,
    /// A required resource is closed at the committed slot.
    ResourceUnavailable,
}

impl ConflictType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoSchedule => "no_schedule",
            Self::InstructorUnavailable => "instructor_unavailable",
            Self::ResourceUnavailable => "resource_unavailable",
        }
    }
}

impl fmt::Display for ConflictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ScheduleConflict {
    fn new(
        course_id: impl Into<String>,
        conflict_type: ConflictType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            conflict_type,
            description: description.into(),
            timestamp: Utc::now(),
        }
    }

    /// Course has no committed slot.
    pub fn no_schedule(course_id: impl Into<String>) -> Self {
        Self::new(
            course_id,
            ConflictType::NoSchedule,
            "Course has no schedule assigned",
        )
    }

    /// Instructor is not available at the committed slot.
    pub fn instructor_unavailable(
        course_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(course_id, ConflictType::InstructorUnavailable, message)
    }

    /// Resource is not available at the committed slot.
    pub fn resource_unavailable(course_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(course_id, ConflictType::ResourceUnavailable, message)
    }
}
