//! Derived views over committed state.
//!
//! These are plain serializable records consumed by the rendering and
//! notification layers. Nothing here mutates a schedule.
//!
//! | View | Source |
//! |------|--------|
//! | [`ScheduleSummary`] | counts by day/instructor/resource + pairwise conflicts |
//! | [`ValidationReport`] | error/warning logs + summary |
//! | [`ScheduleExport`] | one flat row per committed record |
//! | [`ConflictReport`] | accumulated availability conflicts |

use std::collections::BTreeMap;

use serde::Serialize;

use super::Schedule;
use crate::models::{day_name, CourseSchedule, ScheduleConflict};

/// Aggregate counts over the committed schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduleSummary {
    pub total_courses: usize,
    /// Day name → record count (days without records omitted).
    pub by_day: BTreeMap<String, usize>,
    /// Instructor id → record count.
    pub by_instructor: BTreeMap<String, usize>,
    /// Resource id → record count.
    pub by_resource: BTreeMap<String, usize>,
    pub conflicts: ConflictSummary,
}

/// Entities with overlapping committed records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConflictSummary {
    pub instructor: Vec<InstructorConflictCount>,
    pub resource: Vec<ResourceConflictCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstructorConflictCount {
    pub instructor_id: String,
    pub conflict_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceConflictCount {
    pub resource_id: String,
    pub conflict_count: usize,
}

impl ScheduleSummary {
    pub(super) fn from_schedule(schedule: &Schedule) -> Self {
        let mut summary = Self {
            total_courses: schedule.len(),
            ..Self::default()
        };

        for record in schedule.courses() {
            *summary
                .by_day
                .entry(day_name(record.slot.day()).to_string())
                .or_insert(0) += 1;
            *summary
                .by_instructor
                .entry(record.instructor_id().to_string())
                .or_insert(0) += 1;
            *summary
                .by_resource
                .entry(record.resource_id().to_string())
                .or_insert(0) += 1;
        }

        for id in schedule.instructor_ids() {
            let count = schedule.check_instructor_conflicts(id).len();
            if count > 0 {
                summary.conflicts.instructor.push(InstructorConflictCount {
                    instructor_id: id.to_string(),
                    conflict_count: count,
                });
            }
        }
        for id in schedule.resource_ids() {
            let count = schedule.check_resource_conflicts(id).len();
            if count > 0 {
                summary.conflicts.resource.push(ResourceConflictCount {
                    resource_id: id.to_string(),
                    conflict_count: count,
                });
            }
        }

        summary
    }

    /// Whether any instructor or resource is double-booked.
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.instructor.is_empty() || !self.conflicts.resource.is_empty()
    }
}

/// Snapshot of schedule validity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub total_courses: usize,
    pub summary: ScheduleSummary,
}

/// Flat export of committed records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleExport {
    pub courses: Vec<ExportedCourse>,
}

/// One committed record, flattened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedCourse {
    pub course_id: String,
    pub course_name: String,
    pub instructor_id: String,
    pub instructor_name: String,
    pub resource_id: String,
    pub resource_name: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: u32,
    pub sessions_per_week: u32,
    /// RFC 3339 commit timestamp.
    pub scheduled_date: String,
}

impl From<&CourseSchedule> for ExportedCourse {
    fn from(record: &CourseSchedule) -> Self {
        Self {
            course_id: record.course.id.clone(),
            course_name: record.course.name.clone(),
            instructor_id: record.instructor.id.clone(),
            instructor_name: record.instructor.name.clone(),
            resource_id: record.resource.id.clone(),
            resource_name: record.resource.label().to_string(),
            day: day_name(record.slot.day()).to_string(),
            start_time: record.slot.start_label(),
            end_time: record.slot.end_label(),
            duration_minutes: record.slot.duration_minutes(),
            sessions_per_week: record.course.sessions_per_week,
            scheduled_date: record.scheduled_at.to_rfc3339(),
        }
    }
}

impl ScheduleExport {
    pub(super) fn from_schedule(schedule: &Schedule) -> Self {
        Self {
            courses: schedule.courses().map(ExportedCourse::from).collect(),
        }
    }
}

/// Aggregate view of a conflict history.
#[derive(Debug, Clone, Serialize)]
pub struct ConflictReport {
    pub total_conflicts: usize,
    /// Conflict type tag → count.
    pub conflicts_by_type: BTreeMap<String, usize>,
    pub details: Vec<ScheduleConflict>,
}

impl ConflictReport {
    /// Builds a report from accumulated conflicts.
    pub fn from_history(history: &[ScheduleConflict]) -> Self {
        let mut conflicts_by_type = BTreeMap::new();
        for conflict in history {
            *conflicts_by_type
                .entry(conflict.conflict_type.to_string())
                .or_insert(0) += 1;
        }
        Self {
            total_conflicts: history.len(),
            conflicts_by_type,
            details: history.to_vec(),
        }
    }
}
