//! The committed timetable.
//!
//! [`Schedule`] is the aggregate root: it owns every committed
//! [`CourseSchedule`] keyed by course id, plus the append-only error and
//! warning logs. All mutation goes through [`Schedule::add_course`],
//! [`Schedule::reschedule`] and [`Schedule::remove_course`]; a failed
//! mutation leaves the committed records untouched.
//!
//! The aggregate is a plain `&mut self` structure. Sharing it between
//! threads is the job of [`SchedulingService`](crate::service::SchedulingService),
//! which wraps each mutation in one exclusive lock.
//!
//! # Complexity
//! Queries are linear scans over committed records; conflict audits are
//! pairwise O(n²) per instructor or resource. Target scale is hundreds
//! of records.

mod report;

pub use report::{
    ConflictReport, ConflictSummary, ExportedCourse, InstructorConflictCount,
    ResourceConflictCount, ScheduleExport, ScheduleSummary, ValidationReport,
};

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Utc, Weekday};
use tracing::{debug, info, warn};

use crate::error::{Result, ScheduleError};
use crate::models::{Course, CourseSchedule, Instructor, Resource, TimeSlot};
use crate::validation::{CommittedState, ConstraintValidator};

/// Pair of committed records whose slots overlap.
pub type ConflictPair<'a> = (&'a CourseSchedule, &'a CourseSchedule);

/// Committed course placements with validation logs.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    records: BTreeMap<String, CourseSchedule>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and commits a placement.
    ///
    /// Runs the full constraint pipeline against the records committed
    /// before this call. On failure nothing is inserted; the error is
    /// appended to the error log and returned. Soft-constraint warnings
    /// are appended to the warning log on success.
    pub fn add_course(
        &mut self,
        course: Course,
        instructor: Instructor,
        resource: Resource,
        slot: TimeSlot,
    ) -> Result<()> {
        if let Some(existing) = self.records.get(&course.id) {
            let err = ScheduleError::AlreadyScheduled {
                course_id: course.id.clone(),
                slot: existing.slot,
            };
            self.errors.push(err.to_string());
            return Err(err);
        }
        self.commit(CourseSchedule::new(course, instructor, resource, slot))
    }

    /// Commits a placement without any validation.
    ///
    /// Intended for bulk loads of previously exported data; follow with
    /// [`check_instructor_conflicts`](Self::check_instructor_conflicts) /
    /// [`check_resource_conflicts`](Self::check_resource_conflicts) to audit.
    /// Returns the record it replaced, if any.
    pub fn load_course(
        &mut self,
        course: Course,
        instructor: Instructor,
        resource: Resource,
        slot: TimeSlot,
    ) -> Option<CourseSchedule> {
        let record = CourseSchedule::new(course, instructor, resource, slot);
        debug!(course_id = %record.id(), slot = %slot, "loading course without validation");
        self.records.insert(record.id().to_string(), record)
    }

    /// Removes a committed course. Returns whether it was present.
    pub fn remove_course(&mut self, course_id: &str) -> bool {
        let removed = self.records.remove(course_id).is_some();
        if removed {
            info!(course_id, "course removed from schedule");
        }
        removed
    }

    /// Moves a committed course to `slot`.
    ///
    /// The new slot is validated against every other committed record.
    /// On failure the original record is restored unchanged. Returns the
    /// previous slot on success.
    pub fn reschedule(&mut self, course_id: &str, slot: TimeSlot) -> Result<TimeSlot> {
        let Some(existing) = self.records.remove(course_id) else {
            return Err(ScheduleError::not_found("Scheduled course", course_id));
        };

        let mut candidate = existing.clone();
        candidate.slot = slot;
        candidate.scheduled_at = Utc::now();

        match self.commit(candidate) {
            Ok(()) => Ok(existing.slot),
            Err(err) => {
                self.records.insert(course_id.to_string(), existing);
                Err(err)
            }
        }
    }

    /// Puts back a record previously read from this schedule.
    pub(crate) fn restore(&mut self, record: CourseSchedule) {
        debug!(course_id = %record.id(), slot = %record.slot, "restoring committed record");
        self.records.insert(record.id().to_string(), record);
    }

    fn commit(&mut self, candidate: CourseSchedule) -> Result<()> {
        match ConstraintValidator::validate(&candidate, &*self) {
            Ok(outcome) => {
                for warning in &outcome.warnings {
                    warn!(course_id = %candidate.id(), "{warning}");
                }
                self.warnings.extend(outcome.warnings);
                info!(
                    course_id = %candidate.id(),
                    instructor_id = %candidate.instructor_id(),
                    resource_id = %candidate.resource_id(),
                    slot = %candidate.slot,
                    "course committed"
                );
                self.records.insert(candidate.id().to_string(), candidate);
                Ok(())
            }
            Err(err) => {
                warn!(course_id = %candidate.id(), error = %err, "placement rejected");
                self.errors.push(err.to_string());
                Err(err)
            }
        }
    }

    /// Committed record for a course.
    pub fn get(&self, course_id: &str) -> Option<&CourseSchedule> {
        self.records.get(course_id)
    }

    /// Whether a course holds a committed slot.
    pub fn contains(&self, course_id: &str) -> bool {
        self.records.contains_key(course_id)
    }

    /// All committed records, ordered by course id.
    pub fn courses(&self) -> impl Iterator<Item = &CourseSchedule> {
        self.records.values()
    }

    /// Number of committed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records taught by an instructor.
    pub fn instructor_courses(&self, instructor_id: &str) -> Vec<&CourseSchedule> {
        self.records
            .values()
            .filter(|r| r.instructor_id() == instructor_id)
            .collect()
    }

    /// Records occupying a resource.
    pub fn resource_courses(&self, resource_id: &str) -> Vec<&CourseSchedule> {
        self.records
            .values()
            .filter(|r| r.resource_id() == resource_id)
            .collect()
    }

    /// Records on a given day.
    pub fn courses_by_day(&self, day: Weekday) -> Vec<&CourseSchedule> {
        self.records.values().filter(|r| r.slot.day() == day).collect()
    }

    /// Overlapping pairs among an instructor's records.
    pub fn check_instructor_conflicts(&self, instructor_id: &str) -> Vec<ConflictPair<'_>> {
        overlapping_pairs(&self.instructor_courses(instructor_id))
    }

    /// Overlapping pairs among a resource's records.
    pub fn check_resource_conflicts(&self, resource_id: &str) -> Vec<ConflictPair<'_>> {
        overlapping_pairs(&self.resource_courses(resource_id))
    }

    /// Distinct instructor ids with committed records.
    pub fn instructor_ids(&self) -> BTreeSet<&str> {
        self.records.values().map(|r| r.instructor_id()).collect()
    }

    /// Distinct resource ids with committed records.
    pub fn resource_ids(&self) -> BTreeSet<&str> {
        self.records.values().map(|r| r.resource_id()).collect()
    }

    /// Whether the error log is empty.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Hard-constraint failures recorded so far.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Soft-constraint warnings recorded so far.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Drops warnings logged after the log held `len` entries.
    pub(crate) fn truncate_warnings(&mut self, len: usize) {
        self.warnings.truncate(len);
    }

    /// Clears both logs. Committed records are kept.
    pub fn reset_logs(&mut self) {
        self.errors.clear();
        self.warnings.clear();
    }

    /// Counts per day, instructor and resource, plus conflict counts.
    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary::from_schedule(self)
    }

    /// Validity, logs, record count and summary in one report.
    pub fn validation_report(&self) -> ValidationReport {
        ValidationReport {
            is_valid: self.is_valid(),
            errors: self.errors.clone(),
            warnings: self.warnings.clone(),
            total_courses: self.len(),
            summary: self.summary(),
        }
    }

    /// Flat list of committed records for report renderers.
    pub fn export(&self) -> ScheduleExport {
        ScheduleExport::from_schedule(self)
    }

    /// [`export`](Self::export) rendered as pretty JSON.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }
}

impl CommittedState for Schedule {
    fn instructor_records(&self, instructor_id: &str) -> Vec<&CourseSchedule> {
        self.instructor_courses(instructor_id)
    }

    fn resource_records(&self, resource_id: &str) -> Vec<&CourseSchedule> {
        self.resource_courses(resource_id)
    }
}

fn overlapping_pairs<'a>(records: &[&'a CourseSchedule]) -> Vec<ConflictPair<'a>> {
    let mut pairs = Vec::new();
    for (i, &a) in records.iter().enumerate() {
        for &b in &records[i + 1..] {
            if a.overlaps(b) {
                pairs.push((a, b));
            }
        }
    }
    pairs
}
