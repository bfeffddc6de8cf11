//! Thread-safe scheduling service.
//!
//! [`SchedulingService`] owns the entity catalog (instructors, resources,
//! courses with their lifecycle status), one [`Schedule`] and the conflict
//! history, all behind a single `RwLock`. Each mutating call holds the
//! write lock for its whole read-validate-write cycle, so two callers can
//! never both validate against the same stale state and double-book.
//! Queries take the read lock and may observe changes between calls.
//!
//! # Operations
//!
//! | Operation | Lock | Effect |
//! |-----------|------|--------|
//! | `schedule` | write | grid search + commit + availability re-check |
//! | `schedule_at` | write | commit a caller-chosen slot + re-check |
//! | `reschedule` | write | move a committed slot, roll back on failure |
//! | `start` / `complete` / `cancel` | write | status transition |
//! | `enroll` | write | seat count +1 |
//! | `detect_conflicts` | read | availability audit of one course |
//!
//! Notifications go out after the lock is released.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::{Result, ScheduleError};
use crate::models::{
    CapacityInfo, Course, Instructor, Resource, ScheduleConflict, ScheduleStatus, TimeSlot,
};
use crate::notify::{self, Notifier};
use crate::schedule::{
    ConflictReport, Schedule, ScheduleExport, ScheduleSummary, ValidationReport,
};
use crate::scheduler::{self, FirstFitScheduler, SlotGrid, SlotRequest, SlotScheduler};

/// A catalog course with its lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseEntry {
    pub course: Course,
    pub status: ScheduleStatus,
}

/// Catalog-wide counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemStatistics {
    pub total_courses: usize,
    pub total_instructors: usize,
    pub total_resources: usize,
    /// Courses holding a committed slot.
    pub scheduled_courses: usize,
    pub total_capacity: u64,
    pub total_enrolled: u64,
    /// Enrolled / capacity in percent (0 when capacity is 0).
    pub occupancy_rate: f64,
    /// Status name → course count.
    pub courses_by_status: BTreeMap<String, usize>,
    pub total_conflicts: usize,
}

#[derive(Debug, Default)]
struct ServiceState {
    instructors: BTreeMap<String, Instructor>,
    resources: BTreeMap<String, Resource>,
    courses: BTreeMap<String, CourseEntry>,
    schedule: Schedule,
    conflicts: Vec<ScheduleConflict>,
}

impl ServiceState {
    fn entry(&self, course_id: &str) -> Result<&CourseEntry> {
        self.courses
            .get(course_id)
            .ok_or_else(|| ScheduleError::not_found("Course", course_id))
    }

    fn instructor(&self, instructor_id: &str) -> Result<&Instructor> {
        self.instructors
            .get(instructor_id)
            .ok_or_else(|| ScheduleError::not_found("Instructor", instructor_id))
    }

    /// Required resources of a course, primary first. Never empty.
    fn resources_for(&self, course: &Course) -> Result<Vec<Resource>> {
        if course.required_resources.is_empty() {
            return Err(ScheduleError::entity_invalid(format!(
                "Course {} has no required resource",
                course.id
            )));
        }
        course
            .required_resources
            .iter()
            .map(|id| {
                self.resources
                    .get(id)
                    .cloned()
                    .ok_or_else(|| ScheduleError::not_found("Resource", id.as_str()))
            })
            .collect()
    }

    fn recipient_for(&self, course: &Course) -> String {
        self.instructors
            .get(&course.instructor_id)
            .map(|i| i.recipient().to_string())
            .unwrap_or_else(|| course.instructor_id.clone())
    }
}

/// A message waiting for the lock to be released.
type Pending = (String, String);

/// Concurrent façade over catalog, schedule and conflict history.
#[derive(Debug)]
pub struct SchedulingService {
    state: RwLock<ServiceState>,
    scheduler: Box<dyn SlotScheduler>,
    grid: SlotGrid,
    notifiers: RwLock<Vec<Arc<dyn Notifier>>>,
}

impl Default for SchedulingService {
    fn default() -> Self {
        Self::new(Box::new(FirstFitScheduler::new()), SlotGrid::default())
    }
}

impl SchedulingService {
    /// Creates a service with an explicit strategy and grid.
    pub fn new(scheduler: Box<dyn SlotScheduler>, grid: SlotGrid) -> Self {
        Self {
            state: RwLock::new(ServiceState::default()),
            scheduler,
            grid,
            notifiers: RwLock::new(Vec::new()),
        }
    }

    /// Creates a service from configuration.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let service = Self::new(
            scheduler::from_kind(config.strategy),
            SlotGrid::from_config(&config.grid)?,
        );
        for &kind in &config.notifiers {
            service.register_notifier(notify::from_kind(kind));
        }
        info!(
            strategy = service.scheduler.name(),
            notifiers = config.notifiers.len(),
            "scheduling service created"
        );
        Ok(service)
    }

    /// Active strategy name.
    pub fn scheduler_name(&self) -> &'static str {
        self.scheduler.name()
    }

    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    /// Adds a notification handler.
    pub fn register_notifier(&self, notifier: Arc<dyn Notifier>) {
        self.notifiers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notifier);
    }

    fn read_state(&self) -> RwLockReadGuard<'_, ServiceState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, ServiceState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch(&self, (message, recipient): Pending) {
        let notifiers = self
            .notifiers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for notifier in notifiers {
            notifier.notify(&message, &recipient);
        }
    }

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    pub fn register_instructor(&self, instructor: Instructor) -> Result<()> {
        let mut state = self.write_state();
        if state.instructors.contains_key(&instructor.id) {
            return Err(ScheduleError::entity_invalid(format!(
                "Instructor {} already registered",
                instructor.id
            )));
        }
        info!(instructor_id = %instructor.id, "instructor registered");
        state.instructors.insert(instructor.id.clone(), instructor);
        Ok(())
    }

    pub fn register_resource(&self, resource: Resource) -> Result<()> {
        let mut state = self.write_state();
        if state.resources.contains_key(&resource.id) {
            return Err(ScheduleError::entity_invalid(format!(
                "Resource {} already registered",
                resource.id
            )));
        }
        info!(resource_id = %resource.id, kind = ?resource.kind, "resource registered");
        state.resources.insert(resource.id.clone(), resource);
        Ok(())
    }

    /// Registers a course in status `scheduled` (no slot yet).
    pub fn register_course(&self, course: Course) -> Result<()> {
        let mut state = self.write_state();
        if state.courses.contains_key(&course.id) {
            return Err(ScheduleError::entity_invalid(format!(
                "Course {} already registered",
                course.id
            )));
        }
        info!(course_id = %course.id, "course registered");
        state.courses.insert(
            course.id.clone(),
            CourseEntry {
                course,
                status: ScheduleStatus::Scheduled,
            },
        );
        Ok(())
    }

    /// Replaces an instructor's availability windows.
    ///
    /// Already committed slots are not re-validated; use
    /// [`detect_conflicts`](Self::detect_conflicts) to audit them.
    pub fn update_instructor_availability(
        &self,
        instructor_id: &str,
        windows: Vec<TimeSlot>,
    ) -> Result<()> {
        let mut state = self.write_state();
        let instructor = state
            .instructors
            .get_mut(instructor_id)
            .ok_or_else(|| ScheduleError::not_found("Instructor", instructor_id))?;
        instructor.available_slots = windows;
        info!(instructor_id, "instructor availability updated");
        Ok(())
    }

    pub fn instructor(&self, instructor_id: &str) -> Option<Instructor> {
        self.read_state().instructors.get(instructor_id).cloned()
    }

    pub fn resource(&self, resource_id: &str) -> Option<Resource> {
        self.read_state().resources.get(resource_id).cloned()
    }

    pub fn course(&self, course_id: &str) -> Option<CourseEntry> {
        self.read_state().courses.get(course_id).cloned()
    }

    pub fn status(&self, course_id: &str) -> Option<ScheduleStatus> {
        self.read_state().courses.get(course_id).map(|e| e.status)
    }

    /// All catalog courses, ordered by id.
    pub fn courses(&self) -> Vec<CourseEntry> {
        self.read_state().courses.values().cloned().collect()
    }

    // ------------------------------------------------------------------
    // Scheduling
    // ------------------------------------------------------------------

    /// Finds a slot with the configured strategy and commits it.
    ///
    /// Candidates are the grid slots of the course's duration that do not
    /// collide with a committed slot of the same instructor or primary
    /// resource. Returns the committed slot.
    pub fn schedule(&self, course_id: &str) -> Result<TimeSlot> {
        let (slot, pending) = {
            let mut state = self.write_state();
            let (course, instructor, resources) = Self::placement_inputs(&state, course_id)?;

            let candidates = self.candidate_slots(&state.schedule, &course, &resources[0]);
            let request = SlotRequest::new(&course, &instructor, resources.iter().collect());
            let Some(slot) = self.scheduler.schedule_course(&request, &candidates) else {
                warn!(
                    course_id,
                    strategy = self.scheduler.name(),
                    candidates = candidates.len(),
                    "no slot found"
                );
                return Err(ScheduleError::NoSlotFound {
                    course_id: course_id.to_string(),
                });
            };

            self.commit_placement(&mut state, &course, &instructor, &resources, slot)?;
            let pending = (
                format!("Course '{}' has been scheduled for {slot}", course.name),
                instructor.recipient().to_string(),
            );
            (slot, pending)
        };
        self.dispatch(pending);
        Ok(slot)
    }

    /// Commits a caller-chosen slot.
    pub fn schedule_at(&self, course_id: &str, slot: TimeSlot) -> Result<()> {
        let pending = {
            let mut state = self.write_state();
            let (course, instructor, resources) = Self::placement_inputs(&state, course_id)?;
            self.commit_placement(&mut state, &course, &instructor, &resources, slot)?;
            (
                format!("Course '{}' has been scheduled for {slot}", course.name),
                instructor.recipient().to_string(),
            )
        };
        self.dispatch(pending);
        Ok(())
    }

    /// Moves a committed course to `slot`. Returns the previous slot.
    ///
    /// On any failure, including conflicts found by the availability
    /// re-check, the previous record is restored before returning.
    pub fn reschedule(&self, course_id: &str, slot: TimeSlot) -> Result<TimeSlot> {
        let (previous_slot, pending) = {
            let mut state = self.write_state();
            let entry = state.entry(course_id)?;
            if entry.status.is_terminal() {
                return Err(ScheduleError::InvalidStateTransition {
                    course_id: course_id.to_string(),
                    from: entry.status.to_string(),
                    to: "rescheduled".to_string(),
                });
            }
            let course = entry.course.clone();
            let previous = state
                .schedule
                .get(course_id)
                .cloned()
                .ok_or_else(|| ScheduleError::not_found("Scheduled course", course_id))?;
            let instructor = state.instructor(&course.instructor_id)?.clone();
            let resources = state.resources_for(&course)?;

            let warning_mark = state.schedule.warnings().len();
            let previous_slot = state.schedule.reschedule(course_id, slot)?;

            let request = SlotRequest::new(&course, &instructor, resources.iter().collect());
            let conflicts = self.scheduler.detect_conflicts(&request, Some(&slot));
            if !conflicts.is_empty() {
                state.schedule.restore(previous);
                state.schedule.truncate_warnings(warning_mark);
                return Err(Self::record_conflicts(&mut state, course_id, conflicts));
            }

            info!(course_id, from = %previous_slot, to = %slot, "course rescheduled");
            let pending = (
                format!(
                    "Course '{}' has been rescheduled from {previous_slot} to {slot}",
                    course.name
                ),
                instructor.recipient().to_string(),
            );
            (previous_slot, pending)
        };
        self.dispatch(pending);
        Ok(previous_slot)
    }

    /// Drops a course's committed slot. Returns whether one existed.
    pub fn remove_course(&self, course_id: &str) -> bool {
        self.write_state().schedule.remove_course(course_id)
    }

    /// `scheduled → ongoing`.
    pub fn start(&self, course_id: &str) -> Result<()> {
        self.transition(course_id, ScheduleStatus::Ongoing, None)
    }

    /// `ongoing → completed`.
    pub fn complete(&self, course_id: &str) -> Result<()> {
        self.transition(course_id, ScheduleStatus::Completed, None)
    }

    /// Any non-terminal status `→ cancelled`. The committed slot is kept.
    pub fn cancel(&self, course_id: &str, reason: Option<&str>) -> Result<()> {
        self.transition(course_id, ScheduleStatus::Cancelled, reason)
    }

    fn transition(&self, course_id: &str, to: ScheduleStatus, reason: Option<&str>) -> Result<()> {
        let pending = {
            let mut state = self.write_state();
            let recipient = state.recipient_for(&state.entry(course_id)?.course);
            let entry = state
                .courses
                .get_mut(course_id)
                .ok_or_else(|| ScheduleError::not_found("Course", course_id))?;

            let from = entry.status;
            if !from.can_transition_to(to) {
                warn!(course_id, %from, %to, "status transition rejected");
                return Err(ScheduleError::InvalidStateTransition {
                    course_id: course_id.to_string(),
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
            entry.status = to;
            info!(course_id, %from, %to, "status changed");

            let name = &entry.course.name;
            let message = match (to, reason) {
                (ScheduleStatus::Ongoing, _) => format!("Course '{name}' has started"),
                (ScheduleStatus::Completed, _) => format!("Course '{name}' has been completed"),
                (_, Some(reason)) if !reason.is_empty() => {
                    format!("Course '{name}' has been cancelled: {reason}")
                }
                _ => format!("Course '{name}' has been {to}"),
            };
            (message, recipient)
        };
        self.dispatch(pending);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Enrollment
    // ------------------------------------------------------------------

    /// Takes one seat. Fails when the course is full.
    pub fn enroll(&self, course_id: &str, student_id: &str) -> Result<CapacityInfo> {
        let mut state = self.write_state();
        let entry = state
            .courses
            .get_mut(course_id)
            .ok_or_else(|| ScheduleError::not_found("Course", course_id))?;
        let course = &mut entry.course;

        if course.enrolled >= course.required_capacity {
            return Err(ScheduleError::CapacityExceeded {
                entity: format!("Course {}", course.name),
                capacity: course.required_capacity,
                required: course.enrolled.saturating_add(1),
            });
        }
        course.enrolled += 1;
        info!(course_id, student_id, enrolled = course.enrolled, "student enrolled");
        Ok(course.capacity_info())
    }

    pub fn capacity_info(&self, course_id: &str) -> Result<CapacityInfo> {
        Ok(self.read_state().entry(course_id)?.course.capacity_info())
    }

    // ------------------------------------------------------------------
    // Conflicts and reports
    // ------------------------------------------------------------------

    /// Re-checks a course's committed slot against current availability.
    ///
    /// Read-only: results are not added to the conflict history.
    pub fn detect_conflicts(&self, course_id: &str) -> Result<Vec<ScheduleConflict>> {
        let state = self.read_state();
        let course = &state.entry(course_id)?.course;
        let instructor = state.instructor(&course.instructor_id)?;
        let resources = state.resources_for(course)?;
        let request = SlotRequest::new(course, instructor, resources.iter().collect());
        let committed = state.schedule.get(course_id).map(|r| r.slot);
        Ok(self.scheduler.detect_conflicts(&request, committed.as_ref()))
    }

    /// Conflict history entries for one course.
    pub fn course_conflicts(&self, course_id: &str) -> Vec<ScheduleConflict> {
        self.read_state()
            .conflicts
            .iter()
            .filter(|c| c.course_id == course_id)
            .cloned()
            .collect()
    }

    pub fn conflict_report(&self) -> ConflictReport {
        ConflictReport::from_history(&self.read_state().conflicts)
    }

    pub fn statistics(&self) -> SystemStatistics {
        let state = self.read_state();
        let total_capacity: u64 = state
            .courses
            .values()
            .map(|e| u64::from(e.course.required_capacity))
            .sum();
        let total_enrolled: u64 = state
            .courses
            .values()
            .map(|e| u64::from(e.course.enrolled))
            .sum();
        let occupancy_rate = if total_capacity > 0 {
            total_enrolled as f64 / total_capacity as f64 * 100.0
        } else {
            0.0
        };

        let mut courses_by_status = BTreeMap::new();
        for entry in state.courses.values() {
            *courses_by_status
                .entry(entry.status.to_string())
                .or_insert(0) += 1;
        }

        SystemStatistics {
            total_courses: state.courses.len(),
            total_instructors: state.instructors.len(),
            total_resources: state.resources.len(),
            scheduled_courses: state.schedule.len(),
            total_capacity,
            total_enrolled,
            occupancy_rate,
            courses_by_status,
            total_conflicts: state.conflicts.len(),
        }
    }

    pub fn committed_slot(&self, course_id: &str) -> Option<TimeSlot> {
        self.read_state().schedule.get(course_id).map(|r| r.slot)
    }

    pub fn summary(&self) -> ScheduleSummary {
        self.read_state().schedule.summary()
    }

    pub fn validation_report(&self) -> ValidationReport {
        self.read_state().schedule.validation_report()
    }

    pub fn export(&self) -> ScheduleExport {
        self.read_state().schedule.export()
    }

    pub fn export_json(&self) -> Result<String> {
        self.read_state().schedule.export_json()
    }

    /// Runs `f` against the committed schedule under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Schedule) -> R) -> R {
        f(&self.read_state().schedule)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn placement_inputs(
        state: &ServiceState,
        course_id: &str,
    ) -> Result<(Course, Instructor, Vec<Resource>)> {
        let entry = state.entry(course_id)?;
        if entry.status != ScheduleStatus::Scheduled {
            return Err(ScheduleError::InvalidStateTransition {
                course_id: course_id.to_string(),
                from: entry.status.to_string(),
                to: ScheduleStatus::Scheduled.to_string(),
            });
        }
        if let Some(record) = state.schedule.get(course_id) {
            return Err(ScheduleError::AlreadyScheduled {
                course_id: course_id.to_string(),
                slot: record.slot,
            });
        }
        let course = entry.course.clone();
        let instructor = state.instructor(&course.instructor_id)?.clone();
        let resources = state.resources_for(&course)?;
        Ok((course, instructor, resources))
    }

    /// Grid slots for `course` not already taken by its instructor or
    /// primary resource.
    fn candidate_slots(
        &self,
        schedule: &Schedule,
        course: &Course,
        primary: &Resource,
    ) -> Vec<TimeSlot> {
        let taken: Vec<TimeSlot> = schedule
            .instructor_courses(&course.instructor_id)
            .into_iter()
            .chain(schedule.resource_courses(&primary.id))
            .filter(|r| r.id() != course.id)
            .map(|r| r.slot)
            .collect();
        self.grid
            .candidates(course.duration_minutes)
            .into_iter()
            .filter(|slot| !taken.iter().any(|t| t.overlaps(slot)))
            .collect()
    }

    /// Validated commit followed by the availability re-check. Rolls the
    /// commit back if the re-check finds conflicts.
    fn commit_placement(
        &self,
        state: &mut ServiceState,
        course: &Course,
        instructor: &Instructor,
        resources: &[Resource],
        slot: TimeSlot,
    ) -> Result<()> {
        let warning_mark = state.schedule.warnings().len();
        let primary = resources[0].clone();
        state
            .schedule
            .add_course(course.clone(), instructor.clone(), primary, slot)?;

        let request = SlotRequest::new(course, instructor, resources.iter().collect());
        let conflicts = self.scheduler.detect_conflicts(&request, Some(&slot));
        if !conflicts.is_empty() {
            state.schedule.remove_course(&course.id);
            state.schedule.truncate_warnings(warning_mark);
            return Err(Self::record_conflicts(state, &course.id, conflicts));
        }
        Ok(())
    }

    fn record_conflicts(
        state: &mut ServiceState,
        course_id: &str,
        conflicts: Vec<ScheduleConflict>,
    ) -> ScheduleError {
        let summary = conflicts
            .iter()
            .map(|c| c.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(course_id, conflicts = conflicts.len(), "availability conflicts detected");
        state.conflicts.extend(conflicts);
        ScheduleError::ConflictsDetected {
            course_id: course_id.to_string(),
            summary,
        }
    }
}
