//! Constraint validation for candidate placements.
//!
//! Evaluates one candidate [`CourseSchedule`] against the committed state
//! of a schedule. Each check is a pure function returning `Ok(())` or the
//! specific [`ScheduleError`] naming the entity and time window.
//!
//! # Pipeline
//!
//! Checks run in this fixed order and stop at the first hard failure:
//!
//! 1. Course self-validation (id/name, capacity, duration, sessions)
//! 2. Instructor availability
//! 3. Resource availability (containment in an opening window)
//! 4. Resource capacity
//! 5. Resource equipment
//! 6. Instructor weekly hours (committed + candidate <= cap)
//! 7. No instructor double-booking
//! 8. No resource double-booking
//! 9. Preferred days (soft: collected as a warning, never blocks)

use crate::error::{Result, ScheduleError};
use crate::models::{Course, CourseSchedule, Instructor, Resource, TimeSlot};

/// Read access to committed placements.
///
/// Implemented by [`Schedule`](crate::schedule::Schedule); tests may
/// provide their own.
pub trait CommittedState {
    /// Committed records taught by an instructor.
    fn instructor_records(&self, instructor_id: &str) -> Vec<&CourseSchedule>;

    /// Committed records occupying a resource.
    fn resource_records(&self, resource_id: &str) -> Vec<&CourseSchedule>;

    /// Weekly committed hours of an instructor.
    fn instructor_hours(&self, instructor_id: &str) -> f64 {
        let minutes: u32 = self
            .instructor_records(instructor_id)
            .iter()
            .map(|r| r.slot.duration_minutes())
            .sum();
        f64::from(minutes) / 60.0
    }
}

impl CommittedState for [CourseSchedule] {
    fn instructor_records(&self, instructor_id: &str) -> Vec<&CourseSchedule> {
        self.iter()
            .filter(|r| r.instructor_id() == instructor_id)
            .collect()
    }

    fn resource_records(&self, resource_id: &str) -> Vec<&CourseSchedule> {
        self.iter()
            .filter(|r| r.resource_id() == resource_id)
            .collect()
    }
}

/// Result of a passing validation: soft-constraint warnings only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationOutcome {
    pub warnings: Vec<String>,
}

/// Stateless constraint rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintValidator;

impl ConstraintValidator {
    /// Runs the full pipeline for `candidate` against `state`.
    ///
    /// `state` must not contain the candidate itself.
    pub fn validate<S>(candidate: &CourseSchedule, state: &S) -> Result<ValidationOutcome>
    where
        S: CommittedState + ?Sized,
    {
        let CourseSchedule {
            course,
            instructor,
            resource,
            slot,
            ..
        } = candidate;

        Self::validate_course(course)?;
        Self::validate_course_instructor(course, instructor)?;
        Self::validate_instructor_availability(instructor, slot)?;
        Self::validate_resource_availability(resource, slot)?;
        Self::validate_resource_capacity(resource, course)?;
        Self::validate_resource_equipment(resource, course)?;
        Self::validate_instructor_hours(instructor, slot, state)?;
        Self::validate_no_instructor_conflicts(instructor, slot, state)?;
        Self::validate_no_resource_conflicts(resource, slot, state)?;

        let mut outcome = ValidationOutcome::default();
        if let Some(warning) = Self::check_preferred_days(course, slot) {
            outcome.warnings.push(warning);
        }
        Ok(outcome)
    }

    /// Check 1: course data is well-formed.
    pub fn validate_course(course: &Course) -> Result<()> {
        let errors = course.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ScheduleError::EntityInvalid(errors.join("; ")))
        }
    }

    /// Check 1 (cont.): `instructor` is the one the course names.
    pub fn validate_course_instructor(course: &Course, instructor: &Instructor) -> Result<()> {
        if course.instructor_id == instructor.id {
            Ok(())
        } else {
            Err(ScheduleError::entity_invalid(format!(
                "Course {} is taught by {}, not {}",
                course.id, course.instructor_id, instructor.id
            )))
        }
    }

    /// Check 2: instructor can teach during `slot`.
    pub fn validate_instructor_availability(
        instructor: &Instructor,
        slot: &TimeSlot,
    ) -> Result<()> {
        if instructor.is_available(slot) {
            Ok(())
        } else {
            Err(ScheduleError::Unavailable {
                entity: format!("Instructor {}", instructor.name),
                slot: *slot,
            })
        }
    }

    /// Check 3: `slot` fits inside one of the resource's windows.
    pub fn validate_resource_availability(resource: &Resource, slot: &TimeSlot) -> Result<()> {
        if resource.is_available(slot) {
            Ok(())
        } else {
            Err(ScheduleError::Unavailable {
                entity: format!("Resource {}", resource.label()),
                slot: *slot,
            })
        }
    }

    /// Check 4: resource seats at least the required capacity.
    pub fn validate_resource_capacity(resource: &Resource, course: &Course) -> Result<()> {
        if resource.capacity >= course.required_capacity {
            Ok(())
        } else {
            Err(ScheduleError::CapacityExceeded {
                entity: format!("Resource {}", resource.label()),
                capacity: resource.capacity,
                required: course.required_capacity,
            })
        }
    }

    /// Check 5: resource equipment is a superset of the course's needs.
    pub fn validate_resource_equipment(resource: &Resource, course: &Course) -> Result<()> {
        let missing = resource.missing_equipment(&course.required_equipment);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ScheduleError::EquipmentMissing {
                resource: resource.label().to_string(),
                missing: missing.into_iter().map(str::to_string).collect(),
            })
        }
    }

    /// Check 6: committed hours plus `slot` stay within the weekly cap.
    pub fn validate_instructor_hours<S>(
        instructor: &Instructor,
        slot: &TimeSlot,
        state: &S,
    ) -> Result<()>
    where
        S: CommittedState + ?Sized,
    {
        let projected = state.instructor_hours(&instructor.id) + slot.duration_hours();
        if projected <= instructor.max_weekly_hours {
            Ok(())
        } else {
            Err(ScheduleError::HoursExceeded {
                instructor: instructor.name.clone(),
                projected,
                max: instructor.max_weekly_hours,
            })
        }
    }

    /// Check 7: no committed record of this instructor overlaps `slot`.
    pub fn validate_no_instructor_conflicts<S>(
        instructor: &Instructor,
        slot: &TimeSlot,
        state: &S,
    ) -> Result<()>
    where
        S: CommittedState + ?Sized,
    {
        match state
            .instructor_records(&instructor.id)
            .into_iter()
            .find(|r| r.slot.overlaps(slot))
        {
            None => Ok(()),
            Some(existing) => Err(ScheduleError::DoubleBooked {
                entity: format!("Instructor {}", instructor.name),
                slot: *slot,
                existing: existing.id().to_string(),
            }),
        }
    }

    /// Check 8: no committed record in this resource overlaps `slot`.
    pub fn validate_no_resource_conflicts<S>(
        resource: &Resource,
        slot: &TimeSlot,
        state: &S,
    ) -> Result<()>
    where
        S: CommittedState + ?Sized,
    {
        match state
            .resource_records(&resource.id)
            .into_iter()
            .find(|r| r.slot.overlaps(slot))
        {
            None => Ok(()),
            Some(existing) => Err(ScheduleError::DoubleBooked {
                entity: format!("Resource {}", resource.label()),
                slot: *slot,
                existing: existing.id().to_string(),
            }),
        }
    }

    /// Check 9 (soft): returns a warning when `slot` misses the preferred days.
    pub fn check_preferred_days(course: &Course, slot: &TimeSlot) -> Option<String> {
        if course.prefers_day(slot.day()) {
            None
        } else {
            Some(format!(
                "Course {} scheduled on non-preferred day {}",
                course.name,
                crate::models::day_name(slot.day())
            ))
        }
    }
}
