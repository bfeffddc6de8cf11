//! Slot assignment strategies.
//!
//! A [`SlotScheduler`] picks one slot for a course from a list of
//! candidates, checking only availability (instructor blocks and windows,
//! resource windows). Everything else, including double-booking against
//! committed records, is re-verified when the placement is committed by
//! [`Schedule::add_course`](crate::schedule::Schedule::add_course).
//!
//! | Strategy | Order | Deterministic |
//! |----------|-------|---------------|
//! | [`FirstFitScheduler`] | candidates as given | yes |
//! | [`RandomFitScheduler`] | seeded shuffle | per seed |
//!
//! Candidate lists normally come from [`SlotGrid::candidates`], which
//! yields weekday-ascending, start-ascending order.
//!
//! # Reference
//! Burke & Petrovic (2002), "Recent research directions in automated
//! timetabling", European Journal of Operational Research 140(2)

mod first_fit;
mod grid;
mod random_fit;

pub use first_fit::FirstFitScheduler;
pub use grid::SlotGrid;
pub use random_fit::RandomFitScheduler;

use std::fmt::Debug;

use crate::config::StrategyKind;
use crate::models::{Course, Instructor, Resource, ScheduleConflict, TimeSlot};

/// Everything a strategy needs to judge one course.
#[derive(Debug, Clone)]
pub struct SlotRequest<'a> {
    pub course: &'a Course,
    pub instructor: &'a Instructor,
    /// Required resources, primary first.
    pub resources: Vec<&'a Resource>,
}

impl<'a> SlotRequest<'a> {
    pub fn new(
        course: &'a Course,
        instructor: &'a Instructor,
        resources: Vec<&'a Resource>,
    ) -> Self {
        Self {
            course,
            instructor,
            resources,
        }
    }

    /// Instructor and every required resource are available at `slot`.
    pub fn is_available(&self, slot: &TimeSlot) -> bool {
        self.instructor.is_available(slot) && self.resources.iter().all(|r| r.is_available(slot))
    }
}

/// Assignment strategy.
pub trait SlotScheduler: Send + Sync + Debug {
    /// Strategy name (e.g., "first-fit").
    fn name(&self) -> &'static str;

    /// Picks a slot for the request, or `None` if no candidate is available.
    fn schedule_course(
        &self,
        request: &SlotRequest<'_>,
        candidates: &[TimeSlot],
    ) -> Option<TimeSlot>;

    /// Re-checks a committed slot against current availability.
    ///
    /// Other committed courses are not considered. `committed == None`
    /// yields a single `no_schedule` conflict.
    fn detect_conflicts(
        &self,
        request: &SlotRequest<'_>,
        committed: Option<&TimeSlot>,
    ) -> Vec<ScheduleConflict> {
        let course_id = request.course.id.as_str();
        let Some(slot) = committed else {
            return vec![ScheduleConflict::no_schedule(course_id)];
        };

        let mut conflicts = Vec::new();
        if !request.instructor.is_available(slot) {
            conflicts.push(ScheduleConflict::instructor_unavailable(
                course_id,
                format!("Instructor {} not available at {slot}", request.instructor.name),
            ));
        }
        for resource in &request.resources {
            if !resource.is_available(slot) {
                conflicts.push(ScheduleConflict::resource_unavailable(
                    course_id,
                    format!("Resource {} not available at {slot}", resource.label()),
                ));
            }
        }
        conflicts
    }
}

/// Builds the strategy named by configuration.
pub fn from_kind(kind: StrategyKind) -> Box<dyn SlotScheduler> {
    match kind {
        StrategyKind::FirstFit => Box::new(FirstFitScheduler::new()),
        StrategyKind::RandomFit { seed } => Box::new(RandomFitScheduler::new(seed)),
    }
}
