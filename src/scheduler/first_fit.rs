//! First-fit slot assignment.
//!
//! # Algorithm
//! Scan candidates in the order given; return the first one where the
//! instructor and every required resource are available.
//!
//! # Complexity
//! O(c * (u + w)) where c=candidates, u=instructor blocks/windows,
//! w=resource windows.

use tracing::debug;

use super::{SlotRequest, SlotScheduler};
use crate::models::TimeSlot;

/// Takes the first available candidate. No backtracking.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFitScheduler;

impl FirstFitScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl SlotScheduler for FirstFitScheduler {
    fn name(&self) -> &'static str {
        "first-fit"
    }

    fn schedule_course(
        &self,
        request: &SlotRequest<'_>,
        candidates: &[TimeSlot],
    ) -> Option<TimeSlot> {
        let found = candidates.iter().find(|slot| {
            let ok = request.is_available(slot);
            if !ok {
                debug!(course_id = %request.course.id, slot = %slot, "candidate unavailable");
            }
            ok
        });
        found.copied()
    }
}
