//! Seeded random-order slot assignment.
//!
//! Shuffles the candidates with a fixed seed, then takes the first
//! available one. The same seed and candidate list always pick the same
//! slot, which spreads courses across the week without losing
//! reproducibility.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{SlotRequest, SlotScheduler};
use crate::models::TimeSlot;

/// First-fit over a seeded shuffle of the candidates.
#[derive(Debug, Clone, Copy)]
pub struct RandomFitScheduler {
    seed: u64,
}

impl RandomFitScheduler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl SlotScheduler for RandomFitScheduler {
    fn name(&self) -> &'static str {
        "random-fit"
    }

    fn schedule_course(
        &self,
        request: &SlotRequest<'_>,
        candidates: &[TimeSlot],
    ) -> Option<TimeSlot> {
        let mut order = candidates.to_vec();
        let mut rng = StdRng::seed_from_u64(self.seed);
        order.shuffle(&mut rng);
        order.into_iter().find(|slot| request.is_available(slot))
    }
}
