//! Course lifecycle states.
//!
//! ```text
//! scheduled ──▶ ongoing ──▶ completed
//!     │            │
//!     └────────────┴──▶ cancelled
//! ```
//!
//! `completed` and `cancelled` are terminal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    #[default]
    Scheduled,
    Ongoing,
    Completed,
    Cancelled,
}

impl ScheduleStatus {
    /// Whether no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether `self -> to` is a legal transition.
    pub fn can_transition_to(self, to: Self) -> bool {
        match (self, to) {
            (Self::Scheduled, Self::Ongoing) => true,
            (Self::Ongoing, Self::Completed) => true,
            (from, Self::Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }

    /// States reachable in one step.
    pub fn allowed_next(self) -> Vec<Self> {
        match self {
            Self::Scheduled => vec![Self::Ongoing, Self::Cancelled],
            Self::Ongoing => vec![Self::Completed, Self::Cancelled],
            Self::Completed | Self::Cancelled => vec![],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
