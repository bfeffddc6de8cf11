//! Error types for timetable operations.
//!
//! Every mutation returns a [`Result`] instead of panicking. All variants
//! are locally recoverable: the caller decides whether to retry with a
//! different slot, resource, or instructor.

use thiserror::Error;

use crate::models::TimeSlot;

/// Result type alias for timetable operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Timetable error.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Malformed entity data (course fields, slot bounds).
    #[error("Invalid entity: {0}")]
    EntityInvalid(String),

    /// Instructor or resource not available at the requested slot.
    #[error("{entity} is unavailable at {slot}")]
    Unavailable { entity: String, slot: TimeSlot },

    /// Room or course seats exhausted.
    #[error("{entity} capacity ({capacity}) is less than required ({required})")]
    CapacityExceeded {
        entity: String,
        capacity: u32,
        required: u32,
    },

    /// Resource lacks equipment the course requires.
    #[error("Resource {resource} missing equipment: {}", missing.join(", "))]
    EquipmentMissing {
        resource: String,
        missing: Vec<String>,
    },

    /// Instructor weekly cap would be exceeded.
    #[error("Instructor {instructor} would exceed max hours ({projected:.2} > {max:.2})")]
    HoursExceeded {
        instructor: String,
        projected: f64,
        max: f64,
    },

    /// Overlap with an existing commitment of the same instructor or resource.
    #[error("{entity} is double-booked at {slot} (conflicts with course {existing})")]
    DoubleBooked {
        entity: String,
        slot: TimeSlot,
        existing: String,
    },

    /// Committed slot failed the post-commit availability re-check.
    #[error("Scheduling conflicts detected for course {course_id}: {summary}")]
    ConflictsDetected { course_id: String, summary: String },

    /// Every candidate slot was rejected.
    #[error("No available time slot found for course {course_id}")]
    NoSlotFound { course_id: String },

    /// Unknown identifier.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Illegal status change.
    #[error("Invalid state transition for course {course_id}: {from} -> {to}")]
    InvalidStateTransition {
        course_id: String,
        from: String,
        to: String,
    },

    /// Course already holds a committed slot.
    #[error("Course {course_id} is already scheduled at {slot}")]
    AlreadyScheduled { course_id: String, slot: TimeSlot },

    /// Configuration rejected.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON encode/decode failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem failure while reading configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fieldless classification of [`ScheduleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EntityInvalid,
    Unavailable,
    CapacityExceeded,
    EquipmentMissing,
    HoursExceeded,
    DoubleBooked,
    ConflictsDetected,
    NoSlotFound,
    NotFound,
    InvalidStateTransition,
    AlreadyScheduled,
    Config,
    Serialization,
    Io,
}

impl ScheduleError {
    /// Creates an invalid-entity error.
    pub fn entity_invalid(msg: impl Into<String>) -> Self {
        Self::EntityInvalid(msg.into())
    }

    /// Creates a not-found error.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the error classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EntityInvalid(_) => ErrorKind::EntityInvalid,
            Self::Unavailable { .. } => ErrorKind::Unavailable,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::EquipmentMissing { .. } => ErrorKind::EquipmentMissing,
            Self::HoursExceeded { .. } => ErrorKind::HoursExceeded,
            Self::DoubleBooked { .. } => ErrorKind::DoubleBooked,
            Self::ConflictsDetected { .. } => ErrorKind::ConflictsDetected,
            Self::NoSlotFound { .. } => ErrorKind::NoSlotFound,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidStateTransition { .. } => ErrorKind::InvalidStateTransition,
            Self::AlreadyScheduled { .. } => ErrorKind::AlreadyScheduled,
            Self::Config(_) => ErrorKind::Config,
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Whether this error came from a hard scheduling constraint.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::EntityInvalid
                | ErrorKind::Unavailable
                | ErrorKind::CapacityExceeded
                | ErrorKind::EquipmentMissing
                | ErrorKind::HoursExceeded
                | ErrorKind::DoubleBooked
        )
    }
}
