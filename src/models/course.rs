//! Course model.
//!
//! A course is the unit being placed on the timetable. It references its
//! instructor and required resources by id; the catalog owning those
//! entities resolves them.
//!
//! # Sessions
//! One committed slot represents the whole course. `sessions_per_week`
//! is validated and reported but not expanded into separate bookings.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// A course to be scheduled.
///
/// Equality and hashing use `id` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Teaching instructor.
    pub instructor_id: String,
    /// Seats the room must provide.
    pub required_capacity: u32,
    /// Session length (minutes).
    pub duration_minutes: u32,
    /// Sessions per week (>= 1).
    #[serde(default = "default_sessions")]
    pub sessions_per_week: u32,
    /// Equipment tags the room must provide.
    #[serde(default)]
    pub required_equipment: BTreeSet<String>,
    /// Days the course would rather run on. Empty = no preference.
    #[serde(default)]
    pub preferred_days: Vec<Weekday>,
    /// Resource ids needed; the first is the room bound at commit time.
    #[serde(default)]
    pub required_resources: Vec<String>,
    /// Students currently enrolled.
    #[serde(default)]
    pub enrolled: u32,
}

fn default_sessions() -> u32 {
    1
}

/// Enrollment snapshot for a course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityInfo {
    pub course_id: String,
    pub course_name: String,
    pub total_capacity: u32,
    pub enrolled_students: u32,
    pub available_seats: u32,
    pub occupancy_percent: f64,
}

impl Course {
    /// Creates a one-hour, single-session course.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        instructor_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            instructor_id: instructor_id.into(),
            required_capacity: 1,
            duration_minutes: 60,
            sessions_per_week: 1,
            required_equipment: BTreeSet::new(),
            preferred_days: Vec::new(),
            required_resources: Vec::new(),
            enrolled: 0,
        }
    }

    /// Sets the required seat count.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.required_capacity = capacity;
        self
    }

    /// Sets the session length.
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Sets sessions per week.
    pub fn with_sessions(mut self, sessions: u32) -> Self {
        self.sessions_per_week = sessions;
        self
    }

    /// Adds a required equipment tag.
    pub fn with_equipment(mut self, tag: impl Into<String>) -> Self {
        self.required_equipment.insert(tag.into());
        self
    }

    /// Adds a preferred day.
    pub fn with_preferred_day(mut self, day: Weekday) -> Self {
        self.preferred_days.push(day);
        self
    }

    /// Adds a required resource.
    pub fn with_resource(mut self, resource_id: impl Into<String>) -> Self {
        self.required_resources.push(resource_id.into());
        self
    }

    /// Room bound at commit time.
    pub fn primary_resource(&self) -> Option<&str> {
        self.required_resources.first().map(String::as_str)
    }

    /// Self-consistency checks.
    ///
    /// Returns every problem found; an empty list means the course is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.id.trim().is_empty() || self.name.trim().is_empty() {
            errors.push("Course must have ID and name".to_string());
        }
        if self.required_capacity == 0 {
            errors.push(format!("Course {} capacity must be positive", self.id));
        }
        if self.duration_minutes == 0 {
            errors.push(format!("Course {} duration must be positive", self.id));
        }
        if self.sessions_per_week < 1 {
            errors.push(format!("Course {} must have at least 1 session per week", self.id));
        }
        errors
    }

    /// Whether `day` satisfies the day preference (always true without one).
    pub fn prefers_day(&self, day: Weekday) -> bool {
        self.preferred_days.is_empty() || self.preferred_days.contains(&day)
    }

    /// Enrollment snapshot.
    pub fn capacity_info(&self) -> CapacityInfo {
        let occupancy_percent = if self.required_capacity == 0 {
            0.0
        } else {
            f64::from(self.enrolled) / f64::from(self.required_capacity) * 100.0
        };
        CapacityInfo {
            course_id: self.id.clone(),
            course_name: self.name.clone(),
            total_capacity: self.required_capacity,
            enrolled_students: self.enrolled,
            available_seats: self.required_capacity.saturating_sub(self.enrolled),
            occupancy_percent,
        }
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Course {}

impl Hash for Course {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
