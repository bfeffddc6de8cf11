//! Instructor model.
//!
//! Availability combines positive windows with blocked slots. A slot is
//! available iff:
//! - it overlaps no `unavailable_slots` entry, AND
//! - `available_slots` is empty, or some window fully contains it.
//!
//! Preferred slots are informational (soft) and never block a booking.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::TimeSlot;

/// Default weekly teaching cap (hours).
pub const DEFAULT_MAX_WEEKLY_HOURS: f64 = 40.0;

/// A person who teaches courses.
///
/// Equality and hashing use `id` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instructor {
    /// Unique instructor identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Notification address. Falls back to `id` when absent.
    #[serde(default)]
    pub email: Option<String>,
    /// Windows the instructor can teach in. Empty = unrestricted.
    #[serde(default)]
    pub available_slots: Vec<TimeSlot>,
    /// Blocked periods (override `available_slots`).
    #[serde(default)]
    pub unavailable_slots: Vec<TimeSlot>,
    /// Preferred teaching slots.
    #[serde(default)]
    pub preferred_slots: Vec<TimeSlot>,
    /// Weekly teaching cap (hours).
    #[serde(default = "default_max_weekly_hours")]
    pub max_weekly_hours: f64,
}

fn default_max_weekly_hours() -> f64 {
    DEFAULT_MAX_WEEKLY_HOURS
}

impl Instructor {
    /// Creates an unrestricted instructor.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            available_slots: Vec::new(),
            unavailable_slots: Vec::new(),
            preferred_slots: Vec::new(),
            max_weekly_hours: DEFAULT_MAX_WEEKLY_HOURS,
        }
    }

    /// Sets the notification address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Adds an availability window.
    pub fn with_available(mut self, slot: TimeSlot) -> Self {
        self.available_slots.push(slot);
        self
    }

    /// Adds a blocked slot.
    pub fn with_unavailable(mut self, slot: TimeSlot) -> Self {
        self.unavailable_slots.push(slot);
        self
    }

    /// Adds a preferred slot.
    pub fn with_preferred(mut self, slot: TimeSlot) -> Self {
        self.preferred_slots.push(slot);
        self
    }

    /// Sets the weekly cap.
    pub fn with_max_weekly_hours(mut self, hours: f64) -> Self {
        self.max_weekly_hours = hours;
        self
    }

    /// Whether the instructor can teach during `slot`.
    pub fn is_available(&self, slot: &TimeSlot) -> bool {
        if self.unavailable_slots.iter().any(|u| u.overlaps(slot)) {
            return false;
        }
        self.available_slots.is_empty() || self.available_slots.iter().any(|w| w.contains(slot))
    }

    /// Whether `slot` falls inside a preferred slot.
    pub fn prefers(&self, slot: &TimeSlot) -> bool {
        self.preferred_slots.iter().any(|p| p.contains(slot))
    }

    /// Address used for notifications.
    pub fn recipient(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.id)
    }
}

impl PartialEq for Instructor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Instructor {}

impl Hash for Instructor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn slot(day: Weekday, start: &str, end: &str) -> TimeSlot {
        TimeSlot::parse(day, start, end).unwrap()
    }

    #[test]
    fn test_unrestricted() {
        let i = Instructor::new("I1", "Dr. Smith");
        assert!(i.is_available(&slot(Weekday::Sun, "00:00", "23:00")));
        assert_eq!(i.recipient(), "I1");
        assert!((i.max_weekly_hours - 40.0).abs() < 1e-10);
    }

    #[test]
    fn test_blocked_slot() {
        let i = Instructor::new("I1", "Dr. Smith")
            .with_unavailable(slot(Weekday::Mon, "09:00", "10:00"));
        assert!(!i.is_available(&slot(Weekday::Mon, "09:30", "10:30")));
        assert!(i.is_available(&slot(Weekday::Mon, "10:00", "11:00")));
    }

    #[test]
    fn test_windows_with_block_override() {
        let i = Instructor::new("I1", "Dr. Smith")
            .with_email("smith@example.com")
            .with_available(slot(Weekday::Mon, "08:00", "12:00"))
            .with_unavailable(slot(Weekday::Mon, "10:00", "11:00"));

        assert!(i.is_available(&slot(Weekday::Mon, "08:00", "09:00")));
        assert!(!i.is_available(&slot(Weekday::Mon, "07:00", "08:00")));
        assert!(!i.is_available(&slot(Weekday::Mon, "10:00", "11:00")));
        assert!(!i.is_available(&slot(Weekday::Tue, "08:00", "09:00")));
        assert_eq!(i.recipient(), "smith@example.com");
    }

    #[test]
    fn test_identity_equality() {
        let a = Instructor::new("I1", "Dr. Smith");
        let b = Instructor::new("I1", "Someone Else").with_max_weekly_hours(2.0);
        assert_eq!(a, b);

        let mut set = std::collections::HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }
}
