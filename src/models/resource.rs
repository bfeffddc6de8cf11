//! Resource model.
//!
//! Resources are the rooms a course occupies: classrooms, labs, online
//! sessions. Each resource has a capacity, an equipment set, and an
//! optional list of availability windows.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::TimeSlot;

/// A bookable room or virtual space.
///
/// Equality and hashing use `id` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Resource classification.
    #[serde(default)]
    pub kind: ResourceKind,
    /// Seats available.
    pub capacity: u32,
    /// Equipment tags this resource provides.
    #[serde(default)]
    pub equipment: BTreeSet<String>,
    /// Opening windows. Empty = always available.
    #[serde(default)]
    pub availability: Vec<TimeSlot>,
}

/// Resource classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    #[default]
    Classroom,
    Laboratory,
    Online,
    Hybrid,
}

impl Resource {
    /// Creates a classroom with the given capacity.
    pub fn new(id: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind: ResourceKind::Classroom,
            capacity,
            equipment: BTreeSet::new(),
            availability: Vec::new(),
        }
    }

    /// Creates a laboratory.
    pub fn laboratory(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, capacity).with_kind(ResourceKind::Laboratory)
    }

    /// Sets the resource name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the classification.
    pub fn with_kind(mut self, kind: ResourceKind) -> Self {
        self.kind = kind;
        self
    }

    /// Adds an equipment tag.
    pub fn with_equipment(mut self, tag: impl Into<String>) -> Self {
        self.equipment.insert(tag.into());
        self
    }

    /// Adds an availability window.
    pub fn with_window(mut self, slot: TimeSlot) -> Self {
        self.availability.push(slot);
        self
    }

    /// Name for messages; falls back to the id.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Whether `slot` fits entirely inside an opening window.
    ///
    /// Returns `true` if no windows are declared.
    pub fn is_available(&self, slot: &TimeSlot) -> bool {
        self.availability.is_empty() || self.availability.iter().any(|w| w.contains(slot))
    }

    /// Required tags this resource does not provide, in sorted order.
    pub fn missing_equipment<'a>(&self, required: &'a BTreeSet<String>) -> Vec<&'a str> {
        required
            .iter()
            .filter(|tag| !self.equipment.contains(*tag))
            .map(String::as_str)
            .collect()
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Resource {}

impl Hash for Resource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
