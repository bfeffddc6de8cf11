//! Engine configuration.
//!
//! Loaded from JSON; every field has a default, so `{}` is a valid
//! configuration (Monday–Friday, 08:00–18:00, hourly, first-fit).
//!
//! ```json
//! {
//!   "grid": {
//!     "days": ["Mon", "Wed", "Fri"],
//!     "open": "09:00",
//!     "close": "17:00",
//!     "step_minutes": 30
//!   },
//!   "strategy": { "kind": "random_fit", "seed": 7 },
//!   "notifiers": ["log"]
//! }
//! ```

use std::path::Path;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::models::parse_time;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Candidate slot grid.
    pub grid: SlotGridConfig,
    /// Assignment strategy.
    pub strategy: StrategyKind,
    /// Notification handlers installed at construction.
    pub notifiers: Vec<NotifierKind>,
}

/// Operating-hours grid used to generate candidate slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotGridConfig {
    /// Teaching days.
    pub days: Vec<Weekday>,
    /// Opening time (`"HH:MM"`).
    pub open: String,
    /// Closing time (`"HH:MM"`); no slot ends after it.
    pub close: String,
    /// Distance between consecutive candidate starts (minutes).
    pub step_minutes: u32,
}

impl Default for SlotGridConfig {
    fn default() -> Self {
        Self {
            days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            open: "08:00".to_string(),
            close: "18:00".to_string(),
            step_minutes: 60,
        }
    }
}

/// Assignment strategy selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyKind {
    /// First candidate in canonical order.
    #[default]
    FirstFit,
    /// First candidate in a seeded shuffle of the grid.
    RandomFit { seed: u64 },
}

/// Notification handler selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifierKind {
    /// Emit through `tracing`.
    Log,
    /// Print to standard output.
    Stdout,
}

impl EngineConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Checks cross-field consistency.
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()
    }
}

impl SlotGridConfig {
    /// Checks that the grid can produce at least one slot.
    pub fn validate(&self) -> Result<()> {
        if self.days.is_empty() {
            return Err(ScheduleError::config("grid must include at least one day"));
        }
        if self.step_minutes == 0 {
            return Err(ScheduleError::config("grid step_minutes must be positive"));
        }
        let open = parse_time(&self.open).map_err(|e| ScheduleError::config(e.to_string()))?;
        let close = parse_time(&self.close).map_err(|e| ScheduleError::config(e.to_string()))?;
        if open >= close {
            return Err(ScheduleError::config(format!(
                "grid open ({}) must be before close ({})",
                self.open, self.close
            )));
        }
        Ok(())
    }
}
