//! Candidate slot grid.
//!
//! Generates candidate slots over operating hours in canonical order:
//! weekday ascending, then start time ascending.

use chrono::{NaiveTime, Timelike, Weekday};

use crate::config::SlotGridConfig;
use crate::error::{Result, ScheduleError};
use crate::models::{parse_time, TimeSlot};

/// Operating-hours grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGrid {
    days: Vec<Weekday>,
    open_minute: u32,
    close_minute: u32,
    step_minutes: u32,
}

impl SlotGrid {
    /// Creates a grid. Days are sorted Monday-first and deduplicated.
    pub fn new(
        days: impl IntoIterator<Item = Weekday>,
        open: NaiveTime,
        close: NaiveTime,
        step_minutes: u32,
    ) -> Result<Self> {
        let mut days: Vec<Weekday> = days.into_iter().collect();
        days.sort_by_key(|d| d.num_days_from_monday());
        days.dedup();

        let open_minute = open.num_seconds_from_midnight() / 60;
        let close_minute = close.num_seconds_from_midnight() / 60;
        if days.is_empty() || step_minutes == 0 || open_minute >= close_minute {
            return Err(ScheduleError::config(format!(
                "invalid slot grid: {} day(s), {}-{}, step {step_minutes}",
                days.len(),
                open.format("%H:%M"),
                close.format("%H:%M")
            )));
        }

        Ok(Self {
            days,
            open_minute,
            close_minute,
            step_minutes,
        })
    }

    /// Builds a grid from configuration.
    pub fn from_config(config: &SlotGridConfig) -> Result<Self> {
        config.validate()?;
        Self::new(
            config.days.iter().copied(),
            parse_time(&config.open)?,
            parse_time(&config.close)?,
            config.step_minutes,
        )
    }

    /// Teaching days, Monday-first.
    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    /// Candidate slots of `duration_minutes`, in canonical order.
    ///
    /// Starts advance by the grid step; no slot ends after closing.
    pub fn candidates(&self, duration_minutes: u32) -> Vec<TimeSlot> {
        let span = self.close_minute - self.open_minute;
        if duration_minutes == 0 || duration_minutes > span {
            return Vec::new();
        }
        let last_start = self.close_minute - duration_minutes;
        let mut slots = Vec::new();
        for &day in &self.days {
            let mut start = self.open_minute;
            while start <= last_start {
                if let Ok(slot) = TimeSlot::from_minutes(day, start, start + duration_minutes) {
                    slots.push(slot);
                }
                match start.checked_add(self.step_minutes) {
                    Some(next) => start = next,
                    None => break,
                }
            }
        }
        slots
    }
}

impl Default for SlotGrid {
    /// Monday–Friday, 08:00–18:00, hourly.
    fn default() -> Self {
        Self {
            days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            open_minute: 8 * 60,
            close_minute: 18 * 60,
            step_minutes: 60,
        }
    }
}
