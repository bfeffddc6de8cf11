//! Weekly time slot model.
//!
//! A slot is a same-day interval `[start, end)` at minute resolution on a
//! Monday-first week. Everything else in the crate (availability, double
//! booking, weekly hours) is built on [`TimeSlot::overlaps`],
//! [`TimeSlot::contains`] and [`TimeSlot::duration_minutes`].
//!
//! # Comparability
//! Slots on different days never overlap and never contain each other.

use std::fmt;

use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

const TIME_FORMAT: &str = "%H:%M";

/// A half-open weekly interval `[start, end)` on a single day.
///
/// Invariant: `start < end`. Fields are private so the invariant
/// holds for every value, including deserialized ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSlot", into = "RawTimeSlot")]
pub struct TimeSlot {
    day: Weekday,
    start: NaiveTime,
    end: NaiveTime,
}

#[derive(Serialize, Deserialize)]
struct RawTimeSlot {
    day: Weekday,
    start_time: String,
    end_time: String,
}

impl TimeSlot {
    /// Creates a slot, truncating both bounds to whole minutes.
    ///
    /// Fails with `EntityInvalid` unless `start < end`.
    pub fn new(day: Weekday, start: NaiveTime, end: NaiveTime) -> Result<Self> {
        let start = truncate_to_minute(start);
        let end = truncate_to_minute(end);
        if start >= end {
            return Err(ScheduleError::entity_invalid(format!(
                "time slot on {} must start before it ends ({} >= {})",
                day_name(day),
                start.format(TIME_FORMAT),
                end.format(TIME_FORMAT)
            )));
        }
        Ok(Self { day, start, end })
    }

    /// Creates a slot from `"HH:MM"` strings.
    pub fn parse(day: Weekday, start: &str, end: &str) -> Result<Self> {
        Self::new(day, parse_time(start)?, parse_time(end)?)
    }

    /// Creates a slot from minute-of-day offsets.
    pub fn from_minutes(day: Weekday, start_minute: u32, end_minute: u32) -> Result<Self> {
        Self::new(day, minute_to_time(start_minute)?, minute_to_time(end_minute)?)
    }

    /// Day of week.
    #[inline]
    pub fn day(&self) -> Weekday {
        self.day
    }

    /// Monday-first ordinal (0 = Monday, 6 = Sunday).
    #[inline]
    pub fn day_index(&self) -> u32 {
        self.day.num_days_from_monday()
    }

    /// Start time of day (inclusive).
    #[inline]
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// End time of day (exclusive).
    #[inline]
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Start as minutes since midnight.
    #[inline]
    pub fn start_minute(&self) -> u32 {
        self.start.num_seconds_from_midnight() / 60
    }

    /// End as minutes since midnight.
    #[inline]
    pub fn end_minute(&self) -> u32 {
        self.end.num_seconds_from_midnight() / 60
    }

    /// Length in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        self.end_minute() - self.start_minute()
    }

    /// Length in hours.
    pub fn duration_hours(&self) -> f64 {
        f64::from(self.duration_minutes()) / 60.0
    }

    /// Whether two slots share any instant.
    ///
    /// Touching endpoints do not overlap. A slot overlaps itself.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }

    /// Whether `other` lies entirely within this slot.
    pub fn contains(&self, other: &Self) -> bool {
        self.day == other.day && other.start >= self.start && other.end <= self.end
    }

    /// `"HH:MM"` rendering of the start time.
    pub fn start_label(&self) -> String {
        self.start.format(TIME_FORMAT).to_string()
    }

    /// `"HH:MM"` rendering of the end time.
    pub fn end_label(&self) -> String {
        self.end.format(TIME_FORMAT).to_string()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            day_name(self.day),
            self.start_label(),
            self.end_label()
        )
    }
}

impl TryFrom<RawTimeSlot> for TimeSlot {
    type Error = ScheduleError;

    fn try_from(raw: RawTimeSlot) -> Result<Self> {
        Self::parse(raw.day, &raw.start_time, &raw.end_time)
    }
}

impl From<TimeSlot> for RawTimeSlot {
    fn from(slot: TimeSlot) -> Self {
        Self {
            day: slot.day,
            start_time: slot.start_label(),
            end_time: slot.end_label(),
        }
    }
}

/// Full English day name (`"Monday"`).
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parses `"HH:MM"`.
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|e| {
        ScheduleError::entity_invalid(format!("invalid time of day '{value}': {e}"))
    })
}

fn minute_to_time(minute: u32) -> Result<NaiveTime> {
    NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).ok_or_else(|| {
        ScheduleError::entity_invalid(format!("minute of day out of range: {minute}"))
    })
}

fn truncate_to_minute(t: NaiveTime) -> NaiveTime {
    t.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(day: Weekday, start: &str, end: &str) -> TimeSlot {
        TimeSlot::parse(day, start, end).unwrap()
    }

    #[test]
    fn test_duration() {
        let s = slot(Weekday::Mon, "08:30", "10:00");
        assert_eq!(s.duration_minutes(), 90);
        assert!((s.duration_hours() - 1.5).abs() < 1e-10);
        assert_eq!(s.day_index(), 0);
    }

    #[test]
    fn test_start_must_precede_end() {
        assert!(TimeSlot::parse(Weekday::Mon, "10:00", "10:00").is_err());
        assert!(TimeSlot::parse(Weekday::Mon, "11:00", "10:00").is_err());
        assert!(TimeSlot::parse(Weekday::Mon, "25:00", "26:00").is_err());
    }

    #[test]
    fn test_overlap_half_open() {
        let a = slot(Weekday::Mon, "09:00", "10:00");
        let b = slot(Weekday::Mon, "09:30", "10:30");
        let c = slot(Weekday::Mon, "10:00", "11:00"); // touching
        let d = slot(Weekday::Tue, "09:00", "10:00");

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(!a.overlaps(&d));
        assert!(a.overlaps(&a));
    }

    #[test]
    fn test_overlap_symmetric() {
        let days = [Weekday::Mon, Weekday::Tue];
        let mut slots = Vec::new();
        for &day in &days {
            for start in (0..6).map(|h| 8 * 60 + h * 30) {
                for len in [30, 60, 90] {
                    slots.push(TimeSlot::from_minutes(day, start, start + len).unwrap());
                }
            }
        }
        for a in &slots {
            for b in &slots {
                assert_eq!(a.overlaps(b), b.overlaps(a), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_contains() {
        let window = slot(Weekday::Mon, "08:00", "12:00");
        assert!(window.contains(&slot(Weekday::Mon, "08:00", "09:00")));
        assert!(window.contains(&slot(Weekday::Mon, "11:00", "12:00")));
        assert!(!window.contains(&slot(Weekday::Mon, "11:30", "12:30")));
        assert!(!window.contains(&slot(Weekday::Tue, "09:00", "10:00")));
    }

    #[test]
    fn test_display() {
        let s = slot(Weekday::Wed, "14:00", "15:30");
        assert_eq!(s.to_string(), "Wednesday 14:00-15:30");
    }

    #[test]
    fn test_serde_validates() {
        let s: TimeSlot = serde_json::from_str(
            r#"{"day":"Mon","start_time":"08:00","end_time":"09:00"}"#,
        )
        .unwrap();
        assert_eq!(s, slot(Weekday::Mon, "08:00", "09:00"));

        let json = serde_json::to_value(s).unwrap();
        assert_eq!(json["start_time"], "08:00");

        let bad = serde_json::from_str::<TimeSlot>(
            r#"{"day":"Mon","start_time":"09:00","end_time":"08:00"}"#,
        );
        assert!(bad.is_err());
    }
}
