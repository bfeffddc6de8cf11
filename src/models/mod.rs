//! Timetable domain models.
//!
//! Plain value types handed in by the surrounding catalog layer and the
//! records the schedule commits. None of them hold references to each
//! other; courses name their instructor and rooms by id.
//!
//! # Domain Mappings
//!
//! | u-timetable | University | Training Center | Online Academy |
//! |-------------|------------|-----------------|----------------|
//! | Course | Lecture | Workshop | Live Session |
//! | Instructor | Professor | Trainer | Host |
//! | Resource | Lecture Hall / Lab | Training Room | Virtual Room |
//! | CourseSchedule | Timetable Entry | Booking | Calendar Event |

mod conflict;
mod course;
mod course_schedule;
mod instructor;
mod resource;
mod status;
mod time_slot;

pub use conflict::{ConflictType, ScheduleConflict};
pub use course::{CapacityInfo, Course};
pub use course_schedule::CourseSchedule;
pub use instructor::{Instructor, DEFAULT_MAX_WEEKLY_HOURS};
pub use resource::{Resource, ResourceKind};
pub use status::ScheduleStatus;
pub use time_slot::{day_name, parse_time, TimeSlot};
