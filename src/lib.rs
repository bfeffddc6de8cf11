//! Course timetabling with constraint validation.
//!
//! Assigns non-conflicting weekly time slots to courses, given instructors
//! and resources (classrooms, labs, online rooms) with availability
//! windows, and keeps a committed schedule consistent under concurrent
//! mutation.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeSlot`, `Instructor`, `Resource`,
//!   `Course`, `CourseSchedule`, `ScheduleStatus`, `ScheduleConflict`
//! - **`validation`**: The ordered hard/soft constraint pipeline
//! - **`schedule`**: The `Schedule` aggregate plus summaries, validation
//!   reports and exports
//! - **`scheduler`**: Pluggable slot strategies (first-fit, seeded
//!   random-fit) and the candidate `SlotGrid`
//! - **`service`**: `SchedulingService`, the lock-guarded façade with
//!   catalog, status machine, enrollment and conflict history
//! - **`config`**, **`notify`**, **`logging`**, **`error`**: ambient plumbing
//!
//! # Example
//!
//! ```
//! use chrono::Weekday;
//! use u_timetable::models::{Course, Instructor, Resource, TimeSlot};
//! use u_timetable::service::SchedulingService;
//!
//! let svc = SchedulingService::default();
//! svc.register_instructor(Instructor::new("I1", "Dr. Smith")).unwrap();
//! svc.register_resource(Resource::new("R1", 30)).unwrap();
//! svc.register_course(Course::new("C1", "Python", "I1").with_capacity(25).with_resource("R1"))
//!     .unwrap();
//!
//! let slot = svc.schedule("C1").unwrap();
//! assert_eq!(slot, TimeSlot::parse(Weekday::Mon, "08:00", "09:00").unwrap());
//! assert!(svc.validation_report().is_valid);
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod notify;
pub mod schedule;
pub mod scheduler;
pub mod service;
pub mod validation;

pub use config::EngineConfig;
pub use error::{ErrorKind, Result, ScheduleError};
pub use schedule::Schedule;
pub use service::SchedulingService;
