//! Behavioral properties of the schedule aggregate, first-fit strategy
//! and the locked service.

use std::sync::{Arc, Barrier};
use std::thread;

use chrono::Weekday;
use u_timetable::models::{Course, Instructor, Resource, TimeSlot};
use u_timetable::scheduler::{FirstFitScheduler, SlotGrid, SlotRequest, SlotScheduler};
use u_timetable::validation::CommittedState;
use u_timetable::{ErrorKind, Schedule, SchedulingService};

fn slot(day: Weekday, start: &str, end: &str) -> TimeSlot {
    TimeSlot::parse(day, start, end).unwrap()
}

#[test]
fn test_overlap_symmetric_over_grid() {
    let mut slots = SlotGrid::default().candidates(60);
    slots.extend(SlotGrid::default().candidates(90));
    slots.push(slot(Weekday::Mon, "08:30", "09:15"));
    for a in &slots {
        assert!(a.overlaps(a));
        for b in &slots {
            assert_eq!(a.overlaps(b), b.overlaps(a), "{a} vs {b}");
        }
    }
}

#[test]
fn test_greedy_fill_never_double_books() {
    let mut schedule = Schedule::new();
    let instructors: Vec<_> = (0..3)
        .map(|i| Instructor::new(format!("I{i}"), format!("Instructor {i}")))
        .collect();
    let rooms: Vec<_> = (0..2).map(|i| Resource::new(format!("R{i}"), 40)).collect();
    let candidates = SlotGrid::default().candidates(90);

    for n in 0..40 {
        let instructor = &instructors[n % instructors.len()];
        let room = &rooms[n % rooms.len()];
        let course = Course::new(format!("C{n}"), format!("Course {n}"), instructor.id.clone())
            .with_duration(90);
        // try candidates in order; validation rejects double-bookings
        for s in &candidates {
            if schedule
                .add_course(course.clone(), instructor.clone(), room.clone(), *s)
                .is_ok()
            {
                break;
            }
        }
    }

    assert!(schedule.len() > 0);
    for instructor in &instructors {
        assert!(schedule.check_instructor_conflicts(&instructor.id).is_empty());
    }
    for room in &rooms {
        assert!(schedule.check_resource_conflicts(&room.id).is_empty());
    }
    assert!(!schedule.summary().has_conflicts());
}

#[test]
fn test_failed_add_changes_nothing() {
    let mut schedule = Schedule::new();
    let smith = Instructor::new("X", "Dr. X").with_max_weekly_hours(2.0);
    let room = Resource::new("R1", 30);
    schedule
        .add_course(
            Course::new("C1", "First", "X").with_duration(90),
            smith.clone(),
            room.clone(),
            slot(Weekday::Mon, "09:00", "10:30"),
        )
        .unwrap();

    let before_len = schedule.len();
    let before_hours = schedule.instructor_hours("X");

    let err = schedule
        .add_course(
            Course::new("C2", "Second", "X").with_duration(60),
            smith,
            room,
            slot(Weekday::Tue, "09:00", "10:00"),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HoursExceeded);
    assert_eq!(schedule.len(), before_len);
    assert_eq!(schedule.instructor_hours("X"), before_hours);
}

#[test]
fn test_first_fit_reference_case() {
    let course = Course::new("C1", "Python", "I1").with_capacity(20);
    let instructor =
        Instructor::new("I1", "Dr. Smith").with_available(slot(Weekday::Mon, "08:00", "12:00"));
    let room = Resource::new("R1", 30).with_window(slot(Weekday::Mon, "08:00", "18:00"));
    let request = SlotRequest::new(&course, &instructor, vec![&room]);

    let candidates = [
        slot(Weekday::Mon, "07:00", "08:00"),
        slot(Weekday::Mon, "08:00", "09:00"),
        slot(Weekday::Mon, "09:00", "10:00"),
    ];
    assert_eq!(
        FirstFitScheduler::new().schedule_course(&request, &candidates),
        Some(slot(Weekday::Mon, "08:00", "09:00"))
    );
}

#[test]
fn test_double_booking_keeps_first_record() {
    let mut schedule = Schedule::new();
    let x = Instructor::new("X", "Dr. X");
    let first = slot(Weekday::Mon, "09:00", "10:00");
    schedule
        .add_course(Course::new("C1", "First", "X"), x.clone(), Resource::new("R1", 30), first)
        .unwrap();

    let err = schedule
        .add_course(
            Course::new("C2", "Second", "X"),
            x,
            Resource::new("R2", 30),
            slot(Weekday::Mon, "09:30", "10:30"),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DoubleBooked);
    assert_eq!(schedule.get("C1").map(|r| r.slot), Some(first));
    assert!(!schedule.contains("C2"));
}

#[test]
fn test_empty_schedule_report() {
    let report = Schedule::new().validation_report();
    assert!(report.is_valid);
    assert!(report.errors.is_empty());
    assert_eq!(report.total_courses, 0);
}

#[test]
fn test_concurrent_double_booking_single_winner() {
    const THREADS: usize = 8;

    let svc = Arc::new(SchedulingService::default());
    svc.register_instructor(Instructor::new("X", "Dr. X")).unwrap();
    for i in 0..THREADS {
        svc.register_resource(Resource::new(format!("R{i}"), 30)).unwrap();
        svc.register_course(
            Course::new(format!("C{i}"), format!("Course {i}"), "X").with_resource(format!("R{i}")),
        )
        .unwrap();
    }

    let target = slot(Weekday::Mon, "09:00", "10:00");
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let svc = Arc::clone(&svc);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                svc.schedule_at(&format!("C{i}"), target)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert_eq!(err.kind(), ErrorKind::DoubleBooked);
    }
    assert_eq!(svc.read(|s| s.len()), 1);
    assert!(svc.read(|s| s.check_instructor_conflicts("X").is_empty()));
}

#[test]
fn test_concurrent_grid_scheduling_stays_consistent() {
    let svc = Arc::new(SchedulingService::default());
    svc.register_instructor(Instructor::new("X", "Dr. X")).unwrap();
    svc.register_resource(Resource::new("R1", 30)).unwrap();
    for i in 0..12 {
        svc.register_course(
            Course::new(format!("C{i}"), format!("Course {i}"), "X").with_resource("R1"),
        )
        .unwrap();
    }

    let handles: Vec<_> = (0..12)
        .map(|i| {
            let svc = Arc::clone(&svc);
            thread::spawn(move || svc.schedule(&format!("C{i}")))
        })
        .collect();
    for h in handles {
        h.join().unwrap().unwrap();
    }

    assert_eq!(svc.read(|s| s.len()), 12);
    assert!(!svc.summary().has_conflicts());
    assert!(svc.validation_report().is_valid);
}
