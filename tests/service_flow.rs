//! End-to-end flow through the service façade.

use std::sync::Arc;

use chrono::Weekday;
use u_timetable::models::{
    ConflictType, Course, Instructor, Resource, ResourceKind, ScheduleStatus, TimeSlot,
};
use u_timetable::notify::RecordingNotifier;
use u_timetable::{EngineConfig, ErrorKind, SchedulingService};

fn slot(day: Weekday, start: &str, end: &str) -> TimeSlot {
    TimeSlot::parse(day, start, end).unwrap()
}

fn campus() -> SchedulingService {
    u_timetable::logging::init_test();
    let config = EngineConfig::from_json_str(r#"{"notifiers": ["log"]}"#).unwrap();
    let svc = SchedulingService::from_config(&config).unwrap();

    svc.register_instructor(
        Instructor::new("I1", "Dr. Smith")
            .with_email("smith@uni.edu")
            .with_available(slot(Weekday::Mon, "09:00", "17:00"))
            .with_available(slot(Weekday::Wed, "09:00", "17:00")),
    )
    .unwrap();
    svc.register_instructor(
        Instructor::new("I2", "Prof. Jones")
            .with_email("jones@uni.edu")
            .with_unavailable(slot(Weekday::Mon, "08:00", "12:00")),
    )
    .unwrap();

    svc.register_resource(
        Resource::new("R1", 30)
            .with_name("Classroom A")
            .with_equipment("projector"),
    )
    .unwrap();
    svc.register_resource(
        Resource::laboratory("L1", 20)
            .with_name("Computer Lab")
            .with_equipment("computers")
            .with_equipment("projector"),
    )
    .unwrap();
    svc.register_resource(
        Resource::new("O1", 200)
            .with_name("Virtual Room")
            .with_kind(ResourceKind::Online),
    )
    .unwrap();

    svc.register_course(
        Course::new("CS101", "Intro to Python", "I1")
            .with_capacity(25)
            .with_duration(90)
            .with_equipment("projector")
            .with_resource("R1"),
    )
    .unwrap();
    svc.register_course(
        Course::new("DS201", "Data Science", "I2")
            .with_capacity(20)
            .with_duration(120)
            .with_equipment("computers")
            .with_preferred_day(Weekday::Tue)
            .with_resource("L1"),
    )
    .unwrap();
    svc.register_course(
        Course::new("ML301", "Machine Learning", "I1")
            .with_capacity(150)
            .with_resource("O1"),
    )
    .unwrap();
    svc
}

#[test]
fn test_full_term() {
    let svc = campus();
    let rec = Arc::new(RecordingNotifier::new());
    svc.register_notifier(rec.clone());

    // I1 is available from Monday 09:00; 90 minutes on an hourly grid
    let cs = svc.schedule("CS101").unwrap();
    assert_eq!(cs, slot(Weekday::Mon, "09:00", "10:30"));

    // I2 is blocked Monday morning
    let ds = svc.schedule("DS201").unwrap();
    assert_eq!(ds, slot(Weekday::Mon, "12:00", "14:00"));

    // same instructor as CS101: skips the 09:00 and 10:00 starts
    let ml = svc.schedule("ML301").unwrap();
    assert_eq!(ml, slot(Weekday::Mon, "11:00", "12:00"));

    let report = svc.validation_report();
    assert!(report.is_valid);
    assert_eq!(report.total_courses, 3);
    assert_eq!(report.warnings.len(), 1, "DS201 prefers Tuesday");
    assert!(!report.summary.has_conflicts());
    assert_eq!(report.summary.by_day["Monday"], 3);
    assert_eq!(report.summary.by_instructor["I1"], 2);

    svc.enroll("CS101", "S1").unwrap();
    svc.enroll("CS101", "S2").unwrap();
    let info = svc.capacity_info("CS101").unwrap();
    assert_eq!(info.enrolled_students, 2);
    assert_eq!(info.available_seats, 23);

    svc.reschedule("CS101", slot(Weekday::Wed, "14:00", "15:30"))
        .unwrap();
    svc.start("CS101").unwrap();
    svc.complete("CS101").unwrap();
    svc.cancel("ML301", Some("instructor on leave")).unwrap();

    let stats = svc.statistics();
    assert_eq!(stats.total_courses, 3);
    assert_eq!(stats.total_resources, 3);
    assert_eq!(stats.scheduled_courses, 3);
    assert_eq!(stats.courses_by_status["completed"], 1);
    assert_eq!(stats.courses_by_status["cancelled"], 1);
    assert_eq!(stats.courses_by_status["scheduled"], 1);
    assert_eq!(stats.total_enrolled, 2);

    // 3 schedules, 1 reschedule, start, complete, cancel
    assert_eq!(rec.len(), 7);
    assert!(rec.sent()[3].message.contains("rescheduled"));
    assert_eq!(svc.status("ML301"), Some(ScheduleStatus::Cancelled));
}

#[test]
fn test_export_shape() {
    let svc = campus();
    svc.schedule("CS101").unwrap();
    svc.schedule("DS201").unwrap();

    let json: serde_json::Value = serde_json::from_str(&svc.export_json().unwrap()).unwrap();
    let rows = json["courses"].as_array().unwrap();
    assert_eq!(rows.len(), 2);

    let row = &rows[0];
    for key in [
        "course_id",
        "course_name",
        "instructor_id",
        "instructor_name",
        "resource_id",
        "resource_name",
        "day",
        "start_time",
        "end_time",
        "duration_minutes",
        "scheduled_date",
    ] {
        assert!(row.get(key).is_some(), "missing {key}");
    }
    assert_eq!(row["course_id"], "CS101");
    assert_eq!(row["resource_name"], "Classroom A");
    assert_eq!(row["day"], "Monday");
    assert_eq!(row["start_time"], "09:00");
    assert_eq!(row["end_time"], "10:30");
    assert_eq!(row["duration_minutes"], 90);

    let report = serde_json::to_value(svc.validation_report()).unwrap();
    assert_eq!(report["is_valid"], true);
    assert_eq!(report["summary"]["by_resource"]["L1"], 1);
    assert!(report["summary"]["conflicts"]["instructor"].as_array().unwrap().is_empty());
}

#[test]
fn test_capacity_and_equipment_rejections() {
    let svc = campus();
    svc.register_course(
        Course::new("BIG", "Huge Lecture", "I2")
            .with_capacity(500)
            .with_resource("R1"),
    )
    .unwrap();
    svc.register_course(
        Course::new("CHEM", "Chemistry", "I2")
            .with_equipment("fume hood")
            .with_resource("L1"),
    )
    .unwrap();

    let err = svc.schedule_at("BIG", slot(Weekday::Tue, "09:00", "10:00")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);

    let err = svc.schedule_at("CHEM", slot(Weekday::Tue, "09:00", "10:00")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EquipmentMissing);
    assert!(err.to_string().contains("fume hood"));

    let report = svc.validation_report();
    assert!(!report.is_valid);
    assert_eq!(report.errors.len(), 2);
    assert_eq!(report.total_courses, 0);
}

#[test]
fn test_conflict_report_after_stale_reschedule() {
    let svc = campus();
    svc.schedule("CS101").unwrap();
    svc.update_instructor_availability("I1", vec![slot(Weekday::Mon, "09:00", "12:00")])
        .unwrap();

    let err = svc
        .reschedule("CS101", slot(Weekday::Wed, "09:00", "10:30"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConflictsDetected);
    assert_eq!(svc.committed_slot("CS101"), Some(slot(Weekday::Mon, "09:00", "10:30")));

    let report = svc.conflict_report();
    assert_eq!(report.total_conflicts, 1);
    assert_eq!(report.conflicts_by_type["instructor_unavailable"], 1);
    assert_eq!(report.details[0].conflict_type, ConflictType::InstructorUnavailable);
}
