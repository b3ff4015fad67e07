use touchline_terminal::attendance::{attendance_rate, mark_attendance};
use touchline_terminal::model::{AttendanceStatus, CalendarEvent, EventType};

fn event(id: &str, completed: bool) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        event_type: EventType::Practice,
        title: "Practice".to_string(),
        date: "2026-02-10".to_string(),
        time: "17:00".to_string(),
        location: "Field 2".to_string(),
        opponent: None,
        home_or_away: None,
        result: None,
        goals_for: None,
        goals_against: None,
        notes: String::new(),
        is_completed: completed,
    }
}

#[test]
fn rate_is_rounded_percentage_of_completed_events() {
    // 7 completed events, present at 0 through 7 of them.
    let events: Vec<CalendarEvent> = (0..7).map(|i| event(&format!("e{i}"), true)).collect();
    for present in 0..=7usize {
        let mut records = Vec::new();
        for i in 0..present {
            mark_attendance(
                &mut records,
                &format!("e{i}"),
                "p1",
                AttendanceStatus::Present,
                None,
            );
        }
        let expected = ((present as f64 / 7.0) * 100.0).round() as u8;
        assert_eq!(
            attendance_rate("p1", &records, &events),
            expected,
            "present {present} of 7"
        );
    }
}

#[test]
fn zero_completed_events_means_a_perfect_rate() {
    assert_eq!(attendance_rate("p1", &[], &[]), 100);
    let not_done = vec![event("e1", false), event("e2", false)];
    assert_eq!(attendance_rate("p1", &[], &not_done), 100);
}

#[test]
fn absent_and_excused_count_against_the_rate() {
    let events = vec![event("e1", true), event("e2", true)];
    let mut records = Vec::new();
    mark_attendance(&mut records, "e1", "p1", AttendanceStatus::Present, None);
    mark_attendance(&mut records, "e2", "p1", AttendanceStatus::Excused, None);
    assert_eq!(attendance_rate("p1", &records, &events), 50);
}

#[test]
fn remarking_the_same_event_never_duplicates() {
    let mut records = Vec::new();
    mark_attendance(&mut records, "e1", "p1", AttendanceStatus::Present, None);
    mark_attendance(&mut records, "e1", "p1", AttendanceStatus::Absent, None);
    mark_attendance(&mut records, "e1", "p1", AttendanceStatus::Present, None);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, AttendanceStatus::Present);

    // A different player at the same event is a separate record.
    mark_attendance(&mut records, "e1", "p2", AttendanceStatus::Present, None);
    assert_eq!(records.len(), 2);
}
