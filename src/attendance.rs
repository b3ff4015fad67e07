use crate::model::{generate_id, AttendanceRecord, AttendanceStatus, CalendarEvent};
use crate::schedule;

/// Upsert on the (event, player) compound key: marking twice re-statuses the
/// existing record instead of adding a second one.
pub fn mark_attendance(
    records: &mut Vec<AttendanceRecord>,
    event_id: &str,
    player_id: &str,
    status: AttendanceStatus,
    notes: Option<String>,
) -> AttendanceRecord {
    if let Some(existing) = records
        .iter_mut()
        .find(|r| r.event_id == event_id && r.player_id == player_id)
    {
        existing.status = status;
        existing.notes = notes;
        return existing.clone();
    }
    let record = AttendanceRecord {
        id: generate_id(),
        event_id: event_id.to_string(),
        player_id: player_id.to_string(),
        status,
        notes,
    };
    records.push(record.clone());
    record
}

pub fn records_for_event<'a>(
    records: &'a [AttendanceRecord],
    event_id: &str,
) -> Vec<&'a AttendanceRecord> {
    records.iter().filter(|r| r.event_id == event_id).collect()
}

pub fn records_for_player<'a>(
    records: &'a [AttendanceRecord],
    player_id: &str,
) -> Vec<&'a AttendanceRecord> {
    records.iter().filter(|r| r.player_id == player_id).collect()
}

pub fn status_for(
    records: &[AttendanceRecord],
    event_id: &str,
    player_id: &str,
) -> Option<AttendanceStatus> {
    records
        .iter()
        .find(|r| r.event_id == event_id && r.player_id == player_id)
        .map(|r| r.status)
}

/// Percentage of completed events where the player was marked Present,
/// rounded to the nearest integer. No completed events means a perfect 100:
/// nobody has missed anything yet.
pub fn attendance_rate(
    player_id: &str,
    records: &[AttendanceRecord],
    events: &[CalendarEvent],
) -> u8 {
    let completed = schedule::completed(events);
    if completed.is_empty() {
        return 100;
    }

    let present = records
        .iter()
        .filter(|r| r.player_id == player_id && r.status == AttendanceStatus::Present)
        .filter(|r| completed.iter().any(|e| e.id == r.event_id))
        .count();

    let rate = (present as f64 / completed.len() as f64) * 100.0;
    rate.round() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventAttendanceSummary {
    pub present: usize,
    pub absent: usize,
    pub excused: usize,
    pub total: usize,
}

pub fn event_summary(records: &[AttendanceRecord], event_id: &str) -> EventAttendanceSummary {
    let mut summary = EventAttendanceSummary::default();
    for record in records.iter().filter(|r| r.event_id == event_id) {
        match record.status {
            AttendanceStatus::Present => summary.present += 1,
            AttendanceStatus::Absent => summary.absent += 1,
            AttendanceStatus::Excused => summary.excused += 1,
        }
        summary.total += 1;
    }
    summary
}
