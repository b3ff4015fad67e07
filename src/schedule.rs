use crate::model::{generate_id, CalendarEvent};

pub fn add_event(events: &mut Vec<CalendarEvent>, mut event: CalendarEvent) -> CalendarEvent {
    event.id = generate_id();
    events.push(event.clone());
    event
}

/// Silent no-op when the id is unknown.
pub fn update_event(events: &mut [CalendarEvent], id: &str, apply: impl FnOnce(&mut CalendarEvent)) {
    if let Some(event) = events.iter_mut().find(|e| e.id == id) {
        apply(event);
    }
}

pub fn delete_event(events: &mut Vec<CalendarEvent>, id: &str) {
    events.retain(|e| e.id != id);
}

pub fn find_event<'a>(events: &'a [CalendarEvent], id: &str) -> Option<&'a CalendarEvent> {
    events.iter().find(|e| e.id == id)
}

/// Events on or after `today`, soonest first. ISO date strings order
/// lexicographically, so plain string comparison is enough.
pub fn upcoming<'a>(events: &'a [CalendarEvent], today: &str) -> Vec<&'a CalendarEvent> {
    let mut out: Vec<&CalendarEvent> = events
        .iter()
        .filter(|e| e.date.as_str() >= today)
        .collect();
    out.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));
    out
}

/// Events before `today`, most recent first.
pub fn past<'a>(events: &'a [CalendarEvent], today: &str) -> Vec<&'a CalendarEvent> {
    let mut out: Vec<&CalendarEvent> = events
        .iter()
        .filter(|e| e.date.as_str() < today)
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.time.cmp(&a.time)));
    out
}

/// Completed events are the attendance-rate denominator.
pub fn completed(events: &[CalendarEvent]) -> Vec<&CalendarEvent> {
    events.iter().filter(|e| e.is_completed).collect()
}
