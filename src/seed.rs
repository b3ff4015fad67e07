//! Starter data so a fresh install has something to look at. Seeding runs
//! once, guarded by the store's `seeded` marker.

use crate::model::{
    AttendanceRecord, AttendanceStatus, CalendarEvent, EventType, GameResult, HomeOrAway, Player,
    Position, SkillRating, SkillScores,
};

#[allow(clippy::too_many_arguments)]
fn player(
    id: &str,
    first: &str,
    last: &str,
    jersey: u8,
    dob: &str,
    position: Position,
    parent: &str,
    email: &str,
    phone: &str,
    notes: &str,
    code: &str,
) -> Player {
    Player {
        id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        jersey_number: jersey,
        date_of_birth: dob.to_string(),
        position,
        parent_name: parent.to_string(),
        parent_email: email.to_string(),
        parent_phone: phone.to_string(),
        notes: notes.to_string(),
        parent_access_code: code.to_string(),
        is_active: true,
        joined_date: "2025-09-01".to_string(),
    }
}

pub fn seed_players() -> Vec<Player> {
    vec![
        player(
            "p1",
            "Liam",
            "Torres",
            1,
            "2016-03-15",
            Position::Goalkeeper,
            "Maria Torres",
            "maria.torres@email.com",
            "555-0101",
            "Great reflexes, needs to work on communication",
            "LT1234",
        ),
        player(
            "p2",
            "Noah",
            "Kim",
            4,
            "2015-07-22",
            Position::Defender,
            "James Kim",
            "james.kim@email.com",
            "555-0102",
            "Strong in the air, improving first touch",
            "NK4321",
        ),
        player(
            "p3",
            "Emma",
            "Patel",
            7,
            "2016-01-10",
            Position::Midfielder,
            "Priya Patel",
            "priya.patel@email.com",
            "555-0103",
            "Excellent vision, needs to shoot more",
            "EP7777",
        ),
        player(
            "p4",
            "Aiden",
            "Johnson",
            9,
            "2015-11-05",
            Position::Forward,
            "Sarah Johnson",
            "sarah.j@email.com",
            "555-0104",
            "Natural goal scorer, work on tracking back",
            "AJ9999",
        ),
        player(
            "p5",
            "Sofia",
            "Martinez",
            11,
            "2016-05-30",
            Position::Forward,
            "Carlos Martinez",
            "carlos.m@email.com",
            "555-0105",
            "Fastest player on the team, improving finishing",
            "SM1111",
        ),
        player(
            "p6",
            "Ethan",
            "Brown",
            5,
            "2015-09-18",
            Position::Defender,
            "Mike Brown",
            "mike.brown@email.com",
            "555-0106",
            "Great attitude, developing positioning",
            "EB5555",
        ),
    ]
}

fn practice(id: &str, date: &str, notes: &str, completed: bool) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        event_type: EventType::Practice,
        title: "Team Practice".to_string(),
        date: date.to_string(),
        time: "17:00".to_string(),
        location: "Memorial Park Field 2".to_string(),
        opponent: None,
        home_or_away: None,
        result: None,
        goals_for: None,
        goals_against: None,
        notes: notes.to_string(),
        is_completed: completed,
    }
}

pub fn seed_events() -> Vec<CalendarEvent> {
    vec![
        practice("e1", "2026-02-10", "Focus on passing drills", true),
        practice("e2", "2026-02-13", "Shooting practice + scrimmage", true),
        CalendarEvent {
            id: "e3".to_string(),
            event_type: EventType::Game,
            title: "vs. River City FC".to_string(),
            date: "2026-02-15".to_string(),
            time: "10:00".to_string(),
            location: "City Sports Complex".to_string(),
            opponent: Some("River City FC".to_string()),
            home_or_away: Some(HomeOrAway::Away),
            result: Some(GameResult::Win),
            goals_for: Some(3),
            goals_against: Some(1),
            notes: "Great team performance! Liam had 2 saves.".to_string(),
            is_completed: true,
        },
        practice("e4", "2026-02-18", "Dribbling + small-sided games", true),
        practice("e5", "2026-02-24", "Defensive shape + set pieces", false),
        CalendarEvent {
            id: "e6".to_string(),
            event_type: EventType::Game,
            title: "vs. Northside United".to_string(),
            date: "2026-03-01".to_string(),
            time: "09:00".to_string(),
            location: "Home Field - Riverside Park".to_string(),
            opponent: Some("Northside United".to_string()),
            home_or_away: Some(HomeOrAway::Home),
            result: None,
            goals_for: None,
            goals_against: None,
            notes: "Season opener at home!".to_string(),
            is_completed: false,
        },
        practice("e7", "2026-03-04", "", false),
        CalendarEvent {
            id: "e8".to_string(),
            event_type: EventType::Game,
            title: "vs. Eagles SC".to_string(),
            date: "2026-03-08".to_string(),
            time: "11:00".to_string(),
            location: "Eagles Home Ground".to_string(),
            opponent: Some("Eagles SC".to_string()),
            home_or_away: Some(HomeOrAway::Away),
            result: None,
            goals_for: None,
            goals_against: None,
            notes: String::new(),
            is_completed: false,
        },
    ]
}

fn rating(id: &str, player_id: &str, date: &str, label: &str, values: [u8; 8]) -> SkillRating {
    SkillRating {
        id: id.to_string(),
        player_id: player_id.to_string(),
        assessed_by: "Coach".to_string(),
        assessed_at: date.to_string(),
        session_label: label.to_string(),
        ratings: SkillScores {
            ball_control: values[0],
            dribbling: values[1],
            passing: values[2],
            shooting: values[3],
            defending: values[4],
            positioning: values[5],
            teamwork: values[6],
            effort: values[7],
        },
        coach_notes: String::new(),
    }
}

pub fn seed_ratings() -> Vec<SkillRating> {
    vec![
        // Liam (GK)
        rating("r1", "p1", "2026-02-10", "Feb 10 Practice", [3, 2, 3, 2, 4, 3, 4, 5]),
        rating("r2", "p1", "2026-02-18", "Feb 18 Practice", [4, 2, 3, 3, 4, 4, 4, 5]),
        // Noah (DEF)
        rating("r3", "p2", "2026-02-10", "Feb 10 Practice", [2, 2, 3, 2, 4, 3, 4, 4]),
        rating("r4", "p2", "2026-02-18", "Feb 18 Practice", [3, 3, 3, 2, 4, 4, 4, 4]),
        // Emma (MID)
        rating("r5", "p3", "2026-02-10", "Feb 10 Practice", [4, 3, 5, 2, 3, 4, 5, 5]),
        rating("r6", "p3", "2026-02-18", "Feb 18 Practice", [4, 4, 5, 3, 3, 5, 5, 5]),
        // Aiden (FWD)
        rating("r7", "p4", "2026-02-10", "Feb 10 Practice", [3, 4, 3, 4, 2, 3, 3, 5]),
        rating("r8", "p4", "2026-02-18", "Feb 18 Practice", [4, 4, 3, 5, 2, 4, 3, 5]),
        // Sofia (FWD)
        rating("r9", "p5", "2026-02-10", "Feb 10 Practice", [3, 5, 3, 3, 2, 3, 3, 5]),
        rating("r10", "p5", "2026-02-18", "Feb 18 Practice", [4, 5, 3, 4, 3, 3, 4, 5]),
        // Ethan (DEF)
        rating("r11", "p6", "2026-02-10", "Feb 10 Practice", [2, 2, 2, 2, 3, 3, 4, 5]),
        rating("r12", "p6", "2026-02-18", "Feb 18 Practice", [3, 3, 3, 2, 4, 3, 4, 5]),
    ]
}

pub fn seed_attendance() -> Vec<AttendanceRecord> {
    let past_events = ["e1", "e2", "e3", "e4"];
    let players = ["p1", "p2", "p3", "p4", "p5", "p6"];
    let mut records = Vec::with_capacity(past_events.len() * players.len());
    for (ei, event_id) in past_events.iter().enumerate() {
        for (pi, player_id) in players.iter().enumerate() {
            let status = if pi == 1 && ei == 1 {
                AttendanceStatus::Absent
            } else if pi == 4 && ei == 3 {
                AttendanceStatus::Excused
            } else {
                AttendanceStatus::Present
            };
            records.push(AttendanceRecord {
                id: format!("a_{event_id}_{player_id}"),
                event_id: event_id.to_string(),
                player_id: player_id.to_string(),
                status,
                notes: None,
            });
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::attendance_rate;

    #[test]
    fn seed_collections_are_consistent() {
        let players = seed_players();
        let events = seed_events();
        let ratings = seed_ratings();
        let records = seed_attendance();

        assert_eq!(players.len(), 6);
        assert_eq!(events.len(), 8);
        assert_eq!(events.iter().filter(|e| e.is_completed).count(), 4);
        assert_eq!(ratings.len(), 12);
        assert_eq!(records.len(), 24);

        // Every rating and record points at a seeded player/event.
        assert!(ratings
            .iter()
            .all(|r| players.iter().any(|p| p.id == r.player_id)));
        assert!(records.iter().all(|r| {
            players.iter().any(|p| p.id == r.player_id)
                && events.iter().any(|e| e.id == r.event_id)
        }));

        // Noah missed one of four completed events.
        assert_eq!(attendance_rate("p2", &records, &events), 75);
        assert_eq!(attendance_rate("p1", &records, &events), 100);
    }
}
