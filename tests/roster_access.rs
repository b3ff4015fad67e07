use touchline_terminal::model::Position;
use touchline_terminal::roster::{add_player, find_by_access_code, NewPlayer};
use touchline_terminal::state::AppData;
use touchline_terminal::store::Store;

fn new_player(first: &str, last: &str, jersey: u8) -> NewPlayer {
    NewPlayer {
        first_name: first.to_string(),
        last_name: last.to_string(),
        jersey_number: jersey,
        date_of_birth: "2016-01-10".to_string(),
        position: Position::Midfielder,
        parent_name: "Parent".to_string(),
        parent_email: "parent@email.com".to_string(),
        parent_phone: "555-0100".to_string(),
        notes: String::new(),
    }
}

#[test]
fn access_codes_match_case_insensitively_until_deactivation() {
    let mut data = AppData::load(Store::in_memory());
    // Seeded roster: Aiden Johnson carries AJ9999.
    assert_eq!(
        find_by_access_code(&data.players, "aj9999").map(|p| p.id.clone()),
        Some("p4".to_string())
    );
    assert_eq!(
        find_by_access_code(&data.players, "AJ9999").map(|p| p.id.clone()),
        Some("p4".to_string())
    );

    data.update_player("p4", |p| p.is_active = false);
    assert!(find_by_access_code(&data.players, "aj9999").is_none());
    assert!(find_by_access_code(&data.players, "AJ9999").is_none());
}

#[test]
fn generated_codes_are_unique_across_the_roster() {
    let mut players = Vec::new();
    // Same initials force the collision loop to do its job eventually;
    // 300 players with 10k possible suffixes must still end up distinct.
    for i in 0..300 {
        add_player(&mut players, new_player("Alex", "Jones", (i % 99) as u8 + 1));
    }
    let mut codes: Vec<String> = players
        .iter()
        .map(|p| p.parent_access_code.to_uppercase())
        .collect();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), players.len());
}

#[test]
fn deleting_a_player_removes_every_dependent_record() {
    let mut data = AppData::load(Store::in_memory());
    assert!(data.ratings.iter().any(|r| r.player_id == "p3"));
    assert!(data.attendance.iter().any(|r| r.player_id == "p3"));

    data.delete_player("p3");

    assert!(data.players.iter().all(|p| p.id != "p3"));
    assert!(data.ratings.iter().all(|r| r.player_id != "p3"));
    assert!(data.attendance.iter().all(|r| r.player_id != "p3"));
    assert!(data.reports.iter().all(|r| r.player_id != "p3"));
}

#[test]
fn deleting_an_unknown_player_changes_nothing() {
    let mut data = AppData::load(Store::in_memory());
    let players_before = data.players.len();
    let ratings_before = data.ratings.len();
    data.delete_player("ghost");
    assert_eq!(data.players.len(), players_before);
    assert_eq!(data.ratings.len(), ratings_before);
}
