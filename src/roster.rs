use crate::model::{generate_access_code, generate_id, today_iso, Player, Position};

/// Fields the coach fills in when adding a player; id, access code, and
/// joined date are assigned here.
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    pub jersey_number: u8,
    pub date_of_birth: String,
    pub position: Position,
    pub parent_name: String,
    pub parent_email: String,
    pub parent_phone: String,
    pub notes: String,
}

pub fn add_player(players: &mut Vec<Player>, new: NewPlayer) -> Player {
    let code = new_access_code(players, &new.first_name, &new.last_name);
    let player = Player {
        id: generate_id(),
        first_name: new.first_name,
        last_name: new.last_name,
        jersey_number: new.jersey_number,
        date_of_birth: new.date_of_birth,
        position: new.position,
        parent_name: new.parent_name,
        parent_email: new.parent_email,
        parent_phone: new.parent_phone,
        notes: new.notes,
        parent_access_code: code,
        is_active: true,
        joined_date: today_iso(),
    };
    players.push(player.clone());
    player
}

/// Merge-style update: silently a no-op when the id is unknown. The access
/// code is immutable; the closure never sees a way to regenerate it.
pub fn update_player(players: &mut [Player], id: &str, apply: impl FnOnce(&mut Player)) {
    if let Some(player) = players.iter_mut().find(|p| p.id == id) {
        let code = player.parent_access_code.clone();
        apply(player);
        player.parent_access_code = code;
    }
}

pub fn delete_player(players: &mut Vec<Player>, id: &str) {
    players.retain(|p| p.id != id);
}

pub fn find_player<'a>(players: &'a [Player], id: &str) -> Option<&'a Player> {
    players.iter().find(|p| p.id == id)
}

/// Case-insensitive access-code lookup. Inactive players never match, so a
/// revoked roster spot also revokes the parent link.
pub fn find_by_access_code<'a>(players: &'a [Player], code: &str) -> Option<&'a Player> {
    let wanted = code.trim().to_uppercase();
    if wanted.is_empty() {
        return None;
    }
    players
        .iter()
        .find(|p| p.is_active && p.parent_access_code.eq_ignore_ascii_case(&wanted))
}

pub fn active_players(players: &[Player]) -> Vec<&Player> {
    let mut out: Vec<&Player> = players.iter().filter(|p| p.is_active).collect();
    out.sort_by(|a, b| {
        a.jersey_number
            .cmp(&b.jersey_number)
            .then_with(|| a.last_name.cmp(&b.last_name))
    });
    out
}

fn new_access_code(players: &[Player], first_name: &str, last_name: &str) -> String {
    loop {
        let code = generate_access_code(first_name, last_name);
        let taken = players
            .iter()
            .any(|p| p.parent_access_code.eq_ignore_ascii_case(&code));
        if !taken {
            return code;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(first: &str, last: &str, jersey: u8) -> NewPlayer {
        NewPlayer {
            first_name: first.to_string(),
            last_name: last.to_string(),
            jersey_number: jersey,
            date_of_birth: "2016-03-15".to_string(),
            position: Position::Midfielder,
            parent_name: String::new(),
            parent_email: String::new(),
            parent_phone: String::new(),
            notes: String::new(),
        }
    }

    #[test]
    fn access_code_lookup_is_case_insensitive_and_active_only() {
        let mut players = Vec::new();
        let added = add_player(&mut players, sample("Aiden", "Johnson", 9));
        let code = added.parent_access_code.clone();

        assert!(find_by_access_code(&players, &code.to_lowercase()).is_some());
        assert!(find_by_access_code(&players, &code).is_some());

        update_player(&mut players, &added.id, |p| p.is_active = false);
        assert!(find_by_access_code(&players, &code.to_lowercase()).is_none());
        assert!(find_by_access_code(&players, &code).is_none());
    }

    #[test]
    fn update_never_changes_the_access_code() {
        let mut players = Vec::new();
        let added = add_player(&mut players, sample("Emma", "Patel", 7));
        let code = added.parent_access_code.clone();
        update_player(&mut players, &added.id, |p| {
            p.parent_access_code = "HACKED".to_string();
            p.jersey_number = 10;
        });
        let player = find_player(&players, &added.id).unwrap();
        assert_eq!(player.parent_access_code, code);
        assert_eq!(player.jersey_number, 10);
    }

    #[test]
    fn update_of_unknown_id_is_a_no_op() {
        let mut players = Vec::new();
        add_player(&mut players, sample("Noah", "Kim", 4));
        update_player(&mut players, "missing", |p| p.jersey_number = 99);
        assert_eq!(players[0].jersey_number, 4);
    }

    #[test]
    fn active_players_sort_by_jersey_number() {
        let mut players = Vec::new();
        add_player(&mut players, sample("Sofia", "Martinez", 11));
        add_player(&mut players, sample("Liam", "Torres", 1));
        add_player(&mut players, sample("Ethan", "Brown", 5));
        let active = active_players(&players);
        let jerseys: Vec<u8> = active.iter().map(|p| p.jersey_number).collect();
        assert_eq!(jerseys, vec![1, 5, 11]);
    }
}
