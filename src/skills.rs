use crate::model::{generate_id, SkillKey, SkillRating, SKILL_KEYS};

pub fn add_rating(ratings: &mut Vec<SkillRating>, mut rating: SkillRating) -> SkillRating {
    rating.id = generate_id();
    ratings.push(rating.clone());
    rating
}

pub fn delete_rating(ratings: &mut Vec<SkillRating>, id: &str) {
    ratings.retain(|r| r.id != id);
}

/// A player's ratings, oldest first. Assessed-at strings are ISO timestamps,
/// so string ordering is acceptable; ids break exact ties deterministically.
pub fn ratings_for_player<'a>(ratings: &'a [SkillRating], player_id: &str) -> Vec<&'a SkillRating> {
    let mut out: Vec<&SkillRating> = ratings.iter().filter(|r| r.player_id == player_id).collect();
    out.sort_by(|a, b| {
        a.assessed_at
            .cmp(&b.assessed_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    out
}

pub fn latest_for_player<'a>(
    ratings: &'a [SkillRating],
    player_id: &str,
) -> Option<&'a SkillRating> {
    ratings_for_player(ratings, player_id).last().copied()
}

/// Second-most-recent rating, or None below two ratings. Order of the input
/// slice does not matter.
pub fn previous_for_player<'a>(
    ratings: &'a [SkillRating],
    player_id: &str,
) -> Option<&'a SkillRating> {
    let sorted = ratings_for_player(ratings, player_id);
    if sorted.len() < 2 {
        return None;
    }
    sorted.get(sorted.len() - 2).copied()
}

/// Mean of the 8 skill values, rounded half-up to one decimal.
pub fn overall_score(rating: &SkillRating) -> f64 {
    let sum: u32 = rating.ratings.values().iter().map(|v| u32::from(*v)).sum();
    let mean = f64::from(sum) / 8.0;
    (mean * 10.0).round() / 10.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarRow {
    pub skill: &'static str,
    pub value: u8,
    pub previous: Option<u8>,
    pub full_mark: u8,
}

/// One row per skill for the radar view, pairing the current rating with the
/// previous one when it exists.
pub fn radar_rows(current: &SkillRating, previous: Option<&SkillRating>) -> Vec<RadarRow> {
    SKILL_KEYS
        .iter()
        .map(|key| RadarRow {
            skill: key.label(),
            value: current.ratings.get(*key),
            previous: previous.map(|p| p.ratings.get(*key)),
            full_mark: 5,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    pub date: String,
    pub value: u8,
}

/// Chronological series of one skill across a player's ratings.
pub fn skill_trend(ratings: &[SkillRating], player_id: &str, skill: SkillKey) -> Vec<TrendPoint> {
    ratings_for_player(ratings, player_id)
        .into_iter()
        .map(|r| TrendPoint {
            label: r.session_label.clone(),
            date: r.assessed_at.clone(),
            value: r.ratings.get(skill),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionRow {
    pub label: String,
    pub values: [u8; 8],
}

/// All 8 skills per session, oldest first, for the history table.
pub fn session_rows(ratings: &[SkillRating], player_id: &str) -> Vec<SessionRow> {
    ratings_for_player(ratings, player_id)
        .into_iter()
        .map(|r| SessionRow {
            label: r.session_label.clone(),
            values: r.ratings.values(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SkillScores;

    fn rating(id: &str, player: &str, at: &str, values: [u8; 8]) -> SkillRating {
        SkillRating {
            id: id.to_string(),
            player_id: player.to_string(),
            assessed_by: "Coach".to_string(),
            assessed_at: at.to_string(),
            session_label: at.to_string(),
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

    #[test]
    fn overall_score_rounds_to_one_decimal() {
        let r = rating("r1", "p1", "2026-02-10", [3, 2, 3, 2, 4, 3, 4, 5]);
        assert_eq!(overall_score(&r), 3.3);
        let r = rating("r2", "p1", "2026-02-10", [5, 5, 5, 5, 5, 5, 5, 5]);
        assert_eq!(overall_score(&r), 5.0);
        // 3+3+3+3+3+3+3+4 = 25 / 8 = 3.125, half rounds up.
        let r = rating("r3", "p1", "2026-02-10", [3, 3, 3, 3, 3, 3, 3, 4]);
        assert_eq!(overall_score(&r), 3.1);
    }

    #[test]
    fn previous_is_second_most_recent_regardless_of_input_order() {
        let a = rating("a", "p1", "2026-02-10", [3; 8]);
        let b = rating("b", "p1", "2026-02-18", [4; 8]);
        let c = rating("c", "p1", "2026-02-24", [5; 8]);

        let forward = vec![a.clone(), b.clone(), c.clone()];
        let backward = vec![c, b, a];
        assert_eq!(previous_for_player(&forward, "p1").unwrap().id, "b");
        assert_eq!(previous_for_player(&backward, "p1").unwrap().id, "b");
    }

    #[test]
    fn previous_is_none_below_two_ratings() {
        let one = vec![rating("a", "p1", "2026-02-10", [3; 8])];
        assert!(previous_for_player(&[], "p1").is_none());
        assert!(previous_for_player(&one, "p1").is_none());
    }

    #[test]
    fn latest_ignores_other_players() {
        let ratings = vec![
            rating("a", "p1", "2026-02-10", [3; 8]),
            rating("b", "p2", "2026-03-01", [4; 8]),
            rating("c", "p1", "2026-02-18", [5; 8]),
        ];
        assert_eq!(latest_for_player(&ratings, "p1").unwrap().id, "c");
    }

    #[test]
    fn radar_rows_pair_current_with_previous() {
        let prev = rating("a", "p1", "2026-02-10", [3, 2, 3, 2, 4, 3, 4, 5]);
        let cur = rating("b", "p1", "2026-02-18", [4, 2, 3, 3, 4, 4, 4, 5]);
        let rows = radar_rows(&cur, Some(&prev));
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].skill, "Ball Control");
        assert_eq!(rows[0].value, 4);
        assert_eq!(rows[0].previous, Some(3));
        assert!(rows.iter().all(|r| r.full_mark == 5));
    }
}
