use touchline_terminal::model::{SkillKey, SkillRating, SkillScores};
use touchline_terminal::skills::{
    latest_for_player, overall_score, previous_for_player, session_rows, skill_trend,
};

fn rating(id: &str, at: &str, values: [u8; 8]) -> SkillRating {
    SkillRating {
        id: id.to_string(),
        player_id: "p1".to_string(),
        assessed_by: "Coach".to_string(),
        assessed_at: at.to_string(),
        session_label: format!("Session {at}"),
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
fn overall_score_matches_the_documented_example() {
    let r = rating("r1", "2026-02-10", [3, 2, 3, 2, 4, 3, 4, 5]);
    assert_eq!(overall_score(&r), 3.3);
}

#[test]
fn overall_score_covers_the_full_range() {
    assert_eq!(overall_score(&rating("r1", "d", [1; 8])), 1.0);
    assert_eq!(overall_score(&rating("r2", "d", [5; 8])), 5.0);
    // 2+2+2+2+3+3+3+3 = 20 / 8 = 2.5
    assert_eq!(
        overall_score(&rating("r3", "d", [2, 2, 2, 2, 3, 3, 3, 3])),
        2.5
    );
}

#[test]
fn previous_rating_is_stable_under_every_input_order() {
    let a = rating("a", "2026-02-01", [2; 8]);
    let b = rating("b", "2026-02-10", [3; 8]);
    let c = rating("c", "2026-02-20", [4; 8]);

    let orders = [
        vec![a.clone(), b.clone(), c.clone()],
        vec![c.clone(), a.clone(), b.clone()],
        vec![b.clone(), c.clone(), a.clone()],
        vec![c.clone(), b.clone(), a.clone()],
    ];
    for (i, ratings) in orders.iter().enumerate() {
        let latest = latest_for_player(ratings, "p1").expect("latest");
        let previous = previous_for_player(ratings, "p1").expect("previous");
        assert_eq!(latest.id, "c", "order {i}");
        assert_eq!(previous.id, "b", "order {i}");
    }
}

#[test]
fn previous_rating_is_undefined_below_two() {
    assert!(previous_for_player(&[], "p1").is_none());
    let one = vec![rating("a", "2026-02-01", [3; 8])];
    assert!(previous_for_player(&one, "p1").is_none());
}

#[test]
fn trend_and_session_rows_come_back_in_chronological_order() {
    let ratings = vec![
        rating("b", "2026-02-10", [3, 2, 3, 2, 4, 3, 4, 5]),
        rating("a", "2026-02-01", [2, 2, 2, 2, 3, 3, 4, 4]),
        rating("c", "2026-02-20", [4, 3, 3, 3, 4, 4, 4, 5]),
    ];

    let trend = skill_trend(&ratings, "p1", SkillKey::BallControl);
    let values: Vec<u8> = trend.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![2, 3, 4]);
    assert_eq!(trend[0].date, "2026-02-01");

    let rows = session_rows(&ratings, "p1");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].values[7], 4);
    assert_eq!(rows[2].values[0], 4);
}
