use touchline_terminal::assessment::{
    corner_score, generate_demo_result, guide_items, Corner, CornerObservations, GuidedAssessment,
    CORNERS,
};
use touchline_terminal::assessment_fetch::{run_assessment, AssessmentConfig};

fn checked_items(corner: Corner, n: usize) -> CornerObservations {
    CornerObservations {
        checked: guide_items(corner)[..n].iter().map(|s| s.to_string()).collect(),
        notes: String::new(),
    }
}

#[test]
fn documented_score_boundaries_hold_for_the_real_catalogs() {
    for corner in CORNERS {
        let size = guide_items(corner).len();
        assert_eq!(size, 6, "{} catalog size", corner.label());
        assert_eq!(corner_score(5, size), 5);
        assert_eq!(corner_score(3, size), 3);
        assert_eq!(corner_score(0, size), 1);
    }
}

#[test]
fn per_corner_scores_flow_into_the_report() {
    let data = GuidedAssessment {
        technical: checked_items(Corner::Technical, 5),
        tactical: checked_items(Corner::Tactical, 4),
        physical: checked_items(Corner::Physical, 3),
        psychological: checked_items(Corner::Psychological, 0),
    };
    let result = generate_demo_result(&data, "Aiden Johnson", "Forward", "U11");
    assert_eq!(result.technical.score, 5);
    assert_eq!(result.tactical.score, 4);
    assert_eq!(result.physical.score, 3);
    assert_eq!(result.psychological.score, 1);
    assert_eq!(result.technical.label, "Technically Strong");
    assert_eq!(result.psychological.label, "Needs Encouragement");
    // 5+4+3+1 = 13 -> the middle summary tone.
    assert!(result.summary.contains("solid"));
    assert!(result.demo);
}

#[test]
fn report_always_carries_three_strengths_areas_and_drills() {
    let result = generate_demo_result(
        &GuidedAssessment::default(),
        "Liam Torres",
        "Goalkeeper",
        "U11",
    );
    assert_eq!(result.strengths.len(), 3);
    assert_eq!(result.areas_to_improve.len(), 3);
    assert_eq!(result.drills.len(), 3);
    assert_eq!(result.drills[0].name, "Rondo (4v2)");
}

#[test]
fn missing_credential_silently_falls_back_to_demo() {
    let config = AssessmentConfig { api_key: None };
    let result = run_assessment(
        &GuidedAssessment::default(),
        "Emma Patel",
        "Midfielder",
        "U11",
        &config,
    )
    .expect("fallback never fails");
    assert!(result.demo);
}

#[test]
fn observation_text_interpolates_player_and_age_group() {
    let mut data = GuidedAssessment::default();
    data.technical = checked_items(Corner::Technical, 2);
    let result = generate_demo_result(&data, "Sofia Martinez", "Forward", "U11");
    assert!(result.technical.observation.starts_with("Sofia Martinez"));
    assert!(result.technical.observation.contains("U11 Forward"));
    assert!(result
        .technical
        .observation
        .contains("Observed: Controlled the ball cleanly"));
    assert!(result.summary.contains("Sofia Martinez is a U11 Forward"));
}
