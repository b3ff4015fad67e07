//! Deterministic 4-corner development scorer. Turns a coach's observation
//! checklist into scores, labels, and a narrative report without any network
//! call. The remote client produces the same result shape.

use serde::{Deserialize, Serialize};

use crate::model::{CornerRating, DrillRecommendation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    Technical,
    Tactical,
    Physical,
    Psychological,
}

pub const CORNERS: [Corner; 4] = [
    Corner::Technical,
    Corner::Tactical,
    Corner::Physical,
    Corner::Psychological,
];

impl Corner {
    pub fn label(self) -> &'static str {
        match self {
            Corner::Technical => "Technical",
            Corner::Tactical => "Tactical",
            Corner::Physical => "Physical",
            Corner::Psychological => "Mental & Attitude",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Corner::Technical => "Ball Skills",
            Corner::Tactical => "Game Understanding",
            Corner::Physical => "Athletic Ability",
            Corner::Psychological => "Mindset",
        }
    }
}

/// What the coach looks for, in plain language. Six observable behaviours
/// per corner; the checked subset drives the score.
pub fn guide_items(corner: Corner) -> &'static [&'static str] {
    match corner {
        Corner::Technical => &[
            "Controlled the ball cleanly when it was passed or kicked to them",
            "Passed the ball to a teammate with reasonable accuracy",
            "Dribbled with their head up (not just staring at the ball)",
            "Used their weaker foot at least once during the session",
            "Attempted a shot on goal with some technique (not just a wild kick)",
            "Received a ball moving at speed and brought it under control",
        ],
        Corner::Tactical => &[
            "Moved to an open space when their team had the ball",
            "Tracked back or helped defend when the other team had the ball",
            "Made a quick decision, passing or moving without holding the ball too long",
            "Showed awareness of where teammates were (looked around before receiving)",
            "Stayed in or near their position/role rather than chasing the ball everywhere",
            "Reacted to what was happening in the game, not just waiting for the ball",
        ],
        Corner::Physical => &[
            "Kept up with the pace of the game for most of the session",
            "Showed good balance, without falling over or stumbling often",
            "Changed direction quickly and smoothly",
            "Showed some speed when running with or without the ball",
            "Was physically competitive and didn't shy away from challenges",
            "Maintained energy levels without tiring out too early",
        ],
        Corner::Psychological => &[
            "Reacted positively after making a mistake (got back up, tried again)",
            "Communicated with teammates, called for the ball, encouraged others",
            "Listened to coaching instructions and made an effort to apply them",
            "Showed confidence, tried things, took on opponents, didn't always play safe",
            "Stayed engaged and focused throughout (didn't switch off or get distracted)",
            "Showed enjoyment, smiled, was enthusiastic, wanted to be involved",
        ],
    }
}

/// One corner's worth of coach input: checked catalog items plus free notes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CornerObservations {
    pub checked: Vec<String>,
    pub notes: String,
}

/// The full guided-checklist input, one block per corner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuidedAssessment {
    pub technical: CornerObservations,
    pub tactical: CornerObservations,
    pub physical: CornerObservations,
    pub psychological: CornerObservations,
}

impl GuidedAssessment {
    pub fn corner(&self, corner: Corner) -> &CornerObservations {
        match corner {
            Corner::Technical => &self.technical,
            Corner::Tactical => &self.tactical,
            Corner::Physical => &self.physical,
            Corner::Psychological => &self.psychological,
        }
    }

    pub fn corner_mut(&mut self, corner: Corner) -> &mut CornerObservations {
        match corner {
            Corner::Technical => &mut self.technical,
            Corner::Tactical => &mut self.tactical,
            Corner::Physical => &mut self.physical,
            Corner::Psychological => &mut self.psychological,
        }
    }

    pub fn toggle(&mut self, corner: Corner, item: &str) {
        let area = self.corner_mut(corner);
        if let Some(pos) = area.checked.iter().position(|c| c == item) {
            area.checked.remove(pos);
        } else {
            area.checked.push(item.to_string());
        }
    }
}

/// The result shape shared by the scorer and the remote client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub technical: CornerRating,
    pub tactical: CornerRating,
    pub physical: CornerRating,
    pub psychological: CornerRating,
    pub strengths: Vec<String>,
    pub areas_to_improve: Vec<String>,
    pub drills: Vec<DrillRecommendation>,
    pub summary: String,
    pub demo: bool,
}

impl AssessmentResult {
    pub fn corner(&self, corner: Corner) -> &CornerRating {
        match corner {
            Corner::Technical => &self.technical,
            Corner::Tactical => &self.tactical,
            Corner::Physical => &self.physical,
            Corner::Psychological => &self.psychological,
        }
    }
}

/// Checked-to-catalog ratio mapped onto 1-5 through inclusive lower-bound
/// thresholds. Zero checked items scores 1, never 0.
pub fn corner_score(checked: usize, catalog_size: usize) -> u8 {
    let ratio = checked as f64 / catalog_size as f64;
    if ratio >= 0.8 {
        5
    } else if ratio >= 0.6 {
        4
    } else if ratio >= 0.4 {
        3
    } else if ratio >= 0.2 {
        2
    } else {
        1
    }
}

pub fn score_label(corner: Corner, score: u8) -> &'static str {
    let labels: [&'static str; 5] = match corner {
        Corner::Technical => [
            "Needs Fundamentals",
            "Early Developer",
            "Competent",
            "Proficient",
            "Technically Strong",
        ],
        Corner::Tactical => [
            "Unaware",
            "Reads Basic Play",
            "Situationally Aware",
            "Smart Player",
            "Tactically Excellent",
        ],
        Corner::Physical => [
            "Needs Conditioning",
            "Developing Athleticism",
            "Age-Appropriate",
            "Above Average",
            "Outstanding Athlete",
        ],
        Corner::Psychological => [
            "Needs Encouragement",
            "Building Confidence",
            "Consistent Attitude",
            "Mentally Strong",
            "Elite Mentality",
        ],
    };
    labels
        .get(score.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("Unknown")
}

pub const DEMO_DISCLAIMER: &str = "This is a demo assessment - set your Claude \
API key in Settings for real AI-powered analysis.";

fn checked_sentence(area: &CornerObservations) -> String {
    if area.checked.is_empty() {
        "Nothing specifically noted.".to_string()
    } else {
        format!("Observed: {}.", area.checked.join(", "))
    }
}

fn notes_sentence(area: &CornerObservations) -> String {
    if area.notes.trim().is_empty() {
        String::new()
    } else {
        format!(" Coach notes: \"{}\".", area.notes.trim())
    }
}

/// Produce the fallback report. Purely computational: same input, same
/// report, every time.
pub fn generate_demo_result(
    data: &GuidedAssessment,
    player_name: &str,
    position: &str,
    age_group: &str,
) -> AssessmentResult {
    let t = corner_score(data.technical.checked.len(), guide_items(Corner::Technical).len());
    let ta = corner_score(data.tactical.checked.len(), guide_items(Corner::Tactical).len());
    let ph = corner_score(data.physical.checked.len(), guide_items(Corner::Physical).len());
    let ps = corner_score(
        data.psychological.checked.len(),
        guide_items(Corner::Psychological).len(),
    );

    let technical = CornerRating {
        score: t,
        label: score_label(Corner::Technical, t).to_string(),
        observation: format!(
            "{player_name} demonstrated {} technical ability for a {age_group} {position}. {}{} {}",
            if t >= 3 { "solid" } else { "developing" },
            checked_sentence(&data.technical),
            notes_sentence(&data.technical),
            if t >= 4 {
                "Continue building complexity."
            } else {
                "Repetition drills will build consistency."
            }
        ),
    };

    let tactical = CornerRating {
        score: ta,
        label: score_label(Corner::Tactical, ta).to_string(),
        observation: format!(
            "Game understanding appears {} for the age group. {}{} {}",
            if ta >= 3 { "on track" } else { "still emerging" },
            checked_sentence(&data.tactical),
            notes_sentence(&data.tactical),
            if ta >= 4 {
                "Introduce more complex positional concepts."
            } else {
                "Small-sided games will accelerate game reading."
            }
        ),
    };

    let physical = CornerRating {
        score: ph,
        label: score_label(Corner::Physical, ph).to_string(),
        observation: format!(
            "Physically {} relative to {age_group} benchmarks. {}{} {}",
            if ph >= 3 {
                "developing well"
            } else {
                "with areas to target"
            },
            checked_sentence(&data.physical),
            notes_sentence(&data.physical),
            if ph >= 4 {
                "Leverage their athleticism with position-specific demands."
            } else {
                "Agility and coordination circuits will help."
            }
        ),
    };

    let psychological = CornerRating {
        score: ps,
        label: score_label(Corner::Psychological, ps).to_string(),
        observation: format!(
            "{player_name} shows a {} mental approach. {}{} {}",
            if ps >= 3 { "positive" } else { "growing" },
            checked_sentence(&data.psychological),
            notes_sentence(&data.psychological),
            if ps >= 4 {
                "Resilience and attitude are clear strengths."
            } else {
                "Build confidence through achievable progressive challenges."
            }
        ),
    };

    let first_or = |area: &CornerObservations, fallback: &str| {
        area.checked
            .first()
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    };

    let strengths = vec![
        first_or(&data.technical, "Shows willingness to engage with the ball"),
        first_or(&data.tactical, "Tries to follow team structure"),
        first_or(
            &data.psychological,
            "Demonstrates commitment to attending and participating",
        ),
    ];

    let area_phrase = |area: &CornerObservations, low: &str, high: &str| {
        if area.checked.len() < 3 {
            low.to_string()
        } else {
            high.to_string()
        }
    };

    let areas_to_improve = vec![
        area_phrase(
            &data.technical,
            "Develop technical foundations through daily ball work",
            "Polish execution under defensive pressure",
        ),
        area_phrase(
            &data.tactical,
            "Build game awareness through small-sided games",
            "Sharpen off-ball movement and positioning",
        ),
        area_phrase(
            &data.psychological,
            "Build match confidence through role clarity and encouragement",
            "Challenge with leadership responsibilities in session activities",
        ),
    ];

    // Not personalized yet; every report gets the same three session staples.
    let drills = vec![
        DrillRecommendation {
            name: "Rondo (4v2)".to_string(),
            description: "Possession circle with 2 defenders. Develops quick passing, \
                          decision-making, and pressing habits. 10 minutes per session."
                .to_string(),
        },
        DrillRecommendation {
            name: "Coerver Ball Mastery".to_string(),
            description: "Structured skill circuit: toe taps, inside-outside rolls, V-moves. \
                          5-10 minutes at the start of each session to build muscle memory."
                .to_string(),
        },
        DrillRecommendation {
            name: "1v1 Box Challenge".to_string(),
            description: "10x10 yard box, attacker vs defender with a small goal. Builds \
                          confidence on the ball and defensive shape. Rotate every 60 seconds."
                .to_string(),
        },
    ];

    let total = u32::from(t) + u32::from(ta) + u32::from(ph) + u32::from(ps);
    let stage = if total >= 14 {
        "above-average"
    } else if total >= 10 {
        "solid"
    } else {
        "early-stage"
    };
    let outlook = if total >= 14 {
        "They are tracking ahead of age-group norms; consider introducing more complex challenges."
    } else {
        "Consistent training, positive reinforcement, and fun repetition will drive the most \
         growth at this stage."
    };
    let summary = format!(
        "{player_name} is a {age_group} {position} showing {stage} development across all four \
         pillars. {outlook} {DEMO_DISCLAIMER}"
    );

    AssessmentResult {
        technical,
        tactical,
        physical,
        psychological,
        strengths,
        areas_to_improve,
        drills,
        summary,
        demo: true,
    }
}
