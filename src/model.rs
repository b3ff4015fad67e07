use chrono::{Datelike, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
    Any,
}

impl Position {
    pub fn label(self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defender => "Defender",
            Position::Midfielder => "Midfielder",
            Position::Forward => "Forward",
            Position::Any => "Any",
        }
    }

    pub fn all() -> &'static [Position] {
        &[
            Position::Goalkeeper,
            Position::Defender,
            Position::Midfielder,
            Position::Forward,
            Position::Any,
        ]
    }

    /// Lenient entry-form parsing: "GK", "def", "Midfielder" all land.
    pub fn parse(raw: &str) -> Option<Position> {
        match raw.trim().to_ascii_lowercase().chars().next()? {
            'g' => Some(Position::Goalkeeper),
            'd' => Some(Position::Defender),
            'm' => Some(Position::Midfielder),
            'f' => Some(Position::Forward),
            'a' => Some(Position::Any),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    Game,
    Practice,
    Tournament,
}

impl EventType {
    pub fn label(self) -> &'static str {
        match self {
            EventType::Game => "Game",
            EventType::Practice => "Practice",
            EventType::Tournament => "Tournament",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
    Upcoming,
}

impl GameResult {
    pub fn label(self) -> &'static str {
        match self {
            GameResult::Win => "Win",
            GameResult::Loss => "Loss",
            GameResult::Draw => "Draw",
            GameResult::Upcoming => "Upcoming",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HomeOrAway {
    Home,
    Away,
}

impl HomeOrAway {
    pub fn label(self) -> &'static str {
        match self {
            HomeOrAway::Home => "Home",
            HomeOrAway::Away => "Away",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Excused,
}

impl AttendanceStatus {
    pub fn label(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Excused => "Excused",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillKey {
    BallControl,
    Dribbling,
    Passing,
    Shooting,
    Defending,
    Positioning,
    Teamwork,
    Effort,
}

pub const SKILL_KEYS: [SkillKey; 8] = [
    SkillKey::BallControl,
    SkillKey::Dribbling,
    SkillKey::Passing,
    SkillKey::Shooting,
    SkillKey::Defending,
    SkillKey::Positioning,
    SkillKey::Teamwork,
    SkillKey::Effort,
];

impl SkillKey {
    pub fn label(self) -> &'static str {
        match self {
            SkillKey::BallControl => "Ball Control",
            SkillKey::Dribbling => "Dribbling",
            SkillKey::Passing => "Passing",
            SkillKey::Shooting => "Shooting",
            SkillKey::Defending => "Defending",
            SkillKey::Positioning => "Positioning",
            SkillKey::Teamwork => "Teamwork",
            SkillKey::Effort => "Effort & Attitude",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SkillKey::BallControl => "First touch, receiving the ball, keeping control under pressure",
            SkillKey::Dribbling => "Close control, 1v1 confidence, changing direction",
            SkillKey::Passing => "Accuracy, weight of pass, choosing the right pass",
            SkillKey::Shooting => "Technique, power appropriate for age, accuracy on goal",
            SkillKey::Defending => "Fair challenges, tracking opponents, winning the ball",
            SkillKey::Positioning => "Off-ball movement, understanding space, supporting teammates",
            SkillKey::Teamwork => "Communication, sharing the ball, supporting teammates",
            SkillKey::Effort => "Hustle, attitude, coachability, giving 100%",
        }
    }
}

pub fn star_label(stars: u8) -> &'static str {
    match stars {
        1 => "Needs Work",
        2 => "Developing",
        3 => "On Track",
        4 => "Excellent",
        5 => "Outstanding",
        _ => "",
    }
}

/// The fixed 8-skill scorecard, each value 1-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillScores {
    pub ball_control: u8,
    pub dribbling: u8,
    pub passing: u8,
    pub shooting: u8,
    pub defending: u8,
    pub positioning: u8,
    pub teamwork: u8,
    pub effort: u8,
}

impl SkillScores {
    pub fn get(&self, key: SkillKey) -> u8 {
        match key {
            SkillKey::BallControl => self.ball_control,
            SkillKey::Dribbling => self.dribbling,
            SkillKey::Passing => self.passing,
            SkillKey::Shooting => self.shooting,
            SkillKey::Defending => self.defending,
            SkillKey::Positioning => self.positioning,
            SkillKey::Teamwork => self.teamwork,
            SkillKey::Effort => self.effort,
        }
    }

    pub fn set(&mut self, key: SkillKey, value: u8) {
        let slot = match key {
            SkillKey::BallControl => &mut self.ball_control,
            SkillKey::Dribbling => &mut self.dribbling,
            SkillKey::Passing => &mut self.passing,
            SkillKey::Shooting => &mut self.shooting,
            SkillKey::Defending => &mut self.defending,
            SkillKey::Positioning => &mut self.positioning,
            SkillKey::Teamwork => &mut self.teamwork,
            SkillKey::Effort => &mut self.effort,
        };
        *slot = value.clamp(1, 5);
    }

    pub fn values(&self) -> [u8; 8] {
        [
            self.ball_control,
            self.dribbling,
            self.passing,
            self.shooting,
            self.defending,
            self.positioning,
            self.teamwork,
            self.effort,
        ]
    }
}

impl Default for SkillScores {
    fn default() -> Self {
        Self {
            ball_control: 3,
            dribbling: 3,
            passing: 3,
            shooting: 3,
            defending: 3,
            positioning: 3,
            teamwork: 3,
            effort: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub jersey_number: u8,
    /// ISO date, e.g. "2016-03-15".
    pub date_of_birth: String,
    pub position: Position,
    pub parent_name: String,
    pub parent_email: String,
    pub parent_phone: String,
    #[serde(default)]
    pub notes: String,
    /// Uppercase, unique within the roster, immutable after creation.
    pub parent_access_code: String,
    pub is_active: bool,
    pub joined_date: String,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn age_group(&self, today: NaiveDate) -> &'static str {
        age_group_for_birth_date(&self.date_of_birth, today)
    }
}

/// Age-group bucket from a calendar-year age difference. Players without a
/// parseable birth date land in the widest bucket.
pub fn age_group_for_birth_date(date_of_birth: &str, today: NaiveDate) -> &'static str {
    let Ok(dob) = NaiveDate::parse_from_str(date_of_birth, "%Y-%m-%d") else {
        return "U17+";
    };
    let age = today.year() - dob.year();
    if age <= 6 {
        "U7"
    } else if age <= 8 {
        "U9"
    } else if age <= 10 {
        "U11"
    } else if age <= 12 {
        "U13"
    } else if age <= 14 {
        "U15"
    } else {
        "U17+"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub event_type: EventType,
    pub title: String,
    /// ISO date; upcoming/past is computed against today, never stored.
    pub date: String,
    pub time: String,
    pub location: String,
    #[serde(default)]
    pub opponent: Option<String>,
    #[serde(default)]
    pub home_or_away: Option<HomeOrAway>,
    #[serde(default)]
    pub result: Option<GameResult>,
    #[serde(default)]
    pub goals_for: Option<u8>,
    #[serde(default)]
    pub goals_against: Option<u8>,
    #[serde(default)]
    pub notes: String,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRating {
    pub id: String,
    pub player_id: String,
    pub assessed_by: String,
    /// ISO timestamp; string ordering is acceptable because all values are
    /// written in the same ISO shape.
    pub assessed_at: String,
    pub session_label: String,
    pub ratings: SkillScores,
    #[serde(default)]
    pub coach_notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub event_id: String,
    pub player_id: String,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CornerRating {
    pub score: u8,
    pub label: String,
    pub observation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillRecommendation {
    pub name: String,
    pub description: String,
}

/// A stored 4-corner development report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CornerReport {
    pub id: String,
    pub player_id: String,
    pub assessed_at: String,
    pub assessed_by: String,
    pub technical: CornerRating,
    pub tactical: CornerRating,
    pub physical: CornerRating,
    pub psychological: CornerRating,
    pub strengths: Vec<String>,
    pub areas_to_improve: Vec<String>,
    pub drills: Vec<DrillRecommendation>,
    pub summary: String,
    /// True when the report came from the deterministic fallback rather
    /// than a live model call.
    pub demo: bool,
}

pub fn today_iso() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

pub fn now_iso() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const ID_LEN: usize = 12;

pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Parent access codes look like "LT1234": the player's initials followed by
/// four digits. Collision handling against the existing roster is the
/// caller's job.
pub fn generate_access_code(first_name: &str, last_name: &str) -> String {
    let mut rng = rand::thread_rng();
    let initial = |name: &str| {
        name.chars()
            .find(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('X')
    };
    format!(
        "{}{}{:04}",
        initial(first_name),
        initial(last_name),
        rng.gen_range(0..10_000)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn age_groups_use_calendar_year_difference() {
        let today = day("2026-02-20");
        assert_eq!(age_group_for_birth_date("2020-12-31", today), "U7");
        assert_eq!(age_group_for_birth_date("2018-01-01", today), "U9");
        assert_eq!(age_group_for_birth_date("2016-03-15", today), "U11");
        assert_eq!(age_group_for_birth_date("2014-06-01", today), "U13");
        assert_eq!(age_group_for_birth_date("2012-06-01", today), "U15");
        assert_eq!(age_group_for_birth_date("2009-06-01", today), "U17+");
        assert_eq!(age_group_for_birth_date("not a date", today), "U17+");
    }

    #[test]
    fn position_parse_accepts_common_abbreviations() {
        assert_eq!(Position::parse("GK"), Some(Position::Goalkeeper));
        assert_eq!(Position::parse("def"), Some(Position::Defender));
        assert_eq!(Position::parse("Midfielder"), Some(Position::Midfielder));
        assert_eq!(Position::parse(" fwd "), Some(Position::Forward));
        assert_eq!(Position::parse(""), None);
        assert_eq!(Position::parse("striker"), None);
    }

    #[test]
    fn access_codes_are_initials_plus_four_digits() {
        let code = generate_access_code("Liam", "Torres");
        assert_eq!(code.len(), 6);
        assert!(code.starts_with("LT"));
        assert!(code[2..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn generated_ids_are_lowercase_alphanumeric() {
        let id = generate_id();
        assert_eq!(id.len(), 12);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_ne!(generate_id(), id);
    }

    #[test]
    fn skill_scores_set_clamps_to_valid_range() {
        let mut scores = SkillScores::default();
        scores.set(SkillKey::Shooting, 9);
        assert_eq!(scores.get(SkillKey::Shooting), 5);
        scores.set(SkillKey::Shooting, 0);
        assert_eq!(scores.get(SkillKey::Shooting), 1);
    }
}
