use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSettings {
    pub team_name: String,
    pub season: String,
    pub coach_name: String,
    /// 4-digit PIN, stored as configured and compared in full.
    pub coach_pin: String,
    pub team_color: String,
}

impl Default for TeamSettings {
    fn default() -> Self {
        Self {
            team_name: "Stars FC".to_string(),
            season: "Spring 2026".to_string(),
            coach_name: "Coach".to_string(),
            coach_pin: "1234".to_string(),
            team_color: "#16a34a".to_string(),
        }
    }
}

/// Proof of a successful PIN entry. Only `login` creates one; holding it is
/// what authorizes coach screens for the rest of the terminal session.
#[derive(Debug, Clone)]
pub struct CoachSession {
    pub coach_name: String,
}

pub fn login(settings: &TeamSettings, pin: &str) -> Option<CoachSession> {
    if pin == settings.coach_pin {
        Some(CoachSession {
            coach_name: settings.coach_name.clone(),
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_the_full_pin() {
        let settings = TeamSettings::default();
        assert!(login(&settings, "1234").is_some());
        assert!(login(&settings, "123").is_none());
        assert!(login(&settings, "12345").is_none());
        assert!(login(&settings, "0000").is_none());
        assert!(login(&settings, "").is_none());
    }

    #[test]
    fn session_carries_the_coach_name() {
        let mut settings = TeamSettings::default();
        settings.coach_name = "Coach Dana".to_string();
        let session = login(&settings, "1234").unwrap();
        assert_eq!(session.coach_name, "Coach Dana");
    }
}
