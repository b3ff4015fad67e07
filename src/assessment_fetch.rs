//! Remote 4-corner assessment via the Anthropic Messages API. Without an API
//! key the deterministic scorer answers instead; with a key, a failed call is
//! a hard error the coach retries by hand. There is deliberately no silent
//! downgrade from a configured-but-broken key to the demo scorer.

use std::env;
use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::assessment::{generate_demo_result, AssessmentResult, GuidedAssessment, CORNERS};
use crate::model::{CornerRating, DrillRecommendation};
use crate::store::{Store, KEY_API_KEY};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MODEL: &str = "claude-haiku-4-5-20251001";
const MAX_TOKENS: u32 = 1200;
const REQUEST_TIMEOUT_SECS: u64 = 60;

const SYSTEM_PROMPT: &str = "You are an expert youth soccer development coach with deep knowledge of:
- US Soccer Federation Player Development Initiatives (PDI)
- UEFA Youth Coaching methodology
- Long-Term Athlete Development (LTAD) framework
- The 4 Corner Model (Technical, Tactical, Physical, Psychological)
- Age-appropriate benchmarks for youth players (U7 through U17)

You are helping a volunteer/parent coach who is NOT technically trained. They have completed a \
guided checklist of observable behaviours for one of their players. Your job is to interpret \
those observations objectively and produce a professional, constructive development report.

Be warm, encouraging, and practical. Write as if addressing a fellow coach. Respond with valid \
JSON only - no markdown, no extra text.";

static CLIENT: OnceCell<Client> = OnceCell::new();

fn http_client() -> Result<&'static Client, AssessmentFetchError> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AssessmentFetchError::Client(e.to_string()))
    })
}

#[derive(Debug, Error)]
pub enum AssessmentFetchError {
    #[error("failed to build http client: {0}")]
    Client(String),

    #[error("assessment request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("assessment response was not the expected JSON: {0}")]
    BadJson(#[from] serde_json::Error),

    #[error("assessment response shape invalid: {0}")]
    BadShape(String),

    #[error("assessment response scored {corner} out of range: {score}")]
    BadScore { corner: &'static str, score: u8 },
}

#[derive(Debug, Clone, Default)]
pub struct AssessmentConfig {
    pub api_key: Option<String>,
}

impl AssessmentConfig {
    /// Environment beats the stored key, mirroring how the rest of the app
    /// treats `.env` overrides.
    pub fn resolve(store: &Store) -> Self {
        let from_env = env::var("ANTHROPIC_API_KEY")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let api_key = from_env.or_else(|| {
            store
                .get::<String>(KEY_API_KEY)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        });
        Self { api_key }
    }
}

/// Generate a report for one player. Missing key: deterministic fallback,
/// marked demo. Key present: exactly one remote call, no retry.
pub fn run_assessment(
    data: &GuidedAssessment,
    player_name: &str,
    position: &str,
    age_group: &str,
    config: &AssessmentConfig,
) -> Result<AssessmentResult, AssessmentFetchError> {
    let Some(api_key) = config.api_key.as_deref() else {
        return Ok(generate_demo_result(data, player_name, position, age_group));
    };

    let prompt = build_prompt(data, player_name, position, age_group);
    let body = request_remote(api_key, &prompt)?;
    parse_remote_result(&body)
}

fn request_remote(api_key: &str, prompt: &str) -> Result<String, AssessmentFetchError> {
    let client = http_client()?;
    let payload = json!({
        "model": MODEL,
        "max_tokens": MAX_TOKENS,
        "system": SYSTEM_PROMPT,
        "messages": [{ "role": "user", "content": prompt }],
    });

    let resp = client
        .post(API_URL)
        .header("x-api-key", api_key)
        .header("anthropic-version", API_VERSION)
        .json(&payload)
        .send()?;

    let status = resp.status();
    let body = resp.text()?;
    if !status.is_success() {
        let snippet = body
            .trim()
            .replace('\n', " ")
            .replace('\r', " ")
            .chars()
            .take(220)
            .collect::<String>();
        return Err(AssessmentFetchError::Api {
            status: status.as_u16(),
            body: snippet,
        });
    }
    Ok(body)
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

// The model is asked for exactly this object; field names follow the prompt.
#[derive(Debug, Deserialize)]
struct RemoteResult {
    technical: RemoteCorner,
    tactical: RemoteCorner,
    physical: RemoteCorner,
    psychological: RemoteCorner,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(rename = "areasToImprove", default)]
    areas_to_improve: Vec<String>,
    #[serde(default)]
    drills: Vec<RemoteDrill>,
    summary: String,
}

#[derive(Debug, Deserialize)]
struct RemoteCorner {
    score: u8,
    label: String,
    observation: String,
}

#[derive(Debug, Deserialize)]
struct RemoteDrill {
    name: String,
    description: String,
}

/// Parse the Messages envelope, then the embedded report JSON, then validate
/// it against the four-corner shape before anything downstream trusts it.
pub fn parse_remote_result(body: &str) -> Result<AssessmentResult, AssessmentFetchError> {
    let envelope: MessagesResponse = serde_json::from_str(body)?;
    let text = envelope
        .content
        .first()
        .map(|block| block.text.as_str())
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AssessmentFetchError::BadShape("empty content".to_string()))?;

    let remote: RemoteResult = serde_json::from_str(text.trim())?;

    let corners = [
        (CORNERS[0].label(), remote.technical.score),
        (CORNERS[1].label(), remote.tactical.score),
        (CORNERS[2].label(), remote.physical.score),
        (CORNERS[3].label(), remote.psychological.score),
    ];
    for (corner, score) in corners {
        if !(1..=5).contains(&score) {
            return Err(AssessmentFetchError::BadScore { corner, score });
        }
    }

    let rating = |c: RemoteCorner| CornerRating {
        score: c.score,
        label: c.label,
        observation: c.observation,
    };

    Ok(AssessmentResult {
        technical: rating(remote.technical),
        tactical: rating(remote.tactical),
        physical: rating(remote.physical),
        psychological: rating(remote.psychological),
        strengths: remote.strengths,
        areas_to_improve: remote.areas_to_improve,
        drills: remote
            .drills
            .into_iter()
            .map(|d| DrillRecommendation {
                name: d.name,
                description: d.description,
            })
            .collect(),
        summary: remote.summary,
        demo: false,
    })
}

pub fn build_prompt(
    data: &GuidedAssessment,
    player_name: &str,
    position: &str,
    age_group: &str,
) -> String {
    let summarise = |corner_label: &str, area: &crate::assessment::CornerObservations| {
        let obs = if area.checked.is_empty() {
            "No specific behaviours were ticked for this area.".to_string()
        } else {
            format!("Observed behaviours: {}", area.checked.join(" | "))
        };
        let notes = if area.notes.trim().is_empty() {
            String::new()
        } else {
            format!("\nCoach notes: \"{}\"", area.notes.trim())
        };
        format!("{corner_label}:\n{obs}{notes}")
    };

    format!(
        "Guided assessment for {player_name} (Position: {position}, Age Group: {age_group}).\n\
         A non-technical volunteer coach completed the following checklist after observing this player:\n\n\
         {}\n\n{}\n\n{}\n\n{}\n\n\
         Using the 4 Corner Model and LTAD frameworks, produce an objective assessment. Return ONLY a JSON object:\n\
         {{\n\
         \x20 \"technical\":     {{ \"score\": <1-5>, \"label\": \"<brief label>\", \"observation\": \"<2 sentences>\" }},\n\
         \x20 \"tactical\":      {{ \"score\": <1-5>, \"label\": \"<brief label>\", \"observation\": \"<2 sentences>\" }},\n\
         \x20 \"physical\":      {{ \"score\": <1-5>, \"label\": \"<brief label>\", \"observation\": \"<2 sentences>\" }},\n\
         \x20 \"psychological\": {{ \"score\": <1-5>, \"label\": \"<brief label>\", \"observation\": \"<2 sentences>\" }},\n\
         \x20 \"strengths\":     [\"<strength>\", \"<strength>\", \"<strength>\"],\n\
         \x20 \"areasToImprove\":[\"<actionable area>\", \"<actionable area>\", \"<actionable area>\"],\n\
         \x20 \"drills\": [\n\
         \x20   {{ \"name\": \"<drill>\", \"description\": \"<how to run it and why, 1-2 sentences>\" }},\n\
         \x20   {{ \"name\": \"<drill>\", \"description\": \"<how to run it and why, 1-2 sentences>\" }},\n\
         \x20   {{ \"name\": \"<drill>\", \"description\": \"<how to run it and why, 1-2 sentences>\" }}\n\
         \x20 ],\n\
         \x20 \"summary\": \"<2-3 sentence developmental summary benchmarked to age group>\"\n\
         }}\n\n\
         Score: 1=Significant gaps, 2=Early development, 3=Age-appropriate, 4=Above average for age, 5=Exceptional.",
        summarise("--- TECHNICAL (Ball Skills)", &data.technical),
        summarise("--- TACTICAL (Game Understanding)", &data.tactical),
        summarise("--- PHYSICAL (Athletic Ability)", &data.physical),
        summarise("--- PSYCHOLOGICAL (Attitude & Mindset)", &data.psychological),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::Corner;

    const REPORT_JSON: &str = r#"{
        "technical":     {"score": 4, "label": "Proficient", "observation": "Clean first touch."},
        "tactical":      {"score": 3, "label": "Situationally Aware", "observation": "Finds space."},
        "physical":      {"score": 4, "label": "Above Average", "observation": "Quick over short distances."},
        "psychological": {"score": 5, "label": "Elite Mentality", "observation": "Bounces back fast."},
        "strengths": ["First touch", "Work rate", "Recovery runs"],
        "areasToImprove": ["Weak foot", "Shot selection", "Scanning"],
        "drills": [{"name": "Rondo", "description": "4v2 possession circle."}],
        "summary": "Tracking ahead of U11 norms."
    }"#;

    fn envelope(report: &str) -> String {
        serde_json::json!({
            "id": "msg_1",
            "content": [{"type": "text", "text": report}],
        })
        .to_string()
    }

    #[test]
    fn parses_a_well_formed_response() {
        let result = parse_remote_result(&envelope(REPORT_JSON)).expect("valid response");
        assert!(!result.demo);
        assert_eq!(result.technical.score, 4);
        assert_eq!(result.psychological.label, "Elite Mentality");
        assert_eq!(result.areas_to_improve.len(), 3);
        assert_eq!(result.drills[0].name, "Rondo");
    }

    #[test]
    fn rejects_out_of_range_scores() {
        let report = REPORT_JSON.replace("\"score\": 3", "\"score\": 0");
        let err = parse_remote_result(&envelope(&report)).unwrap_err();
        assert!(matches!(err, AssessmentFetchError::BadScore { score: 0, .. }));
    }

    #[test]
    fn rejects_non_json_report_text() {
        let body = r#"{"content": [{"type": "text", "text": "Sorry, I cannot help."}]}"#;
        assert!(matches!(
            parse_remote_result(body),
            Err(AssessmentFetchError::BadJson(_))
        ));
    }

    #[test]
    fn rejects_an_empty_content_list() {
        let body = r#"{"content": []}"#;
        assert!(matches!(
            parse_remote_result(body),
            Err(AssessmentFetchError::BadShape(_))
        ));
    }

    #[test]
    fn missing_key_falls_back_to_the_demo_scorer() {
        let data = GuidedAssessment::default();
        let config = AssessmentConfig { api_key: None };
        let result = run_assessment(&data, "Liam Torres", "Goalkeeper", "U11", &config)
            .expect("demo path cannot fail");
        assert!(result.demo);
        assert_eq!(result.technical.score, 1);
    }

    #[test]
    fn prompt_embeds_checked_items_and_notes() {
        let mut data = GuidedAssessment::default();
        data.toggle(
            Corner::Technical,
            "Passed the ball to a teammate with reasonable accuracy",
        );
        data.tactical.notes = "Much better than last week".to_string();
        let prompt = build_prompt(&data, "Emma Patel", "Midfielder", "U11");
        assert!(prompt.contains("Emma Patel (Position: Midfielder, Age Group: U11)"));
        assert!(prompt.contains(
            "Observed behaviours: Passed the ball to a teammate with reasonable accuracy"
        ));
        assert!(prompt.contains("Coach notes: \"Much better than last week\""));
        assert!(prompt.contains("No specific behaviours were ticked for this area."));
    }
}
