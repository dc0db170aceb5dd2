pub mod gemini;

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::TopicDef;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "High",
        }
    }
}

/// One multiple-choice question, fresh from the generation service.
/// Transient: discarded once the next question is requested.
#[derive(Clone, Debug)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub svg: Option<String>,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
    pub topic: String,
    pub difficulty: Difficulty,
    /// Placeholder substituted after a generation failure. Answering it
    /// always scores as incorrect so the fallback cannot inflate stats.
    pub degraded: bool,
}

#[derive(Debug, Error)]
pub enum GenError {
    #[error("no API key configured (set GEMINI_API_KEY or api_key in config)")]
    MissingApiKey,
    #[error("built without network support")]
    NetworkDisabled,
    #[cfg(feature = "network")]
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned status {0}")]
    Status(u16),
    #[error("invalid JSON in response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed question payload: {0}")]
    Malformed(&'static str),
}

/// Seam between the quiz loop and whatever produces questions. The app uses
/// the Gemini client; tests substitute canned or failing sources.
pub trait QuestionSource: Send + Sync {
    fn generate(&self, topic: &'static TopicDef) -> Result<Question, GenError>;
}

/// Question payload as the generation service emits it.
#[derive(Debug, Deserialize)]
pub struct RawQuestion {
    pub text: Option<String>,
    pub svg: Option<String>,
    pub options: Option<Vec<String>>,
    #[serde(rename = "correctAnswerIndex")]
    pub correct_answer_index: Option<i64>,
    pub explanation: Option<String>,
}

/// Validate a raw payload into a `Question`. Missing text/options or an
/// out-of-range answer index count as generation failures.
pub fn question_from_raw(raw: RawQuestion, topic: &TopicDef) -> Result<Question, GenError> {
    let text = raw
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or(GenError::Malformed("missing question text"))?;
    let options = raw
        .options
        .filter(|o| !o.is_empty())
        .ok_or(GenError::Malformed("missing options"))?;
    let index = raw
        .correct_answer_index
        .ok_or(GenError::Malformed("missing correctAnswerIndex"))?;
    if index < 0 || index as usize >= options.len() {
        return Err(GenError::Malformed("correctAnswerIndex out of range"));
    }

    Ok(Question {
        id: chrono::Utc::now().timestamp_millis().to_string(),
        text,
        svg: raw.svg.filter(|s| !s.trim().is_empty()),
        options,
        correct_index: index as usize,
        explanation: raw.explanation.unwrap_or_default(),
        topic: topic.name.to_string(),
        difficulty: Difficulty::Medium,
        degraded: false,
    })
}

/// Fixed placeholder shown when generation fails, so the quiz loop never
/// stalls. Its single option lets the user proceed (scored as a miss).
pub fn degraded_question(topic: &TopicDef) -> Question {
    Question {
        id: "error".to_string(),
        text: "Failed to establish neural link with the AI core. Please try again.".to_string(),
        svg: None,
        options: vec!["Retry".to_string()],
        correct_index: 0,
        explanation: "Network or API Key Error.".to_string(),
        topic: topic.name.to_string(),
        difficulty: Difficulty::Easy,
        degraded: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::topic_by_id;

    fn raw(text: &str, options: &[&str], index: i64) -> RawQuestion {
        RawQuestion {
            text: Some(text.to_string()),
            svg: None,
            options: Some(options.iter().map(|o| o.to_string()).collect()),
            correct_answer_index: Some(index),
            explanation: Some("because".to_string()),
        }
    }

    #[test]
    fn valid_payload_becomes_question() {
        let topic = topic_by_id("syllogisms").unwrap();
        let q = question_from_raw(raw("All A are B?", &["yes", "no"], 1), topic).unwrap();
        assert_eq!(q.correct_index, 1);
        assert_eq!(q.topic, "Syllogisms");
        assert_eq!(q.difficulty, Difficulty::Medium);
        assert!(!q.degraded);
    }

    #[test]
    fn missing_text_is_failure() {
        let topic = topic_by_id("syllogisms").unwrap();
        let mut payload = raw("x", &["a"], 0);
        payload.text = None;
        assert!(matches!(
            question_from_raw(payload, topic),
            Err(GenError::Malformed(_))
        ));
    }

    #[test]
    fn blank_text_is_failure() {
        let topic = topic_by_id("syllogisms").unwrap();
        let payload = raw("   ", &["a"], 0);
        assert!(question_from_raw(payload, topic).is_err());
    }

    #[test]
    fn empty_options_is_failure() {
        let topic = topic_by_id("syllogisms").unwrap();
        let payload = raw("q", &[], 0);
        assert!(question_from_raw(payload, topic).is_err());
    }

    #[test]
    fn out_of_range_index_is_failure() {
        let topic = topic_by_id("syllogisms").unwrap();
        assert!(question_from_raw(raw("q", &["a", "b"], 2), topic).is_err());
        assert!(question_from_raw(raw("q", &["a", "b"], -1), topic).is_err());
    }

    #[test]
    fn blank_svg_is_dropped() {
        let topic = topic_by_id("visual_series").unwrap();
        let mut payload = raw("q", &["a"], 0);
        payload.svg = Some("  ".to_string());
        let q = question_from_raw(payload, topic).unwrap();
        assert!(q.svg.is_none());
    }

    #[test]
    fn degraded_question_has_single_option_and_flag() {
        let topic = topic_by_id("syllogisms").unwrap();
        let q = degraded_question(topic);
        assert_eq!(q.options.len(), 1);
        assert_eq!(q.correct_index, 0);
        assert!(q.degraded);
    }
}
