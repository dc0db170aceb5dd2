use std::env;
use std::time::Duration;

use crate::catalog::TopicDef;
use crate::config::Config;

use super::{GenError, Question, QuestionSource, RawQuestion, question_from_raw};

const SYSTEM_INSTRUCTION: &str = "\
You are an expert question setter for the MAH-MBA/MMS-CET entrance exam. \
Your goal is to generate unique, high-quality Logical and Abstract Reasoning \
questions based on the specific syllabus provided. \
The response must be a valid JSON object. \
For 'Abstract Reasoning' or 'Visual' topics, you must generate a simple, clean \
SVG string that represents the problem visually in the 'svg' field. The SVG \
should be viewbox 0 0 200 100 roughly. \
For text-based questions, the 'svg' field should be empty. \
Ensure the difficulty matches the request.";

/// Question source backed by the Gemini REST API. One request per question;
/// failures are mapped to `GenError` and the caller substitutes the degraded
/// placeholder.
pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn from_config(config: &Config) -> Self {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()));
        Self {
            api_key,
            model: config.model.clone(),
            timeout: config.request_timeout(),
        }
    }

    fn prompt(topic: &TopicDef) -> String {
        let kind = if topic.is_visual() {
            "This is a visual reasoning question. Create a simple SVG representation of a sequence or pattern."
        } else {
            "This is a text-based logical reasoning question."
        };
        format!(
            "Generate 1 unique Medium difficulty question for the topic: \"{name}\".\n\
             Context: {description}.\n\n\
             {kind}\n\n\
             Return the response in this JSON schema:\n\
             {{\n\
               \"text\": \"The question text here. If visual, describe what to look for.\",\n\
               \"svg\": \"Optional SVG code string here (no markdown, just the <svg> tag and content) if visual, else null\",\n\
               \"options\": [\"Option 1\", \"Option 2\", \"Option 3\", \"Option 4\", \"Option 5\"],\n\
               \"correctAnswerIndex\": 0,\n\
               \"explanation\": \"Detailed explanation of the solution.\"\n\
             }}",
            name = topic.name,
            description = topic.description,
        )
    }
}

impl QuestionSource for GeminiClient {
    fn generate(&self, topic: &'static TopicDef) -> Result<Question, GenError> {
        let key = self.api_key.as_deref().ok_or(GenError::MissingApiKey)?;
        let body = fetch_generated_json(key, &self.model, self.timeout, &Self::prompt(topic))?;
        let raw: RawQuestion = serde_json::from_str(&body)?;
        question_from_raw(raw, topic)
    }
}

/// Pull the generated text out of a generateContent response body.
fn candidate_text(response: &serde_json::Value) -> Option<String> {
    response["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(|t| t.to_string())
}

#[cfg(feature = "network")]
fn fetch_generated_json(
    key: &str,
    model: &str,
    timeout: Duration,
    prompt: &str,
) -> Result<String, GenError> {
    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent"
    );
    let request = serde_json::json!({
        "system_instruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": { "responseMimeType": "application/json" },
    });

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;
    let response = client
        .post(&url)
        .query(&[("key", key)])
        .json(&request)
        .send()?;
    if !response.status().is_success() {
        return Err(GenError::Status(response.status().as_u16()));
    }
    let value: serde_json::Value = response.json()?;
    candidate_text(&value).ok_or(GenError::Malformed("no candidate text in response"))
}

#[cfg(not(feature = "network"))]
fn fetch_generated_json(
    _key: &str,
    _model: &str,
    _timeout: Duration,
    _prompt: &str,
) -> Result<String, GenError> {
    Err(GenError::NetworkDisabled)
}
