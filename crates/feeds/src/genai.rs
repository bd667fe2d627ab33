use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use common::{Error, Result, TextSentimentSource};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-flash-latest";

/// Headline scorer backed by the Gemini generateContent API. The model
/// is asked for a bare numeric score; anything around the number is
/// stripped off before parsing.
pub struct GenAiSentiment {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GenAiSentiment {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: crate::http_client(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn prompt(headlines: &[String]) -> String {
        let mut prompt = String::from(
            "Analyze the following crypto news headlines and provide a single \
             sentiment score from -1.0 (extremely bearish) to 1.0 (extremely \
             bullish). Only return the numeric score:\n\n",
        );
        prompt.push_str(&headlines.join("\n"));
        prompt
    }
}

#[async_trait]
impl TextSentimentSource for GenAiSentiment {
    async fn score(&self, headlines: &[String]) -> Result<f64> {
        if headlines.is_empty() {
            return Ok(0.0);
        }

        let url = format!(
            "{BASE_URL}/models/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let payload = json!({
            "contents": [{ "parts": [{ "text": Self::prompt(headlines) }] }]
        });

        let resp = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;
        let body: GenerateResponse =
            resp.json().await.map_err(|e| Error::Http(e.to_string()))?;

        let text = body
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| Error::Feed("model response had no text".into()))?;

        let score = extract_score(text)
            .ok_or_else(|| Error::Feed(format!("no numeric score in model reply: {text:?}")))?;
        debug!(score, "AI sentiment scored");
        Ok(score.clamp(-1.0, 1.0))
    }
}

/// Pull the first signed decimal out of free-form model text.
fn extract_score(text: &str) -> Option<f64> {
    text.split_whitespace().find_map(|token| {
        let token = token.trim_matches(|c: char| !c.is_ascii_digit() && c != '-' && c != '+');
        if token.contains(|c: char| c.is_ascii_digit()) {
            token.parse().ok()
        } else {
            None
        }
    })
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: String,
}
