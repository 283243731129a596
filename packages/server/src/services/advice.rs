use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::config::AdviceConfig;
use crate::error::AppError;

/// Instruction prepended to every consultation prompt.
const PROMPT_SUFFIX: &str = "Consider yourself as an expert Pakistani lawyer. \
    Answer it as a combination of paragraph and bullet points, in simple layman terms, \
    with references and section numbers of Pakistani laws.";

/// Client for the AI legal-consultation provider.
///
/// Wraps a Gemini-style `generateContent` endpoint. When no API key is
/// configured the client is constructed disabled and every request fails
/// with `ADVICE_DISABLED`.
#[derive(Clone)]
pub struct AdviceClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

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
    #[serde(default)]
    text: String,
}

impl AdviceClient {
    pub fn new(config: &AdviceConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_default();

        Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Ask the provider for legal advice on the given message.
    #[instrument(skip(self, message))]
    pub async fn generate(&self, message: &str) -> Result<String, AppError> {
        let api_key = self.api_key.as_deref().ok_or(AppError::AdviceDisabled)?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let prompt = format!("{} {}", message, PROMPT_SUFFIX);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("HTTP {status}: {detail}")));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Malformed provider response: {e}")))?;

        extract_reply(parsed)
            .ok_or_else(|| AppError::Upstream("Provider returned no candidates".into()))
    }
}

/// Pull the first non-empty candidate text out of a provider response.
fn extract_reply(parsed: GenerateResponse) -> Option<String> {
    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .filter(|t| !t.is_empty())
}
