/// HTTP gateway to the Gemini `generateContent` endpoint
///
/// One request in, raw model text out. No retry, backoff or timeout.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::request::{GenerateRequest, Part};
use crate::config::Config;

/// Gateway failures
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no API key configured (set API_KEY or GEMINI_API_KEY)")]
    MissingCredential,
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Gemini API returned {status}: {message}")]
    Api { status: StatusCode, message: String },
    #[error("response contained no candidate text{}", blocked_suffix(.block_reason))]
    NoCandidate { block_reason: Option<String> },
}

fn blocked_suffix(block_reason: &Option<String>) -> String {
    block_reason
        .as_deref()
        .map(|reason| format!(" (blocked: {reason})"))
        .unwrap_or_default()
}

/// Sends a request to a model and returns the raw text it produced
#[async_trait]
pub trait Transport: Send + Sync {
    async fn submit(&self, request: &GenerateRequest) -> Result<String, GatewayError>;
}

/// `reqwest`-backed transport for the public Gemini API
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl Transport for GeminiClient {
    async fn submit(&self, request: &GenerateRequest) -> Result<String, GatewayError> {
        let api_key = self.api_key.as_deref().ok_or(GatewayError::MissingCredential)?;

        tracing::debug!(
            "📤 POST {} ({} parts, image: {})",
            self.url(),
            request.parts.len(),
            request.has_image()
        );

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&WireRequest::from(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api { status, message: api_error_message(&body) });
        }

        let body: WireResponse = response.json().await?;
        body.into_text()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest<'a> {
    contents: [WireContent<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct WireContent<'a> {
    role: &'static str,
    parts: &'a [Part],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

impl<'a> From<&'a GenerateRequest> for WireRequest<'a> {
    fn from(request: &'a GenerateRequest) -> Self {
        Self {
            contents: [WireContent { role: "user", parts: &request.parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: request.schema.to_json(),
            },
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl WireResponse {
    /// Concatenated text parts of the first candidate
    fn into_text(self) -> Result<String, GatewayError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect::<String>())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GatewayError::NoCandidate {
                block_reason: self.prompt_feedback.and_then(|f| f.block_reason),
            });
        }
        Ok(text)
    }
}

/// Pull `error.message` out of an API error body, or fall back to the body
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
