//! Google Generative Language (`generateContent`) client.

use crate::domain::ports::{Completion, CompletionModel, CompletionSettings};
use crate::utils::error::{Result, ScoutError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Self::with_endpoint(api_key, model, DEFAULT_ENDPOINT, 60)
    }

    pub fn with_endpoint(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        timeout_seconds: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl CompletionModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        tracing::debug!("Calling {} ({} prompt chars)", self.model, prompt.len());
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ScoutError::CompletionError {
                message: format!("{} returned {}: {}", self.model, status, detail.trim()),
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or_else(|| ScoutError::CompletionError {
                message: format!("{} returned no candidates", self.model),
            })?;

        Ok(text)
    }
}

/// Builds the completion capability; a missing or blank key means unconfigured.
pub fn completion_from_settings(settings: &CompletionSettings) -> Result<Completion> {
    match settings.api_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => {
            let client = GeminiClient::with_endpoint(
                key,
                settings.model.clone(),
                settings.endpoint.clone(),
                settings.timeout_seconds,
            )?;
            tracing::info!("🤖 AI model '{}' configured", settings.model);
            Ok(Completion::configured(client))
        }
        _ => {
            tracing::warn!("⚠️ GOOGLE_AI_API_KEY not set, AI stages will be mocked");
            Ok(Completion::Unconfigured)
        }
    }
}
