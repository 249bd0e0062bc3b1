//! Gemini language model client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ExternalError, RetryPolicy};

/// A hosted language model answering one prompt per call, with no memory
/// between calls
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Reply text; may be empty when the model declines to answer
    async fn generate(&self, prompt: &str) -> Result<String, ExternalError>;
}

/// Client for the Gemini `generateContent` API
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: String,
    retry: RetryPolicy,
}

/// Request body for `generateContent`
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Response body from `generateContent`
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

impl GenerateContentRequest {
    /// A fresh single-turn conversation
    pub fn single_turn(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl GeminiClient {
    pub fn new(
        http_client: Client,
        base_url: String,
        model: String,
        api_key: String,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
            retry,
        }
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ExternalError> {
        if self.api_key.is_empty() {
            return Err(ExternalError::NotConfigured(
                "Gemini API key is not set".to_string(),
            ));
        }

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let request = GenerateContentRequest::single_turn(prompt);

        let response = self
            .retry
            .send("language model", || {
                self.http_client
                    .post(&url)
                    .query(&[("key", self.api_key.as_str())])
                    .json(&request)
            })
            .await?;

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ExternalError::Parse(e.to_string()))?;

        if let Some(reason) = body.candidates.first().and_then(|c| c.finish_reason.as_deref()) {
            tracing::debug!("Gemini finish reason: {}", reason);
        }

        Ok(body.text())
    }
}
