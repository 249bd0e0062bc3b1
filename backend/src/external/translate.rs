//! Machine translation client
//!
//! Talks to the Google Translate web endpoint (`translate_a/single`).

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{ExternalError, RetryPolicy};

/// Translates text between language codes; `source` may be `"auto"`
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ExternalError>;
}

/// Client for the Google Translate web endpoint
#[derive(Clone)]
pub struct GoogleTranslateClient {
    http_client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl GoogleTranslateClient {
    pub fn new(http_client: Client, base_url: String, retry: RetryPolicy) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
        }
    }
}

/// Join the translated segments of a `translate_a/single` response.
///
/// The response is a nested array whose first element lists
/// `[translated, original, ...]` segments.
pub fn parse_translation(body: &Value) -> Result<String, ExternalError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ExternalError::Parse("missing translation segments".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        return Err(ExternalError::Empty);
    }
    Ok(text)
}

#[async_trait]
impl TranslationProvider for GoogleTranslateClient {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ExternalError> {
        let url = format!("{}/translate_a/single", self.base_url);

        let response = self
            .retry
            .send("translation", || {
                self.http_client
                    .post(&url)
                    .query(&[("client", "gtx"), ("sl", source), ("tl", target), ("dt", "t")])
                    .form(&[("q", text)])
            })
            .await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| ExternalError::Parse(e.to_string()))?;

        parse_translation(&body)
    }
}
