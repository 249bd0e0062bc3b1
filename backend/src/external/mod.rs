//! External API integrations

pub mod gemini;
pub mod retry;
pub mod translate;
pub mod tts;

use thiserror::Error;

pub use gemini::{GeminiClient, LanguageModel};
pub use retry::RetryPolicy;
pub use translate::{GoogleTranslateClient, TranslationProvider};
pub use tts::{GoogleTtsClient, SpeechSynthesizer};

/// Failure talking to an upstream API
#[derive(Debug, Error)]
pub enum ExternalError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("upstream returned an empty result")]
    Empty,

    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl ExternalError {
    /// Whether another attempt could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            ExternalError::Transport(_) => true,
            ExternalError::Status { status, .. } => *status == 429 || *status >= 500,
            ExternalError::Parse(_) | ExternalError::Empty | ExternalError::NotConfigured(_) => {
                false
            }
        }
    }
}

/// Build the shared HTTP client with the configured per-request timeout
pub fn http_client(timeout: std::time::Duration) -> Result<reqwest::Client, ExternalError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ExternalError::Transport(format!("failed to create HTTP client: {}", e)))
}
