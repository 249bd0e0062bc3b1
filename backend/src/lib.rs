//! Agri Advisor backend
//!
//! Three small HTTP services share this library: a multilingual farming
//! chat assistant, a crop recommender and a fertilizer recommender. Each
//! binary under `src/bin` builds its own state and router from here.

use std::sync::Arc;

use axum::extract::FromRef;
use chrono::{DateTime, Utc};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod ml;
pub mod routes;
pub mod server;
pub mod services;
pub mod telemetry;

pub use config::Config;

use config::ServiceKind;
use external::{http_client, GeminiClient, GoogleTranslateClient, GoogleTtsClient, RetryPolicy};
use ml::{CropModels, FertilizerModels, ModelStatus};
use services::{ChatService, CropService, FertilizerService};

/// What `/health` reports about the running service
#[derive(Debug, Clone)]
pub struct ServiceHealth {
    pub service: &'static str,
    pub started_at: DateTime<Utc>,
    /// `None` for services without model artifacts
    pub models_ready: Option<bool>,
}

impl ServiceHealth {
    pub fn new(service: ServiceKind, models_ready: Option<bool>) -> Self {
        Self {
            service: service.name(),
            started_at: Utc::now(),
            models_ready,
        }
    }
}

/// Refuse to start without models unless degraded mode is allowed
fn check_required<T>(status: &ModelStatus<T>, config: &Config) -> anyhow::Result<()> {
    if let ModelStatus::Unavailable { reason } = status {
        if config.models.required {
            anyhow::bail!("required model artifacts are unavailable: {reason}");
        }
        tracing::warn!("Starting without models; predictions will return 503");
    }
    Ok(())
}

/// State for the chat service
#[derive(Clone, FromRef)]
pub struct ChatState {
    pub chat: ChatService,
    pub health: ServiceHealth,
}

impl ChatState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let chat = &config.chat;
        if chat.gemini_api_key.is_empty() {
            tracing::warn!("No Gemini API key configured; chat replies will fail");
        }

        let client = http_client(chat.request_timeout())?;
        let retry = RetryPolicy {
            max_retries: chat.max_retries,
            backoff: chat.retry_backoff(),
        };

        let model = GeminiClient::new(
            client.clone(),
            chat.gemini_base_url.clone(),
            chat.gemini_model.clone(),
            chat.gemini_api_key.clone(),
            retry,
        );
        let translator =
            GoogleTranslateClient::new(client.clone(), chat.translate_base_url.clone(), retry);
        let speech = GoogleTtsClient::new(client, chat.tts_base_url.clone(), retry);

        Ok(Self {
            chat: ChatService::new(Arc::new(translator), Arc::new(model), Arc::new(speech)),
            health: ServiceHealth::new(ServiceKind::Chat, None),
        })
    }
}

/// State for the crop recommendation service
#[derive(Clone, FromRef)]
pub struct CropState {
    pub crop: CropService,
    pub health: ServiceHealth,
}

impl CropState {
    pub fn new(models: ModelStatus<CropModels>) -> Self {
        let health = ServiceHealth::new(ServiceKind::Crop, Some(models.is_ready()));
        Self {
            crop: CropService::new(models),
            health,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let models = ModelStatus::from_load(CropModels::load(&config.models));
        check_required(&models, config)?;
        Ok(Self::new(models))
    }
}

/// State for the fertilizer recommendation service
#[derive(Clone, FromRef)]
pub struct FertilizerState {
    pub fertilizer: FertilizerService,
    pub health: ServiceHealth,
}

impl FertilizerState {
    pub fn new(models: ModelStatus<FertilizerModels>) -> Self {
        let health = ServiceHealth::new(ServiceKind::Fertilizer, Some(models.is_ready()));
        Self {
            fertilizer: FertilizerService::new(models),
            health,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let models = ModelStatus::from_load(FertilizerModels::load(&config.models));
        check_required(&models, config)?;
        Ok(Self::new(models))
    }
}
