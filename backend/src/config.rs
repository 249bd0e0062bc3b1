//! Configuration management for the Agri Advisor services
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code (per service)
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with AGRI__ prefix

use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// The three independently deployed services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Chat,
    Crop,
    Fertilizer,
}

impl ServiceKind {
    pub fn name(&self) -> &'static str {
        match self {
            ServiceKind::Chat => "chat",
            ServiceKind::Crop => "crop",
            ServiceKind::Fertilizer => "fertilizer",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            ServiceKind::Chat => 5000,
            ServiceKind::Crop => 5001,
            ServiceKind::Fertilizer => 5002,
        }
    }
}

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Cross-origin configuration
    pub cors: CorsConfig,

    /// Log output configuration
    pub log: LogConfig,

    /// Model artifact locations
    pub models: ModelsConfig,

    /// Chat pipeline configuration
    pub chat: ChatConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorsConfig {
    /// Allowed origins; empty allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LogConfig {
    /// Emit JSON log lines instead of human-readable ones
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelsConfig {
    /// Abort startup when artifacts fail to load
    pub required: bool,

    pub crop_model: String,
    pub crop_scaler: String,

    pub fertilizer_model: String,
    pub fertilizer_scaler: String,
    pub soil_encoder: String,
    pub crop_encoder: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    /// Gemini API key
    #[serde(default)]
    pub gemini_api_key: String,

    /// Gemini model name
    pub gemini_model: String,

    /// Gemini API base URL
    pub gemini_base_url: String,

    /// Translation endpoint base URL
    pub translate_base_url: String,

    /// Text-to-speech endpoint base URL
    pub tts_base_url: String,

    /// Directory holding index.html for `GET /`
    pub static_dir: String,

    /// Timeout applied to each outbound request, in seconds
    pub request_timeout_secs: u64,

    /// Retries after the first attempt for transient upstream failures
    pub max_retries: u32,

    /// Delay added per retry attempt, in milliseconds
    pub retry_backoff_ms: u64,
}

impl ChatConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl Config {
    /// Load configuration for `service` from files and environment variables
    pub fn load(service: ServiceKind) -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", service.default_port())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .set_default("log.json", false)?
            .set_default("models.required", true)?
            .set_default("models.crop_model", "models/crop_model.json")?
            .set_default("models.crop_scaler", "models/crop_scaler.json")?
            .set_default("models.fertilizer_model", "models/fert_model.json")?
            .set_default("models.fertilizer_scaler", "models/fert_scaler.json")?
            .set_default("models.soil_encoder", "models/soil_encoder.json")?
            .set_default("models.crop_encoder", "models/crop_encoder.json")?
            .set_default("chat.gemini_model", "gemini-2.0-flash")?
            .set_default(
                "chat.gemini_base_url",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("chat.translate_base_url", "https://translate.googleapis.com")?
            .set_default("chat.tts_base_url", "https://translate.google.com")?
            .set_default("chat.static_dir", "static")?
            .set_default("chat.request_timeout_secs", 30)?
            .set_default("chat.max_retries", 2)?
            .set_default("chat.retry_backoff_ms", 250)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Service-specific overrides, e.g. config/crop.toml
            .add_source(File::with_name(&format!("config/{}", service.name())).required(false))
            // Override with environment variables (AGRI_ prefix)
            .add_source(
                Environment::with_prefix("AGRI")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Address the listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ports_are_distinct() {
        assert_eq!(ServiceKind::Chat.default_port(), 5000);
        assert_eq!(ServiceKind::Crop.default_port(), 5001);
        assert_eq!(ServiceKind::Fertilizer.default_port(), 5002);
    }

    #[test]
    fn test_load_uses_service_defaults() {
        let config = Config::load(ServiceKind::Crop).expect("defaults should load");
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.models.crop_model, "models/crop_model.json");
        assert_eq!(config.chat.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.chat.request_timeout(), Duration::from_secs(30));
    }
}
