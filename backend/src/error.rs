//! Error handling for the Agri Advisor services
//!
//! Every service renders failures as `{"error": message}`. Client mistakes
//! get descriptive 4xx messages; internal and upstream failures get generic
//! messages and the detail goes to the log only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::FieldError;
use thiserror::Error;

use crate::external::ExternalError;
use crate::ml::ArtifactError;

/// Apology shown when the language model cannot answer
pub const CHAT_FAILURE_MESSAGE: &str =
    "Sorry, the assistant is unavailable right now. Please try again in a moment.";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Client input errors
    #[error("{0}")]
    Field(#[from] FieldError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid {kind}: '{value}'. Valid types are: {}", .valid.join(", "))]
    UnknownCategory {
        kind: &'static str,
        value: String,
        valid: Vec<String>,
    },

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Request must be JSON")]
    UnsupportedMediaType,

    // Model errors
    #[error("Models are not loaded: {0}")]
    ModelsUnavailable(String),

    #[error("Internal error: Invalid prediction index {0} generated.")]
    InvalidPrediction(i64),

    #[error("Inference failed for {context}: {source}")]
    Inference {
        context: &'static str,
        #[source]
        source: ArtifactError,
    },

    // External service errors
    /// `message` is the apology shown to the user, already in their language
    #[error("Language model error: {source}")]
    LanguageModel {
        #[source]
        source: ExternalError,
        message: String,
    },
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Field(_)
            | AppError::Validation(_)
            | AppError::UnknownCategory { .. }
            | AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::ModelsUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::LanguageModel { .. } => StatusCode::BAD_GATEWAY,
            AppError::InvalidPrediction(_) | AppError::Inference { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to the caller
    pub fn public_message(&self) -> String {
        match self {
            AppError::Field(FieldError::Missing(_)) => self.to_string(),
            AppError::Field(err) => {
                format!("Invalid input value: {err}. Please check data types and values.")
            }
            AppError::Validation(_)
            | AppError::UnknownCategory { .. }
            | AppError::MalformedBody(_)
            | AppError::UnsupportedMediaType
            | AppError::InvalidPrediction(_) => self.to_string(),
            AppError::ModelsUnavailable(_) => {
                "Prediction models are not loaded. Please try again later.".to_string()
            }
            AppError::Inference { context, .. } => format!("Failed to get {context}"),
            AppError::LanguageModel { message, .. } => message.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.public_message(),
            }),
        )
            .into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
