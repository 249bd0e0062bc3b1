//! HTTP handler for the conversational assistant

use axum::{
    async_trait,
    extract::{multipart::MultipartError, FromRequest, Multipart, Request, State},
    Form, Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use serde_json::{Map, Value};
use shared::{validate_language_code, ChatReply, DEFAULT_LANGUAGE_CODE};
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::handlers::extract::is_multipart_content_type;
use crate::services::ChatRequest;
use crate::ChatState;

fn default_language() -> String {
    DEFAULT_LANGUAGE_CODE.to_string()
}

fn language_code(code: &str) -> Result<(), ValidationError> {
    // an empty field falls back to the default language
    if code.is_empty() {
        return Ok(());
    }
    validate_language_code(code).map_err(|msg| {
        let mut error = ValidationError::new("language_code");
        error.message = Some(msg.into());
        error
    })
}

/// Form fields posted by the chat page
#[derive(Debug, Deserialize, Validate)]
pub struct ChatForm {
    #[validate(length(max = 4000))]
    pub user_input: Option<String>,

    /// Recorded audio; accepted but not transcribed
    pub audio_data: Option<String>,

    #[serde(default = "default_language")]
    #[validate(custom = "language_code")]
    pub user_language: String,

    #[serde(default = "default_language")]
    #[validate(custom = "language_code")]
    pub target_language: String,
}

/// Chat form fields, posted either urlencoded or as `multipart/form-data`.
///
/// Multipart file parts (recorded audio) are carried as base64 text.
#[derive(Debug)]
pub struct ChatFormBody(pub ChatForm);

async fn read_multipart(mut multipart: Multipart) -> AppResult<ChatForm> {
    let malformed = |e: MultipartError| AppError::MalformedBody(e.to_string());

    let mut fields = Map::new();
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = if field.file_name().is_some() {
            BASE64.encode(field.bytes().await.map_err(malformed)?)
        } else {
            field.text().await.map_err(malformed)?
        };
        fields.insert(name, Value::String(value));
    }

    serde_json::from_value(Value::Object(fields))
        .map_err(|e| AppError::Validation(e.to_string()))
}

#[async_trait]
impl<S> FromRequest<S> for ChatFormBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let form = if is_multipart_content_type(req.headers()) {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            read_multipart(multipart).await?
        } else {
            let Form(form) = Form::<ChatForm>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            form
        };
        Ok(ChatFormBody(form))
    }
}

impl From<ChatForm> for ChatRequest {
    fn from(form: ChatForm) -> Self {
        ChatRequest {
            user_input: form.user_input,
            audio_data: form.audio_data,
            user_language: form.user_language,
            target_language: form.target_language,
        }
    }
}

/// Answer one chat turn
/// POST /chat
pub async fn chat(
    State(state): State<ChatState>,
    ChatFormBody(form): ChatFormBody,
) -> AppResult<Json<ChatReply>> {
    form.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let reply = state.chat.reply(form.into()).await?;
    Ok(Json(reply))
}
