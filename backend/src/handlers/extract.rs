//! Request body extractors

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
};
use serde_json::{Map, Value};

use crate::error::AppError;

/// A JSON object body.
///
/// Rejects non-JSON content types with 415, and malformed JSON or a
/// non-object body with 400.
#[derive(Debug)]
pub struct JsonObject(pub Map<String, Value>);

/// Media type of the request without parameters, lowercased
fn media_type(headers: &HeaderMap) -> Option<String> {
    let content_type = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let essence = content_type.split(';').next().unwrap_or_default();
    Some(essence.trim().to_ascii_lowercase())
}

/// Whether the request declares a JSON media type (`application/json` or `+json`)
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(essence) = media_type(headers) else {
        return false;
    };

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

pub fn is_multipart_content_type(headers: &HeaderMap) -> bool {
    media_type(headers).is_some_and(|essence| essence == "multipart/form-data")
}

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(req.headers()) {
            return Err(AppError::UnsupportedMediaType);
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::MalformedBody(e.body_text()))?;

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::MalformedBody(e.to_string()))?;

        match value {
            Value::Object(map) => Ok(JsonObject(map)),
            _ => Err(AppError::MalformedBody(
                "expected a JSON object".to_string(),
            )),
        }
    }
}
