//! Chat turn models

use serde::{Deserialize, Serialize};

/// Reply to a single chat turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    /// Reply text in the requested target language
    pub response: String,
    /// Base64-encoded MP3 audio of `response`, when synthesized
    pub audio: Option<String>,
}

impl ChatReply {
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            audio: None,
        }
    }
}
