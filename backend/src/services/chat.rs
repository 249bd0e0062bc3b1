//! Conversational assistant pipeline
//!
//! One call per turn: translate the question to English, ask the language
//! model with a persona prompt, translate the answer back and optionally
//! voice it. Translation and speech failures degrade gracefully; only a
//! language-model failure fails the turn.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use shared::{same_language, strip_markup, ChatReply, Language, DEFAULT_LANGUAGE_CODE};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{AppError, AppResult, CHAT_FAILURE_MESSAGE};
use crate::external::{LanguageModel, SpeechSynthesizer, TranslationProvider};
use crate::services::persona::{build_prompt, persona_prompt};

/// Prompt returned when the user sends nothing
pub const EMPTY_INPUT_PROMPT: &str = "Please enter your message or provide audio input.";

/// Stand-in question while audio transcription is unsupported
pub const AUDIO_PLACEHOLDER: &str = "Processing audio input...";

/// Reply used when the model returns no text
pub const NO_RESPONSE_FALLBACK: &str = "Sorry, I didn't get a response.";

/// One chat turn as submitted by the web client
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub user_input: Option<String>,
    pub audio_data: Option<String>,
    pub user_language: String,
    pub target_language: String,
}

/// Context for a single turn; created per request and dropped afterwards
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub id: Uuid,
    pub user_language: String,
    pub target_language: String,
    pub persona: Language,
}

impl ChatSession {
    pub fn new(user_language: &str, target_language: &str) -> Self {
        let or_default = |code: &str| {
            if code.trim().is_empty() {
                DEFAULT_LANGUAGE_CODE.to_string()
            } else {
                code.trim().to_string()
            }
        };
        let target_language = or_default(target_language);

        Self {
            id: Uuid::new_v4(),
            user_language: or_default(user_language),
            persona: Language::persona_for(&target_language),
            target_language,
        }
    }
}

/// Chat service wiring the translation, language-model and speech providers
#[derive(Clone)]
pub struct ChatService {
    translator: Arc<dyn TranslationProvider>,
    model: Arc<dyn LanguageModel>,
    speech: Arc<dyn SpeechSynthesizer>,
}

impl ChatService {
    pub fn new(
        translator: Arc<dyn TranslationProvider>,
        model: Arc<dyn LanguageModel>,
        speech: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            translator,
            model,
            speech,
        }
    }

    /// Translate `text`, passing it through unchanged if translation fails
    pub async fn translate_or_passthrough(&self, text: &str, source: &str, target: &str) -> String {
        if text.is_empty() || same_language(source, target) {
            return text.to_string();
        }

        match self.translator.translate(text, source, target).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::error!("Translation error ({} to {}): {}", source, target, e);
                text.to_string()
            }
        }
    }

    /// Base64 MP3 for `text`, or `None` when unsupported or synthesis fails
    async fn speak(&self, text: &str, language: &str) -> Option<String> {
        if text.is_empty() || !Language::supports_speech(language) {
            return None;
        }

        match self.speech.synthesize(text, language).await {
            Ok(audio) => Some(BASE64.encode(audio)),
            Err(e) => {
                tracing::error!("TTS error ({}): {}", language, e);
                None
            }
        }
    }

    /// Answer one chat turn
    pub async fn reply(&self, request: ChatRequest) -> AppResult<ChatReply> {
        let session = ChatSession::new(&request.user_language, &request.target_language);
        let span = tracing::info_span!(
            "chat_turn",
            session_id = %session.id,
            user_language = %session.user_language,
            target_language = %session.target_language,
        );

        self.run_turn(&session, request).instrument(span).await
    }

    async fn run_turn(&self, session: &ChatSession, request: ChatRequest) -> AppResult<ChatReply> {
        let target = session.target_language.as_str();

        let has_audio = request
            .audio_data
            .as_deref()
            .is_some_and(|audio| !audio.trim().is_empty());

        let (question, question_language) = if has_audio {
            tracing::info!(
                "Received audio data in {} - transcription is not implemented",
                session.user_language
            );
            (AUDIO_PLACEHOLDER.to_string(), DEFAULT_LANGUAGE_CODE)
        } else {
            let input = request.user_input.unwrap_or_default().trim().to_string();
            (input, session.user_language.as_str())
        };

        if question.is_empty() {
            let prompt = self
                .translate_or_passthrough(EMPTY_INPUT_PROMPT, DEFAULT_LANGUAGE_CODE, target)
                .await;
            return Ok(ChatReply::text(prompt));
        }

        let question_en = self
            .translate_or_passthrough(&question, question_language, DEFAULT_LANGUAGE_CODE)
            .await;
        tracing::debug!("Question in English: {}", question_en);

        let prompt = build_prompt(persona_prompt(session.persona), &question_en);
        let answer = match self.model.generate(&prompt).await {
            Ok(answer) => answer,
            Err(source) => {
                let message = self
                    .translate_or_passthrough(CHAT_FAILURE_MESSAGE, DEFAULT_LANGUAGE_CODE, target)
                    .await;
                return Err(AppError::LanguageModel { source, message });
            }
        };

        let answer_en = if answer.trim().is_empty() {
            tracing::warn!("Language model returned an empty reply");
            NO_RESPONSE_FALLBACK.to_string()
        } else {
            strip_markup(&answer)
        };

        let translated = strip_markup(
            &self
                .translate_or_passthrough(&answer_en, DEFAULT_LANGUAGE_CODE, target)
                .await,
        );

        let audio = self.speak(&translated, target).await;

        Ok(ChatReply {
            response: translated,
            audio,
        })
    }
}
