//! Router tests for the chat service, with stubbed upstream providers

mod common;

use std::sync::{Arc, Mutex};

use agri::{
    config::{CorsConfig, ServiceKind},
    error::CHAT_FAILURE_MESSAGE,
    external::{ExternalError, LanguageModel, SpeechSynthesizer, TranslationProvider},
    routes, server,
    services::ChatService,
    ChatState, ServiceHealth,
};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use common::{get, json_body, post_raw};
use serde_json::Value;
use tower::ServiceExt;

// =============================================================================
// Stub providers
// =============================================================================

/// Tags text with the target language, or fails every call
#[derive(Default)]
struct StubTranslator {
    fail: bool,
    calls: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl TranslationProvider for StubTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, ExternalError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), source.to_string(), target.to_string()));
        if self.fail {
            return Err(ExternalError::Transport("connection refused".to_string()));
        }
        Ok(format!("[{target}] {text}"))
    }
}

struct StubModel {
    reply: Result<String, u16>,
    prompts: Mutex<Vec<String>>,
}

impl StubModel {
    fn answering(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::default(),
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            reply: Err(status),
            prompts: Mutex::default(),
        }
    }
}

#[async_trait]
impl LanguageModel for StubModel {
    async fn generate(&self, prompt: &str) -> Result<String, ExternalError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(ExternalError::Status {
                status: *status,
                body: "quota exceeded for key AIza-secret".to_string(),
            }),
        }
    }
}

#[derive(Default)]
struct StubSpeech {
    fail: bool,
}

#[async_trait]
impl SpeechSynthesizer for StubSpeech {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, ExternalError> {
        if self.fail {
            return Err(ExternalError::Empty);
        }
        Ok(format!("{language}:{text}").into_bytes())
    }
}

struct Stubs {
    translator: Arc<StubTranslator>,
    model: Arc<StubModel>,
    speech: Arc<StubSpeech>,
}

impl Stubs {
    fn new(model: StubModel) -> Self {
        Self {
            translator: Arc::new(StubTranslator::default()),
            model: Arc::new(model),
            speech: Arc::new(StubSpeech::default()),
        }
    }

    fn app(&self) -> Router {
        let state = ChatState {
            chat: ChatService::new(
                self.translator.clone(),
                self.model.clone(),
                self.speech.clone(),
            ),
            health: ServiceHealth::new(ServiceKind::Chat, None),
        };
        let static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/static");
        server::create_app(routes::chat_routes(static_dir), state, &CorsConfig::default())
    }

    fn translations(&self) -> Vec<(String, String, String)> {
        self.translator.calls.lock().unwrap().clone()
    }
}

async fn post_form(app: Router, body: &'static str) -> (StatusCode, Value) {
    post_raw(app, "/chat", "application/x-www-form-urlencoded", body).await
}

// =============================================================================
// Conversation flow
// =============================================================================

mod conversation {
    use super::*;

    #[tokio::test]
    async fn english_turn_skips_translation() {
        let stubs = Stubs::new(StubModel::answering("Apply **urea** in two splits."));
        let (status, body) = post_form(
            stubs.app(),
            "user_input=How+much+urea%3F&user_language=en&target_language=en",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Apply urea in two splits.");
        assert!(stubs.translations().is_empty());

        let prompts = stubs.model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].ends_with("User question (in English): How much urea?"));
    }

    #[tokio::test]
    async fn telugu_turn_translates_both_ways() {
        let stubs = Stubs::new(StubModel::answering("Use neem oil."));
        let (status, body) =
            post_form(stubs.app(), "user_input=question&user_language=te&target_language=te").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "[te] Use neem oil.");
        assert_eq!(
            stubs.translations(),
            vec![
                ("question".to_string(), "te".to_string(), "en".to_string()),
                ("Use neem oil.".to_string(), "en".to_string(), "te".to_string()),
            ]
        );

        let prompts = stubs.model.prompts.lock().unwrap();
        assert!(prompts[0].starts_with("మీరు"));
        assert!(prompts[0].ends_with("User question (in English): [en] question"));
    }

    #[tokio::test]
    async fn reply_carries_base64_audio() {
        let stubs = Stubs::new(StubModel::answering("Water early."));
        let (_, body) = post_form(stubs.app(), "user_input=hi").await;

        let audio = BASE64.decode(body["audio"].as_str().unwrap()).unwrap();
        assert_eq!(audio, b"en:Water early.");
    }

    #[tokio::test]
    async fn unsupported_speech_language_has_no_audio() {
        let stubs = Stubs::new(StubModel::answering("Water early."));
        let (_, body) = post_form(stubs.app(), "user_input=hi&target_language=hi").await;
        assert!(body["audio"].is_null());
    }

    #[tokio::test]
    async fn empty_input_returns_prompt() {
        let stubs = Stubs::new(StubModel::answering("unused"));
        let (status, body) = post_form(stubs.app(), "user_input=++&user_language=en").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["response"],
            "Please enter your message or provide audio input."
        );
        assert!(body["audio"].is_null());
        assert!(stubs.model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_input_prompt_is_translated() {
        let stubs = Stubs::new(StubModel::answering("unused"));
        let (status, body) =
            post_form(stubs.app(), "user_input=&user_language=te&target_language=te").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["response"],
            "[te] Please enter your message or provide audio input."
        );
        assert!(stubs.model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn other_targets_use_english_persona() {
        let stubs = Stubs::new(StubModel::answering("ok"));
        let (status, _) = post_form(stubs.app(), "user_input=hi&target_language=hi").await;

        assert_eq!(status, StatusCode::OK);
        let prompts = stubs.model.prompts.lock().unwrap();
        assert!(prompts[0].starts_with("You are a friendly"));
    }

    #[tokio::test]
    async fn audio_uses_placeholder_question() {
        let stubs = Stubs::new(StubModel::answering("ok"));
        let (status, _) =
            post_form(stubs.app(), "audio_data=UklGRg%3D%3D&user_language=te&target_language=en").await;

        assert_eq!(status, StatusCode::OK);
        let prompts = stubs.model.prompts.lock().unwrap();
        assert!(prompts[0].ends_with("Processing audio input..."));
        assert!(stubs.translations().is_empty());
    }

    #[tokio::test]
    async fn empty_model_reply_uses_fallback() {
        let stubs = Stubs::new(StubModel::answering("   "));
        let (_, body) = post_form(stubs.app(), "user_input=hi").await;
        assert_eq!(body["response"], "Sorry, I didn't get a response.");
    }
}

// =============================================================================
// Upstream failures
// =============================================================================

mod failures {
    use super::*;

    #[tokio::test]
    async fn translation_failure_passes_text_through() {
        let stubs = Stubs {
            translator: Arc::new(StubTranslator {
                fail: true,
                ..Default::default()
            }),
            ..Stubs::new(StubModel::answering("Use compost."))
        };
        let (status, body) =
            post_form(stubs.app(), "user_input=question&user_language=te&target_language=te").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Use compost.");
        let prompts = stubs.model.prompts.lock().unwrap();
        assert!(prompts[0].ends_with("User question (in English): question"));
    }

    #[tokio::test]
    async fn model_failure_is_bad_gateway_without_detail() {
        let stubs = Stubs::new(StubModel::failing(429));
        let (status, body) = post_form(stubs.app(), "user_input=hi").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], CHAT_FAILURE_MESSAGE);
        assert!(!body.to_string().contains("AIza"));
    }

    #[tokio::test]
    async fn model_failure_apology_is_translated() {
        let stubs = Stubs::new(StubModel::failing(503));
        let (status, body) =
            post_form(stubs.app(), "user_input=question&user_language=te&target_language=te").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], format!("[te] {CHAT_FAILURE_MESSAGE}"));
    }

    #[tokio::test]
    async fn speech_failure_leaves_audio_null() {
        let stubs = Stubs {
            speech: Arc::new(StubSpeech { fail: true }),
            ..Stubs::new(StubModel::answering("Harvest at dawn."))
        };
        let (status, body) = post_form(stubs.app(), "user_input=hi").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Harvest at dawn.");
        assert!(body["audio"].is_null());
    }

    #[tokio::test]
    async fn invalid_language_code_is_bad_request() {
        let stubs = Stubs::new(StubModel::answering("unused"));
        let (status, body) = post_form(stubs.app(), "user_input=hi&user_language=e%3B1").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Validation error"));
    }
}

// =============================================================================
// Multipart bodies
// =============================================================================

mod multipart {
    use super::*;

    const TEXT_BODY: &str = "--X\r\n\
Content-Disposition: form-data; name=\"user_input\"\r\n\r\n\
hello\r\n\
--X\r\n\
Content-Disposition: form-data; name=\"target_language\"\r\n\r\n\
en\r\n\
--X--\r\n";

    const AUDIO_BODY: &str = "--X\r\n\
Content-Disposition: form-data; name=\"audio_data\"; filename=\"clip.webm\"\r\n\
Content-Type: audio/webm\r\n\r\n\
RIFF\r\n\
--X\r\n\
Content-Disposition: form-data; name=\"user_language\"\r\n\r\n\
te\r\n\
--X--\r\n";

    #[tokio::test]
    async fn text_fields_are_answered() {
        let stubs = Stubs::new(StubModel::answering("Hi there."));
        let (status, body) =
            post_raw(stubs.app(), "/chat", "multipart/form-data; boundary=X", TEXT_BODY).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Hi there.");
        let prompts = stubs.model.prompts.lock().unwrap();
        assert!(prompts[0].ends_with("User question (in English): hello"));
    }

    #[tokio::test]
    async fn audio_file_part_counts_as_audio() {
        let stubs = Stubs::new(StubModel::answering("ok"));
        let (status, _) =
            post_raw(stubs.app(), "/chat", "multipart/form-data; boundary=X", AUDIO_BODY).await;

        assert_eq!(status, StatusCode::OK);
        let prompts = stubs.model.prompts.lock().unwrap();
        assert!(prompts[0].ends_with("Processing audio input..."));
    }

    #[tokio::test]
    async fn json_body_is_rejected() {
        let stubs = Stubs::new(StubModel::answering("unused"));
        let (status, _) =
            post_raw(stubs.app(), "/chat", "application/json", "{\"user_input\":\"hi\"}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

// =============================================================================
// Static page and health
// =============================================================================

mod pages {
    use super::*;

    #[tokio::test]
    async fn index_page_is_served() {
        let stubs = Stubs::new(StubModel::answering("unused"));
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = stubs.app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("/chat"));
    }

    #[tokio::test]
    async fn health_reports_no_models() {
        let stubs = Stubs::new(StubModel::answering("unused"));
        let (status, body) = get(stubs.app(), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "chat");
        assert_eq!(body["models"], "none");
        assert!(body["version"].is_string());
    }

    #[tokio::test]
    async fn error_body_is_json() {
        let stubs = Stubs::new(StubModel::failing(500));
        let request = Request::builder()
            .method("POST")
            .uri("/chat")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("user_input=hi"))
            .unwrap();

        let response = stubs.app().oneshot(request).await.unwrap();
        let body = json_body(response).await;
        assert!(body["error"].is_string());
    }
}
