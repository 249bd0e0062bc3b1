//! Text-to-speech client
//!
//! Uses the Google Translate speech endpoint, which only accepts short
//! texts. Longer replies are split into chunks and the MP3 segments are
//! concatenated.

use async_trait::async_trait;
use reqwest::Client;

use super::{ExternalError, RetryPolicy};

/// Longest text the speech endpoint accepts in one request
pub const MAX_CHUNK_CHARS: usize = 100;

/// Synthesizes speech audio for a text
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// MP3 audio bytes for `text` spoken in `language`
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, ExternalError>;
}

/// Client for the Google Translate speech endpoint
#[derive(Clone)]
pub struct GoogleTtsClient {
    http_client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl GoogleTtsClient {
    pub fn new(http_client: Client, base_url: String, retry: RetryPolicy) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
        }
    }
}

fn ends_sentence(word: &str) -> bool {
    word.ends_with(['.', '!', '?', ';', ':', '।', '॥'])
}

/// Split `word` into pieces of at most `max` characters
fn split_long(word: &str, max: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars.chunks(max).map(|c| c.iter().collect()).collect()
}

/// Split text into chunks of at most `max` characters.
///
/// Breaks fall between words, preferably after sentence punctuation; a
/// single word longer than `max` is cut.
pub fn chunk_text(text: &str, max: usize) -> Vec<String> {
    let max = max.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        for piece in split_long(word, max) {
            let piece_len = piece.chars().count();
            if current_len > 0 && current_len + 1 + piece_len > max {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(&piece);
            current_len += piece_len;
        }

        if ends_sentence(word) && current_len >= max / 2 {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
    }

    if current_len > 0 {
        chunks.push(current);
    }
    chunks
}

#[async_trait]
impl SpeechSynthesizer for GoogleTtsClient {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, ExternalError> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(ExternalError::Empty);
        }

        let url = format!("{}/translate_tts", self.base_url);
        let total = chunks.len().to_string();
        let mut audio = Vec::new();

        for (idx, chunk) in chunks.iter().enumerate() {
            let idx = idx.to_string();
            let textlen = chunk.chars().count().to_string();

            let response = self
                .retry
                .send("speech synthesis", || {
                    self.http_client.get(&url).query(&[
                        ("ie", "UTF-8"),
                        ("client", "tw-ob"),
                        ("tl", language),
                        ("q", chunk.as_str()),
                        ("total", total.as_str()),
                        ("idx", idx.as_str()),
                        ("textlen", textlen.as_str()),
                    ])
                })
                .await?;

            let bytes = response
                .bytes()
                .await
                .map_err(|e| ExternalError::Transport(e.to_string()))?;
            audio.extend_from_slice(&bytes);
        }

        if audio.is_empty() {
            return Err(ExternalError::Empty);
        }
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(chunk_text("Use neem oil.", 100), vec!["Use neem oil."]);
        assert!(chunk_text("   ", 100).is_empty());
    }

    #[test]
    fn test_breaks_after_sentence_when_half_full() {
        let text = "Apply urea in two splits after the first irrigation. Then water lightly.";
        let chunks = chunk_text(text, 60);
        assert_eq!(
            chunks,
            vec![
                "Apply urea in two splits after the first irrigation.",
                "Then water lightly."
            ]
        );
    }

    #[test]
    fn test_cuts_overlong_words() {
        let word = "a".repeat(250);
        let chunks = chunk_text(&word, 100);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].len(), 50);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // each Telugu letter is several UTF-8 bytes
        let text = "వరి ".repeat(30);
        for chunk in chunk_text(&text, 100) {
            assert!(chunk.chars().count() <= 100);
        }
    }

    proptest! {
        #[test]
        fn prop_chunks_respect_limit_and_keep_text(text in "[a-z .!?]{0,400}", max in 5usize..120) {
            let chunks = chunk_text(&text, max);
            for chunk in &chunks {
                prop_assert!(chunk.chars().count() <= max);
                prop_assert!(!chunk.is_empty());
            }
            let original: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            let joined: String = chunks.concat().chars().filter(|c| !c.is_whitespace()).collect();
            prop_assert_eq!(joined, original);
        }
    }
}
