//! Bounded retry for outbound calls

use std::{future::Future, time::Duration};

use super::ExternalError;

/// How often, and how patiently, to retry a transient upstream failure
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub max_retries: u32,
    /// Delay before retry `n` is `backoff * n`
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::ZERO,
        }
    }

    /// Run `op` until it succeeds, fails permanently, or retries run out
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T, ExternalError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ExternalError>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "{} failed (attempt {} of {}): {}",
                        label,
                        attempt,
                        self.max_retries + 1,
                        e
                    );
                    tokio::time::sleep(self.backoff * attempt).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Send a request built by `build`, treating non-2xx statuses as errors
    pub async fn send<F>(&self, label: &str, build: F) -> Result<reqwest::Response, ExternalError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let build = &build;
        self.run(label, move || async move {
            let response = build()
                .send()
                .await
                .map_err(|e| ExternalError::Transport(e.to_string()))?;

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(ExternalError::Status { status, body });
            }

            Ok(response)
        })
        .await
    }
}
