//! Completion client abstraction.
//!
//! The engine talks to a language model through `CompletionClient`: one user
//! message in, free-form text out. `HttpCompletionClient` speaks the
//! OpenAI-compatible chat completions API; `FakeCompletionClient` replays
//! scripted replies for tests.

use crate::config::LlmConfig;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Completion errors. None of these ever reach the engine's caller.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    #[error("LLM returned empty response")]
    EmptyResponse,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Single-turn text completion
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send `prompt` as one user message and return the reply text
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, LlmError>;
}

/// OpenAI-compatible HTTP client
pub struct HttpCompletionClient {
    base_url: String,
    model: String,
    api_key: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpCompletionClient {
    pub fn new(config: &LlmConfig, api_key: impl Into<String>) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.into(),
            timeout,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, LlmError> {
        let request_body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt},
            ],
            "temperature": temperature,
        });

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.timeout)
                } else {
                    LlmError::HttpError(format!("Request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            return Err(LlmError::HttpError(format!(
                "HTTP {} from completion API",
                response.status()
            )));
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        response_json
            .get("choices")
            .and_then(|v| v.get(0))
            .and_then(|v| v.get("message"))
            .and_then(|v| v.get("content"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or(LlmError::EmptyResponse)
    }
}

/// Scripted client for tests
pub struct FakeCompletionClient {
    responses: Mutex<Vec<Result<String, LlmError>>>,
    delay: Option<Duration>,
    calls: Mutex<Vec<(String, f32)>>,
}

impl FakeCompletionClient {
    /// Replies are consumed in order; the last one repeats
    pub fn new(responses: Vec<Result<String, LlmError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn always_text(text: impl Into<String>) -> Self {
        Self::new(vec![Ok(text.into())])
    }

    pub fn always_error(error: LlmError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Sleep before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Prompt and temperature of the most recent call
    pub fn last_call(&self) -> Option<(String, f32)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionClient for FakeCompletionClient {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), temperature));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let mut responses = self.responses.lock().unwrap();
        match responses.len() {
            0 => Err(LlmError::EmptyResponse),
            1 => responses[0].clone(),
            _ => responses.remove(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_client_repeats_last_reply() {
        let client = FakeCompletionClient::always_text("Worth $400,000");

        assert_eq!(client.complete("p1", 0.3).await.unwrap(), "Worth $400,000");
        assert_eq!(client.complete("p2", 0.3).await.unwrap(), "Worth $400,000");
        assert_eq!(client.call_count(), 2);
        assert_eq!(client.last_call(), Some(("p2".to_string(), 0.3)));
    }

    #[tokio::test]
    async fn test_fake_client_scripted_sequence() {
        let client = FakeCompletionClient::new(vec![
            Ok("first".to_string()),
            Err(LlmError::HttpError("connection refused".to_string())),
        ]);

        assert_eq!(client.complete("", 0.3).await.unwrap(), "first");
        assert!(matches!(
            client.complete("", 0.3).await,
            Err(LlmError::HttpError(_))
        ));
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn test_fake_client_empty_script() {
        let client = FakeCompletionClient::new(vec![]);
        assert!(matches!(
            client.complete("", 0.3).await,
            Err(LlmError::EmptyResponse)
        ));
    }

    #[test]
    fn test_http_client_endpoint_strips_trailing_slash() {
        let config = LlmConfig {
            base_url: "http://127.0.0.1:9/v1/".to_string(),
            ..LlmConfig::default()
        };
        let client = HttpCompletionClient::new(&config, "sk-test").unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/v1/chat/completions");
        assert_eq!(client.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LlmError::Timeout(Duration::from_secs(30)).to_string(),
            "Request timeout after 30s"
        );
        assert_eq!(
            LlmError::EmptyResponse.to_string(),
            "LLM returned empty response"
        );
    }
}
