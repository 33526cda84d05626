use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::{GenerationParams, ProxyConfig};
use crate::web::models::Message;

#[derive(Debug, Error)]
pub enum CompletionError {
    // The provider answered with a non-success status. `details` carries
    // its error body, or a synthetic {"error": <status text>} object when
    // that body is not valid JSON.
    #[error("LLM API returned status {status}")]
    Upstream { status: StatusCode, details: Value },

    #[error("request to LLM timed out")]
    Timeout,

    #[error("request to LLM failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected LLM response shape: {0}")]
    MalformedResponse(String),
}

/// The upstream completion call, as seen by the web layer. Handlers only
/// depend on this trait so tests can substitute a stub backend.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, messages: &[Message]) -> Result<String, CompletionError>;
}

/// Client for the Together chat-completions API.
pub struct CompletionClient {
    api_url: String,
    api_key: String,
    generation: GenerationParams,
    client: Client,
}

impl CompletionClient {
    pub fn new(config: &ProxyConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            generation: config.generation.clone(),
            client,
        })
    }

    fn payload(&self, messages: &[Message]) -> Value {
        json!({
            "model": self.generation.model,
            "messages": messages,
            "temperature": self.generation.temperature,
            "max_tokens": self.generation.max_tokens,
            "top_p": self.generation.top_p,
            "repetition_penalty": self.generation.repetition_penalty,
        })
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, CompletionError> {
        info!("Requesting completion for {} messages", messages.len());

        let payload = self.payload(messages);
        debug!("Payload: {}", payload);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.map_err(classify_transport)?;
            let details = error_details(status, &body);
            error!("LLM API error ({}): {}", status, details);
            return Err(CompletionError::Upstream { status, details });
        }

        let body: Value = response.json().await.map_err(classify_transport)?;
        debug!("Response JSON: {}", body);

        extract_answer(&body)
    }
}

fn classify_transport(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::Transport(err)
    }
}

/// Parses an upstream error body, falling back to a synthetic object built
/// from the status text when the body is not JSON.
fn error_details(status: StatusCode, body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|_| {
        json!({ "error": status.canonical_reason().unwrap_or("unknown error") })
    })
}

fn extract_answer(body: &Value) -> Result<String, CompletionError> {
    body.get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            CompletionError::MalformedResponse(
                "missing choices[0].message.content".to_string(),
            )
        })
}
