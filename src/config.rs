use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.together.xyz/v1/chat/completions";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Persona prompt prepended to every upstream request.
pub const SYSTEM_PROMPT: &str = "You are Nilenini, a knowledgeable and friendly AI meal guide assistant. You provide helpful advice about food, nutrition, meal planning, and cooking. Your responses should be informative yet conversational. Always maintain a supportive and encouraging tone.";

/// Fixed sampling parameters sent with every completion request.
/// These are deliberately not request-scoped; callers only supply messages.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub repetition_penalty: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: "mistralai/Mixtral-8x7B-Instruct-v0.1".to_string(),
            temperature: 0.7,
            max_tokens: 1024,
            top_p: 0.7,
            repetition_penalty: 1.1,
        }
    }
}

/// Process-wide configuration, read from the environment once at startup
/// and passed down explicitly from there.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub api_key: String,
    pub api_url: String,
    pub bind_addr: String,
    pub request_timeout: Duration,
    pub system_prompt: String,
    pub generation: GenerationParams,
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("TOGETHER_API_KEY")
            .context("TOGETHER_API_KEY must be set")?;

        let api_url = env::var("TOGETHER_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Ok(Self {
            api_key,
            api_url,
            bind_addr,
            request_timeout: Duration::from_secs(timeout_secs),
            system_prompt: SYSTEM_PROMPT.to_string(),
            generation: GenerationParams::default(),
        })
    }
}
