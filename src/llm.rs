//! Language model service abstraction and the Ollama-backed implementation.
//!
//! The core only needs a deterministic text-in/text-out completion call.
//! Temperature is pinned to 0 so the intent classifier behaves reliably.

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

use crate::config::OllamaConfig;
use crate::embedding::post_with_retry;

/// A prompt-in/completion-out language model service.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send a prompt and return the raw completion text.
    async fn invoke(&self, prompt: &str) -> Result<String>;
}

/// Chat model backed by Ollama's `POST /api/generate` endpoint.
pub struct OllamaChat {
    base_url: String,
    model: String,
    max_retries: u32,
    client: reqwest::Client,
}

impl OllamaChat {
    pub fn new(config: &OllamaConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.chat_model.clone(),
            max_retries: config.max_retries,
            client,
        })
    }
}

#[async_trait]
impl LanguageModel for OllamaChat {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": { "temperature": 0 },
        });

        let json = post_with_retry(&self.client, &url, &body, self.max_retries).await?;
        json.get("response")
            .and_then(|r| r.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("Invalid generate response: missing response field"))
    }
}
