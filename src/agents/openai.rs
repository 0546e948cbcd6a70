use super::config::LlmConfig;
use super::models::ChatMessage;
use super::port::ChatModel;
use crate::error::AnalyzerError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Chat-completions client for the OpenAI API (or any compatible endpoint).
pub struct OpenAiClient {
    client: reqwest::Client,
    config: LlmConfig,
    cache: Option<RwLock<HashMap<String, String>>>,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(config.timeout);
        if is_loopback(&config.base_url) {
            builder = builder.no_proxy();
        }
        let client = builder.build().context("Failed to build chat HTTP client")?;

        let cache = config.response_cache.then(|| RwLock::new(HashMap::new()));

        Ok(Self { client, config, cache })
    }
}

/// Local compatible endpoints are never reached through a proxy.
fn is_loopback(base_url: &str) -> bool {
    let host = base_url
        .split("://")
        .nth(1)
        .unwrap_or(base_url)
        .split(['/', ':'])
        .next()
        .unwrap_or_default();

    matches!(host, "localhost" | "127.0.0.1")
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn send_conversation_turn(&self, messages: &[ChatMessage]) -> Result<String> {
        let req = CompletionRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            messages,
        };

        let cache_key = match &self.cache {
            Some(_) => Some(serde_json::to_string(&req)?),
            None => None,
        };

        if let (Some(cache), Some(key)) = (&self.cache, &cache_key) {
            if let Some(hit) = cache.read().await.get(key) {
                debug!(model = %self.config.model, "chat response served from cache");
                return Ok(hit.clone());
            }
        }

        let resp = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&req)
            .send()
            .await
            .context("Chat completion request")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            let preview: String = body.chars().take(300).collect();
            return Err(AnalyzerError::Llm(format!("{}: {}", status, preview)).into());
        }

        let data: CompletionResponse = resp
            .json()
            .await
            .context("Parse chat completion response")?;

        let text = data
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AnalyzerError::Llm("model returned an empty reply".to_string()).into());
        }

        if let Some(usage) = data.usage {
            debug!(
                model = %self.config.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion"
            );
        }

        if let (Some(cache), Some(key)) = (&self.cache, cache_key) {
            cache.write().await.insert(key, text.clone());
        }

        Ok(text)
    }
}
