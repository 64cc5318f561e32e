//! OpenAI-compatible chat completions client.
//!
//! Works with any provider that exposes the `/v1/chat/completions`
//! endpoint: OpenAI, Ollama, vLLM, LiteLLM, etc. The response's
//! `usage` object feeds the token/cost metrics on the returned
//! [`Analysis`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Serialize;

use crate::config::ProviderConfig;
use crate::constants;
use crate::models::{Analysis, ChangeSet, TokenUsage};

use super::{pricing, prompt, AnalysisError, Analyzer};

/// Request timeout for the completion endpoint.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// A message in a chat conversation with the model.
#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: Role,
    content: String,
}

/// Role in the chat conversation.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
enum Role {
    System,
    User,
}

/// Analyzer backed by an OpenAI-compatible completion endpoint.
///
/// Configuration is injected at construction and immutable thereafter.
pub struct OpenAiAnalyzer {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl OpenAiAnalyzer {
    /// Create a new analyzer from provider configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NotConfigured`] when no API key is set,
    /// or [`AnalysisError::Request`] if the HTTP client cannot be built.
    pub fn new(config: ProviderConfig) -> Result<Self, AnalysisError> {
        if config.api_key.is_none() {
            return Err(AnalysisError::NotConfigured(format!(
                "no API key found. Set {} or {}.",
                constants::ENV_API_KEY,
                constants::ENV_API_KEY_FALLBACK,
            )));
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AnalysisError::Request(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// The model the analyzer will request.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send a chat completion request and return the text response
    /// with its token usage.
    async fn chat(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<(String, TokenUsage), AnalysisError> {
        let base_url = self
            .config
            .base_url
            .as_deref()
            .unwrap_or("https://api.openai.com");
        let url = format!("{base_url}/v1/chat/completions");

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": self.config.temperature,
        });

        let mut request = self.client.post(&url);
        if let Some(api_key) = &self.config.api_key {
            request = request.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = request
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalysisError::Request(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Api {
                status: status.to_string(),
                body: body_text,
            });
        }

        let response_body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AnalysisError::Shape(format!("failed to parse response: {e}")))?;

        let content = response_body
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| {
                AnalysisError::Shape(format!("unexpected response structure: {response_body}"))
            })?
            .to_string();

        let usage = match response_body.get("usage") {
            Some(u) => serde_json::from_value(u.clone())
                .map_err(|e| AnalysisError::Shape(format!("malformed usage object: {e}")))?,
            None => TokenUsage::default(),
        };

        Ok((content, usage))
    }
}

/// Join per-file diffs into the single payload sent for review.
///
/// Files with an empty diff body (e.g. untracked files recorded by the
/// worktree pass) are skipped.
fn build_patch(changes: &ChangeSet) -> String {
    changes
        .iter()
        .filter(|(_, diff)| !diff.trim().is_empty())
        .map(|(_, diff)| diff.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl Analyzer for OpenAiAnalyzer {
    async fn analyze(&self, changes: &ChangeSet) -> Result<Analysis, AnalysisError> {
        let patch = build_patch(changes);
        let messages = vec![
            ChatMessage {
                role: Role::System,
                content: prompt::SECURITY_REVIEW_PROMPT.to_string(),
            },
            ChatMessage {
                role: Role::User,
                content: prompt::analysis_request(&patch),
            },
        ];

        let started = Instant::now();
        let (report, usage) = self.chat(messages).await?;
        let elapsed = started.elapsed();

        Ok(Analysis {
            report,
            model: self.config.model.clone(),
            cost_usd: pricing::estimate_cost(&self.config.model, &usage),
            usage,
            elapsed,
        })
    }
}
