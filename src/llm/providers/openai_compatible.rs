//! OpenAI-compatible chat completion provider (`/v1/chat/completions`).
//!
//! Covers OpenAI itself and local servers speaking the same wire format
//! (Ollama, LM Studio…). The system prompt becomes a leading `system`
//! message; the conversation window follows in order.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::OpenAiConfig;
use crate::llm::{LlmResponse, LlmUsage, ProviderError};
use crate::subsystems::memory::Turn;

#[derive(Debug, Clone)]
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiConfig,
    /// `None` for keyless local models; otherwise sent as a bearer token.
    api_key: Option<String>,
}

impl OpenAiCompatibleProvider {
    pub fn new(config: OpenAiConfig, api_key: Option<String>) -> Result<Self, ProviderError> {
        let client = super::http_client(config.timeout_seconds)?;
        Ok(Self { client, config, api_key })
    }

    pub async fn complete(
        &self,
        system: Option<&str>,
        turns: &[Turn],
    ) -> Result<LlmResponse, ProviderError> {
        // Some models (gpt-5 family) do not accept a temperature parameter.
        let temperature = if self.config.model.starts_with("gpt-5") {
            None
        } else {
            Some(self.config.temperature)
        };

        let mut messages = Vec::with_capacity(turns.len() + 1);
        if let Some(sys) = system {
            messages.push(Message { role: "system", content: sys });
        }
        messages.extend(turns.iter().map(|t| Message { role: t.role.as_str(), content: &t.content }));

        let payload = ChatCompletionRequest {
            model: &self.config.model,
            messages,
            temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!(model = %payload.model, turns = turns.len(), "sending chat completion request");

        let mut req = self.client.post(&self.config.api_base_url).json(&payload);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await.map_err(|e| {
            error!(url = %self.config.api_base_url, error = %e, "LLM HTTP request failed (transport)");
            ProviderError::Request(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read error body>".to_string());
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|env| format!("HTTP {status}: {}", env.error.message))
                .unwrap_or_else(|_| format!("HTTP {status}: {body}"));
            error!(%status, %message, "LLM request returned HTTP error");
            return Err(ProviderError::Request(message));
        }

        let parsed = response.json::<ChatCompletionResponse>().await.map_err(|e| {
            error!(error = %e, "failed to deserialize LLM response");
            ProviderError::Request(format!("failed to parse response body: {e}"))
        })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ProviderError::Request("empty or missing content in response".into()))?;

        let usage = parsed.usage.map(|u| LlmUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        });

        Ok(LlmResponse { text, usage })
    }
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<UsageData>,
}

#[derive(Debug, Deserialize)]
struct UsageData {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}
