//! Chat gateway — enrich, remember, complete.
//!
//! Per request: validate → lock session → enrich → call the provider with
//! the trailing window → record both turns → reply. The session lock is held
//! across the provider call so concurrent requests on one session id are
//! applied in order instead of overwriting each other.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::ChatConfig;
use crate::llm::{LlmProvider, ProviderError};
use crate::subsystems::enrichment::Enricher;
use crate::subsystems::memory::{window, MemoryError, SessionStore, Turn};

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("empty message")]
    EmptyMessage,
    #[error(transparent)]
    Completion(#[from] ProviderError),
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub message: String,
    pub session_id: String,
}

pub struct ChatGateway {
    provider: LlmProvider,
    enricher: Arc<Enricher>,
    sessions: Arc<SessionStore>,
    config: ChatConfig,
}

impl ChatGateway {
    pub fn new(
        provider: LlmProvider,
        enricher: Arc<Enricher>,
        sessions: Arc<SessionStore>,
        config: ChatConfig,
    ) -> Self {
        Self { provider, enricher, sessions, config }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Resolve the effective session id: the caller's, or the default when
    /// absent or blank.
    pub fn session_id(&self, requested: Option<String>) -> String {
        requested
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| self.config.default_session_id.clone())
    }

    pub async fn handle(
        &self,
        message: &str,
        session_id: Option<String>,
    ) -> Result<ChatReply, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let session_id = self.session_id(session_id);

        let handle = self.sessions.session(&session_id)?;
        let mut history = handle.lock().await;

        let context = self.enricher.context(message).await;
        if !context.is_empty() {
            debug!(%session_id, context_len = context.len(), "message enriched");
        }

        // The user turn is committed only once the provider has answered.
        let mut candidate = Vec::with_capacity(self.config.context_window);
        let prior = window(&history, self.config.context_window.saturating_sub(1));
        candidate.extend_from_slice(prior);
        candidate.push(Turn::user(format!("{message}{context}")));

        debug!(%session_id, turns = candidate.len(), stored = history.len(), "calling completion API");
        let response = self
            .provider
            .complete(Some(&self.config.system_prompt), &candidate)
            .await?;

        if let Some(usage) = response.usage {
            info!(
                %session_id,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "completion received"
            );
        }

        if let Some(user_turn) = candidate.pop() {
            history.push(user_turn);
        }
        history.push(Turn::assistant(response.text.clone()));

        Ok(ChatReply {
            message: response.text,
            session_id,
        })
    }
}
