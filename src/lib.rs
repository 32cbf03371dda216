// Library root — exposes internals for integration tests.
// The binary entry point is src/main.rs.

pub mod bootstrap;
pub mod core;
pub mod llm;
pub mod subsystems;

pub use bootstrap::logger;
pub use self::core::{config, error};

use std::sync::Arc;

use subsystems::chat::ChatGateway;
use subsystems::comms::CommsState;
use subsystems::enrichment::Enricher;
use subsystems::memory::SessionStore;

/// Wire the gateway, lookups and session store from a resolved config.
pub fn build_state(
    config: &config::Config,
    provider: llm::LlmProvider,
) -> Result<Arc<CommsState>, error::AppError> {
    let enricher = Arc::new(
        Enricher::new(&config.enrichment)
            .map_err(|e| error::AppError::Config(format!("enrichment client: {e}")))?,
    );
    let sessions = Arc::new(SessionStore::new(config.chat.max_sessions));
    let gateway = Arc::new(ChatGateway::new(
        provider,
        enricher.clone(),
        sessions,
        config.chat.clone(),
    ));
    Ok(Arc::new(CommsState::new(config.server.name.clone(), gateway, enricher)))
}
