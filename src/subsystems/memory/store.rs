//! Session store — session id → ordered [`Turn`] history.
//!
//! Each session sits behind its own `tokio::sync::Mutex`, so two requests
//! for the same id run one after the other while different sessions proceed
//! concurrently. The outer map lock is held only for lookup/insert.
//!
//! Stored history is never truncated; only [`window`] trims what is sent
//! upstream. When `max_sessions` is set, the least recently used idle session
//! is dropped once the cap is exceeded (same insertion-order bookkeeping as a
//! FIFO kv cap, with a touch on every access). Sessions whose handle is still
//! held by a request are never evicted, so the cap may be exceeded briefly.
//! Without a cap no recency order is kept.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;

use super::types::Turn;

/// Shared, lockable history of one session.
pub type SessionHandle = Arc<AsyncMutex<Vec<Turn>>>;

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("session store lock poisoned")]
    Poisoned,
}

#[derive(Default)]
struct Sessions {
    by_id: HashMap<String, SessionHandle>,
    /// Least recently used first. Only maintained when a cap is set.
    order: Vec<String>,
}

impl Sessions {
    fn touch(&mut self, id: &str) {
        self.order.retain(|k| k != id);
        self.order.push(id.to_string());
    }

    /// Drop idle sessions, oldest first, until at most `cap` remain.
    /// The map holds one reference; any other means a request is using it.
    fn evict_over(&mut self, cap: usize) {
        let mut i = 0;
        while self.order.len() > cap && i < self.order.len() {
            let busy = self
                .by_id
                .get(&self.order[i])
                .is_some_and(|h| Arc::strong_count(h) > 1);
            if busy {
                i += 1;
                continue;
            }
            let oldest = self.order.remove(i);
            self.by_id.remove(&oldest);
            debug!(session_id = %oldest, "session evicted");
        }
    }
}

pub struct SessionStore {
    sessions: Mutex<Sessions>,
    max_sessions: Option<usize>,
}

impl SessionStore {
    /// `max_sessions = None` keeps every session for the process lifetime.
    pub fn new(max_sessions: Option<usize>) -> Self {
        Self {
            sessions: Mutex::new(Sessions::default()),
            max_sessions,
        }
    }

    /// Get or create the session for `id` and mark it most recently used.
    pub fn session(&self, id: &str) -> Result<SessionHandle, MemoryError> {
        let mut sessions = self.sessions.lock().map_err(|_| MemoryError::Poisoned)?;
        let handle = match sessions.by_id.get(id) {
            Some(h) => h.clone(),
            None => {
                debug!(session_id = %id, "session created");
                let h = SessionHandle::default();
                sessions.by_id.insert(id.to_string(), h.clone());
                h
            }
        };
        if let Some(cap) = self.max_sessions {
            sessions.touch(id);
            sessions.evict_over(cap);
        }
        Ok(handle)
    }

    /// Snapshot of a session's turns; empty for unknown ids. Does not create
    /// the session or change its recency.
    pub async fn history(&self, id: &str) -> Result<Vec<Turn>, MemoryError> {
        let handle = {
            let sessions = self.sessions.lock().map_err(|_| MemoryError::Poisoned)?;
            sessions.by_id.get(id).cloned()
        };
        match handle {
            Some(h) => Ok(h.lock().await.clone()),
            None => Ok(Vec::new()),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions
            .lock()
            .map(|s| s.by_id.contains_key(id))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.by_id.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The trailing `n` turns, in insertion order.
pub fn window(turns: &[Turn], n: usize) -> &[Turn] {
    let start = turns.len().saturating_sub(n);
    &turns[start..]
}
