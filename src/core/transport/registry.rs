//! Session registry for the HTTP transport.
//!
//! Maps session identifiers to live sessions. The map is written only when a
//! session is created or evicted and read by every routing decision.
//! Insertion happens under the write lock into a vacant entry, so two
//! concurrent creations can never claim the same identifier.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::error::SessionError;
use super::session::McpSession;
use crate::core::config::SessionConfig;

/// Size and lifetime limits applied by the registry.
///
/// The default policy keeps every session until the process exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Sessions idle for at least this long are evicted.
    pub idle_timeout: Option<Duration>,

    /// Upper bound on live sessions.
    pub max_sessions: Option<usize>,
}

impl SessionPolicy {
    /// Build the policy from configuration.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            idle_timeout: config.idle_timeout(),
            max_sessions: config.max_sessions,
        }
    }

    fn is_expired(&self, session: &McpSession) -> bool {
        self.idle_timeout
            .is_some_and(|timeout| session.idle_for() >= timeout)
    }
}

/// Process-wide table of live sessions.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<McpSession>>>,
    policy: SessionPolicy,
}

impl SessionRegistry {
    /// Create an empty registry with the given policy.
    pub fn new(policy: SessionPolicy) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            policy,
        }
    }

    /// Register a session under its identifier.
    ///
    /// When the registry is full, idle sessions are evicted first; if that
    /// frees nothing the insert is refused.
    pub async fn insert(&self, session: Arc<McpSession>) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;

        if let Some(max) = self.policy.max_sessions {
            if sessions.len() >= max {
                let before = sessions.len();
                sessions.retain(|_, s| !self.policy.is_expired(s));
                debug!(evicted = before - sessions.len(), "Evicted idle sessions to make room");
            }
            if sessions.len() >= max {
                return Err(SessionError::CapacityExceeded);
            }
        }

        match sessions.entry(session.id().to_string()) {
            Entry::Occupied(_) => Err(SessionError::AlreadyExists),
            Entry::Vacant(entry) => {
                session.touch();
                entry.insert(session);
                Ok(())
            }
        }
    }

    /// Look up a live session and record activity on it.
    ///
    /// A session past its idle timeout is treated as gone even if the
    /// reaper has not removed it yet.
    pub async fn get(&self, id: &str) -> Option<Arc<McpSession>> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(id)?;
        if self.policy.is_expired(session) {
            return None;
        }
        session.touch();
        Some(session.clone())
    }

    /// Whether a live session is registered under `id`.
    pub async fn contains(&self, id: &str) -> bool {
        let sessions = self.sessions.read().await;
        sessions
            .get(id)
            .is_some_and(|s| !self.policy.is_expired(s))
    }

    /// Number of registered sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no session is registered.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop every session that exceeded the idle timeout.
    ///
    /// Returns the number of sessions removed.
    pub async fn reap_idle(&self) -> usize {
        if self.policy.idle_timeout.is_none() {
            return 0;
        }

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !self.policy.is_expired(s));
        let removed = before - sessions.len();

        if removed > 0 {
            info!(removed, remaining = sessions.len(), "Reaped idle sessions");
        }
        removed
    }
}
