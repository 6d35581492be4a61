//! Session registry
//!
//! Maps live SSE sessions to their outbound channels. Entries are created
//! when a client opens the event stream and removed when the connection
//! closes; identifiers are fresh UUIDs and never reused while live. The map
//! is mutated concurrently by connection-open and connection-close events,
//! so it sits behind a lock; lookups and removals are cheap synchronous
//! operations.

use crate::error::{Error, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

/// Opaque session identifier handed to the client
pub type SessionId = String;

/// Outbound channel carrying serialized JSON-RPC responses to one client
pub type SessionChannel = mpsc::Sender<String>;

/// Registry of live sessions, owned by the server instance
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, SessionChannel>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a channel under a fresh identifier and return the identifier
    pub fn open(&self, channel: SessionChannel) -> SessionId {
        let id = Uuid::new_v4().to_string();
        self.sessions.write().insert(id.clone(), channel);
        debug!(session_id = %id, "Session opened");
        id
    }

    /// Fetch the channel for a session, or `SessionNotFound`
    pub fn lookup(&self, id: &str) -> Result<SessionChannel> {
        self.sessions
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))
    }

    /// Remove a session. Safe to call for identifiers that are already gone.
    pub fn close(&self, id: &str) {
        if self.sessions.write().remove(id).is_some() {
            debug!(session_id = %id, "Session closed");
        }
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
