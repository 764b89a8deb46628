//! Session registry.
//!
//! Keeps each browser session's state isolated behind its own id. Sessions
//! are evicted oldest-first once `max_sessions` is reached.

use std::collections::{HashMap, VecDeque};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::session::Session;
use crate::types::DeskError;

#[derive(Default)]
struct Inner {
    sessions: HashMap<Uuid, Session>,
    /// Creation order, oldest first.
    order: VecDeque<Uuid>,
}

pub struct SessionRegistry {
    inner: RwLock<Inner>,
    max_sessions: usize,
}

impl SessionRegistry {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Start a fresh session and return its id.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let mut inner = self.inner.write().await;

        while inner.sessions.len() >= self.max_sessions {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.sessions.remove(&oldest);
                    debug!(session = %oldest, "Evicted oldest session");
                }
                None => break,
            }
        }

        inner.sessions.insert(id, Session::new());
        inner.order.push_back(id);
        info!(session = %id, live = inner.sessions.len(), "Session created");
        id
    }

    /// Run `f` against a session with mutable access.
    pub async fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Result<R, DeskError> {
        let mut inner = self.inner.write().await;
        let session = inner
            .sessions
            .get_mut(&id)
            .ok_or(DeskError::SessionNotFound(id))?;
        Ok(f(session))
    }

    /// Run `f` against a session with shared access.
    pub async fn read_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&Session) -> R,
    ) -> Result<R, DeskError> {
        let inner = self.inner.read().await;
        let session = inner
            .sessions
            .get(&id)
            .ok_or(DeskError::SessionNotFound(id))?;
        Ok(f(session))
    }

    pub async fn contains(&self, id: Uuid) -> bool {
        self.inner.read().await.sessions.contains_key(&id)
    }

    /// End a session. Returns false if it did not exist.
    pub async fn remove(&self, id: Uuid) -> bool {
        let mut inner = self.inner.write().await;
        let removed = inner.sessions.remove(&id).is_some();
        if removed {
            inner.order.retain(|s| *s != id);
            info!(session = %id, "Session ended");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
