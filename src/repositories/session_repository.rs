use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::SessionState,
};

/// A session's state behind its own lock. Holding the lock for the whole
/// of an action serialises actions within one session.
pub type SessionHandle = Arc<Mutex<SessionState>>;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: SessionState) -> AppResult<SessionHandle>;
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<SessionHandle>>;
    async fn delete(&self, id: &Uuid) -> AppResult<bool>;
    async fn purge_idle(&self, cutoff: DateTime<Utc>) -> AppResult<usize>;
    async fn count(&self) -> AppResult<usize>;
}

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: SessionState) -> AppResult<SessionHandle> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(AppError::Conflict(format!(
                "Session '{}' already exists",
                session.id
            )));
        }

        let id = session.id;
        let handle = Arc::new(Mutex::new(session));
        sessions.insert(id, Arc::clone(&handle));
        Ok(handle)
    }

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<SessionHandle>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn delete(&self, id: &Uuid) -> AppResult<bool> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.remove(id).is_some())
    }

    /// Drops sessions last used before `cutoff`. A session whose handle is
    /// held outside the map belongs to a request in flight and is kept.
    async fn purge_idle(&self, cutoff: DateTime<Utc>) -> AppResult<usize> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| {
            if Arc::strong_count(handle) > 1 {
                return true;
            }
            match handle.try_lock() {
                Ok(session) => session.last_active_at >= cutoff,
                Err(_) => true,
            }
        });
        Ok(before - sessions.len())
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.sessions.read().await.len())
    }
}
