use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::SessionModel;

/// Trait for connection session storage
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Register a new session; returns false if the id is already in use
    async fn create_session(&self, session: SessionModel) -> bool;

    async fn get_session(&self, connection_id: &str) -> Option<SessionModel>;

    /// Mark the connection as being in `room_code` under `user_name`.
    /// Returns the updated session, or None if the connection has no session.
    async fn record_room_join(
        &self,
        connection_id: &str,
        room_code: &str,
        user_name: &str,
    ) -> Option<SessionModel>;

    /// Remove and return the session
    async fn delete_session(&self, connection_id: &str) -> Option<SessionModel>;

    async fn session_count(&self) -> usize;
}

/// In-memory implementation of SessionRepository
///
/// Sessions are volatile and disappear with the process.
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, SessionModel>>,
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionRepository {
    /// Creates a new empty repository
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    #[instrument(skip(self, session), fields(connection_id = %session.connection_id))]
    async fn create_session(&self, session: SessionModel) -> bool {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.connection_id) {
            warn!("Session already exists");
            return false;
        }

        sessions.insert(session.connection_id.clone(), session);
        debug!("Session created");
        true
    }

    #[instrument(skip(self))]
    async fn get_session(&self, connection_id: &str) -> Option<SessionModel> {
        self.sessions.read().await.get(connection_id).cloned()
    }

    #[instrument(skip(self))]
    async fn record_room_join(
        &self,
        connection_id: &str,
        room_code: &str,
        user_name: &str,
    ) -> Option<SessionModel> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(connection_id)?;

        if let Some(previous) = session.current_room_code.as_deref() {
            if previous != room_code {
                debug!(previous_room = %previous, "Connection joining an additional room");
            }
        }

        session.enter_room(room_code, user_name);
        Some(session.clone())
    }

    #[instrument(skip(self))]
    async fn delete_session(&self, connection_id: &str) -> Option<SessionModel> {
        let removed = self.sessions.write().await.remove(connection_id);
        if removed.is_none() {
            debug!("No session to delete");
        }
        removed
    }

    async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get_session() {
        let repo = InMemorySessionRepository::new();

        assert!(repo.create_session(SessionModel::new("c1".into())).await);

        let session = repo.get_session("c1").await.unwrap();
        assert_eq!(session.connection_id, "c1");
        assert!(session.current_room_code.is_none());
        assert_eq!(repo.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_session_rejected() {
        let repo = InMemorySessionRepository::new();

        assert!(repo.create_session(SessionModel::new("c1".into())).await);
        assert!(!repo.create_session(SessionModel::new("c1".into())).await);
        assert_eq!(repo.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_record_room_join() {
        let repo = InMemorySessionRepository::new();
        repo.create_session(SessionModel::new("c1".into())).await;

        let updated = repo.record_room_join("c1", "42", "Alice").await.unwrap();

        assert_eq!(updated.current_room_code.as_deref(), Some("42"));
        assert_eq!(updated.user_name.as_deref(), Some("Alice"));
        assert_eq!(repo.get_session("c1").await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_record_room_join_without_session() {
        let repo = InMemorySessionRepository::new();

        assert!(repo.record_room_join("ghost", "42", "Alice").await.is_none());
    }

    #[tokio::test]
    async fn test_delete_session() {
        let repo = InMemorySessionRepository::new();
        repo.create_session(SessionModel::new("c1".into())).await;
        repo.record_room_join("c1", "42", "Alice").await;

        let removed = repo.delete_session("c1").await.unwrap();

        assert_eq!(removed.current_room_code.as_deref(), Some("42"));
        assert!(repo.get_session("c1").await.is_none());
        assert!(repo.delete_session("c1").await.is_none());
    }
}
