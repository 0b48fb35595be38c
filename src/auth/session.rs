//! Session management
//!
//! The session store is the only cross-request shared state in the core. It
//! is internally synchronized; callers never lock around it.

use crate::auth::models::User;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Session information
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID
    pub id: String,
    /// User associated with this session
    pub user: User,
    /// When the session was created
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// When the session was last accessed
    pub last_accessed: chrono::DateTime<chrono::Utc>,
}

impl Session {
    /// Create a new session
    pub fn new(user: User) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user,
            created_at: now,
            last_accessed: now,
        }
    }

    /// Check if session has been idle past the TTL
    pub fn is_expired(&self, ttl_minutes: i64) -> bool {
        let now = chrono::Utc::now();
        now.signed_duration_since(self.last_accessed).num_minutes() > ttl_minutes
    }

    /// Update last accessed time
    pub fn touch(&mut self) {
        self.last_accessed = chrono::Utc::now();
    }
}

/// In-memory session store
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl_minutes: i64,
}

impl SessionManager {
    /// Create a session manager with the given idle TTL
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl_minutes,
        }
    }

    /// Create a new session, returning its id
    pub async fn create_session(&self, user: User) -> String {
        let session = Session::new(user);
        let session_id = session.id.clone();
        self.sessions
            .write()
            .await
            .insert(session_id.clone(), session);
        session_id
    }

    /// Get a session by ID, evicting it if expired
    pub async fn get_session(&self, session_id: &str) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(session_id) {
            if session.is_expired(self.ttl_minutes) {
                sessions.remove(session_id);
                return None;
            }
            session.touch();
            return Some(session.clone());
        }
        None
    }

    /// Delete a session (logout)
    pub async fn delete_session(&self, session_id: &str) {
        self.sessions.write().await.remove(session_id);
    }

    /// Cleanup expired sessions
    pub async fn cleanup_expired(&self) {
        let ttl = self.ttl_minutes;
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| !session.is_expired(ttl));
    }

    /// Get session count
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(30)
    }
}

impl Clone for SessionManager {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            ttl_minutes: self.ttl_minutes,
        }
    }
}
