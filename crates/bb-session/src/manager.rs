use super::{Role, Session};
use chrono::Duration;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Thread-safe session registry with TTL-based expiry.
///
/// Expired sessions behave as absent: reads evict them. Every successful
/// read refreshes the session's activity window.
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Mint a new session. An existing id is touched and returned as-is, so
    /// a repeated create call does not clobber conversation state.
    pub fn create(&self, id: Option<String>) -> Session {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(id) = &id {
            if let Some(existing) = sessions.get_mut(id) {
                existing.touch();
                return existing.clone();
            }
        }
        let session = match id {
            Some(id) => Session::with_id(id),
            None => Session::new(),
        };
        debug!(session_id = %session.id, "session created");
        sessions.insert(session.id.clone(), session.clone());
        session
    }

    pub fn get(&self, id: &str) -> Option<Session> {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.get_mut(id) {
            Some(session) if session.is_expired(self.ttl) => {
                debug!(session_id = %id, "session expired, evicting");
                sessions.remove(id);
                None
            }
            Some(session) => {
                session.touch();
                Some(session.clone())
            }
            None => None,
        }
    }

    pub fn get_or_create(&self, id: &str) -> Session {
        match self.get(id) {
            Some(session) => session,
            None => self.create(Some(id.to_string())),
        }
    }

    pub fn remove(&self, id: &str) -> bool {
        self.sessions.lock().unwrap().remove(id).is_some()
    }

    /// Append a conversation turn to a live session.
    pub fn add_message(&self, id: &str, role: Role, content: impl Into<String>) -> bool {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.get_mut(id) {
            Some(session) if !session.is_expired(self.ttl) => {
                session.add_message(role, content);
                true
            }
            _ => false,
        }
    }

    /// Drop all expired sessions, returning how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        let ttl = self.ttl;
        sessions.retain(|_, s| !s.is_expired(ttl));
        before - sessions.len()
    }

    pub fn count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn list(&self) -> Vec<Session> {
        self.sessions.lock().unwrap().values().cloned().collect()
    }

    #[cfg(test)]
    pub(crate) fn backdate(&self, id: &str, minutes: i64) {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(s) = sessions.get_mut(id) {
            s.last_activity = s.last_activity - Duration::minutes(minutes);
        }
    }
}
