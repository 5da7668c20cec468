//! In-memory conversation sessions for multi-turn dialogue.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

/// One conversational exchange: what the user asked and what was answered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Turn {
    /// The user's utterance.
    pub user: String,
    /// The generated answer.
    pub ai: String,
}

/// A concurrency-safe in-memory store of conversation histories.
///
/// Sessions are keyed by caller-chosen ids and created implicitly on
/// first append. Histories live only in process memory and are lost on
/// restart. Each session keeps at most `max_turns` turns; older turns
/// are dropped as new ones arrive, bounding memory growth for long-lived
/// processes.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Vec<Turn>>>,
    max_turns: usize,
}

impl SessionStore {
    /// Create a store keeping at most `max_turns` turns per session.
    pub fn new(max_turns: usize) -> Self {
        Self { sessions: RwLock::new(HashMap::new()), max_turns }
    }

    /// Generate a fresh unique session id.
    pub fn new_session(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// The turns recorded for a session, oldest first. Unknown sessions
    /// have an empty history.
    pub async fn history(&self, session_id: &str) -> Vec<Turn> {
        self.sessions.read().await.get(session_id).cloned().unwrap_or_default()
    }

    /// Append a turn to a session, creating the session if needed.
    ///
    /// The append happens atomically under the store's write lock, so
    /// concurrent appends to the same session never lose turns.
    pub async fn append(&self, session_id: &str, turn: Turn) {
        let mut sessions = self.sessions.write().await;
        let history = sessions.entry(session_id.to_string()).or_default();
        history.push(turn);
        if history.len() > self.max_turns {
            let excess = history.len() - self.max_turns;
            history.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn history_is_empty_for_unknown_session() {
        let store = SessionStore::new(10);
        assert!(store.history("nope").await.is_empty());
    }

    #[tokio::test]
    async fn appends_accumulate_in_order() {
        let store = SessionStore::new(10);
        store.append("s", Turn { user: "one".into(), ai: "1".into() }).await;
        store.append("s", Turn { user: "two".into(), ai: "2".into() }).await;

        let history = store.history("s").await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].user, "one");
        assert_eq!(history[1].user, "two");
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = SessionStore::new(10);
        store.append("a", Turn { user: "q".into(), ai: "a".into() }).await;
        assert!(store.history("b").await.is_empty());
    }

    #[tokio::test]
    async fn oldest_turns_are_evicted_beyond_cap() {
        let store = SessionStore::new(2);
        for i in 0..4 {
            store.append("s", Turn { user: format!("q{i}"), ai: format!("a{i}") }).await;
        }

        let history = store.history("s").await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].user, "q2");
        assert_eq!(history[1].user, "q3");
    }

    #[test]
    fn new_session_ids_are_unique() {
        let store = SessionStore::new(10);
        assert_ne!(store.new_session(), store.new_session());
    }
}
