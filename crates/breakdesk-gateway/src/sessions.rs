// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory session registry keyed by opaque id.
//!
//! Each entry sits behind its own async mutex, so actions on one session run
//! one at a time while other sessions proceed independently. Entries record
//! when they were last looked up; [`SessionStore::evict_idle`] drops the ones
//! left untouched for too long.

use std::sync::Arc;
use std::time::Duration;

use breakdesk_agent::Session;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info};

struct Entry {
    session: Arc<Mutex<Session>>,
    last_seen: Instant,
}

#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<String, Entry>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `session` under a fresh id and returns the id.
    pub fn insert(&self, session: Session) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.sessions.insert(
            id.clone(),
            Entry {
                session: Arc::new(Mutex::new(session)),
                last_seen: Instant::now(),
            },
        );
        id
    }

    /// Looks up a session and marks it as recently used.
    pub fn get(&self, id: &str) -> Option<Arc<Mutex<Session>>> {
        self.sessions.get_mut(id).map(|mut entry| {
            entry.last_seen = Instant::now();
            Arc::clone(&entry.session)
        })
    }

    /// Drops the session. Returns false if it did not exist.
    pub fn remove(&self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// Drops every session untouched for at least `max_idle`. Sessions a
    /// request still holds are kept. Returns how many were dropped.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| {
            Arc::strong_count(&entry.session) > 1 || entry.last_seen.elapsed() < max_idle
        });
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Evicts idle sessions on a fixed period. Runs until the task is aborted.
pub async fn sweep_idle_sessions(sessions: Arc<SessionStore>, max_idle: Duration) {
    let period = max_idle.min(Duration::from_secs(60));
    let mut interval = tokio::time::interval(period);
    // Skip the first immediate tick.
    interval.tick().await;

    loop {
        interval.tick().await;
        let evicted = sessions.evict_idle(max_idle);
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "idle sessions evicted");
        } else {
            debug!(remaining = sessions.len(), "no idle sessions");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_get_remove() {
        let store = SessionStore::new();
        let id = store.insert(Session::new("instruction"));
        assert_eq!(store.len(), 1);

        let session = store.get(&id).unwrap();
        session
            .lock()
            .await
            .set_submitter_email("a@b.c")
            .unwrap();
        assert_eq!(
            store.get(&id).unwrap().lock().await.submitter_email(),
            Some("a@b.c")
        );

        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.get(&id).is_none());
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_sessions_are_evicted() {
        let store = SessionStore::new();
        let stale = store.insert(Session::new("x"));
        tokio::time::advance(Duration::from_secs(50)).await;
        let fresh = store.insert(Session::new("x"));
        tokio::time::advance(Duration::from_secs(20)).await;

        assert_eq!(store.evict_idle(Duration::from_secs(60)), 1);
        assert!(store.get(&stale).is_none());
        assert!(store.get(&fresh).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn lookup_refreshes_idle_clock() {
        let store = SessionStore::new();
        let id = store.insert(Session::new("x"));
        tokio::time::advance(Duration::from_secs(50)).await;
        drop(store.get(&id));
        tokio::time::advance(Duration::from_secs(50)).await;

        assert_eq!(store.evict_idle(Duration::from_secs(60)), 0);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn session_in_use_is_not_evicted() {
        let store = SessionStore::new();
        let id = store.insert(Session::new("x"));
        let held = store.get(&id).unwrap();
        tokio::time::advance(Duration::from_secs(120)).await;

        assert_eq!(store.evict_idle(Duration::from_secs(60)), 0);
        drop(held);
        assert_eq!(store.evict_idle(Duration::from_secs(60)), 1);
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_drops_abandoned_sessions() {
        let store = Arc::new(SessionStore::new());
        store.insert(Session::new("x"));
        store.insert(Session::new("x"));

        let sweeper = tokio::spawn(sweep_idle_sessions(
            Arc::clone(&store),
            Duration::from_secs(30),
        ));
        tokio::time::sleep(Duration::from_secs(61)).await;
        assert!(store.is_empty());
        sweeper.abort();
    }

    #[test]
    fn ids_are_unique() {
        let store = SessionStore::new();
        let a = store.insert(Session::new("x"));
        let b = store.insert(Session::new("x"));
        assert_ne!(a, b);
    }
}
