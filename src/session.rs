use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::presenter::Presenter;

pub const COOKIE_NAME: &str = "cinegrid_sid";
const SESSION_TTL_SECS: i64 = 30 * 60;
const MAX_SESSIONS: usize = 10_000;

struct SessionEntry {
    presenter: Arc<Presenter>,
    last_seen: i64,
    /// Store-wide touch order; breaks ties within the same second.
    touched: u64,
    /// Set once a request comes back carrying the token.
    returned: bool,
}

/// Per-browser presenters keyed by a random session token.
pub struct SessionStore {
    capacity: usize,
    sessions: Mutex<Sessions>,
}

#[derive(Default)]
struct Sessions {
    entries: HashMap<String, SessionEntry>,
    clock: u64,
}

impl Sessions {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn touch(&mut self, token: &str, now: i64) -> Option<Arc<Presenter>> {
        let touched = self.tick();
        let entry = self.entries.get_mut(token)?;
        if now - entry.last_seen > SESSION_TTL_SECS {
            return None;
        }
        entry.last_seen = now;
        entry.touched = touched;
        entry.returned = true;
        Some(entry.presenter.clone())
    }

    /// Least recently used session, preferring ones whose token never came back.
    fn eviction_candidate(&self, keep: &str) -> Option<String> {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != keep)
            .min_by_key(|(_, s)| (s.returned, s.touched))
            .map(|(k, _)| k.clone())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_capacity(MAX_SESSIONS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            sessions: Mutex::new(Sessions::default()),
        }
    }

    /// Returns the presenter for a live session without creating one.
    pub async fn find(&self, token: Option<&str>) -> Option<Arc<Presenter>> {
        let token = token?;
        let now = Utc::now().timestamp();
        self.sessions.lock().await.touch(token, now)
    }

    /// Returns the caller's token and presenter, creating a session when the
    /// token is missing, unknown, or expired.
    pub async fn resolve(
        &self,
        token: Option<&str>,
        make: impl FnOnce() -> Presenter,
    ) -> (String, Arc<Presenter>) {
        let now = Utc::now().timestamp();
        let mut guard = self.sessions.lock().await;
        guard
            .entries
            .retain(|_, s| now - s.last_seen <= SESSION_TTL_SECS);

        if let Some(token) = token {
            if let Some(presenter) = guard.touch(token, now) {
                return (token.to_string(), presenter);
            }
        }

        let token = Uuid::new_v4().to_string();
        debug!("Starting new session");
        let presenter = Arc::new(make());
        let touched = guard.tick();
        guard.entries.insert(
            token.clone(),
            SessionEntry {
                presenter: presenter.clone(),
                last_seen: now,
                touched,
                returned: false,
            },
        );
        while guard.entries.len() > self.capacity {
            let Some(key) = guard.eviction_candidate(&token) else {
                break;
            };
            debug!("Session store full, evicting least recently used session");
            guard.entries.remove(&key);
        }
        (token, presenter)
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.entries.len()
    }
}
