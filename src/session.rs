use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, SystemTime};
use uuid::Uuid;

use crate::evaluation::EvaluationTable;

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "session";

/// Default idle lifetime of a session (24 hours)
pub const SESSION_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

/// The three screens of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Landing,
    TrackDetail,
    StudentDetail,
}

impl Screen {
    /// Screens that cannot render without a table and a selected track
    pub fn needs_track(self) -> bool {
        matches!(self, Screen::TrackDetail | Screen::StudentDetail)
    }
}

/// Everything one browser session knows
///
/// The table is shared behind an `Arc` so transitions can clone the state
/// freely; screens only ever derive filtered views from it.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub current_screen: Screen,
    pub table: Option<Arc<EvaluationTable>>,
    pub selected_track: Option<String>,
    pub selected_student: Option<String>,
    /// Message from the last rejected action, shown on the next page view only
    pub notice: Option<String>,
}

/// JSON view of a session for `/api/state`
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub screen: Screen,
    pub selected_track: Option<String>,
    pub selected_student: Option<String>,
    pub source: Option<String>,
    pub record_count: usize,
    pub tracks: Vec<String>,
    pub notice: Option<String>,
}

impl SessionState {
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            screen: self.current_screen,
            selected_track: self.selected_track.clone(),
            selected_student: self.selected_student.clone(),
            source: self.table.as_ref().map(|t| t.source.clone()),
            record_count: self.table.as_ref().map_or(0, |t| t.len()),
            tracks: self
                .table
                .as_ref()
                .map(|t| t.tracks().into_iter().map(str::to_string).collect())
                .unwrap_or_default(),
            notice: self.notice.clone(),
        }
    }
}

#[derive(Debug)]
struct Entry {
    state: SessionState,
    expires_at: SystemTime,
}

/// Per-browser session storage
///
/// Stores all live sessions in a thread-safe map keyed by the id from the
/// session cookie. Each write pushes the expiry forward by the TTL.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Entry>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SESSION_DURATION)
    }
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Create a new session with default state
    ///
    /// # Returns
    /// * `String` - A unique session id
    pub fn create(&self) -> String {
        let session_id = Uuid::new_v4().to_string();
        let now = SystemTime::now();

        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.retain(|_, entry| entry.expires_at > now);
        sessions.insert(
            session_id.clone(),
            Entry {
                state: SessionState::default(),
                expires_at: now + self.ttl,
            },
        );

        log::debug!("created session {} ({} live)", session_id, sessions.len());
        session_id
    }

    /// Whether the id names a session that exists and has not expired
    pub fn is_live(&self, session_id: &str) -> bool {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions
            .get(session_id)
            .is_some_and(|entry| entry.expires_at > SystemTime::now())
    }

    /// Current state of a session; unknown or expired ids read as a fresh session.
    pub fn get(&self, session_id: &str) -> SessionState {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        match sessions.get(session_id) {
            Some(entry) if entry.expires_at > SystemTime::now() => entry.state.clone(),
            _ => SessionState::default(),
        }
    }

    /// Replace a session's state
    pub fn set(&self, session_id: &str, state: SessionState) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.insert(
            session_id.to_string(),
            Entry {
                state,
                expires_at: SystemTime::now() + self.ttl,
            },
        );
    }

    /// Read-modify-write a session under one lock
    ///
    /// # Returns
    /// * `SessionState` - The state after `f` was applied
    pub fn update<F>(&self, session_id: &str, f: F) -> SessionState
    where
        F: FnOnce(SessionState) -> SessionState,
    {
        let now = SystemTime::now();
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let current = match sessions.remove(session_id) {
            Some(entry) if entry.expires_at > now => entry.state,
            _ => SessionState::default(),
        };

        let next = f(current);
        sessions.insert(
            session_id.to_string(),
            Entry {
                state: next.clone(),
                expires_at: now + self.ttl,
            },
        );
        next
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
