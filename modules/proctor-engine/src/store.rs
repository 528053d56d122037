//! In-process stores for users and exam sessions.
//!
//! Each session sits behind its own mutex: events on the same session are
//! serialized, events on different sessions never contend beyond the brief
//! map lookup.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use proctor_common::{ExamSession, User};
use uuid::Uuid;

pub(crate) type SessionHandle = Arc<Mutex<ExamSession>>;

pub(crate) fn lock_session(handle: &SessionHandle) -> MutexGuard<'_, ExamSession> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, session: ExamSession) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.insert(session.id, Arc::new(Mutex::new(session)));
    }

    /// Snapshot of a session's current state.
    pub fn get(&self, id: Uuid) -> Option<ExamSession> {
        self.handle(id).map(|h| lock_session(&h).clone())
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The per-session critical section. Hold its lock for the whole of a
    /// read-modify-write.
    pub(crate) fn handle(&self, id: Uuid) -> Option<SessionHandle> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }
}

// ---------------------------------------------------------------------------
// UserStore
// ---------------------------------------------------------------------------

/// Users keyed by username.
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<HashMap<String, User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the user for `username`, creating it on first sight.
    /// The flag is true when the user was created by this call.
    pub fn find_or_create(&self, username: &str) -> (User, bool) {
        if let Some(user) = self
            .users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(username)
        {
            return (user.clone(), false);
        }

        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        let mut created = false;
        let user = users
            .entry(username.to_string())
            .or_insert_with(|| {
                created = true;
                User::new(username)
            })
            .clone();
        (user, created)
    }

    pub fn len(&self) -> usize {
        self.users.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn inserted_session_is_readable() {
        let store = SessionStore::new();
        let session = ExamSession::start("u1", "math-101");
        let id = session.id;
        store.insert(session.clone());
        assert!(store.contains(id));
        assert_eq!(store.get(id), Some(session));
    }

    #[test]
    fn missing_session_is_none() {
        let store = SessionStore::new();
        assert!(store.get(Uuid::new_v4()).is_none());
        assert!(store.handle(Uuid::new_v4()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn handle_writes_are_visible_to_get() {
        let store = SessionStore::new();
        let session = ExamSession::start("u1", "math-101");
        let id = session.id;
        store.insert(session);

        let handle = store.handle(id).unwrap();
        lock_session(&handle).warnings = 2;
        assert_eq!(store.get(id).unwrap().warnings, 2);
    }

    #[test]
    fn login_is_idempotent_per_username() {
        let users = UserStore::new();
        let (first, created_first) = users.find_or_create("alice");
        let (second, created_second) = users.find_or_create("alice");
        assert!(created_first);
        assert!(!created_second);
        assert_eq!(first.id, second.id);
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn different_usernames_get_different_users() {
        let users = UserStore::new();
        let (a, _) = users.find_or_create("alice");
        let (b, _) = users.find_or_create("bob");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn racing_logins_create_one_user() {
        let users = Arc::new(UserStore::new());
        let ids: Vec<Uuid> = (0..8)
            .map(|_| {
                let users = users.clone();
                thread::spawn(move || users.find_or_create("carol").0.id)
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect();

        assert!(ids.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(users.len(), 1);
    }
}
