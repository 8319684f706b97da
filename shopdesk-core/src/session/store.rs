//! Session store and its state machine
//!
//! The store is the single owner of the current session. Every transition
//! replaces the session wholesale, persists the result, and then notifies
//! listeners in the order they subscribed.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::model::Session;
use super::storage::{KeyValueStorage, MemoryStorage};
use crate::error::SessionError;

/// Storage key of the persisted session record
pub const DEFAULT_STORAGE_KEY: &str = "currentUser";

/// Authentication state of the store
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    /// No session
    #[default]
    Anonymous,
    /// A complete session is present
    Authenticated(Arc<Session>),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Arc<Session>> {
        match self {
            AuthState::Authenticated(session) => Some(session),
            AuthState::Anonymous => None,
        }
    }
}

/// A state transition, delivered to listeners after it is applied
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A login replaced the session
    LoggedIn(Arc<Session>),
    /// The persisted record was loaded
    Restored(Arc<Session>),
    /// Explicit logout
    LoggedOut,
    /// The backend rejected the credential (HTTP 401)
    Rejected,
    /// A restore found no usable record while a session was active
    Discarded,
}

impl SessionEvent {
    /// State the store is in once this event has been applied
    pub fn state(&self) -> AuthState {
        match self {
            SessionEvent::LoggedIn(session) | SessionEvent::Restored(session) => {
                AuthState::Authenticated(Arc::clone(session))
            }
            SessionEvent::LoggedOut | SessionEvent::Rejected | SessionEvent::Discarded => {
                AuthState::Anonymous
            }
        }
    }
}

type Listener = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Handle for a registered listener; dropping it unsubscribes
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            let mut listeners = listeners.lock().unwrap_or_else(PoisonError::into_inner);
            listeners.entries.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Single source of truth for who is logged in
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    storage_key: String,
    state: watch::Sender<AuthState>,
    listeners: Arc<Mutex<Listeners>>,
}

impl SessionStore {
    /// Create an anonymous store backed by `storage`.
    ///
    /// Call [`restore`](Self::restore) to pick up a persisted session.
    pub fn new(storage: Arc<dyn KeyValueStorage>, storage_key: impl Into<String>) -> Self {
        let (state, _) = watch::channel(AuthState::Anonymous);
        Self {
            storage,
            storage_key: storage_key.into(),
            state,
            listeners: Arc::new(Mutex::new(Listeners::default())),
        }
    }

    /// Create a store over fresh in-memory storage
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()), DEFAULT_STORAGE_KEY)
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Load the persisted session.
    ///
    /// A missing, unreadable, or malformed record leaves the store
    /// anonymous; the failure is logged and never returned.
    pub async fn restore(&self) -> AuthState {
        let raw = match self.storage.get(&self.storage_key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted session, continuing logged out");
                None
            }
        };

        let restored = raw.and_then(|raw| match Session::from_json(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable persisted session");
                None
            }
        });

        match restored {
            Some(session) => {
                let session = Arc::new(session);
                debug!(user = %session.identity().display_name(), "Restored session");
                self.transition(SessionEvent::Restored(session));
            }
            None if self.is_authenticated() => {
                self.transition(SessionEvent::Discarded);
            }
            None => debug!("No persisted session"),
        }

        self.state()
    }

    /// Replace the session wholesale, persist it, and notify listeners.
    ///
    /// The in-memory session is replaced even if persisting fails; the
    /// storage error is returned after listeners have been notified.
    pub async fn set_session(&self, session: Session) -> Result<Arc<Session>, SessionError> {
        let session = Arc::new(session);
        let persisted = match session.to_json() {
            Ok(json) => self.storage.set(&self.storage_key, json).await,
            Err(e) => Err(e),
        };
        if let Err(e) = &persisted {
            warn!(error = %e, "Failed to persist session");
        }

        info!(user = %session.identity().display_name(), "Session established");
        self.transition(SessionEvent::LoggedIn(Arc::clone(&session)));
        persisted.map(|_| session)
    }

    /// End the session after an explicit logout
    pub async fn clear(&self) -> Result<(), SessionError> {
        self.end(SessionEvent::LoggedOut).await
    }

    /// End the session because the backend rejected its credential
    pub async fn reject(&self) -> Result<(), SessionError> {
        self.end(SessionEvent::Rejected).await
    }

    async fn end(&self, event: SessionEvent) -> Result<(), SessionError> {
        let removed = self.storage.remove(&self.storage_key).await;
        if let Err(e) = &removed {
            warn!(error = %e, "Failed to remove persisted session");
        }

        info!(reason = ?event, "Session ended");
        self.transition(event);
        removed
    }

    /// True iff a session is present
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Synchronous snapshot of the current session
    pub fn current(&self) -> Option<Arc<Session>> {
        self.state.borrow().session().cloned()
    }

    /// Synchronous snapshot of the current state
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every future state, for async consumers
    pub fn watch(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Register a listener for future transitions.
    ///
    /// Listeners run synchronously, in subscription order, after the new
    /// state is visible through [`current`](Self::current).
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));
        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    fn transition(&self, event: SessionEvent) {
        self.state.send_replace(event.state());

        // Snapshot so listeners may call back into the store
        let listeners: Vec<Listener> = {
            let listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
            listeners
                .entries
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect()
        };
        for listener in listeners {
            listener(&event);
        }
    }
}
