//! Process-wide session store: who is logged in, and whether a login is in
//! flight.
//!
//! ARCHITECTURE
//! ============
//! One `SessionStore` exists per process. It is built once at startup by
//! `SessionStore::restore`, which rehydrates the persisted identity, and is
//! then shared by handle (`SessionHandle`) with everything that needs it.
//! State lives in a `tokio::sync::watch` channel so readers get cheap
//! snapshots and observers are woken on every transition.
//!
//! State machine:
//!
//! ```text
//! Anonymous --login ok--> Authenticated(identity) --logout--> Anonymous
//! Anonymous --login failed--> Anonymous
//! ```
//!
//! TRADE-OFFS
//! ==========
//! `login` does not serialize concurrent calls; `try_login` refuses to start
//! while another login is in flight, checking and raising busy in one update.
//! Busy is tracked as an in-flight count so that overlapping `login` calls
//! still keep the flag raised until the last one resolves. `logout` is a no-op
//! while busy.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

use super::auth::{AuthError, Authenticator, Credentials};
use super::identity::{Identity, Role};
use super::storage::{KeyValueStorage, StorageError};

/// Storage key of the persisted identity record.
pub const SESSION_STORAGE_KEY: &str = "cloudcycle_user";

/// Shared handle to the single session store.
pub type SessionHandle = Arc<SessionStore>;

// =============================================================================
// STATE
// =============================================================================

/// Authentication state of the process.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", content = "identity", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(Identity),
}

impl SessionState {
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(identity) => Some(identity),
        }
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.identity().map(|identity| identity.role)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Point-in-time view of the session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    /// True while at least one login call is unresolved.
    pub busy: bool,
    #[serde(skip)]
    in_flight: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("email and password are required")]
    MissingCredentials,
    #[error("a login is already in progress")]
    Busy,
    #[error("login failed: {0}")]
    Failed(#[from] AuthError),
    #[error("failed to encode session record: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to persist session: {0}")]
    Persist(#[from] StorageError),
}

// =============================================================================
// BUSY GUARD
// =============================================================================

/// Raises the busy flag on creation and lowers it when resolved or dropped,
/// so a cancelled login future cannot leave the flag stuck.
struct BusyGuard<'a> {
    tx: &'a watch::Sender<SessionSnapshot>,
    resolved: bool,
}

impl<'a> BusyGuard<'a> {
    fn enter(tx: &'a watch::Sender<SessionSnapshot>) -> Self {
        tx.send_modify(|snap| {
            snap.in_flight += 1;
            snap.busy = true;
        });
        Self { tx, resolved: false }
    }

    /// Raise the flag only if no other login is in flight.
    fn try_enter(tx: &'a watch::Sender<SessionSnapshot>) -> Option<Self> {
        let entered = tx.send_if_modified(|snap| {
            if snap.in_flight > 0 {
                return false;
            }
            snap.in_flight = 1;
            snap.busy = true;
            true
        });
        entered.then_some(Self { tx, resolved: false })
    }

    /// Lower the flag, installing `state` in the same update when given.
    fn resolve(mut self, state: Option<SessionState>) {
        self.resolved = true;
        self.tx.send_modify(|snap| {
            if let Some(state) = state {
                snap.state = state;
            }
            leave(snap);
        });
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            self.tx.send_modify(leave);
        }
    }
}

fn leave(snap: &mut SessionSnapshot) {
    snap.in_flight = snap.in_flight.saturating_sub(1);
    snap.busy = snap.in_flight > 0;
}

// =============================================================================
// SESSION STORE
// =============================================================================

pub struct SessionStore {
    tx: watch::Sender<SessionSnapshot>,
    storage: Arc<dyn KeyValueStorage>,
    authenticator: Arc<dyn Authenticator>,
}

impl SessionStore {
    /// Build the store, rehydrating any persisted identity.
    ///
    /// A missing, unreadable, or malformed record yields `Anonymous`.
    pub fn restore(storage: Arc<dyn KeyValueStorage>, authenticator: Arc<dyn Authenticator>) -> Self {
        let state = read_persisted(storage.as_ref());
        match &state {
            SessionState::Authenticated(identity) => {
                info!(id = %identity.id, role = %identity.role, "session restored");
            }
            SessionState::Anonymous => info!("no persisted session"),
        }
        let (tx, _rx) = watch::channel(SessionSnapshot { state, busy: false, in_flight: 0 });
        Self { tx, storage, authenticator }
    }

    /// Wrap in a shareable handle.
    #[must_use]
    pub fn into_handle(self) -> SessionHandle {
        Arc::new(self)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.tx.borrow().state.clone()
    }

    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.tx.borrow().state.identity().cloned()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.tx.borrow().busy
    }

    /// Observe every transition, including busy changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    /// Authenticate and install a new identity.
    ///
    /// The busy flag is raised for the whole call. On success the identity is
    /// persisted and installed; on any error neither the current state nor
    /// the persisted record changes.
    ///
    /// # Errors
    ///
    /// `MissingCredentials` when email or password is blank (busy is never
    /// raised), `Failed` when the authenticator rejects, and `Encode` /
    /// `Persist` when the record cannot be written.
    pub async fn login(&self, email: &str, password: &str, role: Role) -> Result<Identity, LoginError> {
        let credentials = credentials(email, password, role)?;
        self.authenticate(BusyGuard::enter(&self.tx), credentials).await
    }

    /// Like `login`, but refuses to start while another login is in flight.
    ///
    /// # Errors
    ///
    /// `Busy` when a login is already running (nothing changes), otherwise
    /// the same errors as `login`.
    pub async fn try_login(&self, email: &str, password: &str, role: Role) -> Result<Identity, LoginError> {
        let credentials = credentials(email, password, role)?;
        let busy = BusyGuard::try_enter(&self.tx).ok_or(LoginError::Busy)?;
        self.authenticate(busy, credentials).await
    }

    async fn authenticate(&self, busy: BusyGuard<'_>, credentials: Credentials) -> Result<Identity, LoginError> {
        let role = credentials.role;
        info!(%role, "login started");

        let identity = match self.authenticator.authenticate(&credentials).await {
            Ok(identity) => identity,
            Err(e) => {
                warn!(%role, error = %e, "login rejected");
                busy.resolve(None);
                return Err(e.into());
            }
        };

        if let Err(e) = self.persist(&identity) {
            warn!(%role, error = %e, "login aborted: session record not saved");
            busy.resolve(None);
            return Err(e);
        }

        info!(id = %identity.id, role = %identity.role, "login succeeded");
        busy.resolve(Some(SessionState::Authenticated(identity.clone())));
        Ok(identity)
    }

    /// Drop the current identity and its persisted record.
    ///
    /// While a login is in flight this is a no-op: the only transition allowed
    /// then is that login's completion. The record is removed inside the
    /// channel update, so a login starting afterwards persists after removal.
    pub fn logout(&self) {
        let mut previous = None;
        self.tx.send_if_modified(|snap| {
            if snap.in_flight > 0 {
                return false;
            }
            if let Err(e) = self.storage.remove(SESSION_STORAGE_KEY) {
                warn!(error = %e, "failed to remove persisted session");
            }
            previous = Some(std::mem::take(&mut snap.state));
            true
        });
        match previous {
            None => warn!("logout ignored: login in progress"),
            Some(SessionState::Authenticated(identity)) => {
                info!(id = %identity.id, role = %identity.role, "logged out");
            }
            Some(SessionState::Anonymous) => {}
        }
    }

    fn persist(&self, identity: &Identity) -> Result<(), LoginError> {
        let record = identity.to_json()?;
        self.storage.set(SESSION_STORAGE_KEY, &record)?;
        Ok(())
    }
}

/// Blank email or password never reaches the authenticator.
fn credentials(email: &str, password: &str, role: Role) -> Result<Credentials, LoginError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(LoginError::MissingCredentials);
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned(), role })
}

/// Read and parse the persisted record; every failure degrades to `Anonymous`.
fn read_persisted(storage: &dyn KeyValueStorage) -> SessionState {
    let raw = match storage.get(SESSION_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return SessionState::Anonymous,
        Err(e) => {
            warn!(error = %e, "failed to read persisted session");
            return SessionState::Anonymous;
        }
    };
    match Identity::from_json(&raw) {
        Ok(identity) => SessionState::Authenticated(identity),
        Err(e) => {
            warn!(error = %e, "ignoring malformed persisted session");
            SessionState::Anonymous
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
