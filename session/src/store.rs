//! Session store: the single source of truth for "who is logged in".
//!
//! ARCHITECTURE
//! ============
//! `SessionStore` is constructed once at app start with two injected
//! collaborators (an [`IdentityDirectory`] for login lookups and a
//! [`SessionStorage`] for the durable record) and handed to whoever needs it.
//! Readers take cloned [`SessionState`] snapshots; only the store mutates.
//!
//! CONCURRENCY
//! ===========
//! `login` and `register` share a single in-flight slot: a second call while
//! one is outstanding fails with [`SessionError::Busy`]. `logout` never waits
//! on the slot. It bumps an epoch instead, and a login that resolves after an
//! intervening logout is dropped with [`SessionError::Superseded`].

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockWriteGuard};

use crate::directory::IdentityDirectory;
use crate::identity::{Identity, Role};
use crate::storage::{SessionStorage, StorageError};

/// Storage key of the durable identity record.
pub const SESSION_RECORD_KEY: &str = "carebridge.identity";

// =============================================================================
// ERRORS
// =============================================================================

/// Failures surfaced to callers of [`SessionStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// No identity is registered for the supplied email.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The identity was set in memory but the durable write failed.
    #[error("failed to persist session: {0}")]
    PersistenceFailure(#[from] StorageError),
    /// A registration field that must be non-blank was blank.
    #[error("{0} is required")]
    MissingField(&'static str),
    /// Another login/register call has not resolved yet.
    #[error("another session operation is already in progress")]
    Busy,
    /// A logout happened while this operation was pending.
    #[error("session changed while the operation was pending")]
    Superseded,
}

/// Why a stored record could not be turned back into an [`Identity`].
#[derive(Debug, thiserror::Error)]
pub(crate) enum RecordError {
    #[error("malformed stored identity: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("stored identity has an empty {0}")]
    EmptyField(&'static str),
}

pub(crate) fn decode_record(raw: &str) -> Result<Identity, RecordError> {
    let identity: Identity = serde_json::from_str(raw)?;
    match identity.blank_field() {
        Some(field) => Err(RecordError::EmptyField(field)),
        None => Ok(identity),
    }
}

fn encode_record(identity: &Identity) -> Result<String, StorageError> {
    serde_json::to_string(identity).map_err(|e| StorageError::Write(e.to_string()))
}

// =============================================================================
// STATE
// =============================================================================

/// Snapshot of the session as seen by guards and components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    /// Current identity; `None` means unauthenticated.
    pub identity: Option<Identity>,
    /// Whether [`SessionStore::initialize`] has resolved.
    pub initialized: bool,
    /// Whether a session operation is outstanding.
    pub in_flight: bool,
}

impl Default for SessionState {
    /// The pre-initialization state: no identity, still loading.
    fn default() -> Self {
        Self { identity: None, initialized: false, in_flight: true }
    }
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|identity| identity.role)
    }
}

// =============================================================================
// STORE
// =============================================================================

pub struct SessionStore {
    directory: Arc<dyn IdentityDirectory>,
    storage: Arc<dyn SessionStorage>,
    state: RwLock<SessionState>,
    busy: AtomicBool,
    epoch: AtomicU64,
}

/// Holds the in-flight slot; releases it on drop, including early returns.
struct InFlight<'a> {
    store: &'a SessionStore,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.store.write_state().in_flight = false;
        self.store.busy.store(false, Ordering::SeqCst);
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(directory: Arc<dyn IdentityDirectory>, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            directory,
            storage,
            state: RwLock::new(SessionState::default()),
            busy: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
        }
    }

    /// Current session snapshot.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.state().identity
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn acquire(&self) -> Result<InFlight<'_>, SessionError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("session operation rejected: another is in flight");
            return Err(SessionError::Busy);
        }
        self.write_state().in_flight = true;
        Ok(InFlight { store: self })
    }

    /// Restore the session from durable storage.
    ///
    /// Missing, unreadable, or malformed records all yield an unauthenticated
    /// session; malformed records are also deleted. Never fails.
    pub fn initialize(&self) -> SessionState {
        let identity = match self.storage.load(SESSION_RECORD_KEY) {
            Ok(Some(raw)) => match decode_record(&raw) {
                Ok(identity) => Some(identity),
                Err(e) => {
                    tracing::warn!(error = %e, "discarding stored identity");
                    if let Err(e) = self.storage.remove(SESSION_RECORD_KEY) {
                        tracing::warn!(error = %e, "failed to remove discarded identity");
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "session storage unreadable; starting unauthenticated");
                None
            }
        };

        let mut state = self.write_state();
        if let Some(identity) = &identity {
            tracing::info!(user_id = %identity.id, role = %identity.role, "session restored");
        }
        state.identity = identity;
        state.initialized = true;
        state.in_flight = self.busy.load(Ordering::SeqCst);
        state.clone()
    }

    /// Log in as the directory entry for `email`.
    ///
    /// The secret is accepted but not verified: the directory lookup is the
    /// only check. On an unknown email the previous identity is left in place
    /// and storage is not touched.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Busy`] if another login/register is pending.
    /// - [`SessionError::InvalidCredentials`] if the directory has no match.
    /// - [`SessionError::Superseded`] if `logout` ran while the lookup was pending.
    /// - [`SessionError::PersistenceFailure`] if the durable write failed; the
    ///   in-memory identity stays set.
    pub async fn login(&self, email: &str, _secret: &str) -> Result<Identity, SessionError> {
        let _slot = self.acquire()?;
        let epoch = self.epoch.load(Ordering::SeqCst);

        let email = email.trim();
        let Some(identity) = self.directory.resolve(email).await else {
            tracing::info!(email, "login rejected: unknown email");
            return Err(SessionError::InvalidCredentials);
        };

        self.commit(identity, epoch)
    }

    /// Create and sign in a brand-new identity.
    ///
    /// No uniqueness check is made against existing emails; every call yields
    /// a fresh id.
    ///
    /// # Errors
    ///
    /// - [`SessionError::MissingField`] if the name or email is blank; nothing
    ///   changes.
    /// - [`SessionError::Busy`] if a login is pending.
    /// - [`SessionError::PersistenceFailure`] if the durable write failed; the
    ///   in-memory identity stays set.
    pub fn register(&self, name: &str, email: &str, _secret: &str, role: Role) -> Result<Identity, SessionError> {
        let identity = Identity::new(name.trim(), email.trim(), role);
        if let Some(field) = identity.blank_field() {
            return Err(SessionError::MissingField(field));
        }

        let _slot = self.acquire()?;
        let epoch = self.epoch.load(Ordering::SeqCst);
        tracing::info!(user_id = %identity.id, role = %role, "registered new identity");
        self.commit(identity, epoch)
    }

    fn commit(&self, identity: Identity, epoch: u64) -> Result<Identity, SessionError> {
        {
            let mut state = self.write_state();
            if self.epoch.load(Ordering::SeqCst) != epoch {
                tracing::info!(user_id = %identity.id, "discarding sign-in superseded by logout");
                return Err(SessionError::Superseded);
            }
            state.identity = Some(identity.clone());
        }

        encode_record(&identity)
            .and_then(|raw| self.storage.save(SESSION_RECORD_KEY, &raw))
            .map_err(|e| {
                tracing::warn!(error = %e, user_id = %identity.id, "session not persisted");
                SessionError::PersistenceFailure(e)
            })?;

        tracing::info!(user_id = %identity.id, role = %identity.role, "session started");
        Ok(identity)
    }

    /// Clear the identity and its durable record. Idempotent.
    pub fn logout(&self) {
        {
            let mut state = self.write_state();
            self.epoch.fetch_add(1, Ordering::SeqCst);
            if let Some(previous) = state.identity.take() {
                tracing::info!(user_id = %previous.id, "logged out");
            }
        }
        if let Err(e) = self.storage.remove(SESSION_RECORD_KEY) {
            tracing::warn!(error = %e, "failed to remove stored identity");
        }
    }
}
