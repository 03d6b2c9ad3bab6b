//! Auth-session context for the current browser tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login
//! redirects and identity-dependent rendering. The `SessionStore` stays the
//! source of truth; `state` is a reactive mirror refreshed after every
//! operation so guards re-evaluate on the next render.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use leptos::prelude::*;
use session::{Identity, Role, SessionError, SessionState, SessionStore};

/// Session handle provided via context. Cheap to clone.
#[derive(Clone)]
pub struct AuthContext {
    store: Arc<SessionStore>,
    state: RwSignal<SessionState>,
}

impl AuthContext {
    pub fn new(store: Arc<SessionStore>) -> Self {
        let state = RwSignal::new(store.state());
        Self { store, state }
    }

    /// Reactive session snapshot.
    pub fn state(&self) -> RwSignal<SessionState> {
        self.state
    }

    /// Restore the stored session. Called once after hydration.
    pub fn initialize(&self) {
        self.state.set(self.store.initialize());
    }

    /// # Errors
    ///
    /// Propagates [`SessionStore::login`] failures.
    pub async fn login(&self, email: &str, secret: &str) -> Result<Identity, SessionError> {
        self.state.update(|s| s.in_flight = true);
        let result = self.store.login(email, secret).await;
        self.refresh();
        result
    }

    /// # Errors
    ///
    /// Propagates [`SessionStore::register`] failures.
    pub fn register(&self, name: &str, email: &str, secret: &str, role: Role) -> Result<Identity, SessionError> {
        let result = self.store.register(name, email, secret, role);
        self.refresh();
        result
    }

    pub fn logout(&self) {
        self.store.logout();
        self.refresh();
    }

    fn refresh(&self) {
        self.state.set(self.store.state());
    }
}
