//! Login-time identity lookup.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store never checks credentials itself; it asks an
//! `IdentityDirectory` to resolve an email. The shipped `StaticDirectory` is a
//! fixed demo roster and is not a security boundary. A real credential
//! service plugs in behind the same trait.

#[cfg(test)]
#[path = "directory_test.rs"]
mod tests;

use crate::identity::{Identity, Role};

/// Resolves an email to a known identity.
///
/// Futures are `?Send` so browser implementations can await JS timers.
#[async_trait::async_trait(?Send)]
pub trait IdentityDirectory: Send + Sync {
    /// Look up `email`. Returns `None` when no identity is registered for it.
    async fn resolve(&self, email: &str) -> Option<Identity>;
}

/// Fixed in-memory roster keyed by email (case-insensitive).
#[derive(Clone, Debug, Default)]
pub struct StaticDirectory {
    entries: Vec<Identity>,
}

impl StaticDirectory {
    #[must_use]
    pub fn new(entries: Vec<Identity>) -> Self {
        Self { entries }
    }

    /// One account per role, used by the demo build.
    #[must_use]
    pub fn demo() -> Self {
        let entry = |id: &str, name: &str, email: &str, role: Role| Identity {
            id: id.to_owned(),
            name: name.to_owned(),
            email: email.to_owned(),
            role,
            avatar: None,
        };
        Self::new(vec![
            entry("1", "Dr. Sarah Chen", "therapist@carebridge.dev", Role::Therapist),
            entry("2", "Michael Rivera", "caregiver@carebridge.dev", Role::Caregiver),
            entry("3", "Emily Johnson", "teacher@carebridge.dev", Role::Teacher),
            entry("4", "David Okafor", "hr@carebridge.dev", Role::Hr),
            entry("5", "Priya Patel", "admin@carebridge.dev", Role::Admin),
        ])
    }

    #[must_use]
    pub fn entries(&self) -> &[Identity] {
        &self.entries
    }

    /// Synchronous lookup backing [`IdentityDirectory::resolve`].
    #[must_use]
    pub fn find(&self, email: &str) -> Option<&Identity> {
        let email = email.trim();
        self.entries.iter().find(|e| e.email.eq_ignore_ascii_case(email))
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityDirectory for StaticDirectory {
    async fn resolve(&self, email: &str) -> Option<Identity> {
        self.find(email).cloned()
    }
}
