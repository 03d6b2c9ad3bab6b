//! Route guard decision.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guard components call [`decide`] on every render with the latest session
//! snapshot. Until the store has initialized the answer is always
//! [`GuardDecision::Loading`], so a reload never flashes a redirect before the
//! stored identity is restored. The guard does not look at roles.

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

use crate::routes::{Access, DASHBOARD_PATH, LOGIN_PATH};
use crate::store::SessionState;

/// What a guard should do for the current navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show a neutral placeholder; neither content nor redirect.
    Loading,
    /// Render the guarded content unchanged.
    Render,
    /// Navigate to the given path. The attempted destination is dropped.
    Redirect(&'static str),
}

/// Decide what to do for a path with rule `access`.
#[must_use]
pub fn decide(state: &SessionState, access: Access) -> GuardDecision {
    match GuardPhase::Uninitialized.advance(state) {
        GuardPhase::Uninitialized | GuardPhase::Checking => GuardDecision::Loading,
        GuardPhase::Allowed => match access {
            Access::Authenticated => GuardDecision::Render,
            Access::Unauthenticated => GuardDecision::Redirect(DASHBOARD_PATH),
        },
        GuardPhase::Denied => match access {
            Access::Authenticated => GuardDecision::Redirect(LOGIN_PATH),
            Access::Unauthenticated => GuardDecision::Render,
        },
    }
}

/// Per-attempt guard state machine.
///
/// `Uninitialized -> Checking` once the store has initialized, then
/// `Checking -> Allowed | Denied` on identity presence. `Allowed` and
/// `Denied` are terminal for the attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardPhase {
    Uninitialized,
    Checking,
    Allowed,
    Denied,
}

impl GuardPhase {
    /// Take one step given the current session snapshot.
    #[must_use]
    pub fn step(self, state: &SessionState) -> Self {
        match self {
            Self::Uninitialized if state.initialized => Self::Checking,
            Self::Checking if state.is_authenticated() => Self::Allowed,
            Self::Checking => Self::Denied,
            other => other,
        }
    }

    /// Step until the phase stops changing.
    #[must_use]
    pub fn advance(self, state: &SessionState) -> Self {
        let mut phase = self;
        while !phase.is_terminal() {
            let next = phase.step(state);
            if next == phase {
                break;
            }
            phase = next;
        }
        phase
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Allowed | Self::Denied)
    }
}
