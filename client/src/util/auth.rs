//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both guard components apply identical redirect behavior: navigate once the
//! guard decision says so, replacing the history entry so "back" does not
//! return to a page the user may not see.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use session::GuardDecision;

/// Path to navigate to for `decision`, if any.
pub fn redirect_target(decision: GuardDecision) -> Option<&'static str> {
    match decision {
        GuardDecision::Redirect(path) => Some(path),
        GuardDecision::Loading | GuardDecision::Render => None,
    }
}

/// Navigate whenever the guard decision turns into a redirect.
pub fn install_guard_redirect<F>(decision: Memo<GuardDecision>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(path) = redirect_target(decision.get()) {
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
