//! Route guard component.
//!
//! SYSTEM CONTEXT
//! ==============
//! `RouteGuard` wraps every route, the not-found fallback included. The rule
//! for the current path comes from the shared [`RouteTable`], so login and
//! register are public-only and everything else, unknown paths too, needs a
//! session. The guard only reads the session: it renders a neutral
//! placeholder while the store is initializing or a redirect is pending.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use session::{Access, GuardDecision, RouteTable, decide};

use crate::state::auth::AuthContext;
use crate::util::auth::install_guard_redirect;

/// Access rule for a router pathname.
pub(crate) fn access_for(path: &str) -> Access {
    RouteTable::default().access(path)
}

/// Render `children` only when the session satisfies the current path's rule.
#[component]
pub fn RouteGuard(children: ChildrenFn) -> impl IntoView {
    let state = expect_context::<AuthContext>().state();
    let pathname = use_location().pathname;
    let decision = Memo::new(move |_| decide(&state.get(), access_for(&pathname.get())));
    install_guard_redirect(decision, use_navigate());

    move || match decision.get() {
        GuardDecision::Render => children().into_any(),
        GuardDecision::Loading | GuardDecision::Redirect(_) => view! {
            <div class="guard-placeholder" aria-busy="true">
                <span class="guard-placeholder__spinner"></span>
            </div>
        }
        .into_any(),
    }
}
