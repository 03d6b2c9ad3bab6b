//! Login page: email + secret against the demo directory.
//!
//! The secret is collected but never checked. Success needs no explicit
//! navigation: the surrounding `RouteGuard` redirects to the dashboard
//! as soon as the session mirror shows an identity.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use leptos_router::components::A;
use session::{REGISTER_PATH, SessionError};

use crate::net::directory::DemoDirectory;
use crate::state::auth::AuthContext;

const MISSING_FIELDS: &str = "Enter both email and password.";

/// Trim inputs and require both fields.
pub(crate) fn validate_login_input(email: &str, secret: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || secret.is_empty() {
        return Err(MISSING_FIELDS);
    }
    Ok((email.to_owned(), secret.to_owned()))
}

/// User-facing text for a failed login. Unknown email and wrong secret are
/// deliberately indistinguishable.
pub(crate) fn login_error_message(err: &SessionError) -> &'static str {
    match err {
        SessionError::InvalidCredentials => "Invalid email or password.",
        SessionError::Busy => "Sign-in already in progress.",
        SessionError::MissingField(_) => MISSING_FIELDS,
        SessionError::PersistenceFailure(_) | SessionError::Superseded => "Something went wrong. Please try again.",
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let email = RwSignal::new(String::new());
    let secret = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // A login resolving after this page unmounted must not touch its signals.
    let alive = Arc::new(AtomicBool::new(true));
    let alive_cleanup = alive.clone();
    on_cleanup(move || alive_cleanup.store(false, Ordering::Relaxed));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (email_value, secret_value) = match validate_login_input(&email.get_untracked(), &secret.get_untracked()) {
            Ok(values) => values,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        let auth = auth.clone();
        let alive = alive.clone();
        leptos::task::spawn_local(async move {
            let result = auth.login(&email_value, &secret_value).await;
            if !alive.load(Ordering::Relaxed) {
                return;
            }
            busy.set(false);
            match result {
                Ok(_) => info.set(String::new()),
                Err(e) => info.set(login_error_message(&e).to_owned()),
            }
        });
    };

    let demo_accounts = DemoDirectory::new()
        .accounts()
        .iter()
        .map(|account| {
            let label = format!("{} ({})", account.email, account.role.label());
            view! { <li>{label}</li> }
        })
        .collect_view();

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"CareBridge"</h1>
                <p class="login-card__subtitle">"Sign in to coordinate care"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || secret.get()
                        on:input=move |ev| secret.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <p class="login-card__subtitle">"Demo accounts (any password)"</p>
                <ul class="login-demo-accounts">{demo_accounts}</ul>
                <p class="login-card__footer">
                    "New here? " <A href=REGISTER_PATH>"Create an account"</A>
                </p>
            </div>
        </div>
    }
}
