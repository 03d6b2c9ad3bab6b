//! Registration page: creates a new identity with the chosen role.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::components::A;
use session::{LOGIN_PATH, Role, SessionError};

use crate::state::auth::AuthContext;

const MISSING_FIELDS: &str = "Fill in name, email, and password.";
const INVALID_EMAIL: &str = "Enter a valid email address.";

/// Validated registration form values.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RegisterInput {
    pub name: String,
    pub email: String,
    pub secret: String,
}

/// Trim inputs, require every field, and require an `@` in the email.
pub(crate) fn validate_register_input(name: &str, email: &str, secret: &str) -> Result<RegisterInput, &'static str> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() || secret.is_empty() {
        return Err(MISSING_FIELDS);
    }
    if !email.contains('@') {
        return Err(INVALID_EMAIL);
    }
    Ok(RegisterInput { name: name.to_owned(), email: email.to_owned(), secret: secret.to_owned() })
}

pub(crate) fn register_error_message(err: &SessionError) -> &'static str {
    match err {
        SessionError::MissingField(_) => MISSING_FIELDS,
        SessionError::Busy => "Another sign-in is in progress.",
        SessionError::InvalidCredentials | SessionError::PersistenceFailure(_) | SessionError::Superseded => {
            "Could not create your account. Please try again."
        }
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let secret = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Therapist);
    let info = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let input = match validate_register_input(&name.get_untracked(), &email.get_untracked(), &secret.get_untracked())
        {
            Ok(input) => input,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        match auth.register(&input.name, &input.email, &input.secret, role.get_untracked()) {
            Ok(_) => info.set(String::new()),
            Err(e) => info.set(register_error_message(&e).to_owned()),
        }
    };

    let role_options = Role::ALL
        .into_iter()
        .map(|r| view! { <option value=r.as_str()>{r.label()}</option> })
        .collect_view();

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create your CareBridge account"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Full name"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
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
                    <select
                        class="login-input"
                        prop:value=move || role.get().as_str()
                        on:change=move |ev| {
                            if let Ok(selected) = event_target_value(&ev).parse::<Role>() {
                                role.set(selected);
                            }
                        }
                    >
                        {role_options}
                    </select>
                    <button class="login-button" type="submit">"Create Account"</button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-card__footer">
                    "Already registered? " <A href=LOGIN_PATH>"Sign in"</A>
                </p>
            </div>
        </div>
    }
}
