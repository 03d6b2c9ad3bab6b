//! Dashboard page: role-specific widgets and the sign-out control.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It only renders inside
//! `RouteGuard`, so an identity is normally present; signing out clears
//! the session and the guard takes the user back to login.

use leptos::prelude::*;

use crate::components::nav_menu::NavMenu;
use crate::state::auth::AuthContext;
use crate::util::nav::dashboard_widgets;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let state = auth.state();

    let greeting = move || {
        state
            .get()
            .identity
            .map(|identity| format!("Welcome back, {}", identity.name))
            .unwrap_or_default()
    };
    let role_label = move || state.get().role().map(|role| role.label()).unwrap_or_default();
    let initial = move || state.get().identity.map(|identity| identity.initial()).unwrap_or_default();
    let widgets = move || {
        state
            .get()
            .role()
            .map(dashboard_widgets)
            .unwrap_or_default()
            .iter()
            .map(|title| {
                view! {
                    <section class="dashboard-widget">
                        <h3>{*title}</h3>
                    </section>
                }
            })
            .collect_view()
    };

    let on_logout = move |_: leptos::ev::MouseEvent| auth.logout();

    view! {
        <div class="dashboard-page">
            <aside class="dashboard-page__sidebar">
                <NavMenu/>
            </aside>
            <main class="dashboard-page__main">
                <header class="dashboard-header">
                    <span class="dashboard-header__avatar">{initial}</span>
                    <div>
                        <h1>{greeting}</h1>
                        <span class="dashboard-header__role">{role_label}</span>
                    </div>
                    <button class="dashboard-header__logout" on:click=on_logout>"Sign Out"</button>
                </header>
                <div class="dashboard-grid">{widgets}</div>
            </main>
        </div>
    }
}
