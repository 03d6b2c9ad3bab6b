//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};
use session::{DASHBOARD_PATH, SessionStore};

use crate::components::guard::RouteGuard;
use crate::net::directory::DemoDirectory;
use crate::pages::{dashboard::DashboardPage, login::LoginPage, register::RegisterPage, section::SectionPage};
use crate::state::auth::AuthContext;
use crate::util::nav;
use crate::util::storage::BrowserStorage;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the one `SessionStore` for this tab, provides it as
/// [`AuthContext`], and restores the stored session once running in the
/// browser. Until then every guard renders its loading placeholder, which is
/// also what the server renders.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let store = SessionStore::new(Arc::new(DemoDirectory::new()), Arc::new(BrowserStorage));
    let auth = AuthContext::new(Arc::new(store));
    provide_context(auth.clone());

    // Effects only run in the browser, so SSR never reads storage.
    Effect::new(move |_| auth.initialize());

    view! {
        <Stylesheet id="leptos" href="/pkg/carebridge.css"/>
        <Title text="CareBridge"/>

        <Router>
            <Routes fallback=|| view! { <RouteGuard>"Page not found."</RouteGuard> }>
                <Route path=StaticSegment("") view=|| view! { <Redirect path=DASHBOARD_PATH/> }/>
                <Route
                    path=StaticSegment("login")
                    view=|| view! { <RouteGuard><LoginPage/></RouteGuard> }
                />
                <Route
                    path=StaticSegment("register")
                    view=|| view! { <RouteGuard><RegisterPage/></RouteGuard> }
                />
                <Route
                    path=StaticSegment("dashboard")
                    view=|| view! { <RouteGuard><DashboardPage/></RouteGuard> }
                />
                <Route
                    path=StaticSegment("patients")
                    view=|| view! { <RouteGuard><SectionPage item=nav::PATIENTS/></RouteGuard> }
                />
                <Route
                    path=StaticSegment("employees")
                    view=|| view! { <RouteGuard><SectionPage item=nav::EMPLOYEES/></RouteGuard> }
                />
                <Route
                    path=StaticSegment("tools")
                    view=|| view! { <RouteGuard><SectionPage item=nav::TOOLS/></RouteGuard> }
                />
                <Route
                    path=StaticSegment("schedule")
                    view=|| view! { <RouteGuard><SectionPage item=nav::SCHEDULE/></RouteGuard> }
                />
                <Route
                    path=StaticSegment("reports")
                    view=|| view! { <RouteGuard><SectionPage item=nav::REPORTS/></RouteGuard> }
                />
                <Route
                    path=StaticSegment("sessions")
                    view=|| view! { <RouteGuard><SectionPage item=nav::SESSIONS/></RouteGuard> }
                />
            </Routes>
        </Router>
    }
}
