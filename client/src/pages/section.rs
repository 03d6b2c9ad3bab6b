//! Generic page for a navigation section (patients, schedule, ...).

use leptos::prelude::*;

use crate::components::nav_menu::NavMenu;
use crate::util::nav::NavItem;

#[component]
pub fn SectionPage(item: NavItem) -> impl IntoView {
    view! {
        <div class="dashboard-page">
            <aside class="dashboard-page__sidebar">
                <NavMenu/>
            </aside>
            <main class="dashboard-page__main">
                <h1>{item.label}</h1>
            </main>
        </div>
    }
}
