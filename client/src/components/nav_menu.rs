//! Side navigation filtered by the signed-in role.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::auth::AuthContext;
use crate::util::nav::nav_items;

#[component]
pub fn NavMenu() -> impl IntoView {
    let state = expect_context::<AuthContext>().state();
    let items = move || state.get().role().map(nav_items).unwrap_or_default();

    view! {
        <nav class="nav-menu">
            {move || {
                items()
                    .into_iter()
                    .map(|item| view! { <A href=item.path attr:class="nav-menu__link">{item.label}</A> })
                    .collect_view()
            }}
        </nav>
    }
}
