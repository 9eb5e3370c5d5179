//! Navigation Bar Component
//!
//! Links depend on who is signed in; signing out returns to the catalog.

use leptos::logging::log;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::store::{store_role, store_sign_out, use_app_store, AppStateStoreFields};

#[component]
pub fn NavBar() -> impl IntoView {
    let store = use_app_store();
    let navigate = use_navigate();

    let display_name = move || store.session().with(|s| s.as_ref().map(|s| s.display_name.clone()));
    let signed_in = move || store.session().with(Option::is_some);
    let dashboard_href = move || store_role(&store).map(|r| r.dashboard_path()).unwrap_or_default();

    let sign_out = move |_| {
        log!("[NAV] Signing out");
        store_sign_out(&store);
        navigate("/", Default::default());
    };

    view! {
        <nav class="nav-bar">
            <A href="/" attr:class="nav-brand">"FitHub"</A>
            <div class="nav-links">
                <A href="/courses">"Courses"</A>
                <Show
                    when=signed_in
                    fallback=|| view! {
                        <A href="/login">"Sign in"</A>
                        <A href="/register">"Join"</A>
                    }
                >
                    <a href=dashboard_href>"Dashboard"</a>
                    <A href="/orders">"Orders"</A>
                    <A href="/profile">"Profile"</A>
                    <span class="nav-user">{display_name}</span>
                    <button class="nav-signout" on:click=sign_out.clone()>"Sign out"</button>
                </Show>
            </div>
        </nav>
    }
}
