//! FitHub Frontend App
//!
//! Router, global store and the chrome shared by every page.

use leptos::logging::log;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::use_location;
use leptos_router::path;
use reactive_stores::Store;

use crate::components::{NavBar, ToastHost};
use crate::config::app_config;
use crate::pages::{
    CourseDetailPage, CoursesPage, DashboardRedirect, GymDashboard, HomePage, LoginPage, NotFound, OrdersPage,
    ProfilePage, RegisterPage, RoleChoicePage, StoreDashboard, TraineeDashboard, TrainerDashboard,
};
use crate::store::{store_invalidate_cache, use_app_store, AppState};

#[component]
pub fn App() -> impl IntoView {
    let config = app_config();
    log!("[APP] Starting with API base {} (page size {})", config.api_base, config.page_size);

    provide_context(Store::new(AppState::new()));

    view! {
        <Router>
            <CacheInvalidator />
            <NavBar />
            <main class="app-main">
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/register") view=RoleChoicePage />
                    <Route path=path!("/register/:role") view=RegisterPage />
                    <Route path=path!("/courses") view=CoursesPage />
                    <Route path=path!("/courses/:id") view=CourseDetailPage />
                    <Route path=path!("/dashboard") view=DashboardRedirect />
                    <Route path=path!("/dashboard/trainer") view=TrainerDashboard />
                    <Route path=path!("/dashboard/trainee") view=TraineeDashboard />
                    <Route path=path!("/dashboard/gym") view=GymDashboard />
                    <Route path=path!("/dashboard/store") view=StoreDashboard />
                    <Route path=path!("/orders") view=OrdersPage />
                    <Route path=path!("/profile") view=ProfilePage />
                </Routes>
            </main>
            <ToastHost />
        </Router>
    }
}

/// Drops cached backend resources whenever the route changes
#[component]
fn CacheInvalidator() -> impl IntoView {
    let store = use_app_store();
    let pathname = use_location().pathname;

    Effect::new(move |previous: Option<String>| {
        let current = pathname.get();
        if previous.is_some_and(|p| p != current) {
            log!("[APP] Route changed to {}, clearing cache", current);
            store_invalidate_cache(&store);
        }
        current
    });
}
