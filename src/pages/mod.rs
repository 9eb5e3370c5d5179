//! Pages
//!
//! One component per route.

/// One text cell that turns into an input while its row is edited
macro_rules! editable_text {
    ($list:expr, $editing:expr, $read:expr, $field:ident) => {{
        let list = $list;
        let editing = $editing;
        let read: String = $read;
        move || {
            if editing.get() {
                view! {
                    <input
                        type="text"
                        prop:value=move || list.staged_field(|r| r.$field.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            list.stage(|r| r.$field = value);
                        }
                    />
                }
                .into_any()
            } else {
                read.clone().into_any()
            }
        }
    }};
}

mod course_detail;
mod courses;
mod gym_dashboard;
mod home;
mod login;
mod orders;
mod profile;
mod register;
mod store_dashboard;
mod trainee_dashboard;
mod trainer_dashboard;

pub use course_detail::CourseDetailPage;
pub use courses::CoursesPage;
pub use gym_dashboard::GymDashboard;
pub use home::HomePage;
pub use login::LoginPage;
pub use orders::OrdersPage;
pub use profile::ProfilePage;
pub use register::{RegisterPage, RoleChoicePage};
pub use store_dashboard::StoreDashboard;
pub use trainee_dashboard::TraineeDashboard;
pub use trainer_dashboard::TrainerDashboard;

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::store::{store_role, use_app_store};

/// `/dashboard` sends each role to its own dashboard
#[component]
pub fn DashboardRedirect() -> impl IntoView {
    let store = use_app_store();
    let target = store_role(&store).map(|r| r.dashboard_path()).unwrap_or_else(|| "/login".to_string());
    view! { <Redirect path=target /> }
}

#[component]
pub fn StatCard(label: &'static str, #[prop(into)] value: Signal<String>) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span class="stat-value">{move || value.get()}</span>
            <span class="stat-label">{label}</span>
        </div>
    }
}

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <section class="not-found">
            <h1>"404"</h1>
            <p>"Page not found"</p>
            <a href="/">"Go home"</a>
        </section>
    }
}
