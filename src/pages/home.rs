//! Landing page

use leptos::prelude::*;
use leptos_router::components::A;

use crate::models::Role;
use crate::store::{store_role, use_app_store};

#[component]
pub fn HomePage() -> impl IntoView {
    let store = use_app_store();

    view! {
        <section class="hero">
            <h1>"Train with the best"</h1>
            <p>"Find courses from certified trainers, manage your gym or run your fitness store."</p>
            {move || match store_role(&store) {
                Some(role) => view! {
                    <a class="btn btn-primary" href=role.dashboard_path()>"Go to your dashboard"</a>
                }.into_any(),
                None => view! {
                    <A href="/courses" attr:class="btn btn-primary">"Browse courses"</A>
                    <A href="/register" attr:class="btn">"Create an account"</A>
                }.into_any(),
            }}
        </section>
        <section class="role-grid">
            {Role::ALL.into_iter().map(|role| view! {
                <div class="role-card">
                    <h3>{role.label()}</h3>
                    <p>{role_pitch(role)}</p>
                </div>
            }).collect_view()}
        </section>
    }
}

pub(crate) fn role_pitch(role: Role) -> &'static str {
    match role {
        Role::Trainer => "Publish courses and follow your trainees.",
        Role::Trainee => "Enrol in courses and track your orders.",
        Role::Gym => "Manage your trainers and members.",
        Role::Store => "Sell equipment and supplements.",
    }
}
