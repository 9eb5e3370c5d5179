//! Sign-in page

use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::api;
use crate::components::{FormError, FormField};
use crate::forms::{LoginForm, Validate};
use crate::store::{notify, store_sign_in, use_app_store, ToastKind};

#[component]
pub fn LoginPage() -> impl IntoView {
    let store = use_app_store();
    let navigate = use_navigate();

    let form = RwSignal::new(LoginForm::default());
    let error = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        if let Err(e) = current.validate() {
            error.set(Some(e.message));
            return;
        }
        error.set(None);
        submitting.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(current.email.trim(), &current.password).await {
                Ok(session) => {
                    log!("[APP] Signed in as {:?}", session.role);
                    let target = session.role.dashboard_path();
                    notify(&store, ToastKind::Success, format!("Welcome back, {}", session.display_name));
                    store_sign_in(&store, session);
                    navigate(&target, Default::default());
                }
                Err(e) => {
                    warn!("[APP] Sign in failed: {}", e);
                    error.set(Some(e.user_message()));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <section class="auth-page">
            <h1>"Sign in"</h1>
            <form class="auth-form" on:submit=on_submit>
                <FormField
                    label="Email"
                    input_type="email"
                    value=Signal::derive(move || form.with(|f| f.email.clone()))
                    on_input=move |v: String| form.update(|f| f.email = v)
                />
                <FormField
                    label="Password"
                    input_type="password"
                    value=Signal::derive(move || form.with(|f| f.password.clone()))
                    on_input=move |v: String| form.update(|f| f.password = v)
                />
                <FormError message=error />
                <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
            <p class="auth-switch">
                "No account yet? " <A href="/register">"Join FitHub"</A>
            </p>
        </section>
    }
}
