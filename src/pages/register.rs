//! Registration
//!
//! `/register` picks a role; `/register/:role` runs the three-step wizard.
//! Each step is validated before the wizard moves on.

use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Redirect, A};
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::api;
use crate::components::{FormError, FormField};
use crate::forms::{DetailsStep, RegistrationForm, WizardStep};
use crate::models::Role;
use crate::pages::home::role_pitch;
use crate::store::{notify, store_sign_in, use_app_store, ToastKind};

#[component]
pub fn RoleChoicePage() -> impl IntoView {
    view! {
        <section class="auth-page">
            <h1>"Join FitHub"</h1>
            <p>"Choose how you will use FitHub."</p>
            <div class="role-grid">
                {Role::ALL.into_iter().map(|role| view! {
                    <A href=format!("/register/{}", role.slug()) attr:class="role-card">
                        <h3>{role.label()}</h3>
                        <p>{role_pitch(role)}</p>
                    </A>
                }).collect_view()}
            </div>
            <p class="auth-switch">"Already registered? " <A href="/login">"Sign in"</A></p>
        </section>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let params = use_params_map();
    let role = Memo::new(move |_| params.with(|p| p.get("role")).and_then(|slug| Role::from_slug(&slug)));

    move || match role.get() {
        Some(role) => view! { <RegistrationWizard role=role /> }.into_any(),
        None => view! { <Redirect path="/register" /> }.into_any(),
    }
}

#[component]
fn RegistrationWizard(role: Role) -> impl IntoView {
    let store = use_app_store();
    let navigate = use_navigate();

    let form = RwSignal::new(RegistrationForm::new(role));
    let error = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    let step = move || form.with(|f| f.step);

    let next = move |_| {
        let mut result = Ok(());
        form.update(|f| result = f.advance());
        error.set(result.err().map(|e| e.message));
    };
    let back = move |_| {
        error.set(None);
        form.update(|f| f.back());
    };

    let submit = move |_| {
        if submitting.get_untracked() {
            return;
        }
        let request = match form.with_untracked(|f| f.to_request()) {
            Ok(request) => request,
            Err(e) => {
                error.set(Some(e.message));
                return;
            }
        };
        error.set(None);
        submitting.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::register(&request).await {
                Ok(session) => {
                    log!("[APP] Registered new {:?} account", session.role);
                    let target = session.role.dashboard_path();
                    store_sign_in(&store, session);
                    notify(&store, ToastKind::Success, "Account created");
                    navigate(&target, Default::default());
                }
                Err(e) => {
                    warn!("[APP] Registration failed: {}", e);
                    error.set(Some(e.user_message()));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <section class="auth-page">
            <h1>{format!("Register as {}", role.label())}</h1>
            <ol class="wizard-steps">
                {WizardStep::ALL.into_iter().map(|s| view! {
                    <li class:active=move || step() == s>{format!("{}. {}", s.number(), s.label())}</li>
                }).collect_view()}
            </ol>

            <div class="wizard-body">
                {move || match step() {
                    WizardStep::Account => view! { <AccountFields form=form /> }.into_any(),
                    WizardStep::Details => view! { <DetailsFields form=form role=role /> }.into_any(),
                    WizardStep::Review => view! { <ReviewSummary form=form /> }.into_any(),
                }}
            </div>

            <FormError message=error />

            <div class="wizard-actions">
                <Show when=move || step().prev().is_some()>
                    <button class="btn" on:click=back>"Back"</button>
                </Show>
                <Show
                    when=move || step() == WizardStep::Review
                    fallback=move || view! { <button class="btn btn-primary" on:click=next>"Next"</button> }
                >
                    <button class="btn btn-primary" disabled=move || submitting.get() on:click=submit.clone()>
                        {move || if submitting.get() { "Creating account..." } else { "Create account" }}
                    </button>
                </Show>
            </div>
        </section>
    }
}

/// Bind a text input to one string field of the wizard
macro_rules! bound {
    ($form:expr, $($path:ident).+) => {{
        let form = $form;
        (
            Signal::derive(move || form.with(|f| f.$($path).+.clone())),
            Callback::new(move |v: String| form.update(|f| f.$($path).+ = v)),
        )
    }};
}

#[component]
fn AccountFields(form: RwSignal<RegistrationForm>) -> impl IntoView {
    let (name, set_name) = bound!(form, account.name);
    let (email, set_email) = bound!(form, account.email);
    let (phone, set_phone) = bound!(form, account.phone);
    let (password, set_password) = bound!(form, account.password);
    let (confirm, set_confirm) = bound!(form, account.confirm_password);

    view! {
        <FormField label="Full name" value=name on_input=set_name />
        <FormField label="Email" input_type="email" value=email on_input=set_email />
        <FormField label="Phone" input_type="tel" value=phone on_input=set_phone />
        <FormField label="Password" input_type="password" value=password on_input=set_password />
        <FormField label="Confirm password" input_type="password" value=confirm on_input=set_confirm />
    }
}

#[component]
fn DetailsFields(form: RwSignal<RegistrationForm>, role: Role) -> impl IntoView {
    match role {
        Role::Trainer => {
            let (specialty, set_specialty) = bound!(form, details.specialty);
            let (years, set_years) = bound!(form, details.years_experience);
            let (certs, set_certs) = bound!(form, details.certifications);
            view! {
                <FormField label="Specialty" value=specialty on_input=set_specialty />
                <FormField label="Years of experience" input_type="number" value=years on_input=set_years />
                <FormField
                    label="Certifications"
                    placeholder="Comma separated"
                    value=certs
                    on_input=set_certs
                />
            }
            .into_any()
        }
        Role::Trainee => {
            let (goal, set_goal) = bound!(form, details.goal);
            let (height, set_height) = bound!(form, details.height_cm);
            let (weight, set_weight) = bound!(form, details.weight_kg);
            view! {
                <FormField label="Fitness goal" value=goal on_input=set_goal />
                <FormField label="Height (cm)" input_type="number" value=height on_input=set_height />
                <FormField label="Weight (kg)" input_type="number" value=weight on_input=set_weight />
            }
            .into_any()
        }
        Role::Gym => {
            let (name, set_name) = bound!(form, details.business_name);
            let (address, set_address) = bound!(form, details.address);
            let (capacity, set_capacity) = bound!(form, details.capacity);
            view! {
                <FormField label="Gym name" value=name on_input=set_name />
                <FormField label="Address" value=address on_input=set_address />
                <FormField label="Capacity" input_type="number" value=capacity on_input=set_capacity />
            }
            .into_any()
        }
        Role::Store => {
            let (name, set_name) = bound!(form, details.business_name);
            let (address, set_address) = bound!(form, details.address);
            let (category, set_category) = bound!(form, details.store_category);
            view! {
                <FormField label="Store name" value=name on_input=set_name />
                <FormField label="Address" value=address on_input=set_address />
                <FormField label="What do you sell?" value=category on_input=set_category />
            }
            .into_any()
        }
    }
}

#[component]
fn ReviewSummary(form: RwSignal<RegistrationForm>) -> impl IntoView {
    let snapshot = form.get_untracked();
    let details = review_lines(snapshot.role, &snapshot.details);

    view! {
        <dl class="review">
            <dt>"Name"</dt><dd>{snapshot.account.name}</dd>
            <dt>"Email"</dt><dd>{snapshot.account.email}</dd>
            <dt>"Phone"</dt><dd>{snapshot.account.phone}</dd>
            {details.into_iter().map(|(label, value)| view! {
                <dt>{label}</dt><dd>{value}</dd>
            }).collect_view()}
        </dl>
    }
}

fn review_lines(role: Role, details: &DetailsStep) -> Vec<(&'static str, String)> {
    match role {
        Role::Trainer => vec![
            ("Specialty", details.specialty.clone()),
            ("Experience", format!("{} years", details.years_experience.trim())),
            ("Certifications", details.certifications.clone()),
        ],
        Role::Trainee => vec![
            ("Goal", details.goal.clone()),
            ("Height", format!("{} cm", details.height_cm.trim())),
            ("Weight", format!("{} kg", details.weight_kg.trim())),
        ],
        Role::Gym => vec![
            ("Gym", details.business_name.clone()),
            ("Address", details.address.clone()),
            ("Capacity", details.capacity.clone()),
        ],
        Role::Store => vec![
            ("Store", details.business_name.clone()),
            ("Address", details.address.clone()),
            ("Category", details.store_category.clone()),
        ],
    }
}
