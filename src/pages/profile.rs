//! Profile page
//!
//! Account details are edited through modals holding a draft copy; the
//! displayed value only changes once the server accepts the draft.

use std::future::Future;

use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{FormError, FormField, FormTextArea, ModalFrame, RequireRole};
use crate::error::ApiError;
use crate::forms::{PasswordChange, Validate};
use crate::list::Modal;
use crate::models::{PaymentInfo, Profile};
use crate::store::{notify, use_app_store, AppStore, ToastKind};

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <RequireRole>
            <ProfileOverview />
        </RequireRole>
    }
}

#[component]
fn ProfileOverview() -> impl IntoView {
    let profile = RwSignal::new(None::<Profile>);
    let payment = RwSignal::new(None::<PaymentInfo>);

    let profile_modal = RwSignal::new(Modal::<Profile>::default());
    let password_modal = RwSignal::new(Modal::<PasswordChange>::default());
    let payment_modal = RwSignal::new(Modal::<PaymentInfo>::default());

    spawn_local(async move {
        match api::get_profile().await {
            Ok(loaded) => {
                profile.try_set(Some(loaded));
            }
            Err(e) => warn!("[APP] Loading profile failed: {}", e),
        }
    });
    spawn_local(async move {
        match api::get_payment_info().await {
            Ok(loaded) => {
                payment.try_set(Some(loaded));
            }
            // No card on file yet is not worth a toast
            Err(e) => warn!("[APP] Loading payment info failed: {}", e),
        }
    });

    let open_profile = move |_| {
        let current = profile.get_untracked().unwrap_or_default();
        profile_modal.update(|m| m.open_seeded(&current));
    };
    let open_payment = move |_| {
        let current = payment.get_untracked().unwrap_or_default();
        payment_modal.update(|m| m.open_seeded(&current));
    };

    view! {
        <section class="profile-page">
            <h1>"Profile"</h1>

            <div class="profile-card">
                {move || match profile.get() {
                    Some(p) => view! {
                        <dl>
                            <dt>"Name"</dt><dd>{p.name}</dd>
                            <dt>"Email"</dt><dd>{p.email}</dd>
                            <dt>"Phone"</dt><dd>{p.phone}</dd>
                            <dt>"About"</dt><dd>{p.bio}</dd>
                        </dl>
                    }.into_any(),
                    None => view! { <p class="loading">"Loading profile..."</p> }.into_any(),
                }}
                <div class="card-actions">
                    <button class="btn" on:click=open_profile>"Edit profile"</button>
                    <button class="btn" on:click=move |_| password_modal.update(|m| m.open_empty())>
                        "Change password"
                    </button>
                </div>
            </div>

            <div class="profile-card">
                <h2>"Payment"</h2>
                {move || match payment.get().filter(|p| !p.card_number.is_empty()) {
                    Some(p) => view! {
                        <dl>
                            <dt>"Card holder"</dt><dd>{p.card_holder.clone()}</dd>
                            <dt>"Card"</dt><dd>{p.masked_number()}</dd>
                            <dt>"Expires"</dt><dd>{p.expiry.clone()}</dd>
                        </dl>
                    }.into_any(),
                    None => view! { <p class="empty">"No card on file."</p> }.into_any(),
                }}
                <div class="card-actions">
                    <button class="btn" on:click=open_payment>"Update payment info"</button>
                </div>
            </div>

            <Show when=move || profile_modal.with(Modal::is_open)>
                <EditProfileModal modal=profile_modal profile=profile />
            </Show>
            <Show when=move || password_modal.with(Modal::is_open)>
                <ChangePasswordModal modal=password_modal />
            </Show>
            <Show when=move || payment_modal.with(Modal::is_open)>
                <PaymentModal modal=payment_modal payment=payment />
            </Show>
        </section>
    }
}

/// Validate the draft, send it, and close the modal only on success.
/// `send` resolves to the toast text.
fn submit_draft<T, F, Fut>(
    store: AppStore,
    modal: RwSignal<Modal<T>>,
    error: RwSignal<Option<String>>,
    busy: RwSignal<bool>,
    send: F,
) where
    T: Validate + Clone + Send + Sync + 'static,
    F: FnOnce(T) -> Fut + 'static,
    Fut: Future<Output = Result<&'static str, ApiError>> + 'static,
{
    if busy.get_untracked() {
        return;
    }
    let Some(draft) = modal.with_untracked(|m| m.snapshot()) else { return };
    if let Err(e) = draft.validate() {
        error.set(Some(e.message));
        return;
    }
    error.set(None);
    busy.set(true);

    spawn_local(async move {
        match send(draft).await {
            Ok(done) => {
                notify(&store, ToastKind::Success, done);
                modal.try_update(|m| m.close());
            }
            Err(e) => {
                warn!("[APP] Profile update failed: {}", e);
                error.try_set(Some(e.user_message()));
            }
        }
        busy.try_set(false);
    });
}

macro_rules! draft_field {
    ($modal:expr, $field:ident) => {{
        let modal = $modal;
        (
            Signal::derive(move || modal.with(|m| m.field(|f| f.$field.clone()).unwrap_or_default())),
            Callback::new(move |v: String| modal.update(|m| m.edit(|f| f.$field = v))),
        )
    }};
}

#[component]
fn EditProfileModal(modal: RwSignal<Modal<Profile>>, profile: RwSignal<Option<Profile>>) -> impl IntoView {
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let store = use_app_store();
    let close = Callback::new(move |_: ()| modal.update(|m| m.close()));

    let (name, set_name) = draft_field!(modal, name);
    let (email, set_email) = draft_field!(modal, email);
    let (phone, set_phone) = draft_field!(modal, phone);
    let (bio, set_bio) = draft_field!(modal, bio);

    let save = move |_: ()| {
        submit_draft(store, modal, error, busy, move |draft: Profile| async move {
            let saved = api::update_profile(&draft).await?;
            profile.try_set(Some(saved));
            Ok("Profile updated")
        })
    };

    view! {
        <ModalFrame title="Edit profile" on_close=close>
            <FormField label="Name" value=name on_input=set_name />
            <FormField label="Email" input_type="email" value=email on_input=set_email />
            <FormField label="Phone" input_type="tel" value=phone on_input=set_phone />
            <FormTextArea label="About you" value=bio on_input=set_bio />
            <FormError message=error />
            <ModalActions busy=busy on_cancel=close on_save=save />
        </ModalFrame>
    }
}

#[component]
fn ChangePasswordModal(modal: RwSignal<Modal<PasswordChange>>) -> impl IntoView {
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let store = use_app_store();
    let close = Callback::new(move |_: ()| modal.update(|m| m.close()));

    let (current, set_current) = draft_field!(modal, current_password);
    let (new, set_new) = draft_field!(modal, new_password);
    let (confirm, set_confirm) = draft_field!(modal, confirm_password);

    let save = move |_: ()| {
        submit_draft(store, modal, error, busy, |draft: PasswordChange| async move {
            api::change_password(&draft).await?;
            Ok("Password changed")
        })
    };

    view! {
        <ModalFrame title="Change password" on_close=close>
            <FormField label="Current password" input_type="password" value=current on_input=set_current />
            <FormField label="New password" input_type="password" value=new on_input=set_new />
            <FormField label="Confirm new password" input_type="password" value=confirm on_input=set_confirm />
            <FormError message=error />
            <ModalActions busy=busy on_cancel=close on_save=save />
        </ModalFrame>
    }
}

#[component]
fn PaymentModal(modal: RwSignal<Modal<PaymentInfo>>, payment: RwSignal<Option<PaymentInfo>>) -> impl IntoView {
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let store = use_app_store();
    let close = Callback::new(move |_: ()| modal.update(|m| m.close()));

    let (holder, set_holder) = draft_field!(modal, card_holder);
    let (number, set_number) = draft_field!(modal, card_number);
    let (expiry, set_expiry) = draft_field!(modal, expiry);
    let (address, set_address) = draft_field!(modal, billing_address);

    let save = move |_: ()| {
        submit_draft(store, modal, error, busy, move |draft: PaymentInfo| async move {
            let saved = api::update_payment_info(&draft).await?;
            payment.try_set(Some(saved));
            Ok("Payment info updated")
        })
    };

    view! {
        <ModalFrame title="Payment info" on_close=close>
            <FormField label="Card holder" value=holder on_input=set_holder />
            <FormField label="Card number" value=number on_input=set_number />
            <FormField label="Expiry" placeholder="MM/YY" value=expiry on_input=set_expiry />
            <FormField label="Billing address" value=address on_input=set_address />
            <FormError message=error />
            <ModalActions busy=busy on_cancel=close on_save=save />
        </ModalFrame>
    }
}

#[component]
fn ModalActions(
    busy: RwSignal<bool>,
    #[prop(into)] on_cancel: Callback<()>,
    #[prop(into)] on_save: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="modal-actions">
            <button class="btn" on:click=move |_| on_cancel.run(())>"Cancel"</button>
            <button class="btn btn-primary" disabled=move || busy.get() on:click=move |_| on_save.run(())>
                {move || if busy.get() { "Saving..." } else { "Save" }}
            </button>
        </div>
    }
}
