//! Delete Confirm Button Component
//!
//! Inline two-step delete: the first click asks, only ✓ fires the delete.

use leptos::prelude::*;

/// Inline delete confirmation button
///
/// # Arguments
/// * `confirming` - Whether this row is waiting for a yes/no answer
/// * `on_request` - First click, asks for confirmation
/// * `on_confirm` - User said yes
/// * `on_cancel` - User said no
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] confirming: Signal<bool>,
    #[prop(into)] on_request: Callback<()>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || !confirming.get()>
            <button
                class="delete-btn"
                title="Delete"
                on:click=move |ev| {
                    ev.stop_propagation();
                    on_request.run(());
                }
            >
                "Delete"
            </button>
        </Show>
        <Show when=move || confirming.get()>
            <span class="delete-confirm">
                <span class="delete-confirm-text">"Delete?"</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_cancel.run(());
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
