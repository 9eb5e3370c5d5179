//! Modal Frame Component
//!
//! Backdrop + dialog shell. Content, buttons and draft handling belong to
//! the caller; clicking the backdrop or pressing Escape counts as
//! close-without-save.

use leptos::prelude::*;

#[component]
pub fn ModalFrame(
    title: &'static str,
    #[prop(into)] on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    let escape = window_event_listener(leptos::ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || escape.remove());

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class="modal" role="dialog" on:click=|ev| ev.stop_propagation()>
                <header class="modal-header">
                    <h2>{title}</h2>
                    <button class="modal-close" title="Close" on:click=move |_| on_close.run(())>
                        "×"
                    </button>
                </header>
                <div class="modal-body">{children()}</div>
            </div>
        </div>
    }
}
