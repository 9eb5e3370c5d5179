//! Search Bar Component
//!
//! Reports every keystroke immediately (local projection) and, optionally,
//! the settled text once typing pauses (server fetch).

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::config::app_config;

#[component]
pub fn SearchBar(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(optional_no_strip)] on_settle: Option<Callback<String>>,
    #[prop(default = "Search...")] placeholder: &'static str,
) -> impl IntoView {
    let debounce_ms = app_config().search_debounce_ms;
    // Bumped on each keystroke; a timer only fires if nothing newer arrived
    let keystroke = StoredValue::new(0u64);

    view! {
        <input
            type="search"
            class="search-input"
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| {
                let text = event_target_value(&ev);
                on_input.run(text.clone());

                let Some(on_settle) = on_settle else { return };
                keystroke.update_value(|k| *k += 1);
                let mine = keystroke.get_value();
                spawn_local(async move {
                    TimeoutFuture::new(debounce_ms).await;
                    if keystroke.try_get_value() == Some(mine) {
                        on_settle.run(text);
                    }
                });
            }
        />
    }
}
