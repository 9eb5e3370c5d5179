//! Status Select Component
//!
//! Fixed-choice dropdown used when editing a row's status in place.

use leptos::prelude::*;

#[component]
pub fn StatusSelect(
    options: &'static [&'static str],
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <select class="status-select" on:change=move |ev| on_change.run(event_target_value(&ev))>
            {options.iter().map(|&option| view! {
                <option value=option selected=move || value.with(|v| v == option)>{option}</option>
            }).collect_view()}
        </select>
    }
}

/// Read-only status pill
#[component]
pub fn StatusBadge(#[prop(into)] status: String) -> impl IntoView {
    let class = format!("status-badge status-{}", status.to_lowercase().replace(' ', "-"));
    view! { <span class=class>{status}</span> }
}
