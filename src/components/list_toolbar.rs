//! List Toolbar Component
//!
//! Search box, exact-match filter dropdown and sort selector bound to one
//! table's `FilterState`.

use leptos::prelude::*;

use crate::components::SearchBar;
use crate::list::{FilterState, SortKey, StatusFilter};

#[component]
pub fn ListToolbar(
    filter: RwSignal<FilterState>,
    /// Filter choices, starting with the "All" sentinel
    #[prop(into)]
    options: Signal<Vec<String>>,
    #[prop(optional)] on_settle: Option<Callback<String>>,
    #[prop(default = "Search...")] placeholder: &'static str,
    #[prop(default = "Status")] filter_label: &'static str,
) -> impl IntoView {
    let search_text = Signal::derive(move || filter.with(|f| f.search_text.clone()));
    let current_choice = move || filter.with(|f| f.status_filter.as_choice().to_string());
    let current_sort = move || filter.with(|f| f.sort_key);

    view! {
        <div class="list-toolbar">
            <SearchBar
                value=search_text
                on_input=move |text: String| filter.update(|f| f.search_text = text)
                on_settle=on_settle
                placeholder=placeholder
            />

            <label class="toolbar-select">
                <span>{filter_label}</span>
                <select on:change=move |ev| {
                    let choice = event_target_value(&ev);
                    filter.update(|f| f.status_filter = StatusFilter::from_choice(&choice));
                }>
                    {move || options.get().into_iter().map(|option| {
                        let selected = option == current_choice();
                        view! { <option value=option.clone() selected=selected>{option.clone()}</option> }
                    }).collect_view()}
                </select>
            </label>

            <label class="toolbar-select">
                <span>"Sort"</span>
                <select on:change=move |ev| {
                    let key = SortKey::from_value(&event_target_value(&ev));
                    filter.update(|f| f.sort_key = key);
                }>
                    {SortKey::ALL.into_iter().map(|key| view! {
                        <option value=key.as_str() selected=move || current_sort() == key>{key.label()}</option>
                    }).collect_view()}
                </select>
            </label>
        </div>
    }
}
