//! Pagination Bar Component

use leptos::prelude::*;

use crate::list::Pager;

const PAGE_SIZES: [usize; 3] = [10, 25, 50];

#[component]
pub fn PaginationBar(pager: RwSignal<Pager>, #[prop(into)] count: Signal<usize>) -> impl IntoView {
    let summary = move || {
        let count = count.get();
        pager.with(|p| match p.visible_range(count) {
            Some((first, last)) => format!("{}–{} of {}", first, last, count),
            None => "No results".to_string(),
        })
    };

    view! {
        <div class="pagination-bar">
            <button
                class="page-btn"
                disabled=move || !pager.with(|p| p.has_prev())
                on:click=move |_| pager.update(|p| p.prev(count.get_untracked()))
            >
                "‹ Prev"
            </button>
            <span class="page-indicator">
                {move || {
                    let count = count.get();
                    pager.with(|p| format!("Page {} of {}", p.page(), p.total_pages(count)))
                }}
            </span>
            <button
                class="page-btn"
                disabled=move || !pager.with(|p| p.has_next(count.get()))
                on:click=move |_| pager.update(|p| p.next(count.get_untracked()))
            >
                "Next ›"
            </button>
            <span class="page-summary">{summary}</span>
            <select
                class="page-size"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        pager.update(|p| p.set_page_size(size));
                    }
                }
            >
                {PAGE_SIZES.into_iter().map(|size| view! {
                    <option value=size.to_string() selected=move || pager.with(|p| p.page_size() == size)>
                        {format!("{} / page", size)}
                    </option>
                }).collect_view()}
            </select>
        </div>
    }
}
