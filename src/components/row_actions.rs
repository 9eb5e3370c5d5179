//! Row Actions Component
//!
//! Edit/delete controls of one table row, switching to save/cancel while
//! that row is being edited.

use leptos::prelude::*;

use crate::components::DeleteConfirmButton;
use crate::list::{Id, ListController, Projectable};

#[component]
pub fn RowActions<T>(
    list: ListController<T>,
    id: Id,
    #[prop(into)] on_save: Callback<()>,
    #[prop(into)] on_delete: Callback<()>,
) -> impl IntoView
where
    T: Projectable + PartialEq + Send + Sync + 'static,
{
    let editing = Memo::new(move |_| list.is_editing(id));
    let confirming = Signal::derive(move || list.is_confirming_delete(id));

    view! {
        <td class="row-actions">
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <button class="edit-btn" on:click=move |_| list.edit_row(id)>"Edit"</button>
                    <DeleteConfirmButton
                        confirming=confirming
                        on_request=move |_: ()| list.request_delete(id)
                        on_confirm=on_delete
                        on_cancel=move |_: ()| list.decline_delete()
                    />
                }
            >
                <button class="save-btn" disabled=move || list.is_saving() on:click=move |_| on_save.run(())>
                    {move || if list.is_saving() { "Saving..." } else { "Save" }}
                </button>
                <button class="cancel-btn" on:click=move |_| list.cancel_edit()>"Cancel"</button>
                {move || list.edit_error().map(|message| view! { <span class="row-error">{message}</span> })}
            </Show>
        </td>
    }
}
