//! Reactive List Controller
//!
//! Binds a `Collection`, `FilterState`, `Pager` and `InlineEditor` to Leptos
//! signals and runs the fetch/save/delete round trips for one table.

use std::future::Future;

use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{
    project, Collection, EditState, FetchOutcome, FilterState, Id, InlineEditor, Pager, PendingDelete,
    PendingSave, Projectable, WriteOutcome, WritePolicy,
};
use crate::error::ApiError;
use crate::store::{notify, use_app_store, AppStore, ToastKind};

pub struct ListController<T: Send + Sync + 'static> {
    pub collection: RwSignal<Collection<T>>,
    pub filter: RwSignal<FilterState>,
    pub pager: RwSignal<Pager>,
    pub editor: RwSignal<InlineEditor<T>>,
    /// Singular noun used in notifications ("course", "order")
    noun: &'static str,
    store: AppStore,
}

impl<T: Send + Sync + 'static> Clone for ListController<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ListController<T> {}

impl<T> ListController<T>
where
    T: Projectable + PartialEq + Send + Sync + 'static,
{
    /// Must be called inside a component
    pub fn new(noun: &'static str, filter: FilterState, page_size: usize) -> Self {
        Self {
            collection: RwSignal::new(Collection::new()),
            filter: RwSignal::new(filter),
            pager: RwSignal::new(Pager::new(page_size)),
            editor: RwSignal::new(InlineEditor::new(WritePolicy::Rollback)),
            noun,
            store: use_app_store(),
        }
    }

    pub fn loading(&self) -> bool {
        self.collection.with(|c| c.loading())
    }

    /// Filtered/sorted rows, recomputed synchronously on every filter change.
    /// Also keeps the pager inside the projected range.
    pub fn projection(self) -> Memo<Vec<T>> {
        let projected = Memo::new(move |_| {
            let filter = self.filter.get();
            self.collection.with(|c| project(c.items(), &filter))
        });
        Effect::new(move |_| {
            let count = projected.with(Vec::len);
            self.pager.update(|p| p.clamp(count));
        });
        projected
    }

    /// Rows of the current page
    pub fn page_rows(self, projected: Memo<Vec<T>>) -> Vec<T> {
        projected.with(|rows| self.pager.with(|p| p.slice(rows).to_vec()))
    }

    pub fn set_search(&self, text: String) {
        self.filter.update(|f| f.search_text = text);
    }

    pub fn load<F, Fut>(self, fetch: F)
    where
        F: FnOnce() -> Fut + 'static,
        Fut: Future<Output = Result<Vec<T>, ApiError>> + 'static,
    {
        let Some(ticket) = self.collection.try_update(|c| c.begin_fetch()) else {
            return;
        };
        let noun = self.noun;
        spawn_local(async move {
            let result = fetch().await;
            match self.collection.try_update(|c| c.finish_fetch(ticket, result)) {
                Some(FetchOutcome::Loaded(n)) => log!("[LIST] Loaded {} {}s", n, noun),
                Some(FetchOutcome::Failed(e)) => {
                    warn!("[LIST] Loading {}s failed: {}", noun, e);
                    notify(&self.store, ToastKind::Error, format!("Could not load {}s: {}", noun, e.user_message()));
                }
                Some(FetchOutcome::Stale) => log!("[LIST] Dropped stale {} response", noun),
                None => {}
            }
        });
    }

    /// Start editing the row with `id` as it currently stands in the collection
    pub fn edit_row(&self, id: Id) {
        let Some(item) = self.collection.with_untracked(|c| c.get(id).cloned()) else {
            return;
        };
        let started = self.editor.try_update(|e| e.begin_edit(&item)).unwrap_or(false);
        if !started {
            log!("[LIST] {} {} is still saving, edit refused", self.noun, id);
        }
    }

    /// Read a field of the staged row, `Default` when nothing is being edited
    pub fn staged_field<R: Default>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.editor.with(|e| e.staged().map(f).unwrap_or_default())
    }

    pub fn is_editing(&self, id: Id) -> bool {
        self.editor.with(|e| e.is_editing(id))
    }

    pub fn is_saving(&self) -> bool {
        self.editor.with(|e| *e.state() == EditState::Saving)
    }

    pub fn is_confirming_delete(&self, id: Id) -> bool {
        self.editor.with(|e| e.is_confirming_delete(id))
    }

    pub fn edit_error(&self) -> Option<String> {
        self.editor.with(|e| e.error().map(str::to_string))
    }

    pub fn stage(&self, f: impl FnOnce(&mut T)) {
        self.editor.update(|e| {
            e.stage(f);
        });
    }

    pub fn cancel_edit(&self) {
        self.editor.update(|e| e.cancel());
    }

    /// Submit the staged row; `send` receives (original, staged)
    pub fn save<F, Fut>(self, send: F)
    where
        F: FnOnce(T, T) -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        let pending: Option<PendingSave<T>> = self
            .editor
            .try_update(|e| self.collection.try_update(|c| e.submit(c)).flatten())
            .flatten();
        let Some(pending) = pending else { return };

        spawn_local(async move {
            let result = send(pending.original.clone(), pending.staged.clone()).await;
            let outcome = self
                .editor
                .try_update(|e| self.collection.try_update(|c| e.resolve_save(c, pending, result)))
                .flatten();
            if let Some(outcome) = outcome {
                self.report(outcome);
            }
        });
    }

    pub fn request_delete(&self, id: Id) {
        self.editor.update(|e| e.request_delete(id));
    }

    pub fn decline_delete(&self) {
        self.editor.update(|e| {
            e.decline_delete();
        });
    }

    /// Remove the confirmed row now, then tell the backend
    pub fn confirm_delete<F, Fut>(self, send: F)
    where
        F: FnOnce(Id) -> Fut + 'static,
        Fut: Future<Output = Result<(), ApiError>> + 'static,
    {
        let pending: Option<PendingDelete<T>> = self
            .editor
            .try_update(|e| self.collection.try_update(|c| e.confirm_delete(c)).flatten())
            .flatten();
        let Some(pending) = pending else { return };

        spawn_local(async move {
            let result = send(pending.item.id()).await;
            let outcome = self
                .editor
                .try_update(|e| self.collection.try_update(|c| e.resolve_delete(c, pending, result)))
                .flatten();
            if let Some(outcome) = outcome {
                self.report(outcome);
            }
        });
    }

    /// Insert a freshly created row
    pub fn push_created(&self, item: T) {
        self.collection.update(|c| c.upsert(item));
        notify(&self.store, ToastKind::Success, format!("{} created", capitalize(self.noun)));
    }

    fn report(&self, outcome: WriteOutcome) {
        match &outcome {
            WriteOutcome::RolledBack(e) => warn!("[LIST] {} write rolled back: {}", self.noun, e),
            WriteOutcome::Diverged(e) => warn!("[LIST] {} write failed, local copy kept: {}", self.noun, e),
            WriteOutcome::Saved | WriteOutcome::Deleted => {}
        }
        let (kind, message) = write_toast(self.noun, &outcome);
        notify(&self.store, kind, message);
    }
}

/// Toast for a finished write; failures never read as success
pub(crate) fn write_toast(noun: &str, outcome: &WriteOutcome) -> (ToastKind, String) {
    let noun = capitalize(noun);
    match outcome {
        WriteOutcome::Saved => (ToastKind::Success, format!("{} saved", noun)),
        WriteOutcome::Deleted => (ToastKind::Success, format!("{} deleted", noun)),
        WriteOutcome::RolledBack(e) => (ToastKind::Error, format!("{} not saved: {}", noun, e.user_message())),
        WriteOutcome::Diverged(e) => (
            ToastKind::Error,
            format!("{} may be out of sync: {}", noun, e.user_message()),
        ),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline() -> ApiError {
        ApiError::Network("connection refused".to_string())
    }

    #[test]
    fn test_failed_writes_toast_as_errors() {
        let (kind, message) = write_toast("order", &WriteOutcome::RolledBack(offline()));
        assert_eq!(kind, ToastKind::Error);
        assert_eq!(message, "Order not saved: Could not reach the server");

        let (kind, message) = write_toast("course", &WriteOutcome::Diverged(offline()));
        assert_eq!(kind, ToastKind::Error);
        assert_eq!(message, "Course may be out of sync: Could not reach the server");
    }

    #[test]
    fn test_successful_writes_toast_as_success() {
        assert_eq!(
            write_toast("member", &WriteOutcome::Saved),
            (ToastKind::Success, "Member saved".to_string())
        );
        assert_eq!(
            write_toast("product", &WriteOutcome::Deleted),
            (ToastKind::Success, "Product deleted".to_string())
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("order"), "Order");
        assert_eq!(capitalize(""), "");
    }
}
