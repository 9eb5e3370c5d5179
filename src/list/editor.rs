//! Inline Row Editor
//!
//! `Viewing -> Editing -> Saving -> Viewing`, or `Saving -> Error -> Editing`
//! on a failed write. At most one row holds an edit buffer at a time.
//!
//! Network calls are owned by the caller: `submit`/`confirm_delete` hand out
//! a pending token and `resolve_*` applies the response. The token carries
//! everything needed to roll back, so a response that arrives after the
//! user moved on to another row still lands correctly.

use super::{Collection, Id, Record, Slot};
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum EditState {
    Viewing,
    Editing,
    Saving,
    Error(String),
}

/// What to do with the local collection when a write fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Keep the local mutation even though the server rejected it
    Optimistic,
    /// Undo the local mutation and keep the staged edit for a retry
    #[default]
    Rollback,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    Saved,
    Deleted,
    /// Write failed, local copy kept the mutation and no longer matches the server
    Diverged(ApiError),
    /// Write failed, local copy was restored
    RolledBack(ApiError),
}

impl WriteOutcome {
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            WriteOutcome::Diverged(e) | WriteOutcome::RolledBack(e) => Some(e),
            WriteOutcome::Saved | WriteOutcome::Deleted => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer<T> {
    pub target_id: Id,
    pub original: T,
    pub staged: T,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingSave<T> {
    pub original: T,
    pub staged: T,
}

impl<T: Record> PendingSave<T> {
    pub fn id(&self) -> Id {
        self.original.id()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingDelete<T> {
    pub slot: Slot,
    pub item: T,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InlineEditor<T> {
    state: EditState,
    buffer: Option<EditBuffer<T>>,
    pending_delete: Option<Id>,
    policy: WritePolicy,
}

impl<T> Default for InlineEditor<T> {
    fn default() -> Self {
        Self::new(WritePolicy::default())
    }
}

impl<T> InlineEditor<T> {
    pub fn new(policy: WritePolicy) -> Self {
        Self { state: EditState::Viewing, buffer: None, pending_delete: None, policy }
    }
}

impl<T: Record> InlineEditor<T> {
    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    pub fn buffer(&self) -> Option<&EditBuffer<T>> {
        self.buffer.as_ref()
    }

    pub fn staged(&self) -> Option<&T> {
        self.buffer.as_ref().map(|b| &b.staged)
    }

    pub fn editing_id(&self) -> Option<Id> {
        self.buffer.as_ref().map(|b| b.target_id)
    }

    pub fn is_editing(&self, id: Id) -> bool {
        self.editing_id() == Some(id)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            EditState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Start editing `item`, discarding any other row's unsaved buffer.
    /// Refused while that same row's save is in flight.
    pub fn begin_edit(&mut self, item: &T) -> bool {
        if self.state == EditState::Saving && self.is_editing(item.id()) {
            return false;
        }
        self.buffer = Some(EditBuffer {
            target_id: item.id(),
            original: item.clone(),
            staged: item.clone(),
        });
        self.state = EditState::Editing;
        true
    }

    /// Mutate the staged copy; ignored unless a row is editable
    pub fn stage(&mut self, f: impl FnOnce(&mut T)) -> bool {
        if !matches!(self.state, EditState::Editing | EditState::Error(_)) {
            return false;
        }
        let Some(buffer) = self.buffer.as_mut() else {
            return false;
        };
        f(&mut buffer.staged);
        self.state = EditState::Editing;
        true
    }

    pub fn cancel(&mut self) {
        self.buffer = None;
        self.state = EditState::Viewing;
    }

    /// Show the staged edit locally and hand back what to send
    pub fn submit(&mut self, collection: &mut Collection<T>) -> Option<PendingSave<T>> {
        if !matches!(self.state, EditState::Editing | EditState::Error(_)) {
            return None;
        }
        let buffer = self.buffer.as_ref()?;
        let pending = PendingSave {
            original: buffer.original.clone(),
            staged: buffer.staged.clone(),
        };
        collection.replace(pending.staged.clone());
        self.state = EditState::Saving;
        Some(pending)
    }

    pub fn resolve_save(
        &mut self,
        collection: &mut Collection<T>,
        pending: PendingSave<T>,
        result: Result<T, ApiError>,
    ) -> WriteOutcome
    where
        T: PartialEq,
    {
        let id = pending.id();
        let still_ours = self.is_editing(id) && self.state == EditState::Saving;

        match result {
            Ok(saved) => {
                collection.replace(saved);
                if still_ours {
                    self.cancel();
                }
                WriteOutcome::Saved
            }
            Err(e) => match self.policy {
                WritePolicy::Optimistic => {
                    if still_ours {
                        self.cancel();
                    }
                    WriteOutcome::Diverged(e)
                }
                WritePolicy::Rollback => {
                    // A refetch may have landed since submit; keep it
                    if collection.get(id) == Some(&pending.staged) {
                        collection.replace(pending.original);
                    }
                    if let Some(buffer) = self.buffer.as_mut().filter(|b| b.target_id == id) {
                        if let Some(current) = collection.get(id) {
                            buffer.original = current.clone();
                        }
                    }
                    if still_ours {
                        self.state = EditState::Error(e.user_message());
                    }
                    WriteOutcome::RolledBack(e)
                }
            },
        }
    }

    pub fn pending_delete(&self) -> Option<Id> {
        self.pending_delete
    }

    pub fn is_confirming_delete(&self, id: Id) -> bool {
        self.pending_delete == Some(id)
    }

    /// First step of a delete; nothing is removed until confirmed
    pub fn request_delete(&mut self, id: Id) {
        self.pending_delete = Some(id);
    }

    pub fn decline_delete(&mut self) -> ApiError {
        self.pending_delete = None;
        ApiError::ConfirmationDeclined
    }

    /// Remove the confirmed row locally and hand back what to send
    pub fn confirm_delete(&mut self, collection: &mut Collection<T>) -> Option<PendingDelete<T>> {
        let id = self.pending_delete.take()?;
        if self.is_editing(id) {
            self.cancel();
        }
        let (slot, item) = collection.remove(id)?;
        Some(PendingDelete { slot, item })
    }

    pub fn resolve_delete(
        &mut self,
        collection: &mut Collection<T>,
        pending: PendingDelete<T>,
        result: Result<(), ApiError>,
    ) -> WriteOutcome {
        match (result, self.policy) {
            (Ok(()), _) => WriteOutcome::Deleted,
            (Err(e), WritePolicy::Optimistic) => WriteOutcome::Diverged(e),
            (Err(e), WritePolicy::Rollback) => {
                collection.restore(pending.slot, pending.item);
                WriteOutcome::RolledBack(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Order {
        id: Id,
        status: String,
    }

    impl Record for Order {
        fn id(&self) -> Id {
            self.id
        }
    }

    fn order(id: Id, status: &str) -> Order {
        Order { id, status: status.to_string() }
    }

    fn orders() -> Collection<Order> {
        Collection::from_items(vec![order(1, "pending"), order(2, "pending"), order(3, "shipped")])
    }

    fn ids(coll: &Collection<Order>) -> Vec<Id> {
        coll.items().iter().map(|o| o.id).collect()
    }

    fn offline() -> ApiError {
        ApiError::Network("offline".into())
    }

    #[test]
    fn test_new_edit_replaces_previous_buffer() {
        let coll = orders();
        let mut editor = InlineEditor::default();

        editor.begin_edit(coll.get(1).unwrap());
        editor.stage(|o| o.status = "cancelled".into());
        editor.begin_edit(coll.get(2).unwrap());

        assert!(editor.is_editing(2));
        assert!(!editor.is_editing(1));
        assert_eq!(editor.staged(), Some(&order(2, "pending")));
        let editing: Vec<Id> = coll.items().iter().map(|o| o.id).filter(|id| editor.is_editing(*id)).collect();
        assert_eq!(editing, vec![2]);
        assert_eq!(coll.get(1), Some(&order(1, "pending")));
    }

    #[test]
    fn test_stage_requires_active_edit() {
        let mut editor: InlineEditor<Order> = InlineEditor::default();
        assert!(!editor.stage(|o| o.status = "x".into()));
        assert_eq!(editor.state(), &EditState::Viewing);
    }

    #[test]
    fn test_successful_save_takes_server_copy() {
        let mut coll = orders();
        let mut editor = InlineEditor::default();
        editor.begin_edit(coll.get(1).unwrap());
        editor.stage(|o| o.status = "shipped".into());

        let pending = editor.submit(&mut coll).unwrap();
        assert_eq!(editor.state(), &EditState::Saving);
        assert_eq!(coll.get(1), Some(&order(1, "shipped")));

        let server = Order { id: 1, status: "in_transit".into() };
        let outcome = editor.resolve_save(&mut coll, pending, Ok(server.clone()));
        assert_eq!(outcome, WriteOutcome::Saved);
        assert_eq!(coll.get(1), Some(&server));
        assert_eq!(editor.state(), &EditState::Viewing);
        assert!(editor.buffer().is_none());
    }

    #[test]
    fn test_failed_save_rolls_back_and_keeps_buffer() {
        let mut coll = orders();
        let mut editor = InlineEditor::new(WritePolicy::Rollback);
        editor.begin_edit(coll.get(1).unwrap());
        editor.stage(|o| o.status = "shipped".into());
        let pending = editor.submit(&mut coll).unwrap();

        let outcome = editor.resolve_save(&mut coll, pending, Err(offline()));
        assert_eq!(outcome, WriteOutcome::RolledBack(offline()));
        assert_eq!(coll.get(1), Some(&order(1, "pending")));
        assert!(editor.error().is_some());
        assert_eq!(editor.staged(), Some(&order(1, "shipped")));

        // retry from the error state
        assert!(editor.stage(|o| o.status = "delivered".into()));
        assert_eq!(editor.state(), &EditState::Editing);
        assert!(editor.submit(&mut coll).is_some());
    }

    #[test]
    fn test_failed_save_optimistic_keeps_local_edit_but_reports_divergence() {
        let mut coll = orders();
        let mut editor = InlineEditor::new(WritePolicy::Optimistic);
        editor.begin_edit(coll.get(1).unwrap());
        editor.stage(|o| o.status = "shipped".into());
        let pending = editor.submit(&mut coll).unwrap();

        let outcome = editor.resolve_save(&mut coll, pending, Err(offline()));
        assert!(matches!(outcome, WriteOutcome::Diverged(_)));
        assert_eq!(coll.get(1), Some(&order(1, "shipped")));
        assert_eq!(editor.state(), &EditState::Viewing);
    }

    #[test]
    fn test_late_save_response_does_not_disturb_new_edit() {
        let mut coll = orders();
        let mut editor = InlineEditor::new(WritePolicy::Rollback);
        editor.begin_edit(coll.get(1).unwrap());
        editor.stage(|o| o.status = "shipped".into());
        let pending = editor.submit(&mut coll).unwrap();

        editor.begin_edit(coll.get(3).unwrap());
        editor.resolve_save(&mut coll, pending, Err(offline()));

        assert!(editor.is_editing(3));
        assert_eq!(editor.state(), &EditState::Editing);
        assert_eq!(coll.get(1), Some(&order(1, "pending")));
    }

    #[test]
    fn test_failed_save_keeps_rows_refetched_meanwhile() {
        let mut coll = orders();
        let mut editor = InlineEditor::new(WritePolicy::Rollback);
        editor.begin_edit(coll.get(1).unwrap());
        editor.stage(|o| o.status = "shipped".into());
        let pending = editor.submit(&mut coll).unwrap();

        let ticket = coll.begin_fetch();
        coll.finish_fetch(ticket, Ok(vec![order(1, "packed"), order(2, "pending"), order(3, "shipped")]));

        let outcome = editor.resolve_save(&mut coll, pending, Err(offline()));
        assert!(matches!(outcome, WriteOutcome::RolledBack(_)));
        assert_eq!(coll.get(1), Some(&order(1, "packed")));
        assert!(editor.error().is_some());
        assert_eq!(editor.staged(), Some(&order(1, "shipped")));
        assert_eq!(editor.buffer().map(|b| &b.original), Some(&order(1, "packed")));
    }

    #[test]
    fn test_cannot_reopen_row_while_saving() {
        let mut coll = orders();
        let mut editor = InlineEditor::new(WritePolicy::Rollback);
        assert!(editor.begin_edit(coll.get(1).unwrap()));
        editor.stage(|o| o.status = "shipped".into());
        let pending = editor.submit(&mut coll).unwrap();

        // the optimistic row must not become the new baseline
        assert!(!editor.begin_edit(coll.get(1).unwrap()));
        assert_eq!(editor.state(), &EditState::Saving);

        editor.resolve_save(&mut coll, pending, Err(offline()));
        assert_eq!(coll.get(1), Some(&order(1, "pending")));
        assert_eq!(editor.buffer().map(|b| &b.original), Some(&order(1, "pending")));
        assert!(editor.error().is_some());

        // other rows stay editable during a save
        let mut editor = InlineEditor::new(WritePolicy::Rollback);
        editor.begin_edit(coll.get(1).unwrap());
        editor.submit(&mut coll);
        assert!(editor.begin_edit(coll.get(2).unwrap()));
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut coll = orders();
        let mut editor = InlineEditor::default();

        assert!(editor.confirm_delete(&mut coll).is_none());

        editor.request_delete(2);
        assert!(editor.is_confirming_delete(2));
        assert_eq!(editor.decline_delete(), ApiError::ConfirmationDeclined);
        assert!(editor.confirm_delete(&mut coll).is_none());
        assert_eq!(ids(&coll), vec![1, 2, 3]);
    }

    #[test]
    fn test_optimistic_delete_survives_backend_failure() {
        let mut coll = orders();
        let mut editor = InlineEditor::new(WritePolicy::Optimistic);
        editor.request_delete(2);
        let pending = editor.confirm_delete(&mut coll).unwrap();
        assert_eq!(ids(&coll), vec![1, 3]);

        let outcome = editor.resolve_delete(&mut coll, pending, Err(offline()));
        assert!(matches!(outcome, WriteOutcome::Diverged(_)));
        assert_eq!(ids(&coll), vec![1, 3]);
    }

    #[test]
    fn test_rollback_delete_restores_position() {
        let mut coll = orders();
        let mut editor = InlineEditor::new(WritePolicy::Rollback);
        editor.request_delete(2);
        let pending = editor.confirm_delete(&mut coll).unwrap();
        assert_eq!(ids(&coll), vec![1, 3]);

        let outcome = editor.resolve_delete(&mut coll, pending, Err(offline()));
        assert!(outcome.error().is_some());
        assert_eq!(ids(&coll), vec![1, 2, 3]);
    }

    #[test]
    fn test_concurrent_failed_deletes_restore_original_order() {
        for first_to_fail in [1, 2] {
            let mut coll = orders();
            let mut editor = InlineEditor::new(WritePolicy::Rollback);
            editor.request_delete(1);
            let one = editor.confirm_delete(&mut coll).unwrap();
            editor.request_delete(2);
            let two = editor.confirm_delete(&mut coll).unwrap();
            assert_eq!(ids(&coll), vec![3]);

            let (a, b) = if first_to_fail == 1 { (one, two) } else { (two, one) };
            editor.resolve_delete(&mut coll, a, Err(offline()));
            editor.resolve_delete(&mut coll, b, Err(offline()));
            assert_eq!(ids(&coll), vec![1, 2, 3]);
        }
    }

    #[test]
    fn test_failed_delete_after_refetch_does_not_duplicate() {
        let mut coll = orders();
        let mut editor = InlineEditor::new(WritePolicy::Rollback);
        editor.request_delete(2);
        let pending = editor.confirm_delete(&mut coll).unwrap();

        let ticket = coll.begin_fetch();
        coll.finish_fetch(ticket, Ok(vec![order(1, "pending"), order(2, "pending"), order(3, "shipped")]));

        let outcome = editor.resolve_delete(&mut coll, pending, Err(offline()));
        assert!(matches!(outcome, WriteOutcome::RolledBack(_)));
        assert_eq!(ids(&coll), vec![1, 2, 3]);
    }

    #[test]
    fn test_deleting_edited_row_drops_buffer() {
        let mut coll = orders();
        let mut editor = InlineEditor::default();
        editor.begin_edit(coll.get(2).unwrap());
        editor.request_delete(2);
        let pending = editor.confirm_delete(&mut coll).unwrap();
        assert_eq!(editor.resolve_delete(&mut coll, pending, Ok(())), WriteOutcome::Deleted);
        assert!(editor.buffer().is_none());
        assert_eq!(editor.state(), &EditState::Viewing);
    }
}
