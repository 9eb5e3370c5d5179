//! Modal Drafts
//!
//! A modal is open exactly while it holds a `Draft`. Closing drops the draft;
//! only `save` turns it back into a committed value.

/// Staged copy of a `T`, kept apart from the committed value
#[derive(Debug, Clone, PartialEq)]
pub struct Draft<T> {
    value: T,
    dirty: bool,
}

impl<T: Clone> Draft<T> {
    pub fn seed(from: &T) -> Self {
        Self { value: from.clone(), dirty: false }
    }
}

impl<T: Default> Draft<T> {
    pub fn empty() -> Self {
        Self { value: T::default(), dirty: false }
    }
}

impl<T> Draft<T> {
    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn edit(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn commit(self) -> T {
        self.value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Modal<T> {
    draft: Option<Draft<T>>,
}

impl<T> Default for Modal<T> {
    fn default() -> Self {
        Self { draft: None }
    }
}

impl<T> Modal<T> {
    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&Draft<T>> {
        self.draft.as_ref()
    }

    /// Read a field of the staged form, falling back when closed
    pub fn field<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.draft.as_ref().map(|d| f(d.get()))
    }

    pub fn edit(&mut self, f: impl FnOnce(&mut T)) {
        if let Some(draft) = self.draft.as_mut() {
            draft.edit(f);
        }
    }

    /// Discard the staged form
    pub fn close(&mut self) {
        self.draft = None;
    }

    /// Close and yield the staged value for submission
    pub fn save(&mut self) -> Option<T> {
        self.draft.take().map(Draft::commit)
    }
}

impl<T: Clone> Modal<T> {
    /// Edit-type modals start from the current authoritative value
    pub fn open_seeded(&mut self, current: &T) {
        self.draft = Some(Draft::seed(current));
    }

    /// Read the staged value without closing
    pub fn snapshot(&self) -> Option<T> {
        self.draft.as_ref().map(|d| d.get().clone())
    }
}

impl<T: Default> Modal<T> {
    /// Create-type modals always start blank
    pub fn open_empty(&mut self) {
        self.draft = Some(Draft::empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Profile {
        name: String,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct PasswordForm {
        current: String,
        new: String,
    }

    #[test]
    fn test_close_without_saving_leaves_authoritative_untouched() {
        let committed = Profile { name: "A".into() };
        let mut modal = Modal::default();

        modal.open_seeded(&committed);
        modal.edit(|p: &mut Profile| p.name = "B".into());
        assert_eq!(modal.field(|p| p.name.clone()), Some("B".to_string()));

        modal.close();
        assert!(!modal.is_open());
        assert_eq!(committed.name, "A");

        modal.open_seeded(&committed);
        assert_eq!(modal.field(|p| p.name.clone()), Some("A".to_string()));
        assert!(!modal.draft().unwrap().is_dirty());
    }

    #[test]
    fn test_save_yields_staged_value_and_closes() {
        let mut modal = Modal::default();
        modal.open_seeded(&Profile { name: "A".into() });
        modal.edit(|p| p.name = "B".into());

        assert_eq!(modal.save(), Some(Profile { name: "B".into() }));
        assert!(!modal.is_open());
        assert_eq!(modal.save(), None);
    }

    #[test]
    fn test_create_modal_resets_each_open() {
        let mut modal: Modal<PasswordForm> = Modal::default();
        modal.open_empty();
        modal.edit(|f| {
            f.current = "old-secret".into();
            f.new = "new-secret".into();
        });
        modal.close();

        modal.open_empty();
        assert_eq!(modal.snapshot(), Some(PasswordForm::default()));
    }

    #[test]
    fn test_edit_on_closed_modal_is_ignored() {
        let mut modal: Modal<Profile> = Modal::default();
        modal.edit(|p| p.name = "ghost".into());
        assert!(!modal.is_open());
    }
}
