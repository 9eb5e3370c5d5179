//! Filtered List + Inline Editor
//!
//! The pattern shared by every dashboard table: a fetched collection, a
//! filtered/sorted projection, page slicing, single-row editing and modal
//! drafts. Everything here except `controller` is framework-free.

mod cache;
mod collection;
mod controller;
mod editor;
mod modal;
mod pagination;
mod projector;

pub use cache::ResourceCache;
pub use collection::{Collection, FetchOutcome, Slot, Ticket};
pub use controller::ListController;
pub use editor::{EditBuffer, EditState, InlineEditor, PendingDelete, PendingSave, WriteOutcome, WritePolicy};
pub use modal::{Draft, Modal};
pub use pagination::Pager;
pub use projector::{matches, project, status_options, FilterField, FilterState, SortKey, StatusFilter};

/// Server-assigned identity
pub type Id = u32;

/// Anything held in a `Collection`
pub trait Record: Clone {
    fn id(&self) -> Id;
}

/// A record that can be searched, filtered and sorted by the projector
pub trait Projectable: Record {
    /// Lower-casing happens in the projector
    fn search_fields(&self) -> Vec<String>;

    fn status(&self) -> &str;

    fn category(&self) -> &str {
        ""
    }

    /// ISO-8601 timestamp, compared lexicographically
    fn date(&self) -> Option<&str> {
        None
    }

    fn title(&self) -> &str;
}
