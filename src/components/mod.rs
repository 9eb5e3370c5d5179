//! UI Components
//!
//! Reusable building blocks shared by the pages.

mod delete_confirm_button;
mod form_field;
mod list_toolbar;
mod modal_frame;
mod nav_bar;
mod pagination_bar;
mod require_role;
mod row_actions;
mod search_bar;
mod status_select;
mod toast_host;

pub use delete_confirm_button::DeleteConfirmButton;
pub use form_field::{FormError, FormField, FormTextArea};
pub use list_toolbar::ListToolbar;
pub use modal_frame::ModalFrame;
pub use nav_bar::NavBar;
pub use pagination_bar::PaginationBar;
pub use require_role::RequireRole;
pub use row_actions::RowActions;
pub use search_bar::SearchBar;
pub use status_select::{StatusBadge, StatusSelect};
pub use toast_host::ToastHost;
