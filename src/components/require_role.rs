//! Route guards

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::models::Role;
use crate::store::{store_role, use_app_store};

/// Renders `children` only for a signed-in user.
///
/// With `role` set, users of any other role are sent to their own dashboard;
/// anonymous visitors always go to `/login`.
#[component]
pub fn RequireRole(#[prop(optional)] role: Option<Role>, children: ChildrenFn) -> impl IntoView {
    let store = use_app_store();

    move || match (store_role(&store), role) {
        (None, _) => view! { <Redirect path="/login" /> }.into_any(),
        (Some(actual), Some(wanted)) if actual != wanted => {
            view! { <Redirect path=actual.dashboard_path() /> }.into_any()
        }
        _ => children().into_any(),
    }
}
