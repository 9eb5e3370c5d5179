//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::config::app_config;
use crate::list::{Id, ResourceCache};
use crate::models::{Role, Session, Trainer};
use crate::session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in user, if any
    pub session: Option<Session>,
    /// Visible notifications, oldest first
    pub toasts: Vec<Toast>,
    pub next_toast_id: u32,
    /// Trainer profiles shown on course pages, cleared on navigation
    pub trainer_cache: ResourceCache<Id, Trainer>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: session::load_session(),
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Session
// ========================

pub fn store_session(store: &AppStore) -> Option<Session> {
    store.session().get()
}

pub fn store_role(store: &AppStore) -> Option<Role> {
    store.session().with(|s| s.as_ref().map(|s| s.role))
}

pub fn store_sign_in(store: &AppStore, new_session: Session) {
    session::persist_session(&new_session);
    store.session().set(Some(new_session));
}

pub fn store_sign_out(store: &AppStore) {
    session::clear_session();
    store.session().set(None);
    store.trainer_cache().write().clear();
}

// ========================
// Notifications
// ========================

/// Show a toast that dismisses itself after the configured lifetime
pub fn notify(store: &AppStore, kind: ToastKind, message: impl Into<String>) {
    let id = {
        let next_field = store.next_toast_id();
        let mut next = next_field.write();
        *next += 1;
        *next
    };
    store.toasts().write().push(Toast { id, kind, message: message.into() });

    let store = *store;
    let lifetime = app_config().toast_ms;
    spawn_local(async move {
        TimeoutFuture::new(lifetime).await;
        store_dismiss_toast(&store, id);
    });
}

pub fn store_dismiss_toast(store: &AppStore, id: u32) {
    store.toasts().write().retain(|t| t.id != id);
}

// ========================
// Trainer cache
// ========================

pub fn store_cached_trainer(store: &AppStore, id: Id) -> Option<Trainer> {
    store.trainer_cache().with(|c| c.get(&id).cloned())
}

pub fn store_cache_generation(store: &AppStore) -> u64 {
    store.trainer_cache().with(|c| c.generation())
}

/// Returns false when the cache was cleared after `generation` was read
pub fn store_cache_trainer(store: &AppStore, generation: u64, trainer: Trainer) -> bool {
    store.trainer_cache().write().insert_at(generation, trainer.id, trainer)
}

pub fn store_invalidate_cache(store: &AppStore) {
    store.trainer_cache().write().clear();
}
