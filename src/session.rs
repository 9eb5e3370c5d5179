//! Session Persistence
//!
//! Keeps the signed-in session in `localStorage` across reloads.

use leptos::logging::warn;

use crate::models::Session;

const SESSION_KEY: &str = "fithub.session";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn load_session() -> Option<Session> {
    let raw = local_storage()?.get_item(SESSION_KEY).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            warn!("[SESSION] Dropping unreadable stored session: {}", e);
            clear_session();
            None
        }
    }
}

pub fn persist_session(session: &Session) {
    let Some(storage) = local_storage() else { return };
    match serde_json::to_string(session) {
        Ok(raw) => {
            if storage.set_item(SESSION_KEY, &raw).is_err() {
                warn!("[SESSION] localStorage rejected the session");
            }
        }
        Err(e) => warn!("[SESSION] Could not encode session: {}", e),
    }
}

pub fn clear_session() {
    if let Some(storage) = local_storage() {
        if storage.remove_item(SESSION_KEY).is_err() {
            warn!("[SESSION] localStorage refused to drop the session");
        }
    }
}

/// Bearer token for API requests, if signed in
pub fn auth_token() -> Option<String> {
    load_session().map(|s| s.token)
}
