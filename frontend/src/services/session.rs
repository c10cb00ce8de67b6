use gloo::storage::{LocalStorage, Storage};
use shared::SessionInfo;

/// Fixed local-storage key holding the active session
const SESSION_KEY: &str = "staybook_session";

/// Restore the persisted session, if any
pub fn load() -> Option<SessionInfo> {
    LocalStorage::get(SESSION_KEY).ok()
}

/// Persist a freshly issued session across page loads
pub fn save(session: &SessionInfo) {
    if let Err(e) = LocalStorage::set(SESSION_KEY, session) {
        gloo::console::error!("Failed to persist session:", e.to_string());
    }
}

/// Drop the persisted session (logout)
pub fn clear() {
    LocalStorage::delete(SESSION_KEY);
}
