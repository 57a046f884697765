//! # pris-state
//!
//! Reactive state management for PrisSjekk.
//! Leptos signals hold the listing, the session and the bookmark list;
//! persistence goes through the [`KeyValueStore`] port.

pub mod bookmarks;
pub mod catalog;
pub mod session;
pub mod storage;

pub use bookmarks::*;
pub use catalog::*;
pub use session::*;
pub use storage::*;

use leptos::prelude::*;
use std::sync::Arc;

/// Delay between the last keystroke and the search request
pub const SEARCH_DEBOUNCE_MS: u32 = 500;

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Global application state with reactive signals
#[derive(Clone)]
pub struct AppState {
    /// Product listing state
    pub catalog: CatalogState,
    /// Bookmarks of the signed-in user
    pub bookmarks: BookmarkService,
    /// Signed-in user, if any
    pub user: RwSignal<Option<SessionUser>>,
    /// Current error message
    pub error: RwSignal<Option<String>>,
    session: SharedSession,
}

impl AppState {
    /// State backed by the browser's local storage
    pub fn new() -> Self {
        Self::with_store(Arc::new(LocalStorageStore))
    }

    /// State backed by the given store, for both the session and bookmarks
    pub fn with_store(store: SharedStore) -> Self {
        let session: SharedSession = Arc::new(StoredSession::new(store.clone()));
        let state = Self {
            catalog: CatalogState::new(),
            bookmarks: BookmarkService::new(store),
            user: RwSignal::new(None),
            error: RwSignal::new(None),
            session,
        };
        state.refresh_session();
        state
    }

    // ========================================================================
    // Session
    // ========================================================================

    /// Re-read the session record and notify the bookmark service
    pub fn refresh_session(&self) {
        let user = self.session.current().unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable session: {}", e);
            None
        });
        self.set_user(user);
    }

    pub fn sign_in(&self, user: SessionUser) -> Result<(), StorageError> {
        self.session.sign_in(&user)?;
        tracing::info!("Signed in as {}", user.id);
        self.set_user(Some(user));
        Ok(())
    }

    pub fn sign_out(&self) -> Result<(), StorageError> {
        self.session.sign_out()?;
        tracing::info!("Signed out");
        self.set_user(None);
        Ok(())
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.with(Option::is_some)
    }

    fn set_user(&self, user: Option<SessionUser>) {
        let changed = self.user.with_untracked(|current| {
            current.as_ref().map(|u| &u.id) != user.as_ref().map(|u| &u.id)
        });
        if changed {
            self.bookmarks.on_session_change(user.as_ref().map(|u| &u.id));
        }
        self.user.set(user);
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    /// Set error message
    pub fn set_error(&self, msg: impl Into<String>) {
        self.error.set(Some(msg.into()));
    }

    /// Clear error
    pub fn clear_error(&self) {
        self.error.set(None);
    }

    /// Check if has error
    pub fn has_error(&self) -> bool {
        self.error.with(Option::is_some)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CONTEXT HELPERS
// ============================================================================

/// Provide app state context to component tree
pub fn provide_app_state() -> AppState {
    let state = AppState::new();
    provide_context(state.clone());
    state
}

/// Use app state from context
pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::reactive::owner::Owner;
    use pris_core::ProductId;

    #[test]
    fn test_session_restored_on_start() {
        Owner::new().with(|| {
            let store = MemoryStore::new();
            store
                .set(SESSION_KEY, r#"{"id":"kari","firstName":"Kari"}"#)
                .unwrap();
            store.set("bookmarked-products:kari", "[1881]").unwrap();

            let state = AppState::with_store(Arc::new(store));
            assert!(state.is_signed_in());
            assert!(state.bookmarks.is_bookmarked(ProductId::new(1881)));
        });
    }

    #[test]
    fn test_sign_out_clears_bookmarks_but_keeps_them_stored() {
        Owner::new().with(|| {
            let store = MemoryStore::new();
            let state = AppState::with_store(Arc::new(store.clone()));
            assert!(!state.is_signed_in());

            state.sign_in(SessionUser::new("kari")).unwrap();
            state.bookmarks.add(ProductId::new(7)).unwrap();

            state.sign_out().unwrap();
            assert!(!state.is_signed_in());
            assert_eq!(state.bookmarks.count(), 0);
            assert_eq!(store.get(SESSION_KEY).unwrap(), None);
            assert_eq!(
                store.get("bookmarked-products:kari").unwrap().as_deref(),
                Some("[7]")
            );

            state.sign_in(SessionUser::new("kari")).unwrap();
            assert_eq!(state.bookmarks.list(), vec![ProductId::new(7)]);
        });
    }

    #[test]
    fn test_error_message() {
        Owner::new().with(|| {
            let state = AppState::with_store(Arc::new(MemoryStore::new()));
            state.set_error("Kunne ikke laste produktet");
            assert!(state.has_error());
            state.clear_error();
            assert!(!state.has_error());
        });
    }
}
