//! Per-user bookmark list with injected persistence

use crate::session::UserId;
use crate::storage::{SharedStore, StorageError};
use leptos::prelude::*;
use pris_core::ProductId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookmarkError {
    #[error("bookmarks require a signed-in user")]
    NotSignedIn,
    #[error("bookmark state is no longer alive")]
    Disposed,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Bookmarked product ids in the order they were added
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bookmarks(Vec<ProductId>);

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.0.contains(&id)
    }

    /// Returns `true` if the id is bookmarked afterwards
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if self.remove(id) {
            false
        } else {
            self.0.push(id);
            true
        }
    }

    /// Returns `false` if the id was already present
    pub fn add(&mut self, id: ProductId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.0.push(id);
        true
    }

    /// Returns `false` if the id was not present
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.0.len();
        self.0.retain(|b| *b != id);
        self.0.len() != before
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn ids(&self) -> &[ProductId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ProductId> for Bookmarks {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        let mut bookmarks = Self::new();
        for id in iter {
            bookmarks.add(id);
        }
        bookmarks
    }
}

// ============================================================================
// REPOSITORY
// ============================================================================

/// Loads and saves bookmark lists, one key per user
#[derive(Clone)]
pub struct BookmarkRepository {
    store: SharedStore,
}

impl BookmarkRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn key(user: &UserId) -> String {
        format!("bookmarked-products:{}", user)
    }

    pub fn load(&self, user: &UserId) -> Result<Bookmarks, StorageError> {
        let key = Self::key(user);
        match self.store.get(&key)? {
            None => Ok(Bookmarks::new()),
            Some(raw) => {
                let ids: Vec<ProductId> =
                    serde_json::from_str(&raw).map_err(|e| StorageError::Malformed {
                        key: key.clone(),
                        reason: e.to_string(),
                    })?;
                Ok(ids.into_iter().collect())
            }
        }
    }

    pub fn save(&self, user: &UserId, bookmarks: &Bookmarks) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(bookmarks).map_err(|e| StorageError::Backend(e.to_string()))?;
        self.store.set(&Self::key(user), &json)
    }
}

// ============================================================================
// REACTIVE SERVICE
// ============================================================================

/// Reactive bookmark state for the signed-in user
#[derive(Clone)]
pub struct BookmarkService {
    repository: BookmarkRepository,
    user: RwSignal<Option<UserId>>,
    bookmarks: RwSignal<Bookmarks>,
}

impl BookmarkService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            repository: BookmarkRepository::new(store),
            user: RwSignal::new(None),
            bookmarks: RwSignal::new(Bookmarks::new()),
        }
    }

    /// Swap to the given user's list, or clear it on sign-out
    pub fn on_session_change(&self, user: Option<&UserId>) {
        match user {
            Some(user) => {
                let loaded = self.repository.load(user).unwrap_or_else(|e| {
                    tracing::warn!("Failed to load bookmarks for {}: {}", user, e);
                    Bookmarks::new()
                });
                tracing::debug!("Loaded {} bookmarks for {}", loaded.len(), user);
                self.user.set(Some(user.clone()));
                self.bookmarks.set(loaded);
            }
            None => {
                self.user.set(None);
                self.bookmarks.set(Bookmarks::new());
            }
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.with(Option::is_some)
    }

    pub fn is_bookmarked(&self, id: ProductId) -> bool {
        self.bookmarks.with(|b| b.contains(id))
    }

    pub fn list(&self) -> Vec<ProductId> {
        self.bookmarks.with(|b| b.ids().to_vec())
    }

    pub fn count(&self) -> usize {
        self.bookmarks.with(Bookmarks::len)
    }

    /// Returns whether the product is bookmarked afterwards
    pub fn toggle(&self, id: ProductId) -> Result<bool, BookmarkError> {
        self.mutate(|b| b.toggle(id))
    }

    pub fn add(&self, id: ProductId) -> Result<(), BookmarkError> {
        self.mutate(|b| b.add(id)).map(|_| ())
    }

    pub fn remove(&self, id: ProductId) -> Result<(), BookmarkError> {
        self.mutate(|b| b.remove(id)).map(|_| ())
    }

    pub fn clear(&self) -> Result<(), BookmarkError> {
        self.mutate(Bookmarks::clear)
    }

    // The in-memory list keeps the change even when persisting fails
    fn mutate<T>(&self, f: impl FnOnce(&mut Bookmarks) -> T) -> Result<T, BookmarkError> {
        let user = self.user.get_untracked().ok_or(BookmarkError::NotSignedIn)?;
        let out = self.bookmarks.try_update(f).ok_or(BookmarkError::Disposed)?;
        self.bookmarks
            .with_untracked(|b| self.repository.save(&user, b))?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};
    use leptos::reactive::owner::Owner;
    use std::sync::Arc;

    fn id(n: u64) -> ProductId {
        ProductId::new(n)
    }

    #[test]
    fn test_bookmarks_toggle_add_remove() {
        let mut b = Bookmarks::new();
        assert!(b.toggle(id(1)));
        assert!(b.add(id(2)));
        assert!(!b.add(id(2)));
        assert_eq!(b.ids(), &[id(1), id(2)]);

        assert!(!b.toggle(id(1)));
        assert_eq!(b.ids(), &[id(2)]);

        assert!(!b.remove(id(9)));
        b.clear();
        assert!(b.is_empty());
    }

    #[test]
    fn test_bookmarks_dedupe_on_collect() {
        let b: Bookmarks = [id(3), id(1), id(3)].into_iter().collect();
        assert_eq!(b.ids(), &[id(3), id(1)]);
    }

    #[test]
    fn test_repository_roundtrip_per_user() {
        let store = MemoryStore::new();
        let repo = BookmarkRepository::new(Arc::new(store.clone()));
        let kari = UserId::new("kari");
        let ola = UserId::new("ola");

        let b: Bookmarks = [id(1881), id(42)].into_iter().collect();
        repo.save(&kari, &b).unwrap();

        assert_eq!(
            store.get("bookmarked-products:kari").unwrap().as_deref(),
            Some("[1881,42]")
        );
        assert_eq!(repo.load(&kari).unwrap(), b);
        assert!(repo.load(&ola).unwrap().is_empty());
    }

    #[test]
    fn test_repository_malformed_value() {
        let store = MemoryStore::new();
        store.set("bookmarked-products:kari", "{oops").unwrap();
        let repo = BookmarkRepository::new(Arc::new(store));

        assert!(matches!(
            repo.load(&UserId::new("kari")),
            Err(StorageError::Malformed { .. })
        ));
    }

    #[test]
    fn test_service_requires_session() {
        Owner::new().with(|| {
            let service = BookmarkService::new(Arc::new(MemoryStore::new()));
            assert!(!service.is_signed_in());
            assert_eq!(service.toggle(id(1)), Err(BookmarkError::NotSignedIn));
            assert_eq!(service.count(), 0);
        });
    }

    #[test]
    fn test_service_persists_mutations() {
        Owner::new().with(|| {
            let store = MemoryStore::new();
            let service = BookmarkService::new(Arc::new(store.clone()));
            let kari = UserId::new("kari");
            service.on_session_change(Some(&kari));

            assert_eq!(service.toggle(id(7)), Ok(true));
            service.add(id(8)).unwrap();
            assert!(service.is_bookmarked(id(7)));
            assert_eq!(service.list(), vec![id(7), id(8)]);
            assert_eq!(
                store.get("bookmarked-products:kari").unwrap().as_deref(),
                Some("[7,8]")
            );

            service.remove(id(7)).unwrap();
            assert_eq!(service.list(), vec![id(8)]);

            service.clear().unwrap();
            assert_eq!(service.count(), 0);
            assert_eq!(
                store.get("bookmarked-products:kari").unwrap().as_deref(),
                Some("[]")
            );
        });
    }

    #[test]
    fn test_session_change_swaps_lists() {
        Owner::new().with(|| {
            let store = MemoryStore::new();
            store.set("bookmarked-products:ola", "[5]").unwrap();
            let service = BookmarkService::new(Arc::new(store));
            let kari = UserId::new("kari");
            let ola = UserId::new("ola");

            service.on_session_change(Some(&kari));
            service.add(id(1)).unwrap();

            service.on_session_change(Some(&ola));
            assert_eq!(service.list(), vec![id(5)]);

            service.on_session_change(None);
            assert!(!service.is_signed_in());
            assert!(service.list().is_empty());

            service.on_session_change(Some(&kari));
            assert_eq!(service.list(), vec![id(1)]);
        });
    }

    #[test]
    fn test_corrupt_list_loads_empty() {
        Owner::new().with(|| {
            let store = MemoryStore::new();
            store.set("bookmarked-products:kari", "garbage").unwrap();
            let service = BookmarkService::new(Arc::new(store));

            service.on_session_change(Some(&UserId::new("kari")));
            assert!(service.is_signed_in());
            assert_eq!(service.count(), 0);
        });
    }
}
