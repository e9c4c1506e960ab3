use crate::models::{FavoriteEntry, Listing};
use crate::services::storage::{lock, SharedStorage, StorageError};
use std::collections::BTreeMap;

/// The user's wishlist
///
/// Keeps an in-memory view ordered by listing id on top of an injected
/// [`SharedStorage`]. Mutations are written to storage first and only touch
/// the in-memory view once the write succeeded, so a storage error leaves
/// both sides agreeing on the previous state.
pub struct FavoritesStore {
    storage: SharedStorage,
    entries: BTreeMap<u32, FavoriteEntry>,
}

impl FavoritesStore {
    /// Load existing entries from storage
    pub fn load(storage: SharedStorage) -> Result<Self, StorageError> {
        let entries = lock(&storage)?
            .get_all_favorites()?
            .into_iter()
            .map(|entry| (entry.id(), entry))
            .collect::<BTreeMap<_, _>>();

        tracing::debug!(count = entries.len(), "wishlist loaded");
        Ok(Self { storage, entries })
    }

    /// Save a snapshot of `listing`
    ///
    /// Returns `Ok(false)` without writing if the listing is already saved.
    pub fn add(&mut self, listing: &Listing) -> Result<bool, StorageError> {
        if self.entries.contains_key(&listing.id) {
            tracing::debug!(id = listing.id, "already in wishlist");
            return Ok(false);
        }

        let entry = FavoriteEntry::new(listing.clone());
        lock(&self.storage)?.put_favorite(&entry)?;
        self.entries.insert(entry.id(), entry);

        tracing::info!(id = listing.id, title = %listing.title(), "added to wishlist");
        Ok(true)
    }

    /// Returns `Ok(false)` without writing if `id` was not saved
    pub fn remove(&mut self, id: u32) -> Result<bool, StorageError> {
        if !self.entries.contains_key(&id) {
            return Ok(false);
        }

        lock(&self.storage)?.delete_favorite(id)?;
        self.entries.remove(&id);

        tracing::info!(id, "removed from wishlist");
        Ok(true)
    }

    /// Empty the wishlist, returning how many entries were dropped
    pub fn clear(&mut self) -> Result<usize, StorageError> {
        lock(&self.storage)?.clear_favorites()?;
        let cleared = self.entries.len();
        self.entries.clear();

        tracing::info!(cleared, "wishlist cleared");
        Ok(cleared)
    }

    /// All saved entries, ordered by listing id
    pub fn list(&self) -> Vec<FavoriteEntry> {
        self.entries.values().cloned().collect()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
