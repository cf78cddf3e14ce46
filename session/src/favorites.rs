//! Favorites store.

use cardvault_catalog::CardId;
use cardvault_storage::{KeyValueBackend, Persistence, keys};
use indexmap::IndexSet;

/// Starred card ids, persisted under [`keys::FAVORITES`] as a JSON array.
///
/// Iteration follows insertion order. Every membership change rewrites the
/// whole list; a failed write is logged and the in-memory set stays
/// authoritative.
#[derive(Debug)]
pub struct FavoritesStore<B> {
    storage: Persistence<B>,
    ids: IndexSet<CardId>,
}

impl<B: KeyValueBackend> FavoritesStore<B> {
    /// Load the persisted list. Absent or unreadable data gives an empty set.
    #[must_use]
    pub fn load(storage: Persistence<B>) -> Self {
        let stored: Vec<CardId> = storage.get(keys::FAVORITES).unwrap_or_default();
        let stored_len = stored.len();
        let ids: IndexSet<CardId> = stored.into_iter().collect();

        if ids.len() != stored_len {
            tracing::debug!(
                stored = stored_len,
                unique = ids.len(),
                "Collapsed duplicate favorites"
            );
        }

        Self { storage, ids }
    }

    /// Flip membership of `id`, returning whether it is now a favorite.
    pub fn toggle(&mut self, id: CardId) -> bool {
        if self.ids.shift_remove(&id) {
            self.persist();
            false
        } else {
            self.ids.insert(id);
            self.persist();
            true
        }
    }

    /// Star `id`. Returns `false` if it already was.
    pub fn add(&mut self, id: CardId) -> bool {
        let added = self.ids.insert(id);
        if added {
            self.persist();
        }
        added
    }

    /// Unstar `id`. Returns `false` if it was not starred.
    pub fn remove(&mut self, id: &CardId) -> bool {
        let removed = self.ids.shift_remove(id);
        if removed {
            self.persist();
        }
        removed
    }

    /// Whether `id` is starred.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.ids.contains(id)
    }

    /// Number of starred cards.
    #[must_use]
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is starred.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Starred ids in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CardId> {
        self.ids.iter()
    }

    /// Copy of the starred ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<CardId> {
        self.ids.iter().cloned().collect()
    }

    /// Unstar everything and delete the persisted record.
    pub fn clear(&mut self) {
        self.ids.clear();
        if self.storage.remove(keys::FAVORITES).is_err() {
            tracing::warn!("Favorites record could not be removed from storage");
        }
    }

    fn persist(&self) {
        if self.storage.set(keys::FAVORITES, &self.ids).is_err() {
            tracing::warn!(count = self.ids.len(), "Favorites kept in memory only");
        }
    }
}

impl<'a, B> IntoIterator for &'a FavoritesStore<B> {
    type Item = &'a CardId;
    type IntoIter = indexmap::set::Iter<'a, CardId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
