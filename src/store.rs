use crate::catalog::{ALL_CATEGORIES, Catalog, FilterState, Item, filter_items};
use crate::storage::{CATEGORY_KEY, FAVORITES_KEY, KeyValueStore, SEARCH_KEY};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
}

/// Filter state and favorites over a fixed catalog, written through to
/// `storage` after every change.
#[derive(Debug)]
pub struct CatalogStore<S: KeyValueStore> {
    catalog: Catalog,
    filter: FilterState,
    favorites: Vec<Item>,
    storage: S,
}

impl<S: KeyValueStore> CatalogStore<S> {
    /// Restores persisted state from `storage`. Missing or unreadable values
    /// fall back to an empty search, the `all` category and no favorites.
    pub fn load(catalog: Catalog, storage: S) -> Self {
        let search_text = read_value(&storage, SEARCH_KEY).unwrap_or_default();
        let selected_category = read_value(&storage, CATEGORY_KEY)
            .filter(|category| !category.is_empty())
            .unwrap_or_else(|| ALL_CATEGORIES.to_string());
        let favorites = read_value(&storage, FAVORITES_KEY)
            .map(|raw| parse_favorites(&raw))
            .unwrap_or_default();

        for orphan in favorites.iter().filter(|fav| catalog.find(fav.id).is_none()) {
            tracing::warn!(id = orphan.id, title = %orphan.title, "favorite not in catalog");
        }

        tracing::info!(
            search = %search_text,
            category = %selected_category,
            favorites = favorites.len(),
            "restored catalog state"
        );

        Self {
            catalog,
            filter: FilterState::new(search_text, selected_category),
            favorites,
            storage,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn search_text(&self) -> &str {
        &self.filter.search_text
    }

    pub fn selected_category(&self) -> &str {
        &self.filter.selected_category
    }

    pub fn favorites(&self) -> &[Item] {
        &self.favorites
    }

    pub fn favorite_count(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.iter().any(|fav| fav.id == id)
    }

    pub fn categories(&self) -> Vec<String> {
        self.catalog.categories()
    }

    pub fn filtered_items(&self) -> Vec<&Item> {
        filter_items(&self.catalog.items, &self.filter)
    }

    /// Stores `text` verbatim; trimming only happens when matching.
    pub fn set_search_text(&mut self, text: &str) {
        self.filter.search_text = text.to_string();
        self.persist(SEARCH_KEY, text);
    }

    pub fn set_category(&mut self, category: &str) -> Result<(), StoreError> {
        if !self.catalog.has_category(category) {
            return Err(StoreError::UnknownCategory(category.to_string()));
        }
        self.filter.selected_category = category.to_string();
        self.persist(CATEGORY_KEY, category);
        Ok(())
    }

    pub fn next_category(&mut self) {
        let categories = self.categories();
        let next = match self.category_position(&categories) {
            Some(index) => (index + 1) % categories.len(),
            None => 0,
        };
        self.select_category_at(&categories, next);
    }

    pub fn previous_category(&mut self) {
        let categories = self.categories();
        let previous = match self.category_position(&categories) {
            Some(0) | None => categories.len() - 1,
            Some(index) => index - 1,
        };
        self.select_category_at(&categories, previous);
    }

    fn category_position(&self, categories: &[String]) -> Option<usize> {
        categories
            .iter()
            .position(|category| *category == self.filter.selected_category)
    }

    fn select_category_at(&mut self, categories: &[String], index: usize) {
        if let Some(category) = categories.get(index) {
            // Entries come from the catalog itself.
            if let Err(e) = self.set_category(category) {
                tracing::warn!(error = %e, "category cycling rejected");
            }
        }
    }

    /// Removes `item` if a favorite with the same id exists, otherwise appends it.
    /// Returns whether the item is a favorite afterwards.
    pub fn toggle_favorite(&mut self, item: &Item) -> bool {
        let now_favorite = if self.is_favorite(item.id) {
            self.favorites.retain(|fav| fav.id != item.id);
            false
        } else {
            self.favorites.push(item.clone());
            true
        };
        self.persist_favorites();
        now_favorite
    }

    pub fn clear_favorites(&mut self) {
        self.favorites.clear();
        self.persist_favorites();
    }

    fn persist_favorites(&mut self) {
        match serde_json::to_string(&self.favorites) {
            Ok(json) => self.persist(FAVORITES_KEY, &json),
            Err(e) => tracing::warn!(error = %e, "failed to serialize favorites"),
        }
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(e) = self.storage.write(key, value) {
            tracing::warn!(key, error = %e, "failed to persist value");
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

fn read_value<S: KeyValueStore>(storage: &S, key: &str) -> Option<String> {
    match storage.read(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read persisted value");
            None
        }
    }
}

fn parse_favorites(raw: &str) -> Vec<Item> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<Item>>(raw) {
        Ok(favorites) => favorites,
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable favorites");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore, StorageError};
    use tempfile::TempDir;

    /// Storage whose every read and write fails.
    #[derive(Debug)]
    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::InvalidKey(key.to_string()))
        }

        fn write(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }

    fn new_store() -> CatalogStore<MemoryStore> {
        CatalogStore::load(Catalog::builtin(), MemoryStore::new())
    }

    fn item(store: &CatalogStore<MemoryStore>, id: u32) -> Item {
        store.catalog().find(id).cloned().unwrap()
    }

    fn ids(items: &[&Item]) -> Vec<u32> {
        items.iter().map(|item| item.id).collect()
    }

    #[test]
    fn test_load_defaults_from_empty_storage() {
        let store = new_store();
        assert_eq!(store.search_text(), "");
        assert_eq!(store.selected_category(), "all");
        assert!(store.favorites().is_empty());
        assert_eq!(store.filtered_items().len(), 8);
    }

    #[test]
    fn test_load_restores_persisted_values() {
        let storage = MemoryStore::new()
            .with_value(SEARCH_KEY, " the ")
            .with_value(CATEGORY_KEY, "Novel")
            .with_value(
                FAVORITES_KEY,
                r#"[{"id":3,"title":"Animal Farm","author":"George Orwell","category":"Politics"}]"#,
            );
        let store = CatalogStore::load(Catalog::builtin(), storage);

        assert_eq!(store.search_text(), " the ");
        assert_eq!(store.selected_category(), "Novel");
        assert_eq!(ids(&store.filtered_items()), vec![1]);
        assert_eq!(store.favorites().len(), 1);
        assert_eq!(store.favorites()[0].id, 3);
    }

    #[test]
    fn test_empty_persisted_category_means_all() {
        let storage = MemoryStore::new().with_value(CATEGORY_KEY, "");
        let store = CatalogStore::load(Catalog::builtin(), storage);
        assert_eq!(store.selected_category(), "all");
    }

    #[test]
    fn test_corrupt_favorites_recover_to_empty() {
        for raw in ["not json", "{\"id\":1}", "[{\"id\":\"x\"}]", "", "null"] {
            let storage = MemoryStore::new().with_value(FAVORITES_KEY, raw);
            let store = CatalogStore::load(Catalog::builtin(), storage);
            assert!(store.favorites().is_empty(), "input {raw:?}");
        }
    }

    #[test]
    fn test_orphaned_favorite_is_kept() {
        let storage = MemoryStore::new().with_value(
            FAVORITES_KEY,
            r#"[{"id":42,"title":"Lost","author":"Nobody","category":"Gone"}]"#,
        );
        let store = CatalogStore::load(Catalog::builtin(), storage);
        assert_eq!(store.favorites().len(), 1);
        assert!(store.is_favorite(42));
        assert_eq!(store.filtered_items().len(), 8);
    }

    #[test]
    fn test_set_search_text_persists_raw_text() {
        let mut store = new_store();
        store.set_search_text("  1984 ");
        assert_eq!(store.search_text(), "  1984 ");
        assert_eq!(ids(&store.filtered_items()), vec![6]);
        assert_eq!(
            store.storage().read(SEARCH_KEY).unwrap().as_deref(),
            Some("  1984 ")
        );
    }

    #[test]
    fn test_set_category_persists() {
        let mut store = new_store();
        store.set_category("Politics").unwrap();
        assert_eq!(ids(&store.filtered_items()), vec![3]);
        assert_eq!(
            store.storage().read(CATEGORY_KEY).unwrap().as_deref(),
            Some("Politics")
        );
    }

    #[test]
    fn test_set_unknown_category_is_rejected() {
        let mut store = new_store();
        store.set_category("Novel").unwrap();
        assert_eq!(
            store.set_category("Cookbooks"),
            Err(StoreError::UnknownCategory("Cookbooks".to_string()))
        );
        assert_eq!(store.selected_category(), "Novel");
    }

    #[test]
    fn test_toggle_favorite_round_trip() {
        let mut store = new_store();
        let first = item(&store, 1);
        let third = item(&store, 3);

        assert!(store.toggle_favorite(&first));
        let before = store.favorites().to_vec();

        assert!(store.toggle_favorite(&third));
        assert_eq!(store.favorite_count(), 2);
        assert_eq!(store.favorites().iter().filter(|fav| fav.id == 3).count(), 1);

        assert!(!store.toggle_favorite(&third));
        assert_eq!(store.favorites(), before.as_slice());
    }

    #[test]
    fn test_favorites_keep_insertion_order() {
        let mut store = new_store();
        for id in [5, 2, 7] {
            let next = item(&store, id);
            store.toggle_favorite(&next);
        }
        let order: Vec<u32> = store.favorites().iter().map(|fav| fav.id).collect();
        assert_eq!(order, vec![5, 2, 7]);
    }

    #[test]
    fn test_toggle_favorite_persists_json() {
        let mut store = new_store();
        let animal_farm = item(&store, 3);
        store.toggle_favorite(&animal_farm);

        let raw = store.storage().read(FAVORITES_KEY).unwrap().unwrap();
        let persisted: Vec<Item> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, vec![animal_farm]);
    }

    #[test]
    fn test_clear_favorites() {
        let mut store = new_store();
        for id in [1, 4, 8] {
            let next = item(&store, id);
            store.toggle_favorite(&next);
        }
        store.clear_favorites();
        assert!(store.favorites().is_empty());
        assert_eq!(store.storage().read(FAVORITES_KEY).unwrap().as_deref(), Some("[]"));

        store.clear_favorites();
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn test_filter_unaffected_by_favorites() {
        let mut store = new_store();
        store.set_search_text("the");
        let before = ids(&store.filtered_items());
        let prince = item(&store, 5);
        store.toggle_favorite(&prince);
        assert_eq!(ids(&store.filtered_items()), before);
    }

    #[test]
    fn test_next_and_previous_category_wrap() {
        let mut store = new_store();
        store.next_category();
        assert_eq!(store.selected_category(), "Novel");
        store.previous_category();
        assert_eq!(store.selected_category(), "all");
        store.previous_category();
        assert_eq!(store.selected_category(), "Modern Classic");
        store.next_category();
        assert_eq!(store.selected_category(), "all");
    }

    #[test]
    fn test_cycling_from_unknown_persisted_category() {
        let storage = MemoryStore::new().with_value(CATEGORY_KEY, "Removed");
        let mut store = CatalogStore::load(Catalog::builtin(), storage);
        assert!(store.filtered_items().is_empty());
        store.next_category();
        assert_eq!(store.selected_category(), "all");

        let storage = MemoryStore::new().with_value(CATEGORY_KEY, "Removed");
        let mut store = CatalogStore::load(Catalog::builtin(), storage);
        store.previous_category();
        assert_eq!(store.selected_category(), "Modern Classic");
    }

    #[test]
    fn test_state_survives_restart() {
        let dir = TempDir::new().unwrap();
        let mut store = CatalogStore::load(Catalog::builtin(), FileStore::new(dir.path()));
        let animal_farm = store.catalog().find(3).cloned().unwrap();
        store.toggle_favorite(&animal_farm);
        store.set_search_text("a");
        store.set_category("Politics").unwrap();
        drop(store);

        let restored = CatalogStore::load(Catalog::builtin(), FileStore::new(dir.path()));
        assert_eq!(restored.search_text(), "a");
        assert_eq!(restored.selected_category(), "Politics");
        assert_eq!(restored.favorites(), &[animal_farm][..]);
        assert_eq!(ids(&restored.filtered_items()), vec![3]);
    }

    #[test]
    fn test_restart_with_persisted_favorite_only() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStore::new(dir.path());
        storage
            .write(
                FAVORITES_KEY,
                r#"[{"id":3,"title":"Animal Farm","author":"George Orwell","category":"Politics"}]"#,
            )
            .unwrap();

        let store = CatalogStore::load(Catalog::builtin(), FileStore::new(dir.path()));
        assert_eq!(store.filtered_items().len(), 8);
        assert_eq!(store.favorite_count(), 1);
        assert_eq!(store.favorites()[0].title, "Animal Farm");
    }

    #[test]
    fn test_failed_reads_fall_back_to_defaults() {
        let store = CatalogStore::load(Catalog::builtin(), FailingStore);
        assert_eq!(store.search_text(), "");
        assert_eq!(store.selected_category(), "all");
        assert!(store.favorites().is_empty());
        assert_eq!(store.filtered_items().len(), 8);
    }

    #[test]
    fn test_failed_writes_still_update_state() {
        let mut store = CatalogStore::load(Catalog::builtin(), FailingStore);
        let animal_farm = store.catalog().find(3).cloned().unwrap();

        store.set_search_text("farm");
        store.set_category("Politics").unwrap();
        assert!(store.toggle_favorite(&animal_farm));

        assert_eq!(store.search_text(), "farm");
        assert_eq!(store.selected_category(), "Politics");
        assert!(store.is_favorite(3));
        assert_eq!(ids(&store.filtered_items()), vec![3]);

        store.clear_favorites();
        assert!(store.favorites().is_empty());
    }
}
