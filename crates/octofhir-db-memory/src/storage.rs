use std::sync::Arc;

use arc_swap::ArcSwap;
use indexmap::IndexMap;
use octofhir_core::ConceptMap;
use octofhir_storage::StorageError;
use tokio::sync::Mutex;

use crate::index::{IndexedMap, MappingIndex};

/// In-memory mapping store backed by an atomically swapped index snapshot.
///
/// This storage implementation provides:
/// - Lock-free concurrent reads via `arc_swap::ArcSwap`
/// - Snapshot isolation: a lookup reads one published index from start to end
/// - Copy-on-write ingestion, serialized by a single writer lock
/// - Insertion-ordered results (map, group, element, target)
#[derive(Debug)]
pub struct InMemoryMappingStore {
    /// Current published index
    pub(crate) index: ArcSwap<MappingIndex>,
    /// Serializes writers so no update is lost between load and store
    write_lock: Mutex<()>,
}

impl InMemoryMappingStore {
    /// Creates a new, empty in-memory mapping store.
    pub fn new() -> Self {
        Self {
            index: ArcSwap::from_pointee(MappingIndex::default()),
            write_lock: Mutex::new(()),
        }
    }

    /// Creates a store pre-loaded with the given concept maps, in order.
    pub fn with_concept_maps<'a>(
        concept_maps: impl IntoIterator<Item = &'a ConceptMap>,
    ) -> Result<Self, StorageError> {
        let mut maps = IndexMap::new();
        for concept_map in concept_maps {
            let indexed = IndexedMap::from_concept_map(concept_map)?;
            maps.insert(indexed.url.clone(), Arc::new(indexed));
        }
        Ok(Self {
            index: ArcSwap::from_pointee(MappingIndex::build(maps)),
            write_lock: Mutex::new(()),
        })
    }

    /// Returns the current index snapshot.
    pub(crate) fn snapshot(&self) -> Arc<MappingIndex> {
        self.index.load_full()
    }

    /// Inserts or replaces a concept map. A replaced map keeps its original
    /// position in iteration order.
    pub(crate) async fn upsert(&self, concept_map: &ConceptMap) -> Result<bool, StorageError> {
        let indexed = IndexedMap::from_concept_map(concept_map)?;
        let url = indexed.url.clone();

        let _guard = self.write_lock.lock().await;
        let mut maps = self.snapshot().maps().clone();
        let replaced = maps.insert(url, Arc::new(indexed)).is_some();
        self.index.store(Arc::new(MappingIndex::build(maps)));
        Ok(replaced)
    }

    /// Removes a concept map, returning whether one was stored under `url`.
    pub(crate) async fn remove(&self, url: &str) -> bool {
        let _guard = self.write_lock.lock().await;
        let mut maps = self.snapshot().maps().clone();
        if maps.shift_remove(url).is_none() {
            return false;
        }
        self.index.store(Arc::new(MappingIndex::build(maps)));
        true
    }

    /// Number of stored concept maps.
    pub fn len(&self) -> usize {
        self.snapshot().maps().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryMappingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octofhir_core::{ConceptMapGroup, Equivalence, SourceElement, TargetElement};
    use octofhir_storage::{CodeCriteria, MapScope, MappingStore};

    fn simple_map(url: &str, target_code: &str) -> ConceptMap {
        ConceptMap::new(url).with_group(
            ConceptMapGroup::new("http://a", "http://b").with_element(
                SourceElement::new("1", "One").with_target(TargetElement::new(
                    target_code,
                    "Target",
                    Equivalence::Equal,
                )),
            ),
        )
    }

    fn target_codes(store: &InMemoryMappingStore) -> Vec<String> {
        store
            .snapshot()
            .find_targets(&CodeCriteria::Code { code: "1".into() }, &MapScope::default())
            .into_iter()
            .filter_map(|t| t.code)
            .collect()
    }

    #[tokio::test]
    async fn test_upsert_and_remove() {
        let store = InMemoryMappingStore::new();
        assert!(store.is_empty());

        assert!(!store.upsert(&simple_map("http://cm/1", "x")).await.unwrap());
        assert!(!store.upsert(&simple_map("http://cm/2", "y")).await.unwrap());
        assert_eq!(store.len(), 2);
        assert_eq!(target_codes(&store), vec!["x", "y"]);

        assert!(store.remove("http://cm/1").await);
        assert!(!store.remove("http://cm/1").await);
        assert_eq!(target_codes(&store), vec!["y"]);
    }

    #[tokio::test]
    async fn test_replace_keeps_position_and_drops_old_content() {
        let store = InMemoryMappingStore::with_concept_maps(&[
            simple_map("http://cm/1", "x"),
            simple_map("http://cm/2", "y"),
        ])
        .unwrap();

        assert!(store.upsert(&simple_map("http://cm/1", "z")).await.unwrap());
        assert_eq!(store.len(), 2);
        assert_eq!(target_codes(&store), vec!["z", "y"]);
    }

    #[tokio::test]
    async fn test_snapshot_is_unaffected_by_later_writes() {
        let store = InMemoryMappingStore::new();
        store.upsert(&simple_map("http://cm/1", "x")).await.unwrap();

        let before = store.snapshot();
        store.upsert(&simple_map("http://cm/2", "y")).await.unwrap();

        let seen = before.find_targets(&CodeCriteria::Code { code: "1".into() }, &MapScope::default());
        assert_eq!(seen.len(), 1);
        assert_eq!(target_codes(&store).len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_concept_map_leaves_store_untouched() {
        let store = InMemoryMappingStore::new();
        store.upsert(&simple_map("http://cm/1", "x")).await.unwrap();

        let err = store.upsert(&ConceptMap::default()).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidConceptMap { .. }));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_target_without_equivalence_is_rejected() {
        let store = InMemoryMappingStore::new();
        let mut cm = simple_map("http://cm/1", "x");
        cm.groups[0].elements[0].targets[0].equivalence = None;

        let err = store.upsert(&cm).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidConceptMap { .. }));
        assert!(err.to_string().contains("equivalence"));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_url_for_id_follows_writes() {
        let store = InMemoryMappingStore::new();
        let mut cm = simple_map("http://cm/1", "x");
        cm.id = Some("first".into());
        store.store_concept_map(&cm).await.unwrap();

        assert_eq!(
            store.concept_map_url_for_id("first").await.unwrap().as_deref(),
            Some("http://cm/1")
        );
        assert_eq!(store.concept_map_url_for_id("other").await.unwrap(), None);

        store.remove_concept_map("http://cm/1").await.unwrap();
        assert_eq!(store.concept_map_url_for_id("first").await.unwrap(), None);
    }
}
