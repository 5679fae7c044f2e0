//! Storage traits for the mapping store abstraction layer.
//!
//! This module defines the trait that all mapping store backends must implement.

use async_trait::async_trait;
use octofhir_core::ConceptMap;

use crate::error::StorageError;
use crate::types::{CodeCriteria, ElementRecord, MapScope, TargetRecord};

/// The query surface the translation engine reads concept map content through.
///
/// Lookups are read-only. Results come back in the store's iteration order:
/// concept maps in the order they were first stored, then group, element and
/// target order within each map. Implementations must be thread-safe
/// (`Send + Sync`) and support concurrent readers.
///
/// # Example
///
/// ```ignore
/// use octofhir_storage::{CodeCriteria, ElementRecord, MapScope, MappingStore, StorageError};
///
/// async fn sources_of(store: &dyn MappingStore, code: &str) -> Result<Vec<ElementRecord>, StorageError> {
///     let criteria = CodeCriteria::Code { code: code.to_string() };
///     store.find_elements_by_target_code(&criteria, &MapScope::default()).await
/// }
/// ```
#[async_trait]
pub trait MappingStore: Send + Sync {
    // ==================== Lookups ====================

    /// Returns the targets of every source element matching `criteria`
    /// inside a concept map admitted by `scope`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the store cannot be read.
    async fn find_targets_by_element(
        &self,
        criteria: &CodeCriteria,
        scope: &MapScope,
    ) -> Result<Vec<TargetRecord>, StorageError>;

    /// Returns the targets of every source element with `code` inside a
    /// concept map declaring the given source and/or target value set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the store cannot be read.
    async fn find_targets_by_value_set_and_code(
        &self,
        source_value_set: Option<&str>,
        target_value_set: Option<&str>,
        code: &str,
    ) -> Result<Vec<TargetRecord>, StorageError> {
        let scope = MapScope {
            concept_map_url: None,
            source_value_set: source_value_set.map(String::from),
            target_value_set: target_value_set.map(String::from),
        };
        let criteria = CodeCriteria::Code {
            code: code.to_string(),
        };
        self.find_targets_by_element(&criteria, &scope).await
    }

    /// Returns every source element that has a target matching `criteria`
    /// inside a concept map admitted by `scope`.
    ///
    /// An element is reported once even if several of its targets match.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the store cannot be read.
    async fn find_elements_by_target_code(
        &self,
        criteria: &CodeCriteria,
        scope: &MapScope,
    ) -> Result<Vec<ElementRecord>, StorageError>;

    // ==================== Ingestion ====================

    /// Stores a concept map, replacing any previous content stored under the
    /// same URL.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidConceptMap` if the concept map has no URL
    /// or a target without an equivalence.
    async fn store_concept_map(&self, concept_map: &ConceptMap) -> Result<(), StorageError>;

    /// Removes the concept map stored under `url`.
    ///
    /// Returns `false` if nothing was stored under that URL.
    async fn remove_concept_map(&self, url: &str) -> Result<bool, StorageError>;

    /// Returns the concept map stored under `url`, if any.
    async fn get_concept_map(&self, url: &str) -> Result<Option<ConceptMap>, StorageError>;

    /// Lists the URLs of the stored concept maps, in storage order.
    async fn concept_map_urls(&self) -> Result<Vec<String>, StorageError>;

    /// Returns the URL of the first stored concept map whose resource id is
    /// `id`.
    ///
    /// The default scans every stored map; backends with an id index should
    /// override it.
    async fn concept_map_url_for_id(&self, id: &str) -> Result<Option<String>, StorageError> {
        for url in self.concept_map_urls().await? {
            let concept_map = self.get_concept_map(&url).await?;
            if concept_map.is_some_and(|cm| cm.id.as_deref() == Some(id)) {
                return Ok(Some(url));
            }
        }
        Ok(None)
    }

    // ==================== Metadata ====================

    /// Returns the name of this storage backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Records the forward lookups it receives.
    #[derive(Default)]
    struct RecordingStore {
        seen: Mutex<Vec<(CodeCriteria, MapScope)>>,
    }

    #[async_trait]
    impl MappingStore for RecordingStore {
        async fn find_targets_by_element(
            &self,
            criteria: &CodeCriteria,
            scope: &MapScope,
        ) -> Result<Vec<TargetRecord>, StorageError> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push((criteria.clone(), scope.clone()));
            }
            Ok(Vec::new())
        }

        async fn find_elements_by_target_code(
            &self,
            _criteria: &CodeCriteria,
            _scope: &MapScope,
        ) -> Result<Vec<ElementRecord>, StorageError> {
            Ok(Vec::new())
        }

        async fn store_concept_map(&self, _concept_map: &ConceptMap) -> Result<(), StorageError> {
            Ok(())
        }

        async fn remove_concept_map(&self, _url: &str) -> Result<bool, StorageError> {
            Ok(false)
        }

        async fn get_concept_map(&self, _url: &str) -> Result<Option<ConceptMap>, StorageError> {
            Ok(None)
        }

        async fn concept_map_urls(&self) -> Result<Vec<String>, StorageError> {
            Ok(Vec::new())
        }

        fn backend_name(&self) -> &'static str {
            "recording"
        }
    }

    #[tokio::test]
    async fn test_value_set_lookup_delegates_with_code_criteria() {
        let store = RecordingStore::default();
        store
            .find_targets_by_value_set_and_code(Some("http://example.com/vs"), None, "12345")
            .await
            .unwrap();

        let seen = store.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0].0,
            CodeCriteria::Code {
                code: "12345".into()
            }
        );
        assert_eq!(
            seen[0].1,
            MapScope::new().with_source_value_set("http://example.com/vs")
        );
    }
}
