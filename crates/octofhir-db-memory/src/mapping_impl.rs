//! Implementation of the MappingStore trait for InMemoryMappingStore.

use async_trait::async_trait;

use octofhir_core::ConceptMap;
use octofhir_storage::{
    CodeCriteria, ElementRecord, MapScope, MappingStore, StorageError, TargetRecord,
};

use crate::storage::InMemoryMappingStore;

#[async_trait]
impl MappingStore for InMemoryMappingStore {
    async fn find_targets_by_element(
        &self,
        criteria: &CodeCriteria,
        scope: &MapScope,
    ) -> Result<Vec<TargetRecord>, StorageError> {
        Ok(self.snapshot().find_targets(criteria, scope))
    }

    async fn find_elements_by_target_code(
        &self,
        criteria: &CodeCriteria,
        scope: &MapScope,
    ) -> Result<Vec<ElementRecord>, StorageError> {
        Ok(self.snapshot().find_elements(criteria, scope))
    }

    async fn store_concept_map(&self, concept_map: &ConceptMap) -> Result<(), StorageError> {
        let replaced = self.upsert(concept_map).await?;
        tracing::debug!(
            url = concept_map.url.as_deref().unwrap_or_default(),
            elements = concept_map.element_count(),
            targets = concept_map.target_count(),
            replaced,
            "ConceptMap stored"
        );
        Ok(())
    }

    async fn remove_concept_map(&self, url: &str) -> Result<bool, StorageError> {
        let removed = self.remove(url).await;
        if removed {
            tracing::debug!(url = %url, "ConceptMap removed");
        }
        Ok(removed)
    }

    async fn get_concept_map(&self, url: &str) -> Result<Option<ConceptMap>, StorageError> {
        Ok(self
            .snapshot()
            .maps()
            .get(url)
            .map(|m| m.definition.as_ref().clone()))
    }

    async fn concept_map_urls(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.snapshot().maps().keys().cloned().collect())
    }

    async fn concept_map_url_for_id(&self, id: &str) -> Result<Option<String>, StorageError> {
        Ok(self.snapshot().url_for_id(id).map(String::from))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
