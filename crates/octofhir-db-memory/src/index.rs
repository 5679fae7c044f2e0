//! Immutable lookup index over the stored concept maps.
//!
//! A `MappingIndex` is never mutated after it is built; writers build a new
//! one and swap it in, so readers always see a single consistent version.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use octofhir_core::ConceptMap;
use octofhir_storage::{CodeCriteria, ElementRecord, MapScope, StorageError, TargetRecord};

/// One concept map, flattened into elements.
#[derive(Debug)]
pub(crate) struct IndexedMap {
    pub(crate) url: String,
    pub(crate) source_value_set: Option<String>,
    pub(crate) target_value_set: Option<String>,
    pub(crate) definition: Arc<ConceptMap>,
    pub(crate) elements: Vec<IndexedElement>,
}

#[derive(Debug)]
pub(crate) struct IndexedElement {
    pub(crate) record: ElementRecord,
    /// Target system/version of the owning group
    pub(crate) target_system: Option<String>,
    pub(crate) target_version: Option<String>,
    pub(crate) targets: Vec<TargetRecord>,
}

#[derive(Debug, Clone, Copy)]
struct ElementPos {
    map: usize,
    element: usize,
}

/// Code-keyed index over all stored concept maps.
#[derive(Debug, Default)]
pub(crate) struct MappingIndex {
    maps: IndexMap<String, Arc<IndexedMap>>,
    by_source_code: HashMap<String, Vec<ElementPos>>,
    by_target_code: HashMap<String, Vec<ElementPos>>,
    /// Resource id to canonical URL; the first map stored with an id wins
    by_id: HashMap<String, String>,
}

impl IndexedMap {
    /// Flattens a concept map. Elements without a code cannot be looked up
    /// in either direction and are left out.
    pub(crate) fn from_concept_map(concept_map: &ConceptMap) -> Result<Self, StorageError> {
        concept_map.validate()?;
        let url = concept_map
            .canonical_url()
            .ok_or_else(|| StorageError::invalid_concept_map("ConceptMap.url is required"))?
            .to_string();

        let mut elements = Vec::with_capacity(concept_map.element_count());
        for group in &concept_map.groups {
            for element in &group.elements {
                let Some(code) = element.code.as_deref().filter(|c| !c.is_empty()) else {
                    continue;
                };
                let targets = element
                    .targets
                    .iter()
                    .map(|target| TargetRecord {
                        concept_map_url: url.clone(),
                        system: group.target.clone(),
                        version: group.target_version.clone(),
                        code: target.code.clone().filter(|c| !c.is_empty()),
                        display: target.display.clone(),
                        equivalence: target.equivalence,
                        comment: target.comment.clone(),
                    })
                    .collect();
                elements.push(IndexedElement {
                    record: ElementRecord {
                        concept_map_url: url.clone(),
                        system: group.source.clone(),
                        version: group.source_version.clone(),
                        code: code.to_string(),
                        display: element.display.clone(),
                    },
                    target_system: group.target.clone(),
                    target_version: group.target_version.clone(),
                    targets,
                });
            }
        }

        Ok(Self {
            url,
            source_value_set: concept_map.source.clone(),
            target_value_set: concept_map.target.clone(),
            definition: Arc::new(concept_map.clone()),
            elements,
        })
    }

    fn admitted_by(&self, scope: &MapScope) -> bool {
        scope.admits(
            &self.url,
            self.source_value_set.as_deref(),
            self.target_value_set.as_deref(),
        )
    }
}

impl MappingIndex {
    /// Builds the code indexes. Positions are pushed in map, element order,
    /// which is the iteration order every lookup reports.
    pub(crate) fn build(maps: IndexMap<String, Arc<IndexedMap>>) -> Self {
        let mut by_source_code: HashMap<String, Vec<ElementPos>> = HashMap::new();
        let mut by_target_code: HashMap<String, Vec<ElementPos>> = HashMap::new();
        let mut by_id: HashMap<String, String> = HashMap::new();

        for (map_idx, indexed) in maps.values().enumerate() {
            if let Some(id) = indexed.definition.id.as_deref().filter(|id| !id.is_empty()) {
                by_id
                    .entry(id.to_string())
                    .or_insert_with(|| indexed.url.clone());
            }
            for (element_idx, element) in indexed.elements.iter().enumerate() {
                let pos = ElementPos {
                    map: map_idx,
                    element: element_idx,
                };
                by_source_code
                    .entry(element.record.code.clone())
                    .or_default()
                    .push(pos);

                let mut seen: Vec<&str> = Vec::new();
                for code in element.targets.iter().filter_map(|t| t.code.as_deref()) {
                    if seen.contains(&code) {
                        continue;
                    }
                    seen.push(code);
                    by_target_code.entry(code.to_string()).or_default().push(pos);
                }
            }
        }

        Self {
            maps,
            by_source_code,
            by_target_code,
            by_id,
        }
    }

    /// Canonical URL of the stored concept map with the given resource id.
    pub(crate) fn url_for_id(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }

    pub(crate) fn maps(&self) -> &IndexMap<String, Arc<IndexedMap>> {
        &self.maps
    }

    fn resolve(&self, pos: ElementPos) -> Option<(&IndexedMap, &IndexedElement)> {
        let (_, map) = self.maps.get_index(pos.map)?;
        let element = map.elements.get(pos.element)?;
        Some((map.as_ref(), element))
    }

    /// Forward lookup: targets of the source elements matching `criteria`.
    pub(crate) fn find_targets(&self, criteria: &CodeCriteria, scope: &MapScope) -> Vec<TargetRecord> {
        self.by_source_code
            .get(criteria.code())
            .into_iter()
            .flatten()
            .filter_map(|pos| self.resolve(*pos))
            .filter(|(map, element)| {
                map.admitted_by(scope)
                    && criteria.matches_system_version(
                        element.record.system.as_deref(),
                        element.record.version.as_deref(),
                    )
            })
            .flat_map(|(_, element)| element.targets.iter().cloned())
            .collect()
    }

    /// Reverse lookup: source elements having a target matching `criteria`.
    pub(crate) fn find_elements(&self, criteria: &CodeCriteria, scope: &MapScope) -> Vec<ElementRecord> {
        self.by_target_code
            .get(criteria.code())
            .into_iter()
            .flatten()
            .filter_map(|pos| self.resolve(*pos))
            .filter(|(map, element)| {
                map.admitted_by(scope)
                    && criteria.matches_system_version(
                        element.target_system.as_deref(),
                        element.target_version.as_deref(),
                    )
            })
            .map(|(_, element)| element.record.clone())
            .collect()
    }
}
