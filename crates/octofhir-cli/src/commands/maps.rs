use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use octofhir_core::ConceptMap;
use octofhir_db_memory::InMemoryMappingStore;
use octofhir_storage::MappingStore;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::output::{print_maps_table, print_value};

/// Reads the concept maps in one file: a ConceptMap or a Bundle of them.
pub fn read_concept_maps(path: &Path) -> Result<Vec<ConceptMap>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    concept_maps_from_json(&value).with_context(|| format!("In {}", path.display()))
}

pub fn concept_maps_from_json(value: &Value) -> Result<Vec<ConceptMap>> {
    match value.get("resourceType").and_then(Value::as_str) {
        Some("ConceptMap") => Ok(vec![ConceptMap::from_json(value)?]),
        Some("Bundle") => {
            let mut maps = Vec::new();
            let entries = value
                .get("entry")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            for entry in entries {
                let Some(resource) = entry.get("resource") else {
                    continue;
                };
                match resource.get("resourceType").and_then(Value::as_str) {
                    Some("ConceptMap") => maps.push(ConceptMap::from_json(resource)?),
                    other => tracing::warn!(
                        resource_type = other.unwrap_or("-"),
                        "Skipping non-ConceptMap bundle entry"
                    ),
                }
            }
            Ok(maps)
        }
        Some(other) => bail!("Expected a ConceptMap or Bundle, got {other}"),
        None => bail!("Missing resourceType"),
    }
}

/// Builds a store from the given files, in order.
pub async fn load_store(files: &[String]) -> Result<InMemoryMappingStore> {
    let store = InMemoryMappingStore::new();
    for file in files {
        for concept_map in read_concept_maps(Path::new(file))? {
            store
                .store_concept_map(&concept_map)
                .await
                .with_context(|| format!("Failed to load concept map from {file}"))?;
        }
    }
    tracing::info!(files = files.len(), concept_maps = store.len(), "Concept maps loaded");
    Ok(store)
}

pub async fn list(store: &dyn MappingStore, format: OutputFormat) -> Result<()> {
    let mut maps = Vec::new();
    for url in store.concept_map_urls().await? {
        if let Some(cm) = store.get_concept_map(&url).await? {
            maps.push(cm);
        }
    }

    match format {
        OutputFormat::Json => {
            let resources = maps
                .iter()
                .map(ConceptMap::to_json)
                .collect::<Result<Vec<_>, _>>()?;
            print_value(&Value::Array(resources))
        }
        OutputFormat::Table => {
            print_maps_table(&maps);
            Ok(())
        }
    }
}
