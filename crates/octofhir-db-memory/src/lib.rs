//! In-memory mapping store backend for OctoFHIR ConceptMap translation.
//!
//! This crate provides an in-memory implementation of the `MappingStore` trait
//! from `octofhir-storage`. Lookups read an immutable index snapshot published
//! through `arc_swap`, so concurrent translations never block each other or
//! observe a half-applied ingestion.
//!
//! # Example
//!
//! ```ignore
//! use octofhir_db_memory::InMemoryMappingStore;
//! use octofhir_storage::MappingStore;
//!
//! let store = InMemoryMappingStore::new();
//! let concept_map = octofhir_core::ConceptMap::from_json(&json)?;
//! store.store_concept_map(&concept_map).await?;
//! ```

mod index;
mod mapping_impl;
pub mod storage;

// Re-export the MappingStore trait for convenience
pub use octofhir_storage::{DynMappingStore, MappingStore, StorageError};

pub use storage::InMemoryMappingStore;

/// Creates a new, empty in-memory mapping store.
pub fn create_mapping_store() -> DynMappingStore {
    std::sync::Arc::new(InMemoryMappingStore::new())
}
