//! # octofhir-storage
//!
//! Mapping store abstraction for ConceptMap translation.
//!
//! This crate defines the query surface the translation engine consumes and
//! the record types it gets back. It does not contain any implementations -
//! those are provided by separate crates (see `octofhir-db-memory`).
//!
//! ## Overview
//!
//! The main trait is [`MappingStore`], which defines the contract for:
//! - Forward lookups (source element → targets)
//! - Reverse lookups (target code → source elements)
//! - ConceptMap ingestion
//!
//! ## Example
//!
//! ```ignore
//! use octofhir_storage::{CodeCriteria, MapScope, MappingStore, StorageError, TargetRecord};
//!
//! async fn targets_of(
//!     store: &dyn MappingStore,
//!     system: &str,
//!     code: &str,
//! ) -> Result<Vec<TargetRecord>, StorageError> {
//!     let criteria = CodeCriteria::System {
//!         system: system.to_string(),
//!         code: code.to_string(),
//!     };
//!     store.find_targets_by_element(&criteria, &MapScope::default()).await
//! }
//! ```

mod error;
mod traits;
mod types;

// Re-export everything from submodules
pub use error::{ErrorCategory, StorageError};
pub use traits::MappingStore;
pub use types::{CodeCriteria, ElementRecord, MapScope, TargetRecord};

/// Type alias for a storage result.
pub type StorageResult<T> = Result<T, StorageError>;

/// Type alias for a shareable mapping store trait object.
pub type DynMappingStore = std::sync::Arc<dyn MappingStore>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use octofhir_storage::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ErrorCategory, StorageError};
    pub use crate::traits::MappingStore;
    pub use crate::types::{CodeCriteria, ElementRecord, MapScope, TargetRecord};
    pub use crate::{DynMappingStore, StorageResult};
}
