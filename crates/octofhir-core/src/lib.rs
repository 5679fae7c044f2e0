pub mod concept_map;
pub mod error;
pub mod fhir;

pub use concept_map::{ConceptMap, ConceptMapGroup, SourceElement, TargetElement};
pub use error::{CoreError, Result};
pub use fhir::{Coding, Equivalence};
