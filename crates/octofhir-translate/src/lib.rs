//! # octofhir-translate
//!
//! ConceptMap `$translate` for OctoFHIR.
//!
//! A [`TranslationRequest`] is resolved into one lookup predicate per
//! Coding, each predicate is run against a [`MappingStore`] (forward or
//! reverse), and the concatenated store records are assembled into a
//! [`TranslationResult`].
//!
//! ## Example
//!
//! ```ignore
//! use octofhir_core::Coding;
//! use octofhir_translate::{TranslationRequest, Translator};
//!
//! let translator = Translator::new(octofhir_db_memory::create_mapping_store());
//! let request = TranslationRequest::for_coding(
//!     Coding::new("http://example.com/my_code_system", "12345"),
//! );
//! let result = translator.translate(&request).await?;
//! println!("{}", result.message);
//! ```
//!
//! [`MappingStore`]: octofhir_storage::MappingStore

pub mod config;
mod engine;
mod error;
pub mod observability;
pub mod operation;
pub mod parameters;
pub mod predicate;
mod request;
mod result;

pub use engine::Translator;
pub use error::TranslateError;
pub use operation::{OperationError, OperationHandler, TranslateOperation};
pub use parameters::TranslateParams;
pub use predicate::LookupPredicate;
pub use request::TranslationRequest;
pub use result::{
    Lookup, MATCHES_FOUND, NO_MATCHES_FOUND, RawMatches, TranslationMatch, TranslationResult,
    assemble,
};
