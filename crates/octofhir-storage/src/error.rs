//! Storage error types for the mapping store abstraction layer.
//!
//! This module defines all error types that can occur during mapping store
//! operations.

use std::fmt;

use octofhir_core::CoreError;

/// Errors that can occur during mapping store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The store could not be reached or read.
    #[error("Mapping store unavailable: {message}")]
    Unavailable {
        /// Description of the connectivity or read failure.
        message: String,
    },

    /// A ConceptMap handed to the store cannot be indexed.
    #[error("Invalid ConceptMap: {message}")]
    InvalidConceptMap {
        /// Description of why the ConceptMap was rejected.
        message: String,
    },
}

impl StorageError {
    /// Creates a new `Unavailable` error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidConceptMap` error.
    #[must_use]
    pub fn invalid_concept_map(message: impl Into<String>) -> Self {
        Self::InvalidConceptMap {
            message: message.into(),
        }
    }

    /// Returns `true` if the store could not be reached.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Unavailable { .. } => ErrorCategory::Infrastructure,
            Self::InvalidConceptMap { .. } => ErrorCategory::Validation,
        }
    }
}

impl From<CoreError> for StorageError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidConceptMap { message } => Self::InvalidConceptMap { message },
            other => Self::invalid_concept_map(other.to_string()),
        }
    }
}

/// Categories of storage errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Validation error.
    Validation,
    /// Infrastructure/connection error.
    Infrastructure,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Infrastructure => write!(f, "infrastructure"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::unavailable("connection refused");
        assert_eq!(
            err.to_string(),
            "Mapping store unavailable: connection refused"
        );

        let err = StorageError::invalid_concept_map("ConceptMap.url is required");
        assert_eq!(err.to_string(), "Invalid ConceptMap: ConceptMap.url is required");
    }

    #[test]
    fn test_error_predicates() {
        assert!(StorageError::unavailable("down").is_unavailable());
        assert!(!StorageError::invalid_concept_map("no url").is_unavailable());
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            StorageError::unavailable("down").category(),
            ErrorCategory::Infrastructure
        );
        assert_eq!(
            StorageError::invalid_concept_map("bad").category(),
            ErrorCategory::Validation
        );
    }

    #[test]
    fn test_from_core_error() {
        let err: StorageError = CoreError::invalid_concept_map("no url").into();
        assert!(matches!(err, StorageError::InvalidConceptMap { ref message } if message == "no url"));

        let err: StorageError = CoreError::unknown_equivalence("meh").into();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }
}
