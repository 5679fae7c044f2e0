use thiserror::Error;

/// Core error types for OctoFHIR terminology values
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid FHIR resource type: {0}")]
    InvalidResourceType(String),

    #[error("Invalid ConceptMap: {message}")]
    InvalidConceptMap { message: String },

    #[error("Unknown ConceptMap equivalence: {0}")]
    UnknownEquivalence(String),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CoreError {
    /// Create a new InvalidResourceType error
    pub fn invalid_resource_type(resource_type: impl Into<String>) -> Self {
        Self::InvalidResourceType(resource_type.into())
    }

    /// Create a new InvalidConceptMap error
    pub fn invalid_concept_map(message: impl Into<String>) -> Self {
        Self::InvalidConceptMap {
            message: message.into(),
        }
    }

    /// Create a new UnknownEquivalence error
    pub fn unknown_equivalence(code: impl Into<String>) -> Self {
        Self::UnknownEquivalence(code.into())
    }
}

/// Convenience result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_concept_map_error() {
        let err = CoreError::invalid_concept_map("missing url");
        assert_eq!(err.to_string(), "Invalid ConceptMap: missing url");
    }

    #[test]
    fn test_unknown_equivalence_error() {
        let err = CoreError::unknown_equivalence("sortof");
        assert_eq!(err.to_string(), "Unknown ConceptMap equivalence: sortof");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err: serde_json::Error =
            serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let core_err: CoreError = json_err.into();

        assert!(matches!(core_err, CoreError::JsonError(_)));
        assert!(core_err.to_string().starts_with("JSON serialization error"));
    }
}
