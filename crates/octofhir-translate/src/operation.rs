//! The `$translate` operation handler.
//!
//! Supported invocation levels:
//! - System: `$translate`
//! - Type: `ConceptMap/$translate`
//! - Instance: `ConceptMap/{id}/$translate` (restricted to that concept map)

use async_trait::async_trait;
use serde_json::Value;

use crate::engine::Translator;
use crate::error::TranslateError;
use crate::parameters::TranslateParams;

/// Error type for FHIR operation failures.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    /// Invalid or missing parameters
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Operation not supported at this level
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TranslateError> for OperationError {
    fn from(err: TranslateError) -> Self {
        match err {
            TranslateError::InvalidRequest(msg) => Self::InvalidParameters(msg),
            TranslateError::StoreUnavailable(inner) => Self::Internal(inner.to_string()),
        }
    }
}

/// Trait for implementing FHIR operations.
///
/// Default implementations return `NotSupported`; the `code` method returns
/// the operation code without the `$` prefix.
#[async_trait]
pub trait OperationHandler: Send + Sync {
    /// Returns the operation code (without the `$` prefix).
    fn code(&self) -> &str;

    /// Handles the operation at system level (e.g., `POST /$operation`).
    async fn handle_system(&self, _params: &Value) -> Result<Value, OperationError> {
        Err(OperationError::NotSupported(format!(
            "Operation ${} is not supported at system level",
            self.code()
        )))
    }

    /// Handles the operation at type level (e.g., `POST /ConceptMap/$operation`).
    async fn handle_type(
        &self,
        _resource_type: &str,
        _params: &Value,
    ) -> Result<Value, OperationError> {
        Err(OperationError::NotSupported(format!(
            "Operation ${} is not supported at type level",
            self.code()
        )))
    }

    /// Handles the operation at instance level (e.g., `POST /ConceptMap/1/$operation`).
    async fn handle_instance(
        &self,
        _resource_type: &str,
        _id: &str,
        _params: &Value,
    ) -> Result<Value, OperationError> {
        Err(OperationError::NotSupported(format!(
            "Operation ${} is not supported at instance level",
            self.code()
        )))
    }
}

/// The $translate operation handler.
#[derive(Debug, Clone)]
pub struct TranslateOperation {
    translator: Translator,
}

impl TranslateOperation {
    pub fn new(translator: Translator) -> Self {
        Self { translator }
    }

    fn ensure_concept_map(resource_type: &str) -> Result<(), OperationError> {
        if resource_type == "ConceptMap" {
            Ok(())
        } else {
            Err(OperationError::NotSupported(format!(
                "$translate is only supported on ConceptMap, not {resource_type}"
            )))
        }
    }

    async fn run(&self, params: TranslateParams) -> Result<Value, OperationError> {
        let request = params.into_request()?;
        let result = self.translator.translate(&request).await?;
        Ok(result.to_parameters())
    }

    /// Finds the canonical URL of the stored concept map with the given id.
    async fn url_for_id(&self, id: &str) -> Result<String, OperationError> {
        self.translator
            .store()
            .concept_map_url_for_id(id)
            .await
            .map_err(|e| OperationError::Internal(e.to_string()))?
            .ok_or_else(|| OperationError::NotFound(format!("ConceptMap '{id}' not found")))
    }
}

#[async_trait]
impl OperationHandler for TranslateOperation {
    fn code(&self) -> &str {
        "translate"
    }

    async fn handle_system(&self, params: &Value) -> Result<Value, OperationError> {
        self.run(TranslateParams::from_json(params)?).await
    }

    async fn handle_type(
        &self,
        resource_type: &str,
        params: &Value,
    ) -> Result<Value, OperationError> {
        Self::ensure_concept_map(resource_type)?;
        self.run(TranslateParams::from_json(params)?).await
    }

    async fn handle_instance(
        &self,
        resource_type: &str,
        id: &str,
        params: &Value,
    ) -> Result<Value, OperationError> {
        Self::ensure_concept_map(resource_type)?;
        let mut translate_params = TranslateParams::from_json(params)?;
        let url = self.url_for_id(id).await?;

        if let Some(requested) = translate_params.concept_map_url.as_deref() {
            if requested != url {
                return Err(OperationError::InvalidParameters(format!(
                    "url '{requested}' does not match ConceptMap '{id}'"
                )));
            }
        }
        translate_params.concept_map_url = Some(url);
        self.run(translate_params).await
    }
}

#[cfg(test)]
mod tests {
    use octofhir_storage::StorageError;

    use super::*;

    #[test]
    fn test_translate_error_mapping() {
        let err: OperationError = TranslateError::invalid_request("no code").into();
        assert!(matches!(err, OperationError::InvalidParameters(_)));

        let err: OperationError = TranslateError::from(StorageError::unavailable("down")).into();
        match err {
            OperationError::Internal(msg) => assert_eq!(msg, "Mapping store unavailable: down"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_ensure_concept_map() {
        assert!(TranslateOperation::ensure_concept_map("ConceptMap").is_ok());
        let err = TranslateOperation::ensure_concept_map("Patient").unwrap_err();
        assert!(matches!(err, OperationError::NotSupported(_)));
    }
}
