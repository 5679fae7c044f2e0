use octofhir_storage::StorageError;

/// Errors returned by [`Translator::translate`](crate::Translator::translate).
///
/// "No translation available" is not an error: it is a successful
/// [`TranslationResult`](crate::TranslationResult) with `result = false`.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// The request carries no Coding with a code.
    #[error("Invalid translation request: {0}")]
    InvalidRequest(String),

    /// The mapping store query failed. The store's error is kept as-is.
    #[error(transparent)]
    StoreUnavailable(#[from] StorageError),
}

impl TranslateError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_is_passed_through() {
        let err: TranslateError = StorageError::unavailable("connection reset").into();
        assert_eq!(
            err.to_string(),
            "Mapping store unavailable: connection reset"
        );
        match err {
            TranslateError::StoreUnavailable(inner) => assert!(inner.is_unavailable()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_request() {
        let err = TranslateError::invalid_request("no code");
        assert_eq!(err.to_string(), "Invalid translation request: no code");
        assert!(matches!(err, TranslateError::InvalidRequest(_)));
    }
}
