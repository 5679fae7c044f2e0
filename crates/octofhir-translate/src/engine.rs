//! The `$translate` engine.

use octofhir_storage::{CodeCriteria, DynMappingStore, ElementRecord, TargetRecord};

use crate::error::TranslateError;
use crate::predicate::{LookupPredicate, resolve};
use crate::request::TranslationRequest;
use crate::result::{Lookup, RawMatches, TranslationResult, assemble};

/// Translates concepts through the concept maps held by a mapping store.
///
/// The translator holds no mutable state; one instance can serve any number
/// of concurrent requests.
#[derive(Clone)]
pub struct Translator {
    store: DynMappingStore,
}

impl Translator {
    pub fn new(store: DynMappingStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DynMappingStore {
        &self.store
    }

    /// Runs a translation.
    ///
    /// Predicates run in Coding order and their matches are concatenated.
    /// An empty match list is a successful result with `result = false`.
    ///
    /// # Errors
    ///
    /// - `TranslateError::InvalidRequest` when no Coding carries a code
    /// - `TranslateError::StoreUnavailable` when the mapping store fails
    pub async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, TranslateError> {
        let direction = if request.is_reverse() {
            Lookup::Reverse
        } else {
            Lookup::Forward
        };

        match self.lookup(request, direction).await {
            Ok(raw) => {
                let result = assemble(raw);
                tracing::info!(
                    direction = ?direction,
                    codings = request.codeable_concept.len(),
                    matches = result.matches.len(),
                    backend = self.store.backend_name(),
                    "ConceptMap translation completed"
                );
                Ok(result)
            }
            Err(err) => {
                log_failure(&err, direction);
                Err(err)
            }
        }
    }

    async fn lookup(
        &self,
        request: &TranslationRequest,
        direction: Lookup,
    ) -> Result<RawMatches, TranslateError> {
        let predicates = resolve(request)?;
        let mut raw = RawMatches::empty(direction);
        for predicate in &predicates {
            match &mut raw {
                RawMatches::Forward(targets) => targets.extend(self.forward(predicate).await?),
                RawMatches::Reverse(elements) => elements.extend(self.reverse(predicate).await?),
            }
        }
        Ok(raw)
    }

    async fn forward(
        &self,
        predicate: &LookupPredicate,
    ) -> Result<Vec<TargetRecord>, TranslateError> {
        tracing::debug!(
            criteria = predicate.criteria.kind(),
            code = predicate.criteria.code(),
            scope = ?predicate.scope,
            "Forward lookup"
        );

        let found = match &predicate.criteria {
            CodeCriteria::Code { code } if predicate.scope.is_value_set_only() => {
                self.store
                    .find_targets_by_value_set_and_code(
                        predicate.scope.source_value_set.as_deref(),
                        predicate.scope.target_value_set.as_deref(),
                        code,
                    )
                    .await?
            }
            criteria => {
                self.store
                    .find_targets_by_element(criteria, &predicate.scope)
                    .await?
            }
        };

        Ok(found
            .into_iter()
            .filter(|target| predicate.accepts_system(target.system.as_deref()))
            .collect())
    }

    async fn reverse(
        &self,
        predicate: &LookupPredicate,
    ) -> Result<Vec<ElementRecord>, TranslateError> {
        tracing::debug!(
            criteria = predicate.criteria.kind(),
            code = predicate.criteria.code(),
            scope = ?predicate.scope,
            "Reverse lookup"
        );

        let found = self
            .store
            .find_elements_by_target_code(&predicate.criteria, &predicate.scope)
            .await?;

        Ok(found
            .into_iter()
            .filter(|element| predicate.accepts_system(element.system.as_deref()))
            .collect())
    }
}

fn log_failure(err: &TranslateError, direction: Lookup) {
    match err {
        TranslateError::StoreUnavailable(inner) => tracing::error!(
            direction = ?direction,
            category = %inner.category(),
            error = %inner,
            "ConceptMap translation failed"
        ),
        TranslateError::InvalidRequest(_) => tracing::debug!(
            direction = ?direction,
            error = %err,
            "ConceptMap translation rejected"
        ),
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("backend", &self.store.backend_name())
            .finish()
    }
}
