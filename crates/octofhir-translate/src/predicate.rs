//! Predicate resolution.
//!
//! Turns a [`TranslationRequest`] into one [`LookupPredicate`] per usable
//! Coding. The code half of each predicate is picked by a single ordered
//! decision (most specific first), so a stored mapping is never matched by
//! two predicates for the same Coding:
//!
//! 1. system + code + version
//! 2. system + code
//! 3. code alone
//!
//! Value-set and concept map scoping, and the target system filter, are
//! layered on top of whichever one was chosen.

use octofhir_core::Coding;
use octofhir_storage::{CodeCriteria, MapScope};

use crate::error::TranslateError;
use crate::request::TranslationRequest;

/// Everything needed to run one lookup against the mapping store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupPredicate {
    pub criteria: CodeCriteria,
    pub scope: MapScope,
    /// Post-filter on the system of each returned concept
    pub target_system: Option<String>,
}

impl LookupPredicate {
    /// Whether a returned concept in `system` passes the target system filter.
    pub fn accepts_system(&self, system: Option<&str>) -> bool {
        self.target_system
            .as_deref()
            .is_none_or(|want| system == Some(want))
    }
}

/// Picks the most specific code criteria a Coding supports.
///
/// A version without a system still constrains the stored version.
pub fn select_criteria(coding: &Coding) -> Option<CodeCriteria> {
    let code = coding.code_value()?.to_string();
    let criteria = match (coding.system_value(), coding.version_value()) {
        (Some(system), Some(version)) => CodeCriteria::Exact {
            system: system.to_string(),
            code,
            version: version.to_string(),
        },
        (Some(system), None) => CodeCriteria::System {
            system: system.to_string(),
            code,
        },
        (None, Some(version)) => CodeCriteria::Version {
            code,
            version: version.to_string(),
        },
        (None, None) => CodeCriteria::Code { code },
    };
    Some(criteria)
}

/// Builds the request-wide scope shared by every predicate.
fn scope_of(request: &TranslationRequest) -> MapScope {
    MapScope {
        concept_map_url: non_empty(request.concept_map_url.as_deref()),
        source_value_set: non_empty(request.source.as_deref()),
        target_value_set: non_empty(request.target.as_deref()),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(String::from)
}

/// Resolves the ordered predicates for a request.
///
/// # Errors
///
/// Returns `TranslateError::InvalidRequest` if the request has no Codings or
/// none of them carries a code.
pub fn resolve(request: &TranslationRequest) -> Result<Vec<LookupPredicate>, TranslateError> {
    if request.codeable_concept.is_empty() {
        return Err(TranslateError::invalid_request(
            "at least one coding is required",
        ));
    }

    let scope = scope_of(request);
    let target_system = non_empty(request.target_system.as_deref());

    let predicates: Vec<LookupPredicate> = request
        .codeable_concept
        .iter()
        .filter_map(select_criteria)
        .map(|criteria| LookupPredicate {
            criteria,
            scope: scope.clone(),
            target_system: target_system.clone(),
        })
        .collect();

    if predicates.is_empty() {
        return Err(TranslateError::invalid_request(
            "no coding carries a code",
        ));
    }
    Ok(predicates)
}
