//! Translation results and the assembler that builds them from store records.

use octofhir_core::{Coding, Equivalence};
use octofhir_storage::{ElementRecord, TargetRecord};

/// Message reported when at least one match was found.
pub const MATCHES_FOUND: &str = "Matches found!";

/// Message reported when nothing matched.
pub const NO_MATCHES_FOUND: &str = "No matches found!";

/// Direction of a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Source concept → target concepts
    Forward,
    /// Target concept → source concepts
    Reverse,
}

/// Raw store records produced by one translation, tagged with their direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawMatches {
    Forward(Vec<TargetRecord>),
    Reverse(Vec<ElementRecord>),
}

impl RawMatches {
    pub fn empty(direction: Lookup) -> Self {
        match direction {
            Lookup::Forward => Self::Forward(Vec::new()),
            Lookup::Reverse => Self::Reverse(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Forward(targets) => targets.len(),
            Self::Reverse(elements) => elements.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One translation candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationMatch {
    /// Stored equivalence; never set on reverse matches
    pub equivalence: Option<Equivalence>,
    /// The matched concept; `user_selected` is always `Some(false)`
    pub concept: Coding,
    /// URL of the concept map that produced the match
    pub source: String,
}

/// Outcome of a `$translate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    /// `true` iff at least one match was found
    pub result: bool,
    pub message: String,
    /// Matches in store iteration order
    pub matches: Vec<TranslationMatch>,
}

impl TranslationResult {
    pub fn no_matches() -> Self {
        Self {
            result: false,
            message: NO_MATCHES_FOUND.to_string(),
            matches: Vec::new(),
        }
    }
}

/// Converts raw store records into a [`TranslationResult`].
///
/// Every record produces exactly one match, in the order received. Nothing
/// is filtered or deduplicated here.
pub fn assemble(raw: RawMatches) -> TranslationResult {
    if raw.is_empty() {
        return TranslationResult::no_matches();
    }

    let matches = match raw {
        RawMatches::Forward(targets) => targets.into_iter().map(forward_match).collect(),
        RawMatches::Reverse(elements) => elements.into_iter().map(reverse_match).collect(),
    };

    TranslationResult {
        result: true,
        message: MATCHES_FOUND.to_string(),
        matches,
    }
}

fn forward_match(target: TargetRecord) -> TranslationMatch {
    TranslationMatch {
        equivalence: target.equivalence,
        concept: Coding {
            system: target.system,
            version: None,
            code: target.code,
            display: target.display,
            user_selected: Some(false),
        },
        source: target.concept_map_url,
    }
}

fn reverse_match(element: ElementRecord) -> TranslationMatch {
    TranslationMatch {
        equivalence: None,
        concept: Coding {
            system: element.system,
            version: None,
            code: Some(element.code),
            display: element.display,
            user_selected: Some(false),
        },
        source: element.concept_map_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CM_URL: &str = "http://example.com/my_concept_map";

    fn target(code: &str, equivalence: Equivalence) -> TargetRecord {
        TargetRecord {
            concept_map_url: CM_URL.into(),
            system: Some("http://example.com/my_code_system3".into()),
            version: Some("Version 4".into()),
            code: Some(code.into()),
            display: Some(format!("Target Code {code}")),
            equivalence: Some(equivalence),
            comment: None,
        }
    }

    #[test]
    fn test_empty_forward_and_reverse() {
        for direction in [Lookup::Forward, Lookup::Reverse] {
            let result = assemble(RawMatches::empty(direction));
            assert!(!result.result);
            assert_eq!(result.message, NO_MATCHES_FOUND);
            assert!(result.matches.is_empty());
        }
    }

    #[test]
    fn test_forward_preserves_order_and_equivalence() {
        let result = assemble(RawMatches::Forward(vec![
            target("56789", Equivalence::Equal),
            target("67890", Equivalence::Wider),
        ]));

        assert!(result.result);
        assert_eq!(result.message, MATCHES_FOUND);
        assert_eq!(result.matches.len(), 2);

        let first = &result.matches[0];
        assert_eq!(first.equivalence, Some(Equivalence::Equal));
        assert_eq!(first.concept.code.as_deref(), Some("56789"));
        assert_eq!(first.concept.display.as_deref(), Some("Target Code 56789"));
        assert_eq!(
            first.concept.system.as_deref(),
            Some("http://example.com/my_code_system3")
        );
        assert_eq!(first.concept.user_selected, Some(false));
        assert_eq!(first.source, CM_URL);

        assert_eq!(result.matches[1].equivalence, Some(Equivalence::Wider));
        assert_eq!(result.matches[1].concept.code.as_deref(), Some("67890"));
    }

    #[test]
    fn test_forward_keeps_duplicates() {
        let result = assemble(RawMatches::Forward(vec![
            target("45678", Equivalence::Wider),
            target("45678", Equivalence::Wider),
        ]));
        assert_eq!(result.matches.len(), 2);
    }

    #[test]
    fn test_reverse_never_sets_equivalence() {
        let result = assemble(RawMatches::Reverse(vec![ElementRecord {
            concept_map_url: CM_URL.into(),
            system: Some("http://example.com/my_code_system".into()),
            version: Some("Version 1".into()),
            code: "12345".into(),
            display: Some("Source Code 12345".into()),
        }]));

        assert!(result.result);
        let only = &result.matches[0];
        assert_eq!(only.equivalence, None);
        assert_eq!(only.concept.code.as_deref(), Some("12345"));
        assert_eq!(only.concept.display.as_deref(), Some("Source Code 12345"));
        assert_eq!(only.concept.user_selected, Some(false));
        assert_eq!(only.source, CM_URL);
    }
}
