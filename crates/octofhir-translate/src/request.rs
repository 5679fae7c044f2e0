//! Translation request model.

use octofhir_core::Coding;

/// A `$translate` request.
///
/// Each Coding in `codeable_concept` is looked up independently; the other
/// fields scope every lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationRequest {
    /// The concept to translate, as one or more Codings
    pub codeable_concept: Vec<Coding>,
    /// Value set the source concept was chosen from
    pub source: Option<String>,
    /// Value set in which a translation is sought
    pub target: Option<String>,
    /// Only report matches in this code system
    pub target_system: Option<String>,
    /// Only consult the concept map with this canonical URL
    pub concept_map_url: Option<String>,
    /// Translate from target to source instead
    pub reverse: Option<bool>,
}

impl TranslationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// A request for a single Coding.
    pub fn for_coding(coding: Coding) -> Self {
        Self::new().with_coding(coding)
    }

    pub fn with_coding(mut self, coding: Coding) -> Self {
        self.codeable_concept.push(coding);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_target_system(mut self, target_system: impl Into<String>) -> Self {
        self.target_system = Some(target_system.into());
        self
    }

    pub fn with_concept_map_url(mut self, url: impl Into<String>) -> Self {
        self.concept_map_url = Some(url.into());
        self
    }

    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = Some(reverse);
        self
    }

    /// `true` only when `reverse` is present and set.
    pub fn is_reverse(&self) -> bool {
        self.reverse == Some(true)
    }

    /// Codings that carry a non-empty code, in request order.
    pub fn usable_codings(&self) -> impl Iterator<Item = &Coding> {
        self.codeable_concept.iter().filter(|c| c.has_code())
    }
}
