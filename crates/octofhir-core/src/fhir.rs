use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::error::CoreError;

/// ConceptMap equivalence (FHIR R4 `ConceptMapEquivalence`).
///
/// Describes how closely a target concept matches the source concept it was
/// mapped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Equivalence {
    RelatedTo,
    Equivalent,
    Equal,
    Wider,
    Subsumes,
    Narrower,
    Specializes,
    Inexact,
    Unmatched,
    Disjoint,
}

impl Equivalence {
    /// All equivalence kinds, in FHIR value set order.
    pub const ALL: [Equivalence; 10] = [
        Equivalence::RelatedTo,
        Equivalence::Equivalent,
        Equivalence::Equal,
        Equivalence::Wider,
        Equivalence::Subsumes,
        Equivalence::Narrower,
        Equivalence::Specializes,
        Equivalence::Inexact,
        Equivalence::Unmatched,
        Equivalence::Disjoint,
    ];

    /// The FHIR code for this equivalence.
    pub fn as_code(&self) -> &'static str {
        match self {
            Equivalence::RelatedTo => "relatedto",
            Equivalence::Equivalent => "equivalent",
            Equivalence::Equal => "equal",
            Equivalence::Wider => "wider",
            Equivalence::Subsumes => "subsumes",
            Equivalence::Narrower => "narrower",
            Equivalence::Specializes => "specializes",
            Equivalence::Inexact => "inexact",
            Equivalence::Unmatched => "unmatched",
            Equivalence::Disjoint => "disjoint",
        }
    }

    /// `false` for the kinds that record the absence of a mapping.
    pub fn is_match(&self) -> bool {
        !matches!(self, Equivalence::Unmatched | Equivalence::Disjoint)
    }
}

impl fmt::Display for Equivalence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for Equivalence {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Equivalence::ALL
            .into_iter()
            .find(|e| e.as_code() == s)
            .ok_or_else(|| CoreError::unknown_equivalence(s))
    }
}

/// A FHIR Coding: one coded value.
///
/// Absent `system`/`version` mean "unspecified" when the Coding is used as a
/// lookup key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_selected: Option<bool>,
}

impl Coding {
    pub fn new(system: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            code: Some(code.into()),
            ..Default::default()
        }
    }

    /// A Coding carrying only a code, with no system.
    pub fn from_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// The code, if present and non-empty.
    pub fn code_value(&self) -> Option<&str> {
        non_empty(self.code.as_deref())
    }

    /// The system, if present and non-empty.
    pub fn system_value(&self) -> Option<&str> {
        non_empty(self.system.as_deref())
    }

    /// The version, if present and non-empty.
    pub fn version_value(&self) -> Option<&str> {
        non_empty(self.version.as_deref())
    }

    pub fn has_code(&self) -> bool {
        self.code_value().is_some()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
