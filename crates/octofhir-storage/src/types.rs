//! Query and record types for the mapping store abstraction layer.

use octofhir_core::Equivalence;
use serde::{Deserialize, Serialize};

/// The code predicate applied to one side of a mapping.
///
/// Exactly one variant is chosen per lookup; the variants never overlap, so
/// a stored mapping is counted once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CodeCriteria {
    /// Match on system, code and version.
    Exact {
        system: String,
        code: String,
        version: String,
    },
    /// Match on system and code, any version.
    System { system: String, code: String },
    /// Match on code and version, any system.
    Version { code: String, version: String },
    /// Match on code alone, across all systems.
    Code { code: String },
}

impl CodeCriteria {
    /// The code every variant carries.
    pub fn code(&self) -> &str {
        match self {
            Self::Exact { code, .. }
            | Self::System { code, .. }
            | Self::Version { code, .. }
            | Self::Code { code } => code,
        }
    }

    /// The system constraint, if any.
    pub fn system(&self) -> Option<&str> {
        match self {
            Self::Exact { system, .. } | Self::System { system, .. } => Some(system),
            Self::Version { .. } | Self::Code { .. } => None,
        }
    }

    /// The version constraint, if any.
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Exact { version, .. } | Self::Version { version, .. } => Some(version),
            Self::System { .. } | Self::Code { .. } => None,
        }
    }

    /// Checks the system/version half of the predicate against a stored
    /// group's system and version. The code is matched by the index.
    pub fn matches_system_version(&self, system: Option<&str>, version: Option<&str>) -> bool {
        match self {
            Self::Exact {
                system: want_system,
                version: want_version,
                ..
            } => system == Some(want_system.as_str()) && version == Some(want_version.as_str()),
            Self::System {
                system: want_system,
                ..
            } => system == Some(want_system.as_str()),
            Self::Version {
                version: want_version,
                ..
            } => version == Some(want_version.as_str()),
            Self::Code { .. } => true,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Exact { .. } => "system+code+version",
            Self::System { .. } => "system+code",
            Self::Version { .. } => "code+version",
            Self::Code { .. } => "code",
        }
    }
}

/// Restricts which concept maps a lookup may use.
///
/// All present fields must match (conjunction). An empty scope admits every
/// concept map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MapScope {
    /// Canonical URL of the only concept map to consult
    pub concept_map_url: Option<String>,
    /// Value set the concept map must declare as its source
    pub source_value_set: Option<String>,
    /// Value set the concept map must declare as its target
    pub target_value_set: Option<String>,
}

impl MapScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_concept_map_url(mut self, url: impl Into<String>) -> Self {
        self.concept_map_url = Some(url.into());
        self
    }

    pub fn with_source_value_set(mut self, url: impl Into<String>) -> Self {
        self.source_value_set = Some(url.into());
        self
    }

    pub fn with_target_value_set(mut self, url: impl Into<String>) -> Self {
        self.target_value_set = Some(url.into());
        self
    }

    pub fn is_unscoped(&self) -> bool {
        self.concept_map_url.is_none()
            && self.source_value_set.is_none()
            && self.target_value_set.is_none()
    }

    /// Whether the scope is purely value-set based.
    pub fn is_value_set_only(&self) -> bool {
        self.concept_map_url.is_none()
            && (self.source_value_set.is_some() || self.target_value_set.is_some())
    }

    /// Checks a concept map's URL and declared value sets against the scope.
    pub fn admits(
        &self,
        concept_map_url: &str,
        source_value_set: Option<&str>,
        target_value_set: Option<&str>,
    ) -> bool {
        let url_ok = self
            .concept_map_url
            .as_deref()
            .is_none_or(|want| want == concept_map_url);
        let source_ok = self
            .source_value_set
            .as_deref()
            .is_none_or(|want| source_value_set == Some(want));
        let target_ok = self
            .target_value_set
            .as_deref()
            .is_none_or(|want| target_value_set == Some(want));
        url_ok && source_ok && target_ok
    }
}

/// A stored source element, as seen by a reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRecord {
    /// URL of the concept map that owns this element
    pub concept_map_url: String,
    /// Source code system of the owning group
    pub system: Option<String>,
    /// Source code system version of the owning group
    pub version: Option<String>,
    pub code: String,
    pub display: Option<String>,
}

/// A stored mapping target, as seen by a forward lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRecord {
    /// URL of the concept map that owns this target
    pub concept_map_url: String,
    /// Target code system of the owning group
    pub system: Option<String>,
    /// Target code system version of the owning group
    pub version: Option<String>,
    /// Absent for targets that only record an `unmatched` outcome
    pub code: Option<String>,
    pub display: Option<String>,
    pub equivalence: Option<Equivalence>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_criteria_accessors() {
        let exact = CodeCriteria::Exact {
            system: "http://cs".into(),
            code: "1".into(),
            version: "v1".into(),
        };
        assert_eq!(exact.code(), "1");
        assert_eq!(exact.system(), Some("http://cs"));
        assert_eq!(exact.version(), Some("v1"));
        assert_eq!(exact.kind(), "system+code+version");

        let code_only = CodeCriteria::Code { code: "1".into() };
        assert_eq!(code_only.system(), None);
        assert_eq!(code_only.version(), None);
    }

    #[test]
    fn test_code_criteria_matching() {
        let exact = CodeCriteria::Exact {
            system: "http://cs".into(),
            code: "1".into(),
            version: "v1".into(),
        };
        assert!(exact.matches_system_version(Some("http://cs"), Some("v1")));
        assert!(!exact.matches_system_version(Some("http://cs"), Some("v2")));
        assert!(!exact.matches_system_version(Some("http://cs"), None));

        let system = CodeCriteria::System {
            system: "http://cs".into(),
            code: "1".into(),
        };
        assert!(system.matches_system_version(Some("http://cs"), Some("v2")));
        assert!(system.matches_system_version(Some("http://cs"), None));
        assert!(!system.matches_system_version(Some("http://other"), None));
        assert!(!system.matches_system_version(None, None));

        let version = CodeCriteria::Version {
            code: "1".into(),
            version: "v1".into(),
        };
        assert_eq!(version.system(), None);
        assert_eq!(version.version(), Some("v1"));
        assert_eq!(version.kind(), "code+version");
        assert!(version.matches_system_version(Some("http://any"), Some("v1")));
        assert!(version.matches_system_version(None, Some("v1")));
        assert!(!version.matches_system_version(Some("http://cs"), Some("v2")));
        assert!(!version.matches_system_version(Some("http://cs"), None));

        let code_only = CodeCriteria::Code { code: "1".into() };
        assert!(code_only.matches_system_version(None, None));
        assert!(code_only.matches_system_version(Some("http://any"), Some("v9")));
    }

    #[test]
    fn test_map_scope_admits() {
        let scope = MapScope::new();
        assert!(scope.is_unscoped());
        assert!(scope.admits("http://cm", None, None));

        let scope = MapScope::new().with_source_value_set("http://vs");
        assert!(scope.is_value_set_only());
        assert!(scope.admits("http://cm", Some("http://vs"), None));
        assert!(!scope.admits("http://cm", Some("http://other"), None));
        assert!(!scope.admits("http://cm", None, None));

        let scope = MapScope::new()
            .with_concept_map_url("http://cm")
            .with_target_value_set("http://vs2");
        assert!(!scope.is_value_set_only());
        assert!(scope.admits("http://cm", None, Some("http://vs2")));
        assert!(!scope.admits("http://cm2", None, Some("http://vs2")));
    }
}
