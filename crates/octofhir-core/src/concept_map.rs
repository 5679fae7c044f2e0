//! ConceptMap definition model.
//!
//! Mirrors the parts of the FHIR R4 `ConceptMap` resource that translation
//! needs: the canonical URL, the source/target value set scope and the
//! group → element → target tree. Unknown JSON properties are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, Result};
use crate::fhir::Equivalence;

/// A ConceptMap resource, reduced to its mapping content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptMap {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Source value set (`sourceUri` or `sourceCanonical`)
    #[serde(
        default,
        rename = "sourceUri",
        alias = "sourceCanonical",
        skip_serializing_if = "Option::is_none"
    )]
    pub source: Option<String>,
    /// Target value set (`targetUri` or `targetCanonical`)
    #[serde(
        default,
        rename = "targetUri",
        alias = "targetCanonical",
        skip_serializing_if = "Option::is_none"
    )]
    pub target: Option<String>,
    #[serde(default, rename = "group", skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<ConceptMapGroup>,
}

/// Mappings from one source code system to one target code system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptMapGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_version: Option<String>,
    #[serde(default, rename = "element", skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<SourceElement>,
}

/// A source concept and the targets it maps to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default, rename = "target", skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<TargetElement>,
}

/// One target concept of a source element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equivalence: Option<Equivalence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ConceptMap {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Parse a ConceptMap from its FHIR JSON representation.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value.get("resourceType").and_then(|v| v.as_str()) {
            Some("ConceptMap") => {}
            Some(other) => {
                return Err(CoreError::invalid_resource_type(format!(
                    "expected ConceptMap, got {other}"
                )));
            }
            None => {
                return Err(CoreError::invalid_concept_map("missing resourceType"));
            }
        }
        let concept_map: ConceptMap = serde_json::from_value(value.clone())?;
        Ok(concept_map)
    }

    /// Render as FHIR JSON, including `resourceType`.
    pub fn to_json(&self) -> Result<Value> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut value {
            map.insert("resourceType".into(), Value::String("ConceptMap".into()));
        }
        Ok(value)
    }

    /// Check the invariants the mapping store relies on.
    pub fn validate(&self) -> Result<()> {
        if self.canonical_url().is_none() {
            return Err(CoreError::invalid_concept_map("ConceptMap.url is required"));
        }
        let targets = self
            .groups
            .iter()
            .flat_map(|group| &group.elements)
            .flat_map(|element| &element.targets);
        for target in targets {
            if target.equivalence.is_none() {
                return Err(CoreError::invalid_concept_map(
                    "ConceptMap.group.element.target.equivalence is required",
                ));
            }
        }
        Ok(())
    }

    /// The canonical URL, if present and non-empty.
    pub fn canonical_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_group(mut self, group: ConceptMapGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn element_count(&self) -> usize {
        self.groups.iter().map(|g| g.elements.len()).sum()
    }

    pub fn target_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| g.elements.iter())
            .map(|e| e.targets.len())
            .sum()
    }
}

impl ConceptMapGroup {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            target: Some(target.into()),
            ..Default::default()
        }
    }

    pub fn with_versions(
        mut self,
        source_version: impl Into<String>,
        target_version: impl Into<String>,
    ) -> Self {
        self.source_version = Some(source_version.into());
        self.target_version = Some(target_version.into());
        self
    }

    pub fn with_element(mut self, element: SourceElement) -> Self {
        self.elements.push(element);
        self
    }
}

impl SourceElement {
    pub fn new(code: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            display: Some(display.into()),
            targets: Vec::new(),
        }
    }

    pub fn with_target(mut self, target: TargetElement) -> Self {
        self.targets.push(target);
        self
    }
}

impl TargetElement {
    pub fn new(
        code: impl Into<String>,
        display: impl Into<String>,
        equivalence: Equivalence,
    ) -> Self {
        Self {
            code: Some(code.into()),
            display: Some(display.into()),
            equivalence: Some(equivalence),
            comment: None,
        }
    }
}
