//! FHIR `Parameters` input and output for `$translate`.
//!
//! Input comes either as a `Parameters` resource or as a flat, query-style
//! JSON object (`{"code": "...", "system": "...", "reverse": "true"}`).
//! Output is always a `Parameters` resource.

use octofhir_core::Coding;
use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};

use crate::operation::OperationError;
use crate::request::TranslationRequest;
use crate::result::TranslationResult;

/// Parameters for the $translate operation.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateParams {
    /// The code to translate
    pub code: Option<String>,

    /// The code system of the source code
    pub system: Option<String>,

    /// The version of the source code system
    pub version: Option<String>,

    /// Codings to translate (alternative to code+system)
    #[serde(default, deserialize_with = "one_or_many")]
    pub coding: Vec<Coding>,

    /// A CodeableConcept to translate
    #[serde(default)]
    pub codeable_concept: Option<CodeableConcept>,

    /// The source ValueSet URL
    pub source: Option<String>,

    /// The target ValueSet URL
    pub target: Option<String>,

    /// Specific ConceptMap URL to use
    #[serde(rename = "conceptMap", alias = "url")]
    pub concept_map_url: Option<String>,

    /// Only report matches in this code system
    #[serde(alias = "targetsystem")]
    pub target_system: Option<String>,

    /// Reverse translation (target -> source)
    #[serde(default, deserialize_with = "lenient_bool")]
    pub reverse: Option<bool>,
}

/// Minimal CodeableConcept: only the codings take part in translation.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct CodeableConcept {
    #[serde(default)]
    pub coding: Vec<Coding>,
    pub text: Option<String>,
}

impl TranslateParams {
    /// Extract parameters from a FHIR Parameters resource or a flat object.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidParameters` if the input is not a JSON
    /// object or a parameter value has the wrong shape.
    pub fn from_json(params: &Value) -> Result<Self, OperationError> {
        if params.get("resourceType").and_then(Value::as_str) == Some("Parameters") {
            return Self::from_parameters(params);
        }
        if !params.is_object() {
            return Err(OperationError::InvalidParameters(
                "Expected a Parameters resource or a JSON object".into(),
            ));
        }
        serde_json::from_value(params.clone())
            .map_err(|e| OperationError::InvalidParameters(e.to_string()))
    }

    fn from_parameters(params: &Value) -> Result<Self, OperationError> {
        let mut out = Self::default();
        let Some(parameters) = params.get("parameter").and_then(Value::as_array) else {
            return Ok(out);
        };

        for param in parameters {
            let name = param.get("name").and_then(Value::as_str).unwrap_or("");
            match name {
                "code" => out.code = string_value(param, &["valueCode", "valueString"]),
                "system" => out.system = string_value(param, &["valueUri", "valueString"]),
                "version" => out.version = string_value(param, &["valueString"]),
                "coding" => {
                    if let Some(coding) = param.get("valueCoding") {
                        out.coding.push(parse_value(coding, "coding")?);
                    }
                }
                "codeableConcept" => {
                    if let Some(cc) = param.get("valueCodeableConcept") {
                        out.codeable_concept = Some(parse_value(cc, "codeableConcept")?);
                    }
                }
                "source" => out.source = string_value(param, &["valueUri", "valueCanonical"]),
                "target" => out.target = string_value(param, &["valueUri", "valueCanonical"]),
                "url" | "conceptMap" => {
                    out.concept_map_url = string_value(param, &["valueUri", "valueCanonical"])
                }
                "targetsystem" | "targetSystem" => {
                    out.target_system = string_value(param, &["valueUri"])
                }
                "reverse" => match param.get("valueBoolean") {
                    Some(Value::Bool(reverse)) => out.reverse = Some(*reverse),
                    _ => {
                        return Err(OperationError::InvalidParameters(
                            "Parameter 'reverse' requires a valueBoolean".into(),
                        ));
                    }
                },
                _ => {}
            }
        }

        Ok(out)
    }

    /// Converts to a [`TranslationRequest`].
    ///
    /// Codings are collected in order: explicit `code`/`system`/`version`,
    /// then `coding`, then `codeableConcept.coding`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidParameters` if no coding was supplied.
    pub fn into_request(self) -> Result<TranslationRequest, OperationError> {
        let mut codings = Vec::new();
        if self.code.is_some() {
            codings.push(Coding {
                system: self.system,
                version: self.version,
                code: self.code,
                ..Default::default()
            });
        }
        codings.extend(self.coding);
        if let Some(cc) = self.codeable_concept {
            codings.extend(cc.coding);
        }

        if codings.is_empty() {
            return Err(OperationError::InvalidParameters(
                "Missing 'code' parameter (or 'coding' or 'codeableConcept')".into(),
            ));
        }

        Ok(TranslationRequest {
            codeable_concept: codings,
            source: self.source,
            target: self.target,
            target_system: self.target_system,
            concept_map_url: self.concept_map_url,
            reverse: self.reverse,
        })
    }
}

fn string_value(param: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| param.get(*key).and_then(Value::as_str))
        .map(String::from)
}

fn parse_value<T: for<'de> Deserialize<'de>>(value: &Value, name: &str) -> Result<T, OperationError> {
    serde_json::from_value(value.clone())
        .map_err(|e| OperationError::InvalidParameters(format!("Invalid '{name}' parameter: {e}")))
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<Coding>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(Coding),
        Many(Vec<Coding>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(coding)) => vec![coding],
        Some(OneOrMany::Many(codings)) => codings,
        None => Vec::new(),
    })
}

/// Query strings carry booleans as text.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(Value::String(s)) => match s.as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "invalid boolean '{other}'"
            ))),
        },
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid boolean {other}"
        ))),
    }
}

impl TranslationResult {
    /// Convert to FHIR Parameters resource.
    pub fn to_parameters(&self) -> Value {
        let mut params = vec![
            json!({
                "name": "result",
                "valueBoolean": self.result
            }),
            json!({
                "name": "message",
                "valueString": self.message
            }),
        ];

        for m in &self.matches {
            let mut match_parts = Vec::new();

            if let Some(equivalence) = m.equivalence {
                match_parts.push(json!({
                    "name": "equivalence",
                    "valueCode": equivalence.as_code()
                }));
            }

            match_parts.push(json!({
                "name": "concept",
                "valueCoding": m.concept
            }));

            match_parts.push(json!({
                "name": "source",
                "valueUri": m.source
            }));

            params.push(json!({
                "name": "match",
                "part": match_parts
            }));
        }

        json!({
            "resourceType": "Parameters",
            "parameter": params
        })
    }
}
