//! Data model shared by the write path (assembler) and read path (client) —
//! also the wire format persisted as YAML or JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::TypeCoercionError;

/// Root document describing one application/library's error catalog.
///
/// A manifest with an empty `name` is an assembly-in-progress state; readers
/// only ever observe manifests for which [`Manifest::is_valid`] holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Stable identifier of the owning application/library.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    /// Error catalog keyed by code. BTreeMap keeps encoding deterministic.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, ErrorDefinition>,
}

impl Manifest {
    /// A manifest is loadable once it carries a non-empty name.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }

    /// Look up an error definition by its (trimmed) code.
    pub fn error(&self, code: &str) -> Option<&ErrorDefinition> {
        self.errors.get(code.trim())
    }
}

/// One catalog entry, keyed by a stable string code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDefinition {
    /// The map key duplicated as a field for self-reference.
    pub code: String,
    #[serde(default)]
    pub title: String,
    /// Short human explanation of the cause.
    #[serde(default)]
    pub short: String,
    /// Extended explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    #[serde(default)]
    pub severity: Severity,
    /// Provenance of the comment block that produced this definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Remediation hints, in annotation order. Serialized as a mapping from
    /// sequence-id string to suggestion, read back in ascending numeric order.
    #[serde(
        default,
        with = "suggestion_map",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub suggestions: Vec<Suggestion>,
}

/// One remediation hint attached to an error definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Decimal sequence id, "1".. within the parent error.
    pub id: String,
    pub short: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_ref: Option<String>,
}

/// Source position of the comment block that produced a definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u64,
}

/// Error severity. Defaults to `Low` when annotated but unspecified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    Severe,
}

impl FromStr for Severity {
    type Err = TypeCoercionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "severe" => Ok(Severity::Severe),
            _ => Err(TypeCoercionError {
                field: "severity",
                value: s.to_string(),
                expected: "one of low, medium, severe",
            }),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::Severe => "severe",
        };
        f.write_str(s)
    }
}

/// Serde bridge between the in-memory ordered suggestion sequence and the
/// wire mapping `{ "1": {..}, "2": {..} }`.
mod suggestion_map {
    use super::Suggestion;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S>(suggestions: &[Suggestion], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(suggestions.len()))?;
        for suggestion in suggestions {
            map.serialize_entry(&suggestion.id, suggestion)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Suggestion>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = BTreeMap::<String, Suggestion>::deserialize(deserializer)?;
        let mut suggestions: Vec<Suggestion> = map.into_values().collect();
        // BTreeMap order is lexicographic; ids are decimal strings, so "10"
        // would sort before "2" without the numeric sort.
        suggestions.sort_by_key(|s| s.id.parse::<u64>().unwrap_or(u64::MAX));
        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Manifest {
        let mut manifest = Manifest {
            name: "cli".into(),
            title: Some("CLI".into()),
            version: "v1.0.0".into(),
            base_url: "https://example.io".into(),
            ..Manifest::default()
        };
        manifest.errors.insert(
            "invalid_payment".into(),
            ErrorDefinition {
                code: "invalid_payment".into(),
                title: "Invalid Payment".into(),
                short: "the payment was rejected".into(),
                long: Some("the upstream provider rejected the payment".into()),
                severity: Severity::Medium,
                location: Some(Location {
                    file: "pkg/pay.go".into(),
                    line: 42,
                }),
                suggestions: vec![
                    Suggestion {
                        id: "1".into(),
                        short: "retry the payment".into(),
                        doc_ref: None,
                    },
                    Suggestion {
                        id: "2".into(),
                        short: "contact support".into(),
                        doc_ref: Some("support".into()),
                    },
                ],
            },
        );
        manifest
    }

    #[test]
    fn yaml_round_trip() {
        let manifest = sample();
        let encoded = serde_yaml::to_string(&manifest).unwrap();
        let decoded: Manifest = serde_yaml::from_str(&encoded).unwrap();
        assert_eq!(manifest, decoded);
    }

    #[test]
    fn json_round_trip() {
        let manifest = sample();
        let encoded = serde_json::to_string(&manifest).unwrap();
        let decoded: Manifest = serde_json::from_str(&encoded).unwrap();
        assert_eq!(manifest, decoded);
    }

    #[test]
    fn suggestions_keep_numeric_order() {
        let yaml = r#"
name: cli
version: v1
base_url: https://example.io
errors:
  e:
    code: e
    title: E
    short: s
    suggestions:
      "10": { id: "10", short: tenth }
      "2": { id: "2", short: second }
      "1": { id: "1", short: first }
"#;
        let manifest: Manifest = serde_yaml::from_str(yaml).unwrap();
        let ids: Vec<&str> = manifest.errors["e"]
            .suggestions
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2", "10"]);
    }

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!("SEVERE".parse::<Severity>().unwrap(), Severity::Severe);
        assert_eq!(" Medium ".parse::<Severity>().unwrap(), Severity::Medium);
        assert!("critical".parse::<Severity>().is_err());
    }

    #[test]
    fn severity_defaults_to_low() {
        let yaml = "name: cli\nerrors:\n  e: { code: e, title: T, short: s }\n";
        let manifest: Manifest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(manifest.errors["e"].severity, Severity::Low);
    }

    #[test]
    fn empty_name_is_invalid() {
        assert!(!Manifest::default().is_valid());
        assert!(sample().is_valid());
    }
}
