//! Tagged result of parsing a generative model's free-text response

use serde::{Serialize, Serializer};

/// Outcome of parsing a model response as JSON-if-possible.
///
/// Model output is never trusted to be well-formed: when parsing fails the
/// stage substitutes a documented default and continues. Callers can still
/// tell a degraded result apart from a genuine model-derived one by matching
/// on the variant instead of inspecting an ad hoc boolean.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput<T> {
    /// The model response parsed cleanly.
    Parsed(T),
    /// Parsing failed; `default` is the documented substitute and `raw` the
    /// unparsed model text, kept for diagnostics.
    Fallback { default: T, raw: String },
}

impl<T> ModelOutput<T> {
    pub fn value(&self) -> &T {
        match self {
            ModelOutput::Parsed(value) => value,
            ModelOutput::Fallback { default, .. } => default,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            ModelOutput::Parsed(value) => value,
            ModelOutput::Fallback { default, .. } => default,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ModelOutput::Fallback { .. })
    }
}

/// On the wire a `ModelOutput` is indistinguishable from its inner value;
/// stage payloads that need the legacy degradation flag derive it from
/// `is_fallback` instead of serializing the variant.
impl<T: Serialize> Serialize for ModelOutput<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_exposes_default_value() {
        let out = ModelOutput::Fallback {
            default: 8.0_f64,
            raw: "not json".to_string(),
        };
        assert_eq!(*out.value(), 8.0);
        assert!(out.is_fallback());
    }

    #[test]
    fn serializes_as_inner_value() {
        let parsed = ModelOutput::Parsed(vec!["a", "b"]);
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            "[\"a\",\"b\"]"
        );
        let fallback = ModelOutput::Fallback {
            default: vec!["c"],
            raw: String::new(),
        };
        assert_eq!(serde_json::to_string(&fallback).unwrap(), "[\"c\"]");
    }
}
