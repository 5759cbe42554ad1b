// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Attribute discovery over feature properties.
//!
//! Selection is a pure function of the feature list: keys are visited in
//! first-declaration order, so the same data always yields the same choice.

use cartokit_ir::FeatureCollection;
use serde_json::Value;

/// What an attribute must hold to drive a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Every non-null value is a number.
    Quantitative,
    /// Every non-null value is a string.
    Categorical,
}

impl AttributeKind {
    /// Lowercase name for error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quantitative => "quantitative",
            Self::Categorical => "categorical",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Quantitative => value.is_number(),
            Self::Categorical => value.is_string(),
        }
    }
}

/// Property keys in first-declaration order across all features.
pub fn attribute_names(fc: &FeatureCollection) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for feature in &fc.features {
        for key in feature.properties.keys() {
            if !names.iter().any(|n| n == key) {
                names.push(key.clone());
            }
        }
    }
    names
}

/// Whether `attribute` satisfies `kind` across the collection.
pub fn is_kind(fc: &FeatureCollection, attribute: &str, kind: AttributeKind) -> bool {
    let mut seen = false;
    for value in fc
        .features
        .iter()
        .filter_map(|f| f.properties.get(attribute))
        .filter(|v| !v.is_null())
    {
        if !kind.accepts(value) {
            return false;
        }
        seen = true;
    }
    seen
}

/// Every attribute of `kind`, in declaration order.
pub fn attributes_of_kind(fc: &FeatureCollection, kind: AttributeKind) -> Vec<String> {
    attribute_names(fc)
        .into_iter()
        .filter(|name| is_kind(fc, name, kind))
        .collect()
}

/// First attribute of `kind`, in declaration order.
pub fn select_attribute(fc: &FeatureCollection, kind: AttributeKind) -> Option<String> {
    attribute_names(fc)
        .into_iter()
        .find(|name| is_kind(fc, name, kind))
}

/// Stringified category for a property value; `None` for null or missing.
pub fn category_key(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Distinct categories of `attribute` in first-seen order.
pub fn categories(fc: &FeatureCollection, attribute: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for key in fc
        .features
        .iter()
        .filter_map(|f| category_key(f.properties.get(attribute)))
    {
        if !seen.contains(&key) {
            seen.push(key);
        }
    }
    seen
}
