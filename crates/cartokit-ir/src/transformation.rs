// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Named data-derivation steps recorded against a layer's source data.
//!
//! A record is pure data: what to run (`kind`), its declared parameters, the
//! call-site arguments, and the function bodies emitted by code generation.
//! Execution lives in `cartokit-core`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the centroid-deriving transformation.
pub const DERIVE_CENTROIDS: &str = "deriveCentroids";
/// Name of the dot-generating transformation.
pub const GENERATE_DOT_DENSITY_POINTS: &str = "generateDotDensityPoints";

/// Operation a transformation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformationKind {
    /// Replace every geometry with its centroid.
    DeriveCentroids,
    /// Replace every polygon with randomly placed dots. Args: `[attribute, dotValue, seed]`.
    GenerateDotDensityPoints,
    /// Rename a property. Args: `[from, to]`.
    RenameAttribute,
    /// Remove a property. Args: `[name]`.
    DropAttribute,
    /// Multiply a numeric property. Args: `[name, factor]`.
    ScaleAttribute,
    /// Divide one property by another. Args: `[numerator, denominator, output]`.
    NormalizeAttribute,
}

impl TransformationKind {
    /// Whether the transformation replaces feature geometry.
    pub fn derives_geometry(self) -> bool {
        matches!(self, Self::DeriveCentroids | Self::GenerateDotDensityPoints)
    }
}

/// Declared parameter of a transformation function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationParam {
    /// Parameter name.
    pub name: String,
    /// Declared type, as written in the TypeScript definition.
    #[serde(rename = "type")]
    pub ty: String,
}

/// Function bodies per target language.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransformationDefinitions {
    /// JavaScript function source.
    pub javascript: String,
    /// TypeScript function source.
    pub typescript: String,
}

/// One recorded transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    /// Unique name within the layer.
    pub name: String,
    /// What the transformation does.
    pub kind: TransformationKind,
    /// Declared parameters after the implicit GeoJSON input.
    pub params: Vec<TransformationParam>,
    /// Call-site arguments, positionally matching `params`.
    pub args: Vec<Value>,
    /// Generated function sources.
    pub definitions: TransformationDefinitions,
}

/// Ordered, name-keyed transformation pipeline.
///
/// Serialized as a list. Equality is order-sensitive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Transformation>", into = "Vec<Transformation>")]
pub struct Transformations(IndexMap<String, Transformation>);

impl PartialEq for Transformations {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl From<Vec<Transformation>> for Transformations {
    fn from(list: Vec<Transformation>) -> Self {
        Self(list.into_iter().map(|t| (t.name.clone(), t)).collect())
    }
}

impl From<Transformations> for Vec<Transformation> {
    fn from(transformations: Transformations) -> Self {
        transformations.0.into_values().collect()
    }
}

impl Transformations {
    /// Empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a step by name.
    pub fn get(&self, name: &str) -> Option<&Transformation> {
        self.0.get(name)
    }

    /// Mutable lookup by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Transformation> {
        self.0.get_mut(name)
    }

    /// Position of the named step.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.get_index_of(name)
    }

    /// Whether a step with `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Steps in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = &Transformation> {
        self.0.values()
    }

    /// Step names in pipeline order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// The geometry-deriving step, if any, with its position.
    pub fn geometry_deriving(&self) -> Option<(usize, &Transformation)> {
        self.0
            .values()
            .enumerate()
            .find(|(_, t)| t.kind.derives_geometry())
    }

    /// Insert at `index` (clamped), or append when `None`.
    ///
    /// Returns the transformation back if its name is already taken.
    pub fn insert(
        &mut self,
        index: Option<usize>,
        transformation: Transformation,
    ) -> Result<usize, Transformation> {
        if self.0.contains_key(&transformation.name) {
            return Err(transformation);
        }
        let at = index.map_or(self.0.len(), |i| i.min(self.0.len()));
        self.0
            .shift_insert(at, transformation.name.clone(), transformation);
        Ok(at)
    }

    /// Remove the named step, returning its former position.
    pub fn remove(&mut self, name: &str) -> Option<(usize, Transformation)> {
        self.0.shift_remove_full(name).map(|(i, _, t)| (i, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(name: &str) -> Transformation {
        Transformation {
            name: name.into(),
            kind: TransformationKind::DropAttribute,
            params: vec![],
            args: vec![Value::from(name)],
            definitions: TransformationDefinitions::default(),
        }
    }

    #[test]
    fn remove_then_insert_restores_position() {
        let mut pipeline = Transformations::from(vec![step("a"), step("b"), step("c")]);
        let before = pipeline.clone();
        let (index, removed) = pipeline.remove("b").unwrap();
        assert_eq!(index, 1);
        assert_eq!(pipeline.names().collect::<Vec<_>>(), ["a", "c"]);
        pipeline.insert(Some(index), removed).unwrap();
        assert_eq!(pipeline, before);
    }

    #[test]
    fn equality_is_order_sensitive() {
        let ab = Transformations::from(vec![step("a"), step("b")]);
        let ba = Transformations::from(vec![step("b"), step("a")]);
        assert_ne!(ab, ba);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut pipeline = Transformations::from(vec![step("a")]);
        assert!(pipeline.insert(None, step("a")).is_err());
        assert_eq!(pipeline.len(), 1);
    }
}
