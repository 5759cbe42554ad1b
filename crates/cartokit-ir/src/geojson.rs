// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Minimal GeoJSON model carried by layer data.
//!
//! Only the subset the editor derives geometry from is modelled: positions
//! are 2D `[lng, lat]` pairs and feature properties keep their declaration
//! order, which attribute selection depends on.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A `[longitude, latitude]` pair.
pub type Position = [f64; 2];

/// Feature properties in declaration order.
pub type Properties = Map<String, Value>;

/// GeoJSON geometry object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// A single position.
    Point {
        /// The point position.
        coordinates: Position,
    },
    /// Several unconnected positions.
    MultiPoint {
        /// The member positions.
        coordinates: Vec<Position>,
    },
    /// A connected line.
    LineString {
        /// Line vertices in drawing order.
        coordinates: Vec<Position>,
    },
    /// Several lines.
    MultiLineString {
        /// Member lines.
        coordinates: Vec<Vec<Position>>,
    },
    /// A polygon: exterior ring followed by holes.
    Polygon {
        /// Closed linear rings.
        coordinates: Vec<Vec<Position>>,
    },
    /// Several polygons.
    MultiPolygon {
        /// Member polygons.
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    /// A heterogeneous collection.
    GeometryCollection {
        /// Member geometries.
        geometries: Vec<Geometry>,
    },
}

/// Coarse geometry class used for layer-type legality checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryClass {
    /// Point or MultiPoint.
    Point,
    /// LineString or MultiLineString.
    Line,
    /// Polygon or MultiPolygon.
    Polygon,
}

impl core::fmt::Display for GeometryClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Point => "Point",
            Self::Line => "LineString",
            Self::Polygon => "Polygon",
        };
        f.write_str(name)
    }
}

impl Geometry {
    /// Class of this geometry. Collections report their first classified member.
    pub fn class(&self) -> Option<GeometryClass> {
        match self {
            Self::Point { .. } | Self::MultiPoint { .. } => Some(GeometryClass::Point),
            Self::LineString { .. } | Self::MultiLineString { .. } => Some(GeometryClass::Line),
            Self::Polygon { .. } | Self::MultiPolygon { .. } => Some(GeometryClass::Polygon),
            Self::GeometryCollection { geometries } => geometries.iter().find_map(Self::class),
        }
    }
}

/// A geometry with attached properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    /// Optional feature identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// The feature geometry (`null` is permitted by GeoJSON).
    pub geometry: Option<Geometry>,
    /// Attribute values.
    #[serde(default)]
    pub properties: Properties,
}

impl Feature {
    /// Build a feature without an identifier.
    pub fn new(geometry: Geometry, properties: Properties) -> Self {
        Self {
            id: None,
            geometry: Some(geometry),
            properties,
        }
    }

    /// Numeric value of `attribute`, if present and numeric.
    pub fn number(&self, attribute: &str) -> Option<f64> {
        self.properties.get(attribute).and_then(Value::as_f64)
    }
}

/// An ordered list of features.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    /// Member features in source order.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Wrap a list of features.
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Geometry class of the first feature that has a classified geometry.
    pub fn geometry_class(&self) -> Option<GeometryClass> {
        self.features
            .iter()
            .filter_map(|f| f.geometry.as_ref())
            .find_map(Geometry::class)
    }

    /// Numeric values of `attribute` across all features, skipping non-numbers.
    pub fn numbers(&self, attribute: &str) -> Vec<f64> {
        self.features
            .iter()
            .filter_map(|f| f.number(attribute))
            .collect()
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn feature_collection_round_trips_geojson_text() {
        let raw = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [1.0, 2.0] },
                "properties": { "b": 1, "a": "x" }
            }]
        });
        let fc: FeatureCollection = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(fc.geometry_class(), Some(GeometryClass::Point));
        let keys: Vec<_> = fc.features[0].properties.keys().cloned().collect();
        assert_eq!(keys, vec!["b".to_string(), "a".to_string()]);
        assert_eq!(serde_json::to_value(&fc).unwrap(), raw);
    }

    #[test]
    fn collection_class_skips_null_geometry() {
        let fc = FeatureCollection::new(vec![
            Feature {
                id: None,
                geometry: None,
                properties: Properties::new(),
            },
            Feature::new(
                Geometry::MultiLineString {
                    coordinates: vec![vec![[0.0, 0.0], [1.0, 1.0]]],
                },
                Properties::new(),
            ),
        ]);
        assert_eq!(fc.geometry_class(), Some(GeometryClass::Line));
    }
}
