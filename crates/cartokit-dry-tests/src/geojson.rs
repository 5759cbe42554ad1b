// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! GeoJSON builders.
//!
//! The canned collections carry a string attribute first and numeric ones
//! after it, so attribute selection has something to skip over.

use cartokit_ir::{Feature, FeatureCollection, Geometry, Position, Properties};
use serde_json::{json, Value};

/// Properties from a JSON object literal. Anything else yields no properties.
pub fn props(value: Value) -> Properties {
    match value {
        Value::Object(map) => map,
        _ => Properties::new(),
    }
}

/// Closed square ring with its lower-left corner at `(x, y)`.
pub fn square_ring(x: f64, y: f64, side: f64) -> Vec<Position> {
    vec![
        [x, y],
        [x + side, y],
        [x + side, y + side],
        [x, y + side],
        [x, y],
    ]
}

/// Square polygon feature.
pub fn square(x: f64, y: f64, side: f64, properties: Value) -> Feature {
    Feature::new(
        Geometry::Polygon {
            coordinates: vec![square_ring(x, y, side)],
        },
        props(properties),
    )
}

/// Point feature.
pub fn point(x: f64, y: f64, properties: Value) -> Feature {
    Feature::new(Geometry::Point { coordinates: [x, y] }, props(properties))
}

/// LineString feature.
pub fn line(coordinates: &[Position], properties: Value) -> Feature {
    Feature::new(
        Geometry::LineString {
            coordinates: coordinates.to_vec(),
        },
        props(properties),
    )
}

/// Four unit squares in a row with `name`, `region`, `population` and
/// `density` properties.
pub fn counties() -> FeatureCollection {
    let rows = [
        ("Ada", "north", 10.0, 1.5),
        ("Bay", "north", 40.0, 4.0),
        ("Cole", "south", 90.0, 9.5),
        ("Dane", "south", 160.0, 16.0),
    ];
    FeatureCollection::new(
        rows.iter()
            .enumerate()
            .map(|(i, (name, region, population, density))| {
                square(
                    i as f64 * 2.0,
                    0.0,
                    1.0,
                    json!({
                        "name": name,
                        "region": region,
                        "population": population,
                        "density": density,
                    }),
                )
            })
            .collect(),
    )
}

/// Five points with `name`, `riders` and `capacity` properties.
pub fn stations() -> FeatureCollection {
    FeatureCollection::new(
        [2.0, 8.0, 16.0, 32.0, 64.0]
            .iter()
            .enumerate()
            .map(|(i, riders)| {
                point(
                    i as f64,
                    i as f64 * 0.5,
                    json!({
                        "name": format!("S{i}"),
                        "riders": riders,
                        "capacity": 100.0 - riders,
                    }),
                )
            })
            .collect(),
    )
}

/// Two lines with `name` and `length` properties.
pub fn rivers() -> FeatureCollection {
    FeatureCollection::new(vec![
        line(
            &[[0.0, 0.0], [1.0, 1.0], [2.0, 1.0]],
            json!({ "name": "Arn", "length": 3.0 }),
        ),
        line(
            &[[0.0, 2.0], [3.0, 2.0]],
            json!({ "name": "Brook", "length": 3.0 }),
        ),
    ])
}
