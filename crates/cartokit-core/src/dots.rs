// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Seeded dot placement for dot-density layers.
//!
//! Dots are placed by rejection sampling inside each polygon's bounding box.
//! One generator is seeded per call and consumed in feature order, so the
//! same input and seed always produce the same dots.

use cartokit_ir::{Feature, FeatureCollection, Geometry, Position};
use geo::{Area, BoundingRect, Contains, Point, Polygon, Rect};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::error::TransformError;
use crate::geometry::polygons;

/// Draws allowed per requested dot before a feature gives up.
const ATTEMPTS_PER_DOT: usize = 64;

/// Most dots one feature may receive.
pub const MAX_DOTS_PER_FEATURE: usize = 100_000;

/// Most dots one layer may receive.
pub const MAX_DOTS: usize = 1_000_000;

/// Default units per dot: a tenth of the largest value, rounded, at least 1.
pub fn default_dot_value(fc: &FeatureCollection, attribute: &str) -> f64 {
    let max = fc
        .numbers(attribute)
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if max.is_finite() {
        (max / 10.0).round().max(1.0)
    } else {
        1.0
    }
}

/// Placement seed for a layer: FNV-1a 64 of its id.
pub fn dot_seed(layer_id: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    layer_id
        .bytes()
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}

/// Number of dots a feature with `value` receives, refused past
/// [`MAX_DOTS_PER_FEATURE`].
pub fn dot_count(value: f64, dot_value: f64) -> Result<usize, TransformError> {
    if !value.is_finite() || value <= 0.0 || dot_value <= 0.0 {
        return Ok(0);
    }
    let count = (value / dot_value).floor();
    if count > MAX_DOTS_PER_FEATURE as f64 {
        return Err(TransformError::TooManyDots {
            requested: count,
            limit: MAX_DOTS_PER_FEATURE,
        });
    }
    Ok(count as usize)
}

/// One point feature per `dot_value` units of `attribute`, each carrying
/// its parent feature's properties.
///
/// Counts are checked against [`MAX_DOTS_PER_FEATURE`] and [`MAX_DOTS`]
/// before any dot is placed.
pub fn generate_dots(
    fc: &FeatureCollection,
    attribute: &str,
    dot_value: f64,
    seed: u64,
) -> Result<FeatureCollection, TransformError> {
    let mut counts = Vec::with_capacity(fc.features.len());
    let mut total = 0usize;
    for feature in &fc.features {
        let wanted = dot_count(feature.number(attribute).unwrap_or(0.0), dot_value)?;
        total += wanted;
        if total > MAX_DOTS {
            return Err(TransformError::TooManyDots {
                requested: total as f64,
                limit: MAX_DOTS,
            });
        }
        counts.push(wanted);
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut dots = Vec::new();
    for (index, (feature, wanted)) in fc.features.iter().zip(counts).enumerate() {
        let Some(geometry) = feature.geometry.as_ref() else {
            continue;
        };
        if wanted == 0 {
            continue;
        }
        let placed = sample_geometry(geometry, wanted, &mut rng);
        if placed.len() < wanted {
            warn!(
                feature = index,
                wanted,
                placed = placed.len(),
                "dot sampling exhausted its attempts"
            );
        }
        dots.extend(placed.into_iter().map(|coordinates| {
            Feature::new(Geometry::Point { coordinates }, feature.properties.clone())
        }));
    }
    Ok(FeatureCollection::new(dots))
}

struct Part {
    polygon: Polygon<f64>,
    bounds: Rect<f64>,
    area: f64,
}

fn sample_geometry(geometry: &Geometry, wanted: usize, rng: &mut SmallRng) -> Vec<Position> {
    let parts: Vec<Part> = polygons(geometry)
        .into_iter()
        .filter_map(|polygon| {
            let bounds = polygon.bounding_rect()?;
            let area = polygon.unsigned_area();
            (area > 0.0).then_some(Part {
                polygon,
                bounds,
                area,
            })
        })
        .collect();
    let total: f64 = parts.iter().map(|part| part.area).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut placed = Vec::new();
    let mut attempts = wanted.saturating_mul(ATTEMPTS_PER_DOT);
    while placed.len() < wanted && attempts > 0 {
        attempts -= 1;
        // Pick a part proportional to its area so multipolygons fill evenly.
        let mut pick = rng.gen::<f64>() * total;
        let Some(part) = parts
            .iter()
            .find(|part| {
                pick -= part.area;
                pick < 0.0
            })
            .or_else(|| parts.last())
        else {
            break;
        };
        let (min, max) = (part.bounds.min(), part.bounds.max());
        let candidate = Point::new(rng.gen_range(min.x..=max.x), rng.gen_range(min.y..=max.y));
        if part.polygon.contains(&candidate) {
            placed.push([candidate.x(), candidate.y()]);
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square_feature(pop: f64) -> Feature {
        let ring = vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]];
        Feature::new(
            Geometry::Polygon {
                coordinates: vec![ring],
            },
            json!({ "pop": pop }).as_object().cloned().unwrap_or_default(),
        )
    }

    #[test]
    fn one_dot_per_dot_value() {
        let fc = FeatureCollection::new(vec![square_feature(25.0), square_feature(9.0)]);
        let dots = generate_dots(&fc, "pop", 5.0, 7).unwrap();
        assert_eq!(dots.len(), 5 + 1);
        assert!(dots.features.iter().all(|d| d.number("pop").is_some()));
    }

    #[test]
    fn same_seed_same_dots() {
        let fc = FeatureCollection::new(vec![square_feature(40.0)]);
        let dots = |seed| generate_dots(&fc, "pop", 2.0, seed).unwrap();
        assert_eq!(dots(11), dots(11));
        assert_ne!(dots(11), dots(12));
    }

    #[test]
    fn dots_land_inside_their_polygon() {
        let fc = FeatureCollection::new(vec![square_feature(100.0)]);
        for dot in generate_dots(&fc, "pop", 1.0, 3).unwrap().features {
            let Some(Geometry::Point { coordinates: [x, y] }) = dot.geometry else {
                panic!("dot is not a point");
            };
            assert!((0.0..=4.0).contains(&x) && (0.0..=4.0).contains(&y));
        }
    }

    #[test]
    fn default_dot_value_is_a_tenth_of_the_max() {
        let fc = FeatureCollection::new(vec![square_feature(25.0), square_feature(94.0)]);
        assert_eq!(default_dot_value(&fc, "pop"), 9.0);
        assert_eq!(default_dot_value(&fc, "missing"), 1.0);
        let small = FeatureCollection::new(vec![square_feature(3.0)]);
        assert_eq!(default_dot_value(&small, "pop"), 1.0);
    }

    #[test]
    fn seed_is_fnv1a() {
        assert_eq!(dot_seed(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(dot_seed("a"), 0xaf63_dc4c_8601_ec8c);
        assert_ne!(dot_seed("counties"), dot_seed("states"));
    }

    #[test]
    fn missing_or_zero_values_get_no_dots() {
        assert_eq!(dot_count(0.0, 1.0), Ok(0));
        assert_eq!(dot_count(f64::NAN, 1.0), Ok(0));
        assert_eq!(dot_count(3.9, 1.0), Ok(3));
    }

    #[test]
    fn tiny_dot_values_are_refused_before_sampling() {
        assert!(matches!(
            dot_count(10.0, 1e-300),
            Err(TransformError::TooManyDots { limit: MAX_DOTS_PER_FEATURE, .. })
        ));
        assert_eq!(
            dot_count(MAX_DOTS_PER_FEATURE as f64, 1.0),
            Ok(MAX_DOTS_PER_FEATURE)
        );

        let fc = FeatureCollection::new(vec![square_feature(25.0)]);
        assert!(matches!(
            generate_dots(&fc, "pop", 1e-300, 7),
            Err(TransformError::TooManyDots { .. })
        ));
    }

    #[test]
    fn layer_total_is_capped() {
        let per_feature = MAX_DOTS_PER_FEATURE as f64;
        let features = (0..=MAX_DOTS / MAX_DOTS_PER_FEATURE)
            .map(|_| square_feature(per_feature))
            .collect();
        let fc = FeatureCollection::new(features);
        assert_eq!(
            generate_dots(&fc, "pop", 1.0, 7),
            Err(TransformError::TooManyDots {
                requested: (MAX_DOTS + MAX_DOTS_PER_FEATURE) as f64,
                limit: MAX_DOTS,
            })
        );
    }
}
