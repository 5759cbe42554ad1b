// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

mod common;

use cartokit_core::{derivation, dots::dot_seed, transition, PatchError, StyleDefaults};
use cartokit_dry_tests::{counties, line_layer, point_layer, polygon_layer, rivers, stations};
use cartokit_ir::{
    CartoKitLayer, ChoroplethFill, GeometryClass, LayerType, DERIVE_CENTROIDS,
    GENERATE_DOT_DENSITY_POINTS,
};
use common::converted;
use proptest::prelude::*;

/// Source layers: every type, with heatmaps drawn from both points and
/// polygons.
const SOURCES: usize = 8;

fn source(kind: usize) -> CartoKitLayer {
    let polygons = || polygon_layer("shapes", counties());
    let points = || point_layer("shapes", stations());
    match kind {
        0 => polygons(),
        1 => line_layer("shapes", rivers()),
        2 => points(),
        3 => converted(polygons(), LayerType::Choropleth),
        4 => converted(points(), LayerType::ProportionalSymbol),
        5 => converted(polygons(), LayerType::DotDensity),
        6 => converted(points(), LayerType::Heatmap),
        _ => converted(polygons(), LayerType::Heatmap),
    }
}

fn geometry_derivations(layer: &CartoKitLayer) -> usize {
    layer
        .data()
        .transformations
        .iter()
        .filter(|t| t.kind.derives_geometry())
        .count()
}

fn layer_type() -> impl Strategy<Value = LayerType> {
    prop::sample::select(LayerType::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn transition_is_total(kind in 0..SOURCES, target in layer_type(), count in 2usize..=9) {
        let defaults = StyleDefaults { count, ..StyleDefaults::default() };
        let layer = source(kind);
        let geometry = layer.data().source_geojson.geometry_class();
        match transition(&layer, target, &defaults) {
            Ok(next) => {
                prop_assert_eq!(next.layer_type(), target);
                prop_assert_eq!(next.id(), layer.id());
                prop_assert_eq!(next.display_name(), layer.display_name());
                prop_assert_eq!(next.layout(), layer.layout());
                prop_assert!(target == layer.layer_type() || derivation(target, geometry).is_some());
                prop_assert!(geometry_derivations(&next) <= 1);
                if target != LayerType::DotDensity {
                    prop_assert!(!next.data().transformations.contains(GENERATE_DOT_DENSITY_POINTS));
                }
                if let CartoKitLayer::Choropleth(c) = &next {
                    if let ChoroplethFill::Quantitative(q) = &c.style.fill {
                        prop_assert_eq!(q.thresholds.len(), q.count - 1);
                        if layer.layer_type() != LayerType::Choropleth {
                            prop_assert_eq!(q.count, count);
                        }
                    }
                }
            }
            Err(PatchError::IllegalTransition { from, to, .. }) => {
                prop_assert_eq!(from, layer.layer_type());
                prop_assert_eq!(to, target);
                prop_assert!(derivation(target, geometry).is_none());
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn same_type_is_identity(kind in 0..SOURCES) {
        let layer = source(kind);
        let same = transition(&layer, layer.layer_type(), &StyleDefaults::default()).unwrap();
        prop_assert_eq!(same, layer);
    }

    #[test]
    fn polygons_come_back_with_their_source_geometry(via in layer_type()) {
        let defaults = StyleDefaults::default();
        let layer = source(0);
        prop_assume!(via != LayerType::Line);
        let away = transition(&layer, via, &defaults).unwrap();
        let back = transition(&away, LayerType::Polygon, &defaults).unwrap();
        prop_assert_eq!(&back.data().geojson, &layer.data().source_geojson);
        prop_assert!(back.data().transformations.is_empty());
    }
}

#[test]
fn point_types_over_polygons_draw_centroids() {
    let layer = polygon_layer("shapes", counties());
    for target in [LayerType::Point, LayerType::ProportionalSymbol, LayerType::Heatmap] {
        let next = transition(&layer, target, &StyleDefaults::default()).unwrap();
        assert!(next.data().transformations.contains(DERIVE_CENTROIDS));
        assert_eq!(
            next.data().geojson.geometry_class(),
            Some(GeometryClass::Point)
        );
        assert_eq!(next.data().geojson.len(), counties().len());
    }
}

#[test]
fn dots_are_reproducible_per_layer() {
    let defaults = StyleDefaults::default();
    let a = transition(&polygon_layer("shapes", counties()), LayerType::DotDensity, &defaults)
        .unwrap();
    let b = transition(&polygon_layer("shapes", counties()), LayerType::DotDensity, &defaults)
        .unwrap();
    assert_eq!(a.data().geojson, b.data().geojson);

    let record = a
        .data()
        .transformations
        .get(GENERATE_DOT_DENSITY_POINTS)
        .expect("dot record");
    assert_eq!(record.args[2], serde_json::json!(dot_seed("shapes")));
}

#[test]
fn dot_density_gives_up_its_dots() {
    let dots = source(5);
    assert!(dots.data().transformations.contains(GENERATE_DOT_DENSITY_POINTS));
    for target in LayerType::ALL {
        if target == LayerType::DotDensity {
            continue;
        }
        let Ok(next) = transition(&dots, target, &StyleDefaults::default()) else {
            continue;
        };
        assert!(!next.data().transformations.contains(GENERATE_DOT_DENSITY_POINTS));
        assert_ne!(next.data().geojson.len(), dots.data().geojson.len());
    }
}

#[test]
fn polygon_heatmap_to_point_keeps_one_centroid_record() {
    let heat = source(7);
    assert!(heat.data().transformations.contains(DERIVE_CENTROIDS));
    let point = transition(&heat, LayerType::Point, &StyleDefaults::default()).unwrap();
    assert_eq!(geometry_derivations(&point), 1);
    assert!(point.data().transformations.contains(DERIVE_CENTROIDS));
    assert_eq!(point.data().geojson, heat.data().geojson);
}
