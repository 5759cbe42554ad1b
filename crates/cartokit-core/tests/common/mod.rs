// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code, clippy::expect_used)]

use cartokit_core::{patch, payload, transition, Diff, LayerDiff, StyleDefaults};
use cartokit_dry_tests::{counties, line_layer, point_layer, polygon_layer, rivers, stations, IrBuilder};
use cartokit_ir::{CartoKitIR, CartoKitLayer, FillVisualizationType, HeatmapWeightType, LayerType};

/// Converted copy of a fixture layer.
pub fn converted(layer: CartoKitLayer, to: LayerType) -> CartoKitLayer {
    transition(&layer, to, &StyleDefaults::default()).expect("fixture transition")
}

/// Apply `diff` or fail the test.
pub fn apply(ir: &CartoKitIR, diff: Diff) -> CartoKitIR {
    patch(&diff, ir).expect("fixture patch")
}

/// One layer of every type, plus a categorical choropleth, an
/// attribute-weighted heatmap, an unfilled polygon layer and a line
/// carrying a tabular transformation.
pub fn every_layer_type() -> CartoKitIR {
    let ir = IrBuilder::new()
        .center(-122.4, 37.8)
        .layer(polygon_layer("counties", counties()))
        .layer(converted(polygon_layer("choropleth", counties()), LayerType::Choropleth))
        .layer(converted(polygon_layer("regions", counties()), LayerType::Choropleth))
        .layer(converted(polygon_layer("dots", counties()), LayerType::DotDensity))
        .layer(line_layer("rivers", rivers()))
        .layer(point_layer("stations", stations()))
        .layer(converted(point_layer("symbols", stations()), LayerType::ProportionalSymbol))
        .layer(converted(point_layer("heat", stations()), LayerType::Heatmap))
        .layer(converted(point_layer("weighted", stations()), LayerType::Heatmap))
        .layer(polygon_layer("outlines", counties()))
        .build();
    let ir = apply(&ir, Diff::RemoveFill(LayerDiff::new("outlines", payload::Empty {})));
    let ir = apply(
        &ir,
        Diff::FillVisualizationType(LayerDiff::new(
            "regions",
            payload::FillVisualizationType {
                visualization_type: FillVisualizationType::Categorical,
                fill: None,
            },
        )),
    );
    let ir = apply(
        &ir,
        Diff::HeatmapWeightType(LayerDiff::new(
            "weighted",
            payload::HeatmapWeightType {
                weight_type: HeatmapWeightType::Quantitative,
                weight: None,
            },
        )),
    );
    apply(
        &ir,
        Diff::AddTransformation(LayerDiff::new(
            "rivers",
            payload::AddTransformation {
                transformation: cartokit_core::transform::drop_attribute("length"),
                index: None,
                geojson: None,
            },
        )),
    )
}
