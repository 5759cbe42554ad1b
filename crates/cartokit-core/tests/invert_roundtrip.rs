// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::collections::BTreeSet;

use cartokit_core::transform::scale_attribute;
use cartokit_core::{invert, patch, payload as p, Diff, LayerDiff, MapDiff, PatchError};
use cartokit_dry_tests::{counties, polygon_layer};
use cartokit_ir::{
    BasemapProvider, CategoricalScheme, ClassificationMethod, ColorScheme, ConstantStroke,
    FillVisualizationType, HeatmapWeightType, LayerType, Projection, QuantitativeScheme,
    SchemeDirection, Visibility,
};

fn on<P>(layer: &str, payload: P) -> LayerDiff<P> {
    LayerDiff::new(layer, payload)
}

/// One applicable diff per variant against [`common::every_layer_type`].
fn one_of_each() -> Vec<Diff> {
    let mut lakes = polygon_layer("lakes", counties());
    lakes.layout_mut().z = 40;
    vec![
        Diff::MapCenter(MapDiff::new(p::MapCenter { center: [2.35, 48.85] })),
        Diff::MapZoom(MapDiff::new(p::MapZoom { zoom: 11.0 })),
        Diff::MapProjection(MapDiff::new(p::MapProjection {
            projection: Projection::Globe,
        })),
        Diff::Basemap(MapDiff::new(p::Basemap {
            url: "https://tiles.example.com/style.json".into(),
            provider: BasemapProvider::Custom,
        })),
        Diff::AddLayer(on("lakes", p::AddLayer { layer: lakes })),
        Diff::RemoveLayer(on("stations", p::Empty {})),
        Diff::RenameLayer(on("counties", p::RenameLayer {
            display_name: "Counties (2020)".into(),
        })),
        Diff::LayerVisibility(on("rivers", p::LayerVisibility {
            visibility: Visibility::None,
        })),
        Diff::LayerTooltipVisibility(on("stations", p::LayerTooltipVisibility { visible: true })),
        Diff::LayerZ(on("counties", p::LayerZ { z: 99 })),
        Diff::LayerType(on("counties", p::LayerType {
            layer_type: LayerType::Point,
            snapshot: None,
        })),
        Diff::FillColor(on("counties", p::FillColor {
            color: "#ff0000".into(),
        })),
        Diff::FillOpacity(on("choropleth", p::FillOpacity { opacity: 0.3 })),
        Diff::AddFill(on("outlines", p::AddFill { fill: None })),
        Diff::RemoveFill(on("counties", p::Empty {})),
        Diff::FillAttribute(on("choropleth", p::FillAttribute {
            attribute: "density".into(),
            fill: None,
        })),
        Diff::FillVisualizationType(on("stations", p::FillVisualizationType {
            visualization_type: FillVisualizationType::Quantitative,
            fill: None,
        })),
        Diff::ColorScheme(on("regions", p::ColorScheme {
            scheme: ColorScheme::Categorical(CategoricalScheme::Set2),
            fill: None,
        })),
        Diff::ColorSchemeDirection(on("choropleth", p::ColorSchemeDirection {
            direction: SchemeDirection::Reverse,
            fill: None,
        })),
        Diff::ClassificationMethod(on("choropleth", p::ClassificationMethod {
            method: ClassificationMethod::Jenks,
            fill: None,
        })),
        Diff::StepCount(on("choropleth", p::StepCount { count: 3, fill: None })),
        Diff::StepValue(on("choropleth", p::StepValue {
            step: 0,
            value: 12.0,
            fill: None,
        })),
        Diff::CategoricalColor(on("regions", p::CategoricalColor {
            category: "Ada".into(),
            color: "#123456".into(),
        })),
        Diff::StrokeColor(on("counties", p::StrokeColor {
            color: "#00ff00".into(),
        })),
        Diff::StrokeWidth(on("rivers", p::StrokeWidth { width: 3.0 })),
        Diff::StrokeOpacity(on("counties", p::StrokeOpacity { opacity: 0.25 })),
        Diff::AddStroke(on("stations", p::AddStroke {
            stroke: Some(ConstantStroke {
                color: "#ffffff".into(),
                width: 2.0,
                opacity: 1.0,
            }),
        })),
        Diff::RemoveStroke(on("counties", p::Empty {})),
        Diff::PointSize(on("stations", p::PointSize { size: 7.0 })),
        Diff::SizeAttribute(on("symbols", p::SizeAttribute {
            attribute: "capacity".into(),
        })),
        Diff::SizeMin(on("symbols", p::SizeMin { min: 2.0 })),
        Diff::SizeMax(on("symbols", p::SizeMax { max: 30.0 })),
        Diff::DotAttribute(on("dots", p::DotAttribute {
            attribute: "density".into(),
            value: None,
        })),
        Diff::DotValue(on("dots", p::DotValue { value: 2.0 })),
        Diff::DotSize(on("dots", p::DotSize { size: 3.0 })),
        Diff::HeatmapWeightType(on("heat", p::HeatmapWeightType {
            weight_type: HeatmapWeightType::Quantitative,
            weight: None,
        })),
        Diff::HeatmapWeightAttribute(on("weighted", p::HeatmapWeightAttribute {
            attribute: "capacity".into(),
            weight: None,
        })),
        Diff::HeatmapWeightValue(on("heat", p::HeatmapWeightValue { value: 0.5 })),
        Diff::HeatmapRamp(on("heat", p::HeatmapRamp {
            scheme: QuantitativeScheme::Magma,
        })),
        Diff::HeatmapRampDirection(on("heat", p::HeatmapRampDirection {
            direction: SchemeDirection::Reverse,
        })),
        Diff::HeatmapRadius(on("heat", p::HeatmapRadius { radius: 25.0 })),
        Diff::HeatmapIntensity(on("heat", p::HeatmapIntensity { intensity: 2.0 })),
        Diff::HeatmapOpacity(on("heat", p::HeatmapOpacity { opacity: 0.4 })),
        Diff::AddTransformation(on("counties", p::AddTransformation {
            transformation: scale_attribute("population", 2.0),
            index: Some(0),
            geojson: None,
        })),
        Diff::RemoveTransformation(on("rivers", p::RemoveTransformation {
            name: "drop_length".into(),
        })),
    ]
}

#[test]
fn the_grid_covers_every_variant() {
    let tags: BTreeSet<&str> = one_of_each().iter().map(Diff::tag).collect();
    assert_eq!(tags.len(), 45);
}

#[test]
fn patching_the_inverse_restores_the_document() {
    let base = common::every_layer_type();
    for diff in one_of_each() {
        let inverse = invert(&diff, &base).unwrap_or_else(|e| panic!("{}: {e}", diff.tag()));
        let next = patch(&diff, &base).unwrap_or_else(|e| panic!("{}: {e}", diff.tag()));
        assert_ne!(next, base, "{} changed nothing", diff.tag());
        let restored = patch(&inverse, &next).unwrap_or_else(|e| panic!("{}: {e}", diff.tag()));
        assert_eq!(restored, base, "{} did not round-trip", diff.tag());
    }
}

#[test]
fn the_inverse_of_the_inverse_redoes_the_diff() {
    let base = common::every_layer_type();
    for diff in one_of_each() {
        let next = patch(&diff, &base).unwrap();
        let inverse = invert(&diff, &base).unwrap();
        let again = invert(&inverse, &next).unwrap();
        let previous = patch(&inverse, &next).unwrap();
        assert_eq!(patch(&again, &previous).unwrap(), next, "{}", diff.tag());
    }
}

#[test]
fn inverting_against_a_missing_layer_fails() {
    let base = common::every_layer_type();
    let diff = Diff::StrokeWidth(on("nowhere", p::StrokeWidth { width: 1.0 }));
    assert_eq!(
        invert(&diff, &base),
        Err(PatchError::LayerNotFound("nowhere".into()))
    );
}
