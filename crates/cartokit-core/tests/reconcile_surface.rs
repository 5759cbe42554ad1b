// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

use cartokit_core::{payload as p, Diff, Editor, EditorConfig, LayerDiff, MapDiff};
use cartokit_dry_tests::sample_ir;
use cartokit_ir::{BasemapProvider, GeometryClass, LayerType, Visibility};
use cartokit_map_mock::{MapCall, MockMap};
use cartokit_map_port::{Interaction, PrimitiveKind};
use serde_json::json;

const COUNTIES: [&str; 4] = [
    "counties",
    "counties-stroke",
    "counties-hover",
    "counties-select",
];

const COUNTIES_UNDER_STATIONS: [&str; 5] = [
    "counties",
    "counties-stroke",
    "counties-hover",
    "counties-select",
    "stations",
];

fn editor() -> Editor<MockMap> {
    Editor::new(sample_ir(), MockMap::new(), EditorConfig::default()).expect("initial render")
}

fn on<P>(layer: &str, payload: P) -> LayerDiff<P> {
    LayerDiff::new(layer, payload)
}

fn to_type(layer: &str, layer_type: LayerType) -> Diff {
    Diff::LayerType(on(
        layer,
        p::LayerType {
            layer_type,
            snapshot: None,
        },
    ))
}

#[test]
fn initial_render_stacks_primitives_by_z() {
    let editor = editor();
    let map = editor.map();
    assert_eq!(
        map.layer_ids(),
        COUNTIES_UNDER_STATIONS
    );
    assert_eq!(map.layer("counties").unwrap().kind, PrimitiveKind::Fill);
    assert_eq!(map.layer("stations").unwrap().kind, PrimitiveKind::Circle);
    assert_eq!(
        map.handlers_on("counties"),
        [Interaction::Hover, Interaction::Select]
    );
    assert!(map.handlers_on("counties-stroke").is_empty());
    assert_eq!(map.sources.len(), 2);
}

#[test]
fn polygon_to_point_redraws_in_the_same_slot() {
    let mut editor = editor();
    editor.apply_diff(to_type("counties", LayerType::Point)).unwrap();
    let map = editor.map();

    assert_eq!(map.layer_ids(), ["counties", "stations"]);
    assert_eq!(map.layer("counties").unwrap().kind, PrimitiveKind::Circle);
    assert!(map.orphaned_handlers().is_empty());
    assert_eq!(
        map.source("counties").unwrap().geometry_class(),
        Some(GeometryClass::Point)
    );
    assert!(map.feature_state.is_empty());
}

#[test]
fn undoing_a_redraw_restores_the_stack() {
    let mut editor = editor();
    let before: Vec<String> = editor.map().layer_ids().iter().map(|s| (*s).to_owned()).collect();
    editor.apply_diff(to_type("counties", LayerType::DotDensity)).unwrap();
    editor.undo().unwrap();
    assert_eq!(editor.map().layer_ids(), before);
    assert!(editor.map().orphaned_handlers().is_empty());
    assert_eq!(
        editor.map().source("counties"),
        Some(&editor.ir().layer("counties").unwrap().data().geojson)
    );
}

#[test]
fn point_to_symbols_touches_only_paint() {
    let mut editor = editor();
    editor.map_mut().take_calls();
    editor
        .apply_diff(to_type("stations", LayerType::ProportionalSymbol))
        .unwrap();
    let calls = editor.map_mut().take_calls();
    assert!(!calls.is_empty());
    assert!(calls
        .iter()
        .all(|c| matches!(c, MapCall::SetPaint(layer, _) if layer == "stations")));
    let radius = editor.map().paint("stations", "circle-radius").unwrap();
    assert_eq!(radius[0], json!("interpolate"));
}

#[test]
fn heatmaps_carry_no_handlers() {
    let mut editor = editor();
    editor.apply_diff(to_type("stations", LayerType::Heatmap)).unwrap();
    assert!(editor.map().handlers_on("stations").is_empty());
    assert!(editor.map().orphaned_handlers().is_empty());
    assert!(editor.map().paint("stations", "heatmap-color").is_some());
}

#[test]
fn visibility_reaches_every_primitive() {
    let mut editor = editor();
    editor
        .apply_diff(Diff::LayerVisibility(on(
            "counties",
            p::LayerVisibility {
                visibility: Visibility::None,
            },
        )))
        .unwrap();
    for id in COUNTIES {
        assert_eq!(editor.map().layout(id, "visibility"), Some(&json!("none")), "{id}");
    }
    assert_eq!(
        editor.map().layout("stations", "visibility"),
        Some(&json!("visible"))
    );
}

#[test]
fn raising_a_layer_moves_its_whole_stack() {
    let mut editor = editor();
    editor
        .apply_diff(Diff::LayerZ(on("counties", p::LayerZ { z: 10 })))
        .unwrap();
    assert_eq!(
        editor.map().layer_ids(),
        [
            "stations",
            "counties",
            "counties-stroke",
            "counties-hover",
            "counties-select"
        ]
    );
    editor.undo().unwrap();
    assert_eq!(
        editor.map().layer_ids(),
        COUNTIES_UNDER_STATIONS
    );
}

#[test]
fn removed_layers_come_back_below_their_neighbours() {
    let mut editor = editor();
    editor
        .apply_diff(Diff::RemoveLayer(on("counties", p::Empty {})))
        .unwrap();
    assert_eq!(editor.map().layer_ids(), ["stations"]);
    assert!(editor.map().source("counties").is_none());
    assert!(editor.map().orphaned_handlers().is_empty());

    editor.undo().unwrap();
    assert_eq!(
        editor.map().layer_ids(),
        COUNTIES_UNDER_STATIONS
    );
}

#[test]
fn tooltips_toggle_a_handler() {
    let mut editor = editor();
    editor
        .apply_diff(Diff::LayerTooltipVisibility(on(
            "stations",
            p::LayerTooltipVisibility { visible: true },
        )))
        .unwrap();
    assert!(editor
        .map()
        .handlers_on("stations")
        .contains(&Interaction::Tooltip));
    editor.undo().unwrap();
    assert!(!editor
        .map()
        .handlers_on("stations")
        .contains(&Interaction::Tooltip));
}

#[test]
fn basemap_swap_redraws_the_document() {
    let mut editor = editor();
    let url = "https://tiles.example.com/dark.json";
    editor
        .apply_diff(Diff::Basemap(MapDiff::new(p::Basemap {
            url: url.into(),
            provider: BasemapProvider::Custom,
        })))
        .unwrap();
    assert_eq!(editor.map().style.as_deref(), Some(url));
    assert_eq!(
        editor.map().layer_ids(),
        COUNTIES_UNDER_STATIONS
    );
    assert_eq!(editor.map().handlers_on("stations").len(), 2);
}
