// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Diff payloads, one struct per diff variant.
//!
//! Optional fields are restore payloads: only Invert fills them in, and
//! Patch uses them verbatim instead of re-deriving. They are omitted from
//! the wire form when absent.

use cartokit_ir as ir;
use serde::{Deserialize, Serialize};

macro_rules! payloads {
    ($(
        $(#[$meta:meta])*
        $name:ident { $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)? }
    )*) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }
    )*};
}

payloads! {
    /// `map-center`.
    MapCenter {
        /// New center.
        center: ir::LngLat,
    }
    /// `map-zoom`.
    MapZoom {
        /// New zoom level.
        zoom: f64,
    }
    /// `map-projection`.
    MapProjection {
        /// New projection.
        projection: ir::Projection,
    }
    /// `basemap`.
    Basemap {
        /// Style URL.
        url: String,
        /// Style provider.
        provider: ir::BasemapProvider,
    }

    /// `add-layer`.
    AddLayer {
        /// The complete layer to insert.
        layer: ir::CartoKitLayer,
    }
    /// Payload of diffs that carry no data (`remove-layer`, `remove-fill`,
    /// `remove-stroke`).
    Empty {}
    /// `rename-layer`.
    RenameLayer {
        /// New user-facing name.
        display_name: String,
    }
    /// `layer-visibility`.
    LayerVisibility {
        /// New visibility.
        visibility: ir::Visibility,
    }
    /// `layer-tooltip-visibility`.
    LayerTooltipVisibility {
        /// Whether tooltips show.
        visible: bool,
    }
    /// `layer-z`.
    LayerZ {
        /// New draw order.
        z: u32,
    }
    /// `layer-type`.
    LayerType {
        /// Target type.
        layer_type: ir::LayerType,
        /// Exact layer to restore instead of transitioning.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        snapshot: Option<Box<ir::CartoKitLayer>>,
    }

    /// `fill-color`.
    FillColor {
        /// New constant color.
        color: ir::Color,
    }
    /// `fill-opacity`.
    FillOpacity {
        /// New opacity.
        opacity: f64,
    }
    /// `add-fill`.
    AddFill {
        /// Fill to restore; a default constant fill otherwise.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<ir::Fill>,
    }
    /// `fill-attribute`.
    FillAttribute {
        /// Attribute driving the fill.
        attribute: String,
        /// Fill to restore instead of re-deriving.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<ir::Fill>,
    }
    /// `fill-visualization-type`.
    FillVisualizationType {
        /// Target visualization.
        visualization_type: ir::FillVisualizationType,
        /// Fill to restore instead of re-deriving.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<ir::Fill>,
    }
    /// `color-scheme`.
    ColorScheme {
        /// New scheme; its kind must match the fill's.
        scheme: ir::ColorScheme,
        /// Fill to restore instead of re-deriving.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<ir::Fill>,
    }
    /// `color-scheme-direction`.
    ColorSchemeDirection {
        /// New direction.
        direction: ir::SchemeDirection,
        /// Fill to restore instead of re-deriving.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<ir::Fill>,
    }
    /// `classification-method`.
    ClassificationMethod {
        /// New method.
        method: ir::ClassificationMethod,
        /// Fill to restore instead of re-deriving.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<ir::Fill>,
    }
    /// `step-count`.
    StepCount {
        /// New class count.
        count: usize,
        /// Fill to restore instead of re-deriving.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<ir::Fill>,
    }
    /// `step-value`.
    StepValue {
        /// Threshold index.
        step: usize,
        /// New threshold.
        value: f64,
        /// Fill to restore instead of re-deriving.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<ir::Fill>,
    }
    /// `categorical-color`.
    CategoricalColor {
        /// Category to recolor.
        category: String,
        /// New color.
        color: ir::Color,
    }

    /// `stroke-color`.
    StrokeColor {
        /// New color.
        color: ir::Color,
    }
    /// `stroke-width`.
    StrokeWidth {
        /// New width.
        width: f64,
    }
    /// `stroke-opacity`.
    StrokeOpacity {
        /// New opacity.
        opacity: f64,
    }
    /// `add-stroke`.
    AddStroke {
        /// Stroke to restore; the default stroke otherwise.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<ir::ConstantStroke>,
    }

    /// `point-size`.
    PointSize {
        /// New radius.
        size: f64,
    }
    /// `size-attribute`.
    SizeAttribute {
        /// Attribute driving the radius.
        attribute: String,
    }
    /// `size-min`.
    SizeMin {
        /// New minimum radius.
        min: f64,
    }
    /// `size-max`.
    SizeMax {
        /// New maximum radius.
        max: f64,
    }

    /// `dot-attribute`.
    DotAttribute {
        /// Attribute counted by the dots.
        attribute: String,
        /// Dot value to restore instead of re-deriving.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<f64>,
    }
    /// `dot-value`.
    DotValue {
        /// Units per dot.
        value: f64,
    }
    /// `dot-size`.
    DotSize {
        /// Dot radius.
        size: f64,
    }

    /// `heatmap-weight-type`.
    HeatmapWeightType {
        /// Target weight kind.
        weight_type: ir::HeatmapWeightType,
        /// Weight to restore instead of re-deriving.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weight: Option<ir::HeatmapWeight>,
    }
    /// `heatmap-weight-attribute`.
    HeatmapWeightAttribute {
        /// Attribute driving the weight.
        attribute: String,
        /// Weight to restore instead of re-deriving.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weight: Option<ir::HeatmapWeight>,
    }
    /// `heatmap-weight-value`.
    HeatmapWeightValue {
        /// Constant weight.
        value: f64,
    }
    /// `heatmap-ramp`.
    HeatmapRamp {
        /// New ramp scheme.
        scheme: ir::QuantitativeScheme,
    }
    /// `heatmap-ramp-direction`.
    HeatmapRampDirection {
        /// New ramp direction.
        direction: ir::SchemeDirection,
    }
    /// `heatmap-radius`.
    HeatmapRadius {
        /// Kernel radius in pixels.
        radius: f64,
    }
    /// `heatmap-intensity`.
    HeatmapIntensity {
        /// Intensity multiplier.
        intensity: f64,
    }
    /// `heatmap-opacity`.
    HeatmapOpacity {
        /// Layer opacity.
        opacity: f64,
    }

    /// `add-transformation`.
    AddTransformation {
        /// Record to insert.
        transformation: ir::Transformation,
        /// Position to insert at; appended otherwise.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
        /// Rendered data to restore instead of re-folding.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        geojson: Option<ir::FeatureCollection>,
    }
    /// `remove-transformation`.
    RemoveTransformation {
        /// Name of the record to remove.
        name: String,
    }
}
