// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Diffs: atomic, serializable descriptions of one document edit.
//!
//! Wire shape is `{ "type": <kebab-case tag>, "layerId"?: string,
//! "payload": {...} }`. Map-level variants have no `layerId`.

pub mod payload;

use cartokit_ir::LayerId;
use serde::{Deserialize, Serialize};

use payload as p;

/// Envelope of a layer-scoped diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDiff<P> {
    /// Target layer.
    #[serde(rename = "layerId")]
    pub layer_id: LayerId,
    /// Variant-specific payload.
    pub payload: P,
}

impl<P> LayerDiff<P> {
    /// Build an envelope.
    pub fn new(layer_id: impl Into<LayerId>, payload: P) -> Self {
        Self {
            layer_id: layer_id.into(),
            payload,
        }
    }
}

/// Envelope of a map-level diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDiff<P> {
    /// Variant-specific payload.
    pub payload: P,
}

impl<P> MapDiff<P> {
    /// Build an envelope.
    pub fn new(payload: P) -> Self {
        Self { payload }
    }
}

/// Which patcher and reconciler handle a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffFamily {
    /// Camera, projection and basemap.
    Map,
    /// Layer structure and metadata.
    Layer,
    /// Layer type transitions.
    LayerType,
    /// Fill style.
    Fill,
    /// Stroke style.
    Stroke,
    /// Circle size.
    Size,
    /// Dot-density parameters.
    DotDensity,
    /// Heatmap parameters.
    Heatmap,
    /// Transformation pipeline.
    Transformation,
}

/// One document edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Diff {
    /// Move the camera.
    MapCenter(MapDiff<p::MapCenter>),
    /// Zoom the camera.
    MapZoom(MapDiff<p::MapZoom>),
    /// Change projection.
    MapProjection(MapDiff<p::MapProjection>),
    /// Swap the basemap style.
    Basemap(MapDiff<p::Basemap>),

    /// Insert a layer.
    AddLayer(LayerDiff<p::AddLayer>),
    /// Delete a layer.
    RemoveLayer(LayerDiff<p::Empty>),
    /// Rename a layer.
    RenameLayer(LayerDiff<p::RenameLayer>),
    /// Show or hide a layer.
    LayerVisibility(LayerDiff<p::LayerVisibility>),
    /// Toggle tooltips.
    LayerTooltipVisibility(LayerDiff<p::LayerTooltipVisibility>),
    /// Change draw order.
    LayerZ(LayerDiff<p::LayerZ>),
    /// Convert to another layer type.
    LayerType(LayerDiff<p::LayerType>),

    /// Set the constant fill color.
    FillColor(LayerDiff<p::FillColor>),
    /// Set the fill opacity.
    FillOpacity(LayerDiff<p::FillOpacity>),
    /// Add a fill to a layer without one.
    AddFill(LayerDiff<p::AddFill>),
    /// Remove an optional fill.
    RemoveFill(LayerDiff<p::Empty>),
    /// Change the attribute of a data-driven fill.
    FillAttribute(LayerDiff<p::FillAttribute>),
    /// Switch between constant, categorical and quantitative fills.
    FillVisualizationType(LayerDiff<p::FillVisualizationType>),
    /// Change the fill color scheme.
    ColorScheme(LayerDiff<p::ColorScheme>),
    /// Reverse or restore the fill color scheme.
    ColorSchemeDirection(LayerDiff<p::ColorSchemeDirection>),
    /// Change the classification method.
    ClassificationMethod(LayerDiff<p::ClassificationMethod>),
    /// Change the class count.
    StepCount(LayerDiff<p::StepCount>),
    /// Set one threshold by hand.
    StepValue(LayerDiff<p::StepValue>),
    /// Recolor one category.
    CategoricalColor(LayerDiff<p::CategoricalColor>),

    /// Set the stroke color.
    StrokeColor(LayerDiff<p::StrokeColor>),
    /// Set the stroke width.
    StrokeWidth(LayerDiff<p::StrokeWidth>),
    /// Set the stroke opacity.
    StrokeOpacity(LayerDiff<p::StrokeOpacity>),
    /// Add a stroke to a layer without one.
    AddStroke(LayerDiff<p::AddStroke>),
    /// Remove an optional stroke.
    RemoveStroke(LayerDiff<p::Empty>),

    /// Set a point layer's radius.
    PointSize(LayerDiff<p::PointSize>),
    /// Change the attribute sizing proportional symbols.
    SizeAttribute(LayerDiff<p::SizeAttribute>),
    /// Set the smallest proportional symbol radius.
    SizeMin(LayerDiff<p::SizeMin>),
    /// Set the largest proportional symbol radius.
    SizeMax(LayerDiff<p::SizeMax>),

    /// Change the attribute counted by dots.
    DotAttribute(LayerDiff<p::DotAttribute>),
    /// Change units per dot.
    DotValue(LayerDiff<p::DotValue>),
    /// Change dot radius.
    DotSize(LayerDiff<p::DotSize>),

    /// Switch between constant and attribute-driven weights.
    HeatmapWeightType(LayerDiff<p::HeatmapWeightType>),
    /// Change the attribute weighting the heatmap.
    HeatmapWeightAttribute(LayerDiff<p::HeatmapWeightAttribute>),
    /// Set the constant weight.
    HeatmapWeightValue(LayerDiff<p::HeatmapWeightValue>),
    /// Change the heatmap ramp scheme.
    HeatmapRamp(LayerDiff<p::HeatmapRamp>),
    /// Reverse or restore the heatmap ramp.
    HeatmapRampDirection(LayerDiff<p::HeatmapRampDirection>),
    /// Set the kernel radius.
    HeatmapRadius(LayerDiff<p::HeatmapRadius>),
    /// Set the intensity.
    HeatmapIntensity(LayerDiff<p::HeatmapIntensity>),
    /// Set the heatmap opacity.
    HeatmapOpacity(LayerDiff<p::HeatmapOpacity>),

    /// Insert a transformation into the layer's pipeline.
    AddTransformation(LayerDiff<p::AddTransformation>),
    /// Remove a transformation by name.
    RemoveTransformation(LayerDiff<p::RemoveTransformation>),
}

impl Diff {
    /// Wire tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::MapCenter(_) => "map-center",
            Self::MapZoom(_) => "map-zoom",
            Self::MapProjection(_) => "map-projection",
            Self::Basemap(_) => "basemap",
            Self::AddLayer(_) => "add-layer",
            Self::RemoveLayer(_) => "remove-layer",
            Self::RenameLayer(_) => "rename-layer",
            Self::LayerVisibility(_) => "layer-visibility",
            Self::LayerTooltipVisibility(_) => "layer-tooltip-visibility",
            Self::LayerZ(_) => "layer-z",
            Self::LayerType(_) => "layer-type",
            Self::FillColor(_) => "fill-color",
            Self::FillOpacity(_) => "fill-opacity",
            Self::AddFill(_) => "add-fill",
            Self::RemoveFill(_) => "remove-fill",
            Self::FillAttribute(_) => "fill-attribute",
            Self::FillVisualizationType(_) => "fill-visualization-type",
            Self::ColorScheme(_) => "color-scheme",
            Self::ColorSchemeDirection(_) => "color-scheme-direction",
            Self::ClassificationMethod(_) => "classification-method",
            Self::StepCount(_) => "step-count",
            Self::StepValue(_) => "step-value",
            Self::CategoricalColor(_) => "categorical-color",
            Self::StrokeColor(_) => "stroke-color",
            Self::StrokeWidth(_) => "stroke-width",
            Self::StrokeOpacity(_) => "stroke-opacity",
            Self::AddStroke(_) => "add-stroke",
            Self::RemoveStroke(_) => "remove-stroke",
            Self::PointSize(_) => "point-size",
            Self::SizeAttribute(_) => "size-attribute",
            Self::SizeMin(_) => "size-min",
            Self::SizeMax(_) => "size-max",
            Self::DotAttribute(_) => "dot-attribute",
            Self::DotValue(_) => "dot-value",
            Self::DotSize(_) => "dot-size",
            Self::HeatmapWeightType(_) => "heatmap-weight-type",
            Self::HeatmapWeightAttribute(_) => "heatmap-weight-attribute",
            Self::HeatmapWeightValue(_) => "heatmap-weight-value",
            Self::HeatmapRamp(_) => "heatmap-ramp",
            Self::HeatmapRampDirection(_) => "heatmap-ramp-direction",
            Self::HeatmapRadius(_) => "heatmap-radius",
            Self::HeatmapIntensity(_) => "heatmap-intensity",
            Self::HeatmapOpacity(_) => "heatmap-opacity",
            Self::AddTransformation(_) => "add-transformation",
            Self::RemoveTransformation(_) => "remove-transformation",
        }
    }

    /// Concern the diff belongs to.
    pub fn family(&self) -> DiffFamily {
        match self {
            Self::MapCenter(_) | Self::MapZoom(_) | Self::MapProjection(_) | Self::Basemap(_) => {
                DiffFamily::Map
            }
            Self::AddLayer(_)
            | Self::RemoveLayer(_)
            | Self::RenameLayer(_)
            | Self::LayerVisibility(_)
            | Self::LayerTooltipVisibility(_)
            | Self::LayerZ(_) => DiffFamily::Layer,
            Self::LayerType(_) => DiffFamily::LayerType,
            Self::FillColor(_)
            | Self::FillOpacity(_)
            | Self::AddFill(_)
            | Self::RemoveFill(_)
            | Self::FillAttribute(_)
            | Self::FillVisualizationType(_)
            | Self::ColorScheme(_)
            | Self::ColorSchemeDirection(_)
            | Self::ClassificationMethod(_)
            | Self::StepCount(_)
            | Self::StepValue(_)
            | Self::CategoricalColor(_) => DiffFamily::Fill,
            Self::StrokeColor(_)
            | Self::StrokeWidth(_)
            | Self::StrokeOpacity(_)
            | Self::AddStroke(_)
            | Self::RemoveStroke(_) => DiffFamily::Stroke,
            Self::PointSize(_) | Self::SizeAttribute(_) | Self::SizeMin(_) | Self::SizeMax(_) => {
                DiffFamily::Size
            }
            Self::DotAttribute(_) | Self::DotValue(_) | Self::DotSize(_) => DiffFamily::DotDensity,
            Self::HeatmapWeightType(_)
            | Self::HeatmapWeightAttribute(_)
            | Self::HeatmapWeightValue(_)
            | Self::HeatmapRamp(_)
            | Self::HeatmapRampDirection(_)
            | Self::HeatmapRadius(_)
            | Self::HeatmapIntensity(_)
            | Self::HeatmapOpacity(_) => DiffFamily::Heatmap,
            Self::AddTransformation(_) | Self::RemoveTransformation(_) => {
                DiffFamily::Transformation
            }
        }
    }

    /// Target layer, for layer-scoped variants.
    pub fn layer_id(&self) -> Option<&str> {
        let id = match self {
            Self::MapCenter(_) | Self::MapZoom(_) | Self::MapProjection(_) | Self::Basemap(_) => {
                return None
            }
            Self::AddLayer(d) => &d.layer_id,
            Self::RemoveLayer(d) | Self::RemoveFill(d) | Self::RemoveStroke(d) => &d.layer_id,
            Self::RenameLayer(d) => &d.layer_id,
            Self::LayerVisibility(d) => &d.layer_id,
            Self::LayerTooltipVisibility(d) => &d.layer_id,
            Self::LayerZ(d) => &d.layer_id,
            Self::LayerType(d) => &d.layer_id,
            Self::FillColor(d) => &d.layer_id,
            Self::FillOpacity(d) => &d.layer_id,
            Self::AddFill(d) => &d.layer_id,
            Self::FillAttribute(d) => &d.layer_id,
            Self::FillVisualizationType(d) => &d.layer_id,
            Self::ColorScheme(d) => &d.layer_id,
            Self::ColorSchemeDirection(d) => &d.layer_id,
            Self::ClassificationMethod(d) => &d.layer_id,
            Self::StepCount(d) => &d.layer_id,
            Self::StepValue(d) => &d.layer_id,
            Self::CategoricalColor(d) => &d.layer_id,
            Self::StrokeColor(d) => &d.layer_id,
            Self::StrokeWidth(d) => &d.layer_id,
            Self::StrokeOpacity(d) => &d.layer_id,
            Self::AddStroke(d) => &d.layer_id,
            Self::PointSize(d) => &d.layer_id,
            Self::SizeAttribute(d) => &d.layer_id,
            Self::SizeMin(d) => &d.layer_id,
            Self::SizeMax(d) => &d.layer_id,
            Self::DotAttribute(d) => &d.layer_id,
            Self::DotValue(d) => &d.layer_id,
            Self::DotSize(d) => &d.layer_id,
            Self::HeatmapWeightType(d) => &d.layer_id,
            Self::HeatmapWeightAttribute(d) => &d.layer_id,
            Self::HeatmapWeightValue(d) => &d.layer_id,
            Self::HeatmapRamp(d) => &d.layer_id,
            Self::HeatmapRampDirection(d) => &d.layer_id,
            Self::HeatmapRadius(d) => &d.layer_id,
            Self::HeatmapIntensity(d) => &d.layer_id,
            Self::HeatmapOpacity(d) => &d.layer_id,
            Self::AddTransformation(d) => &d.layer_id,
            Self::RemoveTransformation(d) => &d.layer_id,
        };
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn layer_diff_wire_shape() {
        let diff = Diff::FillColor(LayerDiff::new(
            "counties",
            p::FillColor {
                color: "#ff0000".into(),
            },
        ));
        let value = serde_json::to_value(&diff).unwrap();
        assert_eq!(
            value,
            json!({ "type": "fill-color", "layerId": "counties", "payload": { "color": "#ff0000" } })
        );
        assert_eq!(serde_json::from_value::<Diff>(value).unwrap(), diff);
        assert_eq!(diff.tag(), "fill-color");
        assert_eq!(diff.layer_id(), Some("counties"));
    }

    #[test]
    fn map_diff_has_no_layer_id() {
        let diff = Diff::MapZoom(MapDiff::new(p::MapZoom { zoom: 4.5 }));
        let value = serde_json::to_value(&diff).unwrap();
        assert_eq!(value, json!({ "type": "map-zoom", "payload": { "zoom": 4.5 } }));
        assert_eq!(diff.layer_id(), None);
        assert_eq!(diff.family(), DiffFamily::Map);
    }

    #[test]
    fn absent_restore_payloads_are_omitted() {
        let diff = Diff::StepCount(LayerDiff::new("l", p::StepCount { count: 4, fill: None }));
        let value = serde_json::to_value(&diff).unwrap();
        assert_eq!(value["payload"], json!({ "count": 4 }));
        let back: Diff = serde_json::from_value(
            json!({ "type": "remove-layer", "layerId": "l", "payload": {} }),
        )
        .unwrap();
        assert_eq!(back, Diff::RemoveLayer(LayerDiff::new("l", p::Empty {})));
    }
}
