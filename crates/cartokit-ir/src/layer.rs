// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Layers: a sum type over cartographic representations.
//!
//! Each variant pairs the shared [`Layer`] envelope with the style shape that
//! is valid for that representation, so a layer whose style disagrees with
//! its type cannot be constructed.

use serde::{Deserialize, Serialize};

use crate::data::LayerData;
use crate::style::{
    ChoroplethFill, ConstantFill, ConstantStroke, DotDensityDots, Fill, HeatmapStyle,
    ProportionalSymbolSize,
};

/// Globally unique layer identifier.
pub type LayerId = String;

/// Whether a layer is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Drawn.
    #[default]
    Visible,
    /// Hidden.
    None,
}

/// Tooltip settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tooltip {
    /// Whether hovering shows feature properties.
    pub visible: bool,
}

/// Layout shared by every layer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Layout {
    /// Drawn or hidden.
    pub visibility: Visibility,
    /// Draw order; larger draws above smaller.
    pub z: u32,
    /// Tooltip settings.
    pub tooltip: Tooltip,
}

/// Envelope shared by every layer variant, parameterised by style shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer<S> {
    /// Unique identifier.
    pub id: LayerId,
    /// Name shown to the user.
    pub display_name: String,
    /// Backing data.
    pub data: LayerData,
    /// Visibility, order and tooltip.
    pub layout: Layout,
    /// Type-specific style.
    pub style: S,
}

impl<S> Layer<S> {
    /// Same envelope with a different style shape.
    pub fn with_style<T>(self, style: T) -> Layer<T> {
        Layer {
            id: self.id,
            display_name: self.display_name,
            data: self.data,
            layout: self.layout,
            style,
        }
    }
}

/// Style of a [`LayerType::Point`] layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointStyle {
    /// Circle radius in pixels.
    pub size: f64,
    /// Optional fill.
    pub fill: Option<Fill>,
    /// Optional outline.
    pub stroke: Option<ConstantStroke>,
}

/// Style of a [`LayerType::ProportionalSymbol`] layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProportionalSymbolStyle {
    /// Attribute-driven radius.
    pub size: ProportionalSymbolSize,
    /// Optional fill.
    pub fill: Option<Fill>,
    /// Optional outline.
    pub stroke: Option<ConstantStroke>,
}

/// Style of a [`LayerType::Line`] layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// The line itself.
    pub stroke: ConstantStroke,
}

/// Style of a [`LayerType::Polygon`] layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonStyle {
    /// Optional single-color fill.
    pub fill: Option<ConstantFill>,
    /// Optional outline.
    pub stroke: Option<ConstantStroke>,
}

/// Style of a [`LayerType::Choropleth`] layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoroplethStyle {
    /// Data-driven fill.
    pub fill: ChoroplethFill,
    /// Optional outline.
    pub stroke: Option<ConstantStroke>,
}

/// Style of a [`LayerType::DotDensity`] layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotDensityStyle {
    /// Dot parameters.
    pub dots: DotDensityDots,
    /// Optional single-color dot fill.
    pub fill: Option<ConstantFill>,
    /// Optional dot outline.
    pub stroke: Option<ConstantStroke>,
}

/// Style of a [`LayerType::Heatmap`] layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapLayerStyle {
    /// Heatmap parameters.
    pub heatmap: HeatmapStyle,
}

/// Discriminant of [`CartoKitLayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LayerType {
    /// Circles at point locations.
    Point,
    /// Stroked lines.
    Line,
    /// Filled polygons.
    Polygon,
    /// Polygons colored by attribute.
    Choropleth,
    /// Circles sized by attribute.
    #[serde(rename = "Proportional Symbol")]
    ProportionalSymbol,
    /// Random dots inside polygons, one per fixed quantity.
    #[serde(rename = "Dot Density")]
    DotDensity,
    /// Kernel density surface.
    Heatmap,
}

impl LayerType {
    /// Every layer type.
    pub const ALL: [Self; 7] = [
        Self::Point,
        Self::Line,
        Self::Polygon,
        Self::Choropleth,
        Self::ProportionalSymbol,
        Self::DotDensity,
        Self::Heatmap,
    ];

    /// Display name, matching the serialized tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::Line => "Line",
            Self::Polygon => "Polygon",
            Self::Choropleth => "Choropleth",
            Self::ProportionalSymbol => "Proportional Symbol",
            Self::DotDensity => "Dot Density",
            Self::Heatmap => "Heatmap",
        }
    }
}

impl core::fmt::Display for LayerType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A map layer of any type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CartoKitLayer {
    /// See [`LayerType::Point`].
    Point(Layer<PointStyle>),
    /// See [`LayerType::Line`].
    Line(Layer<LineStyle>),
    /// See [`LayerType::Polygon`].
    Polygon(Layer<PolygonStyle>),
    /// See [`LayerType::Choropleth`].
    Choropleth(Layer<ChoroplethStyle>),
    /// See [`LayerType::ProportionalSymbol`].
    #[serde(rename = "Proportional Symbol")]
    ProportionalSymbol(Layer<ProportionalSymbolStyle>),
    /// See [`LayerType::DotDensity`].
    #[serde(rename = "Dot Density")]
    DotDensity(Layer<DotDensityStyle>),
    /// See [`LayerType::Heatmap`].
    Heatmap(Layer<HeatmapLayerStyle>),
}

/// Run `$body` with `$l` bound to the envelope of whichever variant `$layer` is.
macro_rules! with_envelope {
    ($layer:expr, $l:ident => $body:expr) => {
        match $layer {
            CartoKitLayer::Point($l) => $body,
            CartoKitLayer::Line($l) => $body,
            CartoKitLayer::Polygon($l) => $body,
            CartoKitLayer::Choropleth($l) => $body,
            CartoKitLayer::ProportionalSymbol($l) => $body,
            CartoKitLayer::DotDensity($l) => $body,
            CartoKitLayer::Heatmap($l) => $body,
        }
    };
}

impl CartoKitLayer {
    /// The layer's type.
    pub fn layer_type(&self) -> LayerType {
        match self {
            Self::Point(_) => LayerType::Point,
            Self::Line(_) => LayerType::Line,
            Self::Polygon(_) => LayerType::Polygon,
            Self::Choropleth(_) => LayerType::Choropleth,
            Self::ProportionalSymbol(_) => LayerType::ProportionalSymbol,
            Self::DotDensity(_) => LayerType::DotDensity,
            Self::Heatmap(_) => LayerType::Heatmap,
        }
    }

    /// Layer id.
    pub fn id(&self) -> &str {
        with_envelope!(self, l => &l.id)
    }

    /// User-facing name.
    pub fn display_name(&self) -> &str {
        with_envelope!(self, l => &l.display_name)
    }

    /// Mutable user-facing name.
    pub fn display_name_mut(&mut self) -> &mut String {
        with_envelope!(self, l => &mut l.display_name)
    }

    /// Backing data.
    pub fn data(&self) -> &LayerData {
        with_envelope!(self, l => &l.data)
    }

    /// Mutable backing data.
    pub fn data_mut(&mut self) -> &mut LayerData {
        with_envelope!(self, l => &mut l.data)
    }

    /// Layout.
    pub fn layout(&self) -> &Layout {
        with_envelope!(self, l => &l.layout)
    }

    /// Mutable layout.
    pub fn layout_mut(&mut self) -> &mut Layout {
        with_envelope!(self, l => &mut l.layout)
    }

    /// Fill as the general [`Fill`] shape, for layer types that have one.
    pub fn fill(&self) -> Option<Fill> {
        match self {
            Self::Point(l) => l.style.fill.clone(),
            Self::ProportionalSymbol(l) => l.style.fill.clone(),
            Self::Polygon(l) => l.style.fill.clone().map(Fill::Constant),
            Self::DotDensity(l) => l.style.fill.clone().map(Fill::Constant),
            Self::Choropleth(l) => Some(l.style.fill.clone().into()),
            Self::Line(_) | Self::Heatmap(_) => None,
        }
    }

    /// Stroke, for layer types that have one.
    pub fn stroke(&self) -> Option<&ConstantStroke> {
        match self {
            Self::Point(l) => l.style.stroke.as_ref(),
            Self::ProportionalSymbol(l) => l.style.stroke.as_ref(),
            Self::Polygon(l) => l.style.stroke.as_ref(),
            Self::Choropleth(l) => l.style.stroke.as_ref(),
            Self::DotDensity(l) => l.style.stroke.as_ref(),
            Self::Line(l) => Some(&l.style.stroke),
            Self::Heatmap(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::FeatureCollection;
    use serde_json::json;

    fn polygon_layer() -> CartoKitLayer {
        CartoKitLayer::Polygon(Layer {
            id: "counties".into(),
            display_name: "Counties".into(),
            data: LayerData::from_geojson(FeatureCollection::default()),
            layout: Layout::default(),
            style: PolygonStyle {
                fill: Some(ConstantFill {
                    color: "#000000".into(),
                    opacity: 0.75,
                }),
                stroke: None,
            },
        })
    }

    #[test]
    fn layer_serializes_with_type_tag() {
        let value = serde_json::to_value(polygon_layer()).unwrap();
        assert_eq!(value["type"], json!("Polygon"));
        assert_eq!(value["displayName"], json!("Counties"));
        assert_eq!(value["layout"]["visibility"], json!("visible"));
        let back: CartoKitLayer = serde_json::from_value(value).unwrap();
        assert_eq!(back, polygon_layer());
    }

    #[test]
    fn multi_word_types_use_spaced_tags() {
        let value = serde_json::to_value(LayerType::ProportionalSymbol).unwrap();
        assert_eq!(value, json!("Proportional Symbol"));
        assert_eq!(LayerType::DotDensity.to_string(), "Dot Density");
    }
}
