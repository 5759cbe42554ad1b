// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Style synthesis for layer type transitions.
//!
//! Whatever the previous style had that the target can hold is carried over
//! unchanged; the rest is built from [`StyleDefaults`].

use cartokit_ir::{
    CartoKitLayer, ChoroplethFill, ChoroplethStyle, ConstantFill, ConstantStroke, DotDensityDots,
    DotDensityStyle, FeatureCollection, Fill, HeatmapLayerStyle, HeatmapRamp, HeatmapStyle,
    HeatmapWeight, LayerType, LineStyle, PointStyle, PolygonStyle, ProportionalSymbolSize,
    ProportionalSymbolStyle, SchemeDirection,
};

use crate::attribute::{is_kind, select_attribute, AttributeKind};
use crate::config::StyleDefaults;
use crate::dots::default_dot_value;
use crate::patch::fill::has_fill;
use crate::patch::{categorical_fill, quantitative_fill};

/// Style pieces taken from the layer being converted.
///
/// The outer `Option` says whether the old type had the slot at all; the
/// inner one is the slot's value.
#[derive(Debug, Clone)]
pub(super) struct Carried {
    fill: Option<Option<Fill>>,
    stroke: Option<Option<ConstantStroke>>,
    /// Opacity of the old fill, stroke or heatmap, if it had one.
    opacity: Option<f64>,
}

impl Carried {
    pub(super) fn from_layer(layer: &CartoKitLayer) -> Self {
        let fill = has_fill(layer.layer_type()).then(|| layer.fill());
        let stroke = (layer.layer_type() != LayerType::Heatmap).then(|| layer.stroke().cloned());
        let opacity = match layer {
            CartoKitLayer::Heatmap(l) => Some(l.style.heatmap.opacity),
            CartoKitLayer::Line(l) => Some(l.style.stroke.opacity),
            _ => layer.fill().as_ref().map(Fill::opacity),
        };
        Self {
            fill,
            stroke,
            opacity,
        }
    }

    /// Attribute of a carried quantitative fill, if `view` still has it.
    fn quantitative_attribute(&self, view: &FeatureCollection) -> Option<String> {
        let attr = self.fill.as_ref()?.as_ref()?.attribute()?;
        is_kind(view, attr, AttributeKind::Quantitative).then(|| attr.to_owned())
    }

    fn any_fill(&self, defaults: &StyleDefaults) -> Option<Fill> {
        match &self.fill {
            Some(fill) => fill.clone(),
            None => Some(Fill::Constant(self.default_constant(defaults))),
        }
    }

    fn constant_fill(&self, defaults: &StyleDefaults) -> Option<ConstantFill> {
        match &self.fill {
            Some(Some(Fill::Constant(fill))) => Some(fill.clone()),
            Some(Some(fill)) => Some(ConstantFill {
                color: defaults.fill_color.clone(),
                opacity: fill.opacity(),
            }),
            Some(None) => None,
            None => Some(self.default_constant(defaults)),
        }
    }

    fn default_constant(&self, defaults: &StyleDefaults) -> ConstantFill {
        ConstantFill {
            color: defaults.fill_color.clone(),
            opacity: self.opacity.unwrap_or(defaults.fill_opacity),
        }
    }

    fn optional_stroke(&self, defaults: &StyleDefaults) -> Option<ConstantStroke> {
        match &self.stroke {
            Some(stroke) => stroke.clone(),
            None => Some(defaults.stroke()),
        }
    }
}

/// Quantitative attribute for a target that needs one: the carried fill's,
/// else the first in the data.
fn size_attribute(carried: &Carried, view: &FeatureCollection) -> Option<String> {
    carried
        .quantitative_attribute(view)
        .or_else(|| select_attribute(view, AttributeKind::Quantitative))
}

pub(super) fn point(carried: &Carried, defaults: &StyleDefaults) -> PointStyle {
    PointStyle {
        size: defaults.point_size,
        fill: carried.any_fill(defaults),
        stroke: carried.optional_stroke(defaults),
    }
}

/// `None` when the data has no quantitative attribute.
pub(super) fn proportional_symbol(
    carried: &Carried,
    view: &FeatureCollection,
    defaults: &StyleDefaults,
) -> Option<ProportionalSymbolStyle> {
    Some(ProportionalSymbolStyle {
        size: ProportionalSymbolSize {
            attribute: size_attribute(carried, view)?,
            min: defaults.min_size,
            max: defaults.max_size,
        },
        fill: carried.any_fill(defaults),
        stroke: carried.optional_stroke(defaults),
    })
}

pub(super) fn line(carried: &Carried, defaults: &StyleDefaults) -> LineStyle {
    LineStyle {
        stroke: carried
            .stroke
            .clone()
            .flatten()
            .unwrap_or_else(|| defaults.stroke()),
    }
}

pub(super) fn polygon(carried: &Carried, defaults: &StyleDefaults) -> PolygonStyle {
    PolygonStyle {
        fill: carried.constant_fill(defaults),
        stroke: carried.optional_stroke(defaults),
    }
}

/// `None` when the data has neither a quantitative nor a categorical
/// attribute.
pub(super) fn choropleth(
    carried: &Carried,
    view: &FeatureCollection,
    defaults: &StyleDefaults,
) -> Option<ChoroplethStyle> {
    let carried_fill = carried
        .fill
        .clone()
        .flatten()
        .and_then(|fill| ChoroplethFill::try_from(fill).ok());
    let fill = match carried_fill {
        Some(fill) => fill,
        None => {
            if let Some(attr) = select_attribute(view, AttributeKind::Quantitative) {
                ChoroplethFill::Quantitative(quantitative_fill(
                    view,
                    &attr,
                    defaults,
                    carried.opacity.unwrap_or(defaults.fill_opacity),
                ))
            } else {
                let attr = select_attribute(view, AttributeKind::Categorical)?;
                ChoroplethFill::Categorical(categorical_fill(
                    view,
                    &attr,
                    defaults,
                    carried.opacity.unwrap_or(defaults.fill_opacity),
                ))
            }
        }
    };
    Some(ChoroplethStyle {
        fill,
        stroke: carried.optional_stroke(defaults),
    })
}

/// `None` when the data has no quantitative attribute.
pub(super) fn dot_density(
    carried: &Carried,
    view: &FeatureCollection,
    defaults: &StyleDefaults,
) -> Option<DotDensityStyle> {
    let attribute = size_attribute(carried, view)?;
    Some(DotDensityStyle {
        dots: DotDensityDots {
            value: default_dot_value(view, &attribute),
            attribute,
            size: defaults.dot_size,
        },
        fill: carried.constant_fill(defaults),
        stroke: carried.optional_stroke(defaults),
    })
}

pub(super) fn heatmap(carried: &Carried, defaults: &StyleDefaults) -> HeatmapLayerStyle {
    HeatmapLayerStyle {
        heatmap: HeatmapStyle {
            weight: HeatmapWeight::Constant { value: 1.0 },
            ramp: HeatmapRamp {
                scheme: defaults.heatmap_scheme,
                direction: SchemeDirection::Forward,
            },
            radius: defaults.heatmap_radius,
            intensity: defaults.heatmap_intensity,
            opacity: carried.opacity.unwrap_or(defaults.heatmap_opacity),
        },
    }
}
