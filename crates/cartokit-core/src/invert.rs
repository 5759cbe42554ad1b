// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Invert: the diff that undoes a diff, computed against the document it is
//! about to be applied to.
//!
//! Scalar edits invert to the previous scalar. Edits whose forward patch
//! re-derives state (thresholds, categories, dots, weights, whole layers)
//! invert to a diff carrying the previous state as a restore payload, so
//! `patch(invert(d, ir), patch(d, ir)) == ir` holds exactly.

use cartokit_ir::{
    CartoKitIR, CartoKitLayer, ColorScheme, ConstantStroke, DotDensityDots, Fill, HeatmapStyle,
    HeatmapWeight, ProportionalSymbolSize, QuantitativeFill,
};

use crate::diff::{payload as p, Diff, LayerDiff, MapDiff};
use crate::error::PatchError;
use crate::patch::mismatch;

/// Compute the inverse of `diff` against `ir`, the document before `diff`.
///
/// Fails when `diff` names state the document does not have; `patch` would
/// reject the same diff.
pub fn invert(diff: &Diff, ir: &CartoKitIR) -> Result<Diff, PatchError> {
    let tag = diff.tag();
    let inverse = match diff {
        Diff::MapCenter(_) => Diff::MapCenter(MapDiff::new(p::MapCenter { center: ir.center })),
        Diff::MapZoom(_) => Diff::MapZoom(MapDiff::new(p::MapZoom { zoom: ir.zoom })),
        Diff::MapProjection(_) => Diff::MapProjection(MapDiff::new(p::MapProjection {
            projection: ir.projection,
        })),
        Diff::Basemap(_) => Diff::Basemap(MapDiff::new(p::Basemap {
            url: ir.basemap.url.clone(),
            provider: ir.basemap.provider,
        })),

        Diff::AddLayer(d) => Diff::RemoveLayer(back(d, p::Empty {})),
        Diff::RemoveLayer(d) => Diff::AddLayer(back(
            d,
            p::AddLayer {
                layer: layer(ir, &d.layer_id)?.clone(),
            },
        )),
        Diff::RenameLayer(d) => Diff::RenameLayer(back(
            d,
            p::RenameLayer {
                display_name: layer(ir, &d.layer_id)?.display_name().to_owned(),
            },
        )),
        Diff::LayerVisibility(d) => Diff::LayerVisibility(back(
            d,
            p::LayerVisibility {
                visibility: layer(ir, &d.layer_id)?.layout().visibility,
            },
        )),
        Diff::LayerTooltipVisibility(d) => Diff::LayerTooltipVisibility(back(
            d,
            p::LayerTooltipVisibility {
                visible: layer(ir, &d.layer_id)?.layout().tooltip.visible,
            },
        )),
        Diff::LayerZ(d) => Diff::LayerZ(back(
            d,
            p::LayerZ {
                z: layer(ir, &d.layer_id)?.layout().z,
            },
        )),
        Diff::LayerType(d) => {
            let old = layer(ir, &d.layer_id)?;
            Diff::LayerType(back(
                d,
                p::LayerType {
                    layer_type: old.layer_type(),
                    snapshot: Some(Box::new(old.clone())),
                },
            ))
        }

        Diff::FillColor(d) => {
            let old = layer(ir, &d.layer_id)?;
            let Some(Fill::Constant(fill)) = old.fill() else {
                return Err(mismatch(tag, old));
            };
            Diff::FillColor(back(d, p::FillColor { color: fill.color }))
        }
        Diff::FillOpacity(d) => {
            let fill = fill(tag, layer(ir, &d.layer_id)?)?;
            Diff::FillOpacity(back(
                d,
                p::FillOpacity {
                    opacity: fill.opacity(),
                },
            ))
        }
        Diff::AddFill(d) => Diff::RemoveFill(back(d, p::Empty {})),
        Diff::RemoveFill(d) => {
            let fill = fill(tag, layer(ir, &d.layer_id)?)?;
            Diff::AddFill(back(d, p::AddFill { fill: Some(fill) }))
        }
        Diff::FillAttribute(d) => {
            let old = layer(ir, &d.layer_id)?;
            let fill = fill(tag, old)?;
            let Some(attribute) = fill.attribute().map(str::to_owned) else {
                return Err(mismatch(tag, old));
            };
            Diff::FillAttribute(back(
                d,
                p::FillAttribute {
                    attribute,
                    fill: Some(fill),
                },
            ))
        }
        Diff::FillVisualizationType(d) => {
            let fill = fill(tag, layer(ir, &d.layer_id)?)?;
            Diff::FillVisualizationType(back(
                d,
                p::FillVisualizationType {
                    visualization_type: fill.visualization_type(),
                    fill: Some(fill),
                },
            ))
        }
        Diff::ColorScheme(d) => {
            let old = layer(ir, &d.layer_id)?;
            let fill = fill(tag, old)?;
            let scheme = match &fill {
                Fill::Quantitative(q) => ColorScheme::Quantitative(q.scheme),
                Fill::Categorical(c) => ColorScheme::Categorical(c.scheme),
                Fill::Constant(_) => return Err(mismatch(tag, old)),
            };
            Diff::ColorScheme(back(
                d,
                p::ColorScheme {
                    scheme,
                    fill: Some(fill),
                },
            ))
        }
        Diff::ColorSchemeDirection(d) => {
            let old = layer(ir, &d.layer_id)?;
            let fill = fill(tag, old)?;
            let direction = match &fill {
                Fill::Quantitative(q) => q.direction,
                Fill::Categorical(c) => c.direction,
                Fill::Constant(_) => return Err(mismatch(tag, old)),
            };
            Diff::ColorSchemeDirection(back(
                d,
                p::ColorSchemeDirection {
                    direction,
                    fill: Some(fill),
                },
            ))
        }
        Diff::ClassificationMethod(d) => {
            let q = quantitative(tag, layer(ir, &d.layer_id)?)?;
            Diff::ClassificationMethod(back(
                d,
                p::ClassificationMethod {
                    method: q.method,
                    fill: Some(Fill::Quantitative(q)),
                },
            ))
        }
        Diff::StepCount(d) => {
            let q = quantitative(tag, layer(ir, &d.layer_id)?)?;
            Diff::StepCount(back(
                d,
                p::StepCount {
                    count: q.count,
                    fill: Some(Fill::Quantitative(q)),
                },
            ))
        }
        Diff::StepValue(d) => {
            let q = quantitative(tag, layer(ir, &d.layer_id)?)?;
            let Some(value) = q.thresholds.get(d.payload.step).copied() else {
                return Err(PatchError::InvalidValue {
                    field: "step",
                    reason: format!(
                        "step {} out of range for {} thresholds",
                        d.payload.step,
                        q.thresholds.len()
                    ),
                });
            };
            Diff::StepValue(back(
                d,
                p::StepValue {
                    step: d.payload.step,
                    value,
                    fill: Some(Fill::Quantitative(q)),
                },
            ))
        }
        Diff::CategoricalColor(d) => {
            let old = layer(ir, &d.layer_id)?;
            let Some(Fill::Categorical(fill)) = old.fill() else {
                return Err(mismatch(tag, old));
            };
            let Some(entry) = fill
                .categories
                .into_iter()
                .find(|e| e.category == d.payload.category)
            else {
                return Err(PatchError::InvalidValue {
                    field: "category",
                    reason: format!("unknown category {}", d.payload.category),
                });
            };
            Diff::CategoricalColor(back(
                d,
                p::CategoricalColor {
                    category: entry.category,
                    color: entry.color,
                },
            ))
        }

        Diff::StrokeColor(d) => Diff::StrokeColor(back(
            d,
            p::StrokeColor {
                color: stroke(tag, layer(ir, &d.layer_id)?)?.color.clone(),
            },
        )),
        Diff::StrokeWidth(d) => Diff::StrokeWidth(back(
            d,
            p::StrokeWidth {
                width: stroke(tag, layer(ir, &d.layer_id)?)?.width,
            },
        )),
        Diff::StrokeOpacity(d) => Diff::StrokeOpacity(back(
            d,
            p::StrokeOpacity {
                opacity: stroke(tag, layer(ir, &d.layer_id)?)?.opacity,
            },
        )),
        Diff::AddStroke(d) => Diff::RemoveStroke(back(d, p::Empty {})),
        Diff::RemoveStroke(d) => Diff::AddStroke(back(
            d,
            p::AddStroke {
                stroke: Some(stroke(tag, layer(ir, &d.layer_id)?)?.clone()),
            },
        )),

        Diff::PointSize(d) => {
            let old = layer(ir, &d.layer_id)?;
            let CartoKitLayer::Point(l) = old else {
                return Err(mismatch(tag, old));
            };
            Diff::PointSize(back(d, p::PointSize { size: l.style.size }))
        }
        Diff::SizeAttribute(d) => Diff::SizeAttribute(back(
            d,
            p::SizeAttribute {
                attribute: size(tag, layer(ir, &d.layer_id)?)?.attribute.clone(),
            },
        )),
        Diff::SizeMin(d) => Diff::SizeMin(back(
            d,
            p::SizeMin {
                min: size(tag, layer(ir, &d.layer_id)?)?.min,
            },
        )),
        Diff::SizeMax(d) => Diff::SizeMax(back(
            d,
            p::SizeMax {
                max: size(tag, layer(ir, &d.layer_id)?)?.max,
            },
        )),

        Diff::DotAttribute(d) => {
            let dots = dots(tag, layer(ir, &d.layer_id)?)?;
            Diff::DotAttribute(back(
                d,
                p::DotAttribute {
                    attribute: dots.attribute.clone(),
                    value: Some(dots.value),
                },
            ))
        }
        Diff::DotValue(d) => Diff::DotValue(back(
            d,
            p::DotValue {
                value: dots(tag, layer(ir, &d.layer_id)?)?.value,
            },
        )),
        Diff::DotSize(d) => Diff::DotSize(back(
            d,
            p::DotSize {
                size: dots(tag, layer(ir, &d.layer_id)?)?.size,
            },
        )),

        Diff::HeatmapWeightType(d) => {
            let weight = heatmap(tag, layer(ir, &d.layer_id)?)?.weight.clone();
            Diff::HeatmapWeightType(back(
                d,
                p::HeatmapWeightType {
                    weight_type: weight.weight_type(),
                    weight: Some(weight),
                },
            ))
        }
        Diff::HeatmapWeightAttribute(d) => {
            let old = layer(ir, &d.layer_id)?;
            let weight = heatmap(tag, old)?.weight.clone();
            let HeatmapWeight::Quantitative { attribute, .. } = &weight else {
                return Err(mismatch(tag, old));
            };
            Diff::HeatmapWeightAttribute(back(
                d,
                p::HeatmapWeightAttribute {
                    attribute: attribute.clone(),
                    weight: Some(weight),
                },
            ))
        }
        Diff::HeatmapWeightValue(d) => {
            let old = layer(ir, &d.layer_id)?;
            let HeatmapWeight::Constant { value } = heatmap(tag, old)?.weight else {
                return Err(mismatch(tag, old));
            };
            Diff::HeatmapWeightValue(back(d, p::HeatmapWeightValue { value }))
        }
        Diff::HeatmapRamp(d) => Diff::HeatmapRamp(back(
            d,
            p::HeatmapRamp {
                scheme: heatmap(tag, layer(ir, &d.layer_id)?)?.ramp.scheme,
            },
        )),
        Diff::HeatmapRampDirection(d) => Diff::HeatmapRampDirection(back(
            d,
            p::HeatmapRampDirection {
                direction: heatmap(tag, layer(ir, &d.layer_id)?)?.ramp.direction,
            },
        )),
        Diff::HeatmapRadius(d) => Diff::HeatmapRadius(back(
            d,
            p::HeatmapRadius {
                radius: heatmap(tag, layer(ir, &d.layer_id)?)?.radius,
            },
        )),
        Diff::HeatmapIntensity(d) => Diff::HeatmapIntensity(back(
            d,
            p::HeatmapIntensity {
                intensity: heatmap(tag, layer(ir, &d.layer_id)?)?.intensity,
            },
        )),
        Diff::HeatmapOpacity(d) => Diff::HeatmapOpacity(back(
            d,
            p::HeatmapOpacity {
                opacity: heatmap(tag, layer(ir, &d.layer_id)?)?.opacity,
            },
        )),

        Diff::AddTransformation(d) => Diff::RemoveTransformation(back(
            d,
            p::RemoveTransformation {
                name: d.payload.transformation.name.clone(),
            },
        )),
        Diff::RemoveTransformation(d) => {
            let data = layer(ir, &d.layer_id)?.data();
            let (Some(index), Some(transformation)) = (
                data.transformations.index_of(&d.payload.name),
                data.transformations.get(&d.payload.name),
            ) else {
                return Err(PatchError::TransformationNotFound {
                    layer_id: d.layer_id.clone(),
                    name: d.payload.name.clone(),
                });
            };
            Diff::AddTransformation(back(
                d,
                p::AddTransformation {
                    transformation: transformation.clone(),
                    index: Some(index),
                    geojson: Some(data.geojson.clone()),
                },
            ))
        }
    };
    Ok(inverse)
}

/// Envelope for the inverse, addressed to the same layer.
fn back<A, P>(diff: &LayerDiff<A>, payload: P) -> LayerDiff<P> {
    LayerDiff::new(diff.layer_id.clone(), payload)
}

fn layer<'a>(ir: &'a CartoKitIR, id: &str) -> Result<&'a CartoKitLayer, PatchError> {
    ir.layer(id)
        .ok_or_else(|| PatchError::LayerNotFound(id.to_owned()))
}

fn fill(tag: &'static str, layer: &CartoKitLayer) -> Result<Fill, PatchError> {
    layer.fill().ok_or_else(|| mismatch(tag, layer))
}

fn quantitative(tag: &'static str, layer: &CartoKitLayer) -> Result<QuantitativeFill, PatchError> {
    match layer.fill() {
        Some(Fill::Quantitative(q)) => Ok(q),
        _ => Err(mismatch(tag, layer)),
    }
}

fn stroke<'a>(tag: &'static str, layer: &'a CartoKitLayer) -> Result<&'a ConstantStroke, PatchError> {
    layer.stroke().ok_or_else(|| mismatch(tag, layer))
}

fn size<'a>(
    tag: &'static str,
    layer: &'a CartoKitLayer,
) -> Result<&'a ProportionalSymbolSize, PatchError> {
    match layer {
        CartoKitLayer::ProportionalSymbol(l) => Ok(&l.style.size),
        _ => Err(mismatch(tag, layer)),
    }
}

fn dots<'a>(tag: &'static str, layer: &'a CartoKitLayer) -> Result<&'a DotDensityDots, PatchError> {
    match layer {
        CartoKitLayer::DotDensity(l) => Ok(&l.style.dots),
        _ => Err(mismatch(tag, layer)),
    }
}

fn heatmap<'a>(tag: &'static str, layer: &'a CartoKitLayer) -> Result<&'a HeatmapStyle, PatchError> {
    match layer {
        CartoKitLayer::Heatmap(l) => Ok(&l.style.heatmap),
        _ => Err(mismatch(tag, layer)),
    }
}
