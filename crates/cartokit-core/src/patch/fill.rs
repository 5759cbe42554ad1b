// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fill patchers.
//!
//! Every edit reads the layer's fill as the general [`Fill`] shape, computes
//! the next one, and stores it back through [`store`], which rejects shapes
//! the layer type cannot hold. Derived values (categories, thresholds,
//! category colors) are recomputed in the same step.

use cartokit_ir::{
    CartoKitLayer, CategoricalFill, CategoryColor, ChoroplethFill, ClassificationMethod,
    ColorScheme, ConstantFill, FeatureCollection, Fill, FillVisualizationType, LayerType,
    QuantitativeFill, SchemeDirection,
};

use super::{unit_interval, Target};
use crate::attribute::{attribute_names, categories, is_kind, select_attribute, AttributeKind};
use crate::classify::derive_thresholds;
use crate::color::categorical_colors;
use crate::config::{StyleDefaults, MAX_STEP_COUNT, MIN_STEP_COUNT};
use crate::diff::payload;
use crate::error::PatchError;

/// Whether a layer type has a fill slot at all.
pub(crate) fn has_fill(layer_type: LayerType) -> bool {
    !matches!(layer_type, LayerType::Line | LayerType::Heatmap)
}

fn edit_fill(
    t: Target<'_>,
    edit: impl FnOnce(Option<Fill>, &Target<'_>) -> Result<Option<Fill>, PatchError>,
) -> Result<(), PatchError> {
    if !has_fill(t.layer_type()) {
        return Err(t.mismatch());
    }
    let next = edit(t.layer.fill(), &t)?;
    store(t, next)
}

/// Write `fill` into the layer's fill slot.
fn store(t: Target<'_>, fill: Option<Fill>) -> Result<(), PatchError> {
    let stored = match &mut *t.layer {
        CartoKitLayer::Point(l) => {
            l.style.fill = fill;
            true
        }
        CartoKitLayer::ProportionalSymbol(l) => {
            l.style.fill = fill;
            true
        }
        CartoKitLayer::Polygon(l) => match fill.map(ConstantFill::try_from).transpose() {
            Ok(fill) => {
                l.style.fill = fill;
                true
            }
            Err(_) => false,
        },
        CartoKitLayer::DotDensity(l) => match fill.map(ConstantFill::try_from).transpose() {
            Ok(fill) => {
                l.style.fill = fill;
                true
            }
            Err(_) => false,
        },
        CartoKitLayer::Choropleth(l) => match fill.map(ChoroplethFill::try_from) {
            Some(Ok(fill)) => {
                l.style.fill = fill;
                true
            }
            _ => false,
        },
        CartoKitLayer::Line(_) | CartoKitLayer::Heatmap(_) => false,
    };
    if stored {
        Ok(())
    } else {
        Err(t.mismatch())
    }
}

/// Recompute thresholds from the data.
pub(crate) fn classify(fill: &mut QuantitativeFill, fc: &FeatureCollection) {
    fill.thresholds = derive_thresholds(&fc.numbers(&fill.attribute), fill.method, fill.count);
}

/// Reassign category colors from the scheme.
fn recolor(fill: &mut CategoricalFill) {
    let colors = categorical_colors(fill.scheme, fill.direction, fill.categories.len());
    for (entry, color) in fill.categories.iter_mut().zip(colors) {
        entry.color = color;
    }
}

/// Rediscover categories from the data, then color them.
fn recategorize(fill: &mut CategoricalFill, fc: &FeatureCollection) {
    fill.categories = categories(fc, &fill.attribute)
        .into_iter()
        .map(|category| CategoryColor {
            category,
            color: String::new(),
        })
        .collect();
    recolor(fill);
}

/// Fresh quantitative fill over `attribute` using the default method,
/// scheme and class count.
pub(crate) fn quantitative_fill(
    fc: &FeatureCollection,
    attribute: &str,
    defaults: &StyleDefaults,
    opacity: f64,
) -> QuantitativeFill {
    let mut fill = QuantitativeFill {
        attribute: attribute.to_owned(),
        method: defaults.method,
        scheme: defaults.quantitative_scheme,
        direction: SchemeDirection::Forward,
        count: defaults.count.clamp(MIN_STEP_COUNT, MAX_STEP_COUNT),
        thresholds: Vec::new(),
        opacity,
    };
    classify(&mut fill, fc);
    fill
}

/// Fresh categorical fill over `attribute` using the default scheme.
pub(crate) fn categorical_fill(
    fc: &FeatureCollection,
    attribute: &str,
    defaults: &StyleDefaults,
    opacity: f64,
) -> CategoricalFill {
    let mut fill = CategoricalFill {
        attribute: attribute.to_owned(),
        categories: Vec::new(),
        scheme: defaults.categorical_scheme,
        direction: SchemeDirection::Forward,
        opacity,
    };
    recategorize(&mut fill, fc);
    fill
}

/// Keep `current` if it is of `kind`, else pick the first attribute that is.
fn pick_attribute(
    fc: &FeatureCollection,
    current: Option<&str>,
    kind: AttributeKind,
) -> Option<String> {
    match current {
        Some(attr) if is_kind(fc, attr, kind) => Some(attr.to_owned()),
        _ => select_attribute(fc, kind),
    }
}

pub(super) fn color(t: Target<'_>, p: &payload::FillColor) -> Result<(), PatchError> {
    edit_fill(t, |fill, t| match fill {
        Some(Fill::Constant(c)) => Ok(Some(Fill::Constant(ConstantFill {
            color: p.color.clone(),
            ..c
        }))),
        _ => Err(t.mismatch()),
    })
}

pub(super) fn opacity(t: Target<'_>, p: &payload::FillOpacity) -> Result<(), PatchError> {
    let opacity = unit_interval("opacity", p.opacity)?;
    edit_fill(t, |fill, t| {
        let Some(mut fill) = fill else {
            return Err(t.mismatch());
        };
        fill.set_opacity(opacity);
        Ok(Some(fill))
    })
}

pub(super) fn add(t: Target<'_>, p: &payload::AddFill) -> Result<(), PatchError> {
    edit_fill(t, |fill, t| match fill {
        Some(_) => Err(t.mismatch()),
        None => Ok(Some(p.fill.clone().unwrap_or_else(|| {
            Fill::Constant(t.defaults.constant_fill())
        }))),
    })
}

pub(super) fn remove(t: Target<'_>) -> Result<(), PatchError> {
    edit_fill(t, |fill, t| match fill {
        Some(_) => Ok(None),
        None => Err(t.mismatch()),
    })
}

pub(super) fn attribute(t: Target<'_>, p: &payload::FillAttribute) -> Result<(), PatchError> {
    edit_fill(t, |fill, t| {
        if let Some(restore) = &p.fill {
            return Ok(Some(restore.clone()));
        }
        match fill {
            Some(Fill::Quantitative(mut q)) => {
                t.require_attribute(&p.attribute, AttributeKind::Quantitative)?;
                q.attribute.clone_from(&p.attribute);
                classify(&mut q, t.geojson());
                Ok(Some(Fill::Quantitative(q)))
            }
            Some(Fill::Categorical(mut c)) => {
                if !attribute_names(t.geojson()).contains(&p.attribute) {
                    return Err(PatchError::InvalidValue {
                        field: "attribute",
                        reason: format!("{} is not present in the layer data", p.attribute),
                    });
                }
                c.attribute.clone_from(&p.attribute);
                recategorize(&mut c, t.geojson());
                Ok(Some(Fill::Categorical(c)))
            }
            _ => Err(t.mismatch()),
        }
    })
}

pub(super) fn visualization_type(
    t: Target<'_>,
    p: &payload::FillVisualizationType,
) -> Result<(), PatchError> {
    edit_fill(t, |fill, t| {
        if let Some(restore) = &p.fill {
            return Ok(Some(restore.clone()));
        }
        let Some(fill) = fill else {
            return Err(t.mismatch());
        };
        if fill.visualization_type() == p.visualization_type {
            return Ok(Some(fill));
        }
        let fc = t.geojson();
        let opacity = fill.opacity();
        let next = match p.visualization_type {
            FillVisualizationType::Constant => Fill::Constant(ConstantFill {
                color: t.defaults.fill_color.clone(),
                opacity,
            }),
            FillVisualizationType::Quantitative => {
                let kind = AttributeKind::Quantitative;
                let attr = pick_attribute(fc, fill.attribute(), kind)
                    .ok_or_else(|| t.no_attribute(t.layer_type(), kind))?;
                Fill::Quantitative(quantitative_fill(fc, &attr, t.defaults, opacity))
            }
            FillVisualizationType::Categorical => {
                let kind = AttributeKind::Categorical;
                let attr = pick_attribute(fc, fill.attribute(), kind)
                    .ok_or_else(|| t.no_attribute(t.layer_type(), kind))?;
                Fill::Categorical(categorical_fill(fc, &attr, t.defaults, opacity))
            }
        };
        Ok(Some(next))
    })
}

pub(super) fn scheme(t: Target<'_>, p: &payload::ColorScheme) -> Result<(), PatchError> {
    edit_fill(t, |fill, t| {
        if let Some(restore) = &p.fill {
            return Ok(Some(restore.clone()));
        }
        match (fill, p.scheme) {
            (Some(Fill::Quantitative(mut q)), ColorScheme::Quantitative(scheme)) => {
                q.scheme = scheme;
                Ok(Some(Fill::Quantitative(q)))
            }
            (Some(Fill::Categorical(mut c)), ColorScheme::Categorical(scheme)) => {
                c.scheme = scheme;
                recolor(&mut c);
                Ok(Some(Fill::Categorical(c)))
            }
            (Some(Fill::Quantitative(_) | Fill::Categorical(_)), _) => {
                Err(PatchError::InvalidValue {
                    field: "scheme",
                    reason: "scheme kind does not match the fill".into(),
                })
            }
            _ => Err(t.mismatch()),
        }
    })
}

pub(super) fn direction(
    t: Target<'_>,
    p: &payload::ColorSchemeDirection,
) -> Result<(), PatchError> {
    edit_fill(t, |fill, t| {
        if let Some(restore) = &p.fill {
            return Ok(Some(restore.clone()));
        }
        match fill {
            Some(Fill::Quantitative(mut q)) => {
                q.direction = p.direction;
                Ok(Some(Fill::Quantitative(q)))
            }
            Some(Fill::Categorical(mut c)) => {
                c.direction = p.direction;
                recolor(&mut c);
                Ok(Some(Fill::Categorical(c)))
            }
            _ => Err(t.mismatch()),
        }
    })
}

/// Edit a quantitative fill, or restore one verbatim.
fn edit_quantitative(
    t: Target<'_>,
    restore: Option<&Fill>,
    edit: impl FnOnce(&mut QuantitativeFill, &FeatureCollection) -> Result<(), PatchError>,
) -> Result<(), PatchError> {
    edit_fill(t, |fill, t| {
        if let Some(restore) = restore {
            return Ok(Some(restore.clone()));
        }
        let Some(Fill::Quantitative(mut q)) = fill else {
            return Err(t.mismatch());
        };
        edit(&mut q, t.geojson())?;
        Ok(Some(Fill::Quantitative(q)))
    })
}

pub(super) fn method(t: Target<'_>, p: &payload::ClassificationMethod) -> Result<(), PatchError> {
    edit_quantitative(t, p.fill.as_ref(), |q, fc| {
        q.method = p.method;
        // Switching to Manual keeps the current breaks as the starting point.
        if p.method != ClassificationMethod::Manual {
            classify(q, fc);
        }
        Ok(())
    })
}

pub(super) fn step_count(t: Target<'_>, p: &payload::StepCount) -> Result<(), PatchError> {
    if !(MIN_STEP_COUNT..=MAX_STEP_COUNT).contains(&p.count) {
        return Err(PatchError::InvalidValue {
            field: "count",
            reason: format!(
                "expected {MIN_STEP_COUNT}..={MAX_STEP_COUNT}, got {}",
                p.count
            ),
        });
    }
    edit_quantitative(t, p.fill.as_ref(), |q, fc| {
        q.count = p.count;
        classify(q, fc);
        Ok(())
    })
}

pub(super) fn step_value(t: Target<'_>, p: &payload::StepValue) -> Result<(), PatchError> {
    if !p.value.is_finite() {
        return Err(PatchError::InvalidValue {
            field: "value",
            reason: format!("threshold must be finite, got {}", p.value),
        });
    }
    edit_quantitative(t, p.fill.as_ref(), |q, _| {
        let len = q.thresholds.len();
        let Some(slot) = q.thresholds.get_mut(p.step) else {
            return Err(PatchError::InvalidValue {
                field: "step",
                reason: format!("step {} out of range for {len} thresholds", p.step),
            });
        };
        *slot = p.value;
        q.method = ClassificationMethod::Manual;
        Ok(())
    })
}

pub(super) fn categorical_color(
    t: Target<'_>,
    p: &payload::CategoricalColor,
) -> Result<(), PatchError> {
    edit_fill(t, |fill, t| {
        let Some(Fill::Categorical(mut c)) = fill else {
            return Err(t.mismatch());
        };
        let Some(entry) = c.categories.iter_mut().find(|e| e.category == p.category) else {
            return Err(PatchError::InvalidValue {
                field: "category",
                reason: format!("unknown category {}", p.category),
            });
        };
        entry.color.clone_from(&p.color);
        Ok(Some(Fill::Categorical(c)))
    })
}
