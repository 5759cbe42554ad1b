// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Heatmap patchers.

use cartokit_ir::{CartoKitLayer, FeatureCollection, HeatmapStyle, HeatmapWeight, HeatmapWeightType};

use super::{non_negative, unit_interval, Target};
use crate::attribute::{select_attribute, AttributeKind};
use crate::classify::extent;
use crate::diff::payload;
use crate::error::PatchError;

fn edit_heatmap(
    t: Target<'_>,
    edit: impl FnOnce(&mut HeatmapStyle, &FeatureCollection) -> Result<(), PatchError>,
) -> Result<(), PatchError> {
    let CartoKitLayer::Heatmap(l) = t.layer else {
        return Err(t.mismatch());
    };
    edit(&mut l.style.heatmap, &l.data.geojson)
}

/// Quantitative weight over `attribute`, spanning the data's extent.
pub(crate) fn quantitative_weight(fc: &FeatureCollection, attribute: &str) -> HeatmapWeight {
    let (min, max) = extent(&fc.numbers(attribute)).unwrap_or((0.0, 1.0));
    HeatmapWeight::Quantitative {
        attribute: attribute.to_owned(),
        min,
        max,
    }
}

pub(super) fn weight_type(
    t: Target<'_>,
    p: &payload::HeatmapWeightType,
) -> Result<(), PatchError> {
    let no_attribute = t.no_attribute(t.layer_type(), AttributeKind::Quantitative);
    edit_heatmap(t, |style, fc| {
        if let Some(restore) = &p.weight {
            style.weight = restore.clone();
            return Ok(());
        }
        if style.weight.weight_type() == p.weight_type {
            return Ok(());
        }
        style.weight = match p.weight_type {
            HeatmapWeightType::Constant => HeatmapWeight::Constant { value: 1.0 },
            HeatmapWeightType::Quantitative => {
                let attr = select_attribute(fc, AttributeKind::Quantitative).ok_or(no_attribute)?;
                quantitative_weight(fc, &attr)
            }
        };
        Ok(())
    })
}

pub(super) fn weight_attribute(
    t: Target<'_>,
    p: &payload::HeatmapWeightAttribute,
) -> Result<(), PatchError> {
    if p.weight.is_none() && matches!(t.layer, CartoKitLayer::Heatmap(_)) {
        t.require_attribute(&p.attribute, AttributeKind::Quantitative)?;
    }
    let mismatch = t.mismatch();
    edit_heatmap(t, |style, fc| {
        if let Some(restore) = &p.weight {
            style.weight = restore.clone();
            return Ok(());
        }
        if style.weight.weight_type() != HeatmapWeightType::Quantitative {
            return Err(mismatch);
        }
        style.weight = quantitative_weight(fc, &p.attribute);
        Ok(())
    })
}

pub(super) fn weight_value(
    t: Target<'_>,
    p: &payload::HeatmapWeightValue,
) -> Result<(), PatchError> {
    let value = non_negative("value", p.value)?;
    let mismatch = t.mismatch();
    edit_heatmap(t, |style, _| match &mut style.weight {
        HeatmapWeight::Constant { value: v } => {
            *v = value;
            Ok(())
        }
        HeatmapWeight::Quantitative { .. } => Err(mismatch),
    })
}

pub(super) fn ramp(t: Target<'_>, p: &payload::HeatmapRamp) -> Result<(), PatchError> {
    edit_heatmap(t, |style, _| {
        style.ramp.scheme = p.scheme;
        Ok(())
    })
}

pub(super) fn ramp_direction(
    t: Target<'_>,
    p: &payload::HeatmapRampDirection,
) -> Result<(), PatchError> {
    edit_heatmap(t, |style, _| {
        style.ramp.direction = p.direction;
        Ok(())
    })
}

pub(super) fn radius(t: Target<'_>, p: &payload::HeatmapRadius) -> Result<(), PatchError> {
    let radius = non_negative("radius", p.radius)?;
    edit_heatmap(t, |style, _| {
        style.radius = radius;
        Ok(())
    })
}

pub(super) fn intensity(t: Target<'_>, p: &payload::HeatmapIntensity) -> Result<(), PatchError> {
    let intensity = non_negative("intensity", p.intensity)?;
    edit_heatmap(t, |style, _| {
        style.intensity = intensity;
        Ok(())
    })
}

pub(super) fn opacity(t: Target<'_>, p: &payload::HeatmapOpacity) -> Result<(), PatchError> {
    let opacity = unit_interval("opacity", p.opacity)?;
    edit_heatmap(t, |style, _| {
        style.opacity = opacity;
        Ok(())
    })
}
