// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Dot-density patchers.
//!
//! Attribute and value edits rewrite the `generateDotDensityPoints` record
//! and re-fold the layer's data. The seed is kept, so the same parameters
//! always place the same dots.

use cartokit_ir::{CartoKitLayer, DotDensityStyle, Layer};

use super::transformation::replace_derivation;
use super::{non_negative, Target};
use crate::attribute::{is_kind, AttributeKind};
use crate::diff::payload;
use crate::dots::{default_dot_value, dot_seed};
use crate::error::PatchError;
use crate::transform::{attribute_view, dot_args, generate_dot_density_points, refold};

/// Rebuild the dot record from `style.dots` and re-fold.
pub(crate) fn regenerate(layer: &mut Layer<DotDensityStyle>) -> Result<(), PatchError> {
    let seed = layer
        .data
        .transformations
        .geometry_deriving()
        .and_then(|(_, t)| dot_args(t).ok())
        .map_or_else(|| dot_seed(&layer.id), |args| args.seed);
    let dots = &layer.style.dots;
    let record = generate_dot_density_points(&dots.attribute, dots.value, seed);
    replace_derivation(&layer.id, &mut layer.data.transformations, Some(record))?;
    refold(&mut layer.data)?;
    Ok(())
}

fn positive(value: f64) -> Result<f64, PatchError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PatchError::InvalidValue {
            field: "value",
            reason: format!("dot value must be positive, got {value}"),
        })
    }
}

pub(super) fn attribute(t: Target<'_>, p: &payload::DotAttribute) -> Result<(), PatchError> {
    let CartoKitLayer::DotDensity(l) = t.layer else {
        return Err(t.mismatch());
    };
    let view = attribute_view(&l.data)?;
    if !is_kind(&view, &p.attribute, AttributeKind::Quantitative) {
        return Err(PatchError::InvalidValue {
            field: "attribute",
            reason: format!("{} is not a quantitative attribute", p.attribute),
        });
    }
    let value = match p.value {
        Some(value) => positive(value)?,
        None => default_dot_value(&view, &p.attribute),
    };
    l.style.dots.attribute.clone_from(&p.attribute);
    l.style.dots.value = value;
    regenerate(l)
}

pub(super) fn value(t: Target<'_>, p: &payload::DotValue) -> Result<(), PatchError> {
    let value = positive(p.value)?;
    let CartoKitLayer::DotDensity(l) = t.layer else {
        return Err(t.mismatch());
    };
    l.style.dots.value = value;
    regenerate(l)
}

pub(super) fn size(t: Target<'_>, p: &payload::DotSize) -> Result<(), PatchError> {
    let size = non_negative("size", p.size)?;
    let CartoKitLayer::DotDensity(l) = t.layer else {
        return Err(t.mismatch());
    };
    l.style.dots.size = size;
    Ok(())
}
