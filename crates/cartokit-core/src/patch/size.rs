// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Circle size patchers for point and proportional symbol layers.

use cartokit_ir::{CartoKitLayer, ProportionalSymbolSize};

use super::{non_negative, Target};
use crate::attribute::AttributeKind;
use crate::diff::payload;
use crate::error::PatchError;

pub(super) fn point_size(t: Target<'_>, p: &payload::PointSize) -> Result<(), PatchError> {
    let size = non_negative("size", p.size)?;
    let CartoKitLayer::Point(l) = t.layer else {
        return Err(t.mismatch());
    };
    l.style.size = size;
    Ok(())
}

fn edit_size(
    t: Target<'_>,
    edit: impl FnOnce(&mut ProportionalSymbolSize),
) -> Result<(), PatchError> {
    let CartoKitLayer::ProportionalSymbol(l) = t.layer else {
        return Err(t.mismatch());
    };
    edit(&mut l.style.size);
    Ok(())
}

pub(super) fn attribute(t: Target<'_>, p: &payload::SizeAttribute) -> Result<(), PatchError> {
    if t.layer_type() == cartokit_ir::LayerType::ProportionalSymbol {
        t.require_attribute(&p.attribute, AttributeKind::Quantitative)?;
    }
    edit_size(t, |s| s.attribute.clone_from(&p.attribute))
}

pub(super) fn min(t: Target<'_>, p: &payload::SizeMin) -> Result<(), PatchError> {
    let min = non_negative("min", p.min)?;
    edit_size(t, |s| s.min = min)
}

pub(super) fn max(t: Target<'_>, p: &payload::SizeMax) -> Result<(), PatchError> {
    let max = non_negative("max", p.max)?;
    edit_size(t, |s| s.max = max)
}
