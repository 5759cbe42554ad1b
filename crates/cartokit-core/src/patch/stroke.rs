// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Stroke patchers. Line layers always keep their stroke.

use cartokit_ir::{CartoKitLayer, ConstantStroke};

use super::{non_negative, unit_interval, Target};
use crate::diff::payload;
use crate::error::PatchError;

fn edit_stroke(
    t: Target<'_>,
    edit: impl FnOnce(Option<ConstantStroke>, &Target<'_>) -> Result<Option<ConstantStroke>, PatchError>,
) -> Result<(), PatchError> {
    let current = t.layer.stroke().cloned();
    let next = edit(current, &t)?;
    let stored = match (&mut *t.layer, next) {
        (CartoKitLayer::Line(l), Some(stroke)) => {
            l.style.stroke = stroke;
            true
        }
        (CartoKitLayer::Line(_) | CartoKitLayer::Heatmap(_), _) => false,
        (CartoKitLayer::Point(l), stroke) => {
            l.style.stroke = stroke;
            true
        }
        (CartoKitLayer::ProportionalSymbol(l), stroke) => {
            l.style.stroke = stroke;
            true
        }
        (CartoKitLayer::Polygon(l), stroke) => {
            l.style.stroke = stroke;
            true
        }
        (CartoKitLayer::Choropleth(l), stroke) => {
            l.style.stroke = stroke;
            true
        }
        (CartoKitLayer::DotDensity(l), stroke) => {
            l.style.stroke = stroke;
            true
        }
    };
    if stored {
        Ok(())
    } else {
        Err(t.mismatch())
    }
}

/// Edit an existing stroke in place.
fn modify(t: Target<'_>, edit: impl FnOnce(&mut ConstantStroke)) -> Result<(), PatchError> {
    edit_stroke(t, |stroke, t| {
        let Some(mut stroke) = stroke else {
            return Err(t.mismatch());
        };
        edit(&mut stroke);
        Ok(Some(stroke))
    })
}

pub(super) fn color(t: Target<'_>, p: &payload::StrokeColor) -> Result<(), PatchError> {
    modify(t, |s| s.color.clone_from(&p.color))
}

pub(super) fn width(t: Target<'_>, p: &payload::StrokeWidth) -> Result<(), PatchError> {
    let width = non_negative("width", p.width)?;
    modify(t, |s| s.width = width)
}

pub(super) fn opacity(t: Target<'_>, p: &payload::StrokeOpacity) -> Result<(), PatchError> {
    let opacity = unit_interval("opacity", p.opacity)?;
    modify(t, |s| s.opacity = opacity)
}

pub(super) fn add(t: Target<'_>, p: &payload::AddStroke) -> Result<(), PatchError> {
    edit_stroke(t, |stroke, t| match stroke {
        Some(_) => Err(t.mismatch()),
        None => Ok(Some(
            p.stroke.clone().unwrap_or_else(|| t.defaults.stroke()),
        )),
    })
}

pub(super) fn remove(t: Target<'_>) -> Result<(), PatchError> {
    edit_stroke(t, |stroke, t| match stroke {
        Some(_) => Ok(None),
        None => Err(t.mismatch()),
    })
}
