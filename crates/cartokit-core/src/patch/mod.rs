// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Patch: apply one diff to a document, producing the next document.
//!
//! Patching is copy-on-write. The input IR is never touched; the result is a
//! fresh IR, so a failed patch leaves nothing half-applied. Every diff
//! variant has its own arm below and is routed to the patcher for its
//! concern.

mod document;
mod dot_density;
mod fill;
mod heatmap;
pub mod layer_type;
mod size;
mod stroke;
mod transformation;

use cartokit_ir::{CartoKitIR, CartoKitLayer, FeatureCollection, LayerType};
use tracing::{debug, instrument};

use crate::attribute::{is_kind, AttributeKind};
use crate::config::StyleDefaults;
use crate::diff::Diff;
use crate::error::PatchError;

pub(crate) use fill::{categorical_fill, quantitative_fill};

/// Apply `diff` to `ir` with default style settings.
pub fn patch(diff: &Diff, ir: &CartoKitIR) -> Result<CartoKitIR, PatchError> {
    patch_with(diff, ir, &StyleDefaults::default())
}

/// Apply `diff` to `ir`, synthesizing any new styles from `defaults`.
#[instrument(level = "debug", skip_all, fields(diff = diff.tag(), layer = ?diff.layer_id()))]
pub fn patch_with(
    diff: &Diff,
    ir: &CartoKitIR,
    defaults: &StyleDefaults,
) -> Result<CartoKitIR, PatchError> {
    let mut next = ir.clone();
    let tag = diff.tag();

    // Resolve the diff's layer inside `next` as a patch target.
    macro_rules! target {
        ($d:expr) => {
            Target::resolve(&mut next, &$d.layer_id, tag, defaults)?
        };
    }

    match diff {
        Diff::MapCenter(d) => next.center = d.payload.center,
        Diff::MapZoom(d) => document::zoom(&mut next, d.payload.zoom)?,
        Diff::MapProjection(d) => next.projection = d.payload.projection,
        Diff::Basemap(d) => document::basemap(&mut next, &d.payload),

        Diff::AddLayer(d) => document::add_layer(&mut next, &d.layer_id, &d.payload.layer)?,
        Diff::RemoveLayer(d) => document::remove_layer(&mut next, &d.layer_id)?,
        Diff::RenameLayer(d) => {
            *target!(d).layer.display_name_mut() = d.payload.display_name.clone();
        }
        Diff::LayerVisibility(d) => {
            target!(d).layer.layout_mut().visibility = d.payload.visibility;
        }
        Diff::LayerTooltipVisibility(d) => {
            target!(d).layer.layout_mut().tooltip.visible = d.payload.visible;
        }
        Diff::LayerZ(d) => target!(d).layer.layout_mut().z = d.payload.z,
        Diff::LayerType(d) => layer_type::patch_layer_type(target!(d), &d.payload)?,

        Diff::FillColor(d) => fill::color(target!(d), &d.payload)?,
        Diff::FillOpacity(d) => fill::opacity(target!(d), &d.payload)?,
        Diff::AddFill(d) => fill::add(target!(d), &d.payload)?,
        Diff::RemoveFill(d) => fill::remove(target!(d))?,
        Diff::FillAttribute(d) => fill::attribute(target!(d), &d.payload)?,
        Diff::FillVisualizationType(d) => fill::visualization_type(target!(d), &d.payload)?,
        Diff::ColorScheme(d) => fill::scheme(target!(d), &d.payload)?,
        Diff::ColorSchemeDirection(d) => fill::direction(target!(d), &d.payload)?,
        Diff::ClassificationMethod(d) => fill::method(target!(d), &d.payload)?,
        Diff::StepCount(d) => fill::step_count(target!(d), &d.payload)?,
        Diff::StepValue(d) => fill::step_value(target!(d), &d.payload)?,
        Diff::CategoricalColor(d) => fill::categorical_color(target!(d), &d.payload)?,

        Diff::StrokeColor(d) => stroke::color(target!(d), &d.payload)?,
        Diff::StrokeWidth(d) => stroke::width(target!(d), &d.payload)?,
        Diff::StrokeOpacity(d) => stroke::opacity(target!(d), &d.payload)?,
        Diff::AddStroke(d) => stroke::add(target!(d), &d.payload)?,
        Diff::RemoveStroke(d) => stroke::remove(target!(d))?,

        Diff::PointSize(d) => size::point_size(target!(d), &d.payload)?,
        Diff::SizeAttribute(d) => size::attribute(target!(d), &d.payload)?,
        Diff::SizeMin(d) => size::min(target!(d), &d.payload)?,
        Diff::SizeMax(d) => size::max(target!(d), &d.payload)?,

        Diff::DotAttribute(d) => dot_density::attribute(target!(d), &d.payload)?,
        Diff::DotValue(d) => dot_density::value(target!(d), &d.payload)?,
        Diff::DotSize(d) => dot_density::size(target!(d), &d.payload)?,

        Diff::HeatmapWeightType(d) => heatmap::weight_type(target!(d), &d.payload)?,
        Diff::HeatmapWeightAttribute(d) => heatmap::weight_attribute(target!(d), &d.payload)?,
        Diff::HeatmapWeightValue(d) => heatmap::weight_value(target!(d), &d.payload)?,
        Diff::HeatmapRamp(d) => heatmap::ramp(target!(d), &d.payload)?,
        Diff::HeatmapRampDirection(d) => heatmap::ramp_direction(target!(d), &d.payload)?,
        Diff::HeatmapRadius(d) => heatmap::radius(target!(d), &d.payload)?,
        Diff::HeatmapIntensity(d) => heatmap::intensity(target!(d), &d.payload)?,
        Diff::HeatmapOpacity(d) => heatmap::opacity(target!(d), &d.payload)?,

        Diff::AddTransformation(d) => transformation::add(target!(d), &d.payload)?,
        Diff::RemoveTransformation(d) => transformation::remove(target!(d), &d.payload)?,
    }

    debug!("patched");
    Ok(next)
}

/// The layer a diff edits, plus what its patcher needs to report errors and
/// synthesize values.
pub(crate) struct Target<'a> {
    pub(crate) layer: &'a mut CartoKitLayer,
    pub(crate) tag: &'static str,
    pub(crate) defaults: &'a StyleDefaults,
}

impl<'a> Target<'a> {
    fn resolve(
        ir: &'a mut CartoKitIR,
        id: &str,
        tag: &'static str,
        defaults: &'a StyleDefaults,
    ) -> Result<Self, PatchError> {
        let Some(layer) = ir.layer_mut(id) else {
            return Err(PatchError::LayerNotFound(id.to_owned()));
        };
        Ok(Self {
            layer,
            tag,
            defaults,
        })
    }

    pub(crate) fn layer_type(&self) -> LayerType {
        self.layer.layer_type()
    }

    pub(crate) fn geojson(&self) -> &FeatureCollection {
        &self.layer.data().geojson
    }

    pub(crate) fn mismatch(&self) -> PatchError {
        mismatch(self.tag, self.layer)
    }

    pub(crate) fn no_attribute(&self, to: LayerType, kind: AttributeKind) -> PatchError {
        PatchError::NoAttribute {
            layer_id: self.layer.id().to_owned(),
            to,
            kind: kind.as_str(),
        }
    }

    /// Reject `attribute` unless the rendered data holds it as `kind`.
    pub(crate) fn require_attribute(
        &self,
        attribute: &str,
        kind: AttributeKind,
    ) -> Result<(), PatchError> {
        if is_kind(self.geojson(), attribute, kind) {
            Ok(())
        } else {
            Err(PatchError::InvalidValue {
                field: "attribute",
                reason: format!("{attribute} is not a {} attribute", kind.as_str()),
            })
        }
    }
}

pub(crate) fn mismatch(tag: &'static str, layer: &CartoKitLayer) -> PatchError {
    PatchError::StyleMismatch {
        diff: tag,
        layer_id: layer.id().to_owned(),
        layer_type: layer.layer_type(),
    }
}

/// Reject negative or non-finite sizes.
pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64, PatchError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PatchError::InvalidValue {
            field,
            reason: format!("expected a finite value >= 0, got {value}"),
        })
    }
}

/// Reject opacities outside `[0, 1]`.
pub(crate) fn unit_interval(field: &'static str, value: f64) -> Result<f64, PatchError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(PatchError::InvalidValue {
            field,
            reason: format!("expected a value in [0, 1], got {value}"),
        })
    }
}
