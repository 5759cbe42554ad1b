// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Reconcile: bring a live map surface in line with a patched document.
//!
//! Reconcile is handed the diff, the document before it and the document
//! after it, and makes the smallest set of [`MapPort`] calls that covers the
//! diff: a paint property for a style edit, a source update for a data edit,
//! a structural redraw only when the primitive stack itself changes.

mod paint;
mod primitives;
mod strategy;

use cartokit_ir::{CartoKitIR, CartoKitLayer, LayerType};
use cartokit_map_port::{Interaction, MapPort};
use serde_json::json;
use tracing::{debug, instrument};

pub use paint::{
    categorical_expression, fill_color, heatmap_paint, quantitative_expression, size_expression,
    Paint,
};
pub use primitives::{interactions, primitives, stack, Primitive, Role};
pub use strategy::{strategy, Strategy};

use crate::diff::{Diff, DiffFamily};
use crate::error::ReconcileError;
use paint::{fill_paint, radius_paint, stroke_paint};
use primitives::{before_id, mount, primitive, unmount, visibility};

/// Style concern a diff touched.
#[derive(Debug, Clone, Copy)]
enum Concern {
    Fill,
    Stroke,
    Radius,
    Heatmap,
}

/// Apply `diff`'s effect to `map`. `prev` and `next` are the documents
/// before and after the diff.
#[instrument(level = "debug", skip_all, fields(diff = diff.tag(), layer = ?diff.layer_id()))]
pub fn reconcile<M: MapPort + ?Sized>(
    diff: &Diff,
    prev: &CartoKitIR,
    next: &CartoKitIR,
    map: &mut M,
) -> Result<(), ReconcileError> {
    match diff {
        Diff::MapCenter(_) => map.set_center(next.center),
        Diff::MapZoom(_) => map.set_zoom(next.zoom),
        Diff::MapProjection(_) => map.set_projection(next.projection),
        Diff::Basemap(_) => {
            map.set_style(&next.basemap.url)?;
            render(map, next)?;
        }

        Diff::AddLayer(d) => mount(map, next, layer(next, &d.layer_id)?)?,
        Diff::RemoveLayer(d) => unmount(map, layer(prev, &d.layer_id)?)?,
        Diff::RenameLayer(_) => {}
        Diff::LayerVisibility(d) => show(map, layer(next, &d.layer_id)?)?,
        Diff::LayerTooltipVisibility(d) => tooltip(map, layer(next, &d.layer_id)?)?,
        Diff::LayerZ(d) => reorder(map, next, layer(next, &d.layer_id)?)?,
        Diff::LayerType(d) => strategy::change_type(
            map,
            next,
            layer(prev, &d.layer_id)?,
            layer(next, &d.layer_id)?,
        )?,

        Diff::DotSize(d) => repaint(map, layer(next, &d.layer_id)?, Concern::Radius)?,
        Diff::DotAttribute(d) => refresh(map, layer(next, &d.layer_id)?)?,
        Diff::DotValue(d) => refresh(map, layer(next, &d.layer_id)?)?,

        _ => {
            let Some(id) = diff.layer_id() else {
                return Ok(());
            };
            let target = layer(next, id)?;
            match diff.family() {
                DiffFamily::Fill => repaint(map, target, Concern::Fill)?,
                DiffFamily::Stroke => repaint(map, target, Concern::Stroke)?,
                DiffFamily::Size => repaint(map, target, Concern::Radius)?,
                DiffFamily::Heatmap => repaint(map, target, Concern::Heatmap)?,
                DiffFamily::Transformation => refresh(map, target)?,
                DiffFamily::Map
                | DiffFamily::Layer
                | DiffFamily::LayerType
                | DiffFamily::DotDensity => {}
            }
        }
    }
    debug!("reconciled");
    Ok(())
}

/// Draw every layer of `ir` onto a surface that has none of them.
pub fn render<M: MapPort + ?Sized>(map: &mut M, ir: &CartoKitIR) -> Result<(), ReconcileError> {
    for layer in ir.layers_by_z() {
        mount(map, ir, layer)?;
    }
    Ok(())
}

/// Load `ir`'s basemap and camera, then draw its layers. Anything the
/// surface showed before is dropped with the old style.
pub fn render_document<M: MapPort + ?Sized>(
    map: &mut M,
    ir: &CartoKitIR,
) -> Result<(), ReconcileError> {
    map.set_style(&ir.basemap.url)?;
    map.set_center(ir.center);
    map.set_zoom(ir.zoom);
    map.set_projection(ir.projection);
    render(map, ir)
}

fn layer<'a>(ir: &'a CartoKitIR, id: &str) -> Result<&'a CartoKitLayer, ReconcileError> {
    ir.layer(id)
        .ok_or_else(|| ReconcileError::MissingLayer(id.to_owned()))
}

pub(crate) fn set_paint<M: MapPort + ?Sized>(
    map: &mut M,
    primitive: &str,
    paint: Vec<Paint>,
) -> Result<(), ReconcileError> {
    for (name, value) in paint {
        map.set_paint_property(primitive, name, value)?;
    }
    Ok(())
}

fn repaint<M: MapPort + ?Sized>(
    map: &mut M,
    layer: &CartoKitLayer,
    concern: Concern,
) -> Result<(), ReconcileError> {
    let role = match (concern, layer.layer_type()) {
        (Concern::Stroke, LayerType::Polygon | LayerType::Choropleth) => Role::Stroke,
        _ => Role::Main,
    };
    let Some(p) = primitive(layer, role) else {
        return Ok(());
    };
    let paint = match (concern, layer) {
        (Concern::Fill, _) => fill_paint(layer.fill().as_ref(), p.kind),
        (Concern::Stroke, _) => stroke_paint(layer.stroke(), p.kind),
        (Concern::Radius, _) => radius_paint(layer),
        (Concern::Heatmap, CartoKitLayer::Heatmap(l)) => heatmap_paint(&l.style.heatmap),
        (Concern::Heatmap, _) => Vec::new(),
    };
    set_paint(map, &p.id, paint)
}

/// Push the layer's derived data, then repaint anything computed from it.
fn refresh<M: MapPort + ?Sized>(
    map: &mut M,
    layer: &CartoKitLayer,
) -> Result<(), ReconcileError> {
    map.set_source_data(layer.id(), &layer.data().geojson)?;
    if layer.layer_type() == LayerType::ProportionalSymbol {
        repaint(map, layer, Concern::Radius)?;
    }
    Ok(())
}

fn show<M: MapPort + ?Sized>(map: &mut M, layer: &CartoKitLayer) -> Result<(), ReconcileError> {
    let value = json!(visibility(layer));
    for p in primitives(layer) {
        map.set_layout_property(&p.id, "visibility", value.clone())?;
    }
    Ok(())
}

fn tooltip<M: MapPort + ?Sized>(map: &mut M, layer: &CartoKitLayer) -> Result<(), ReconcileError> {
    if layer.layer_type() == LayerType::Heatmap {
        return Ok(());
    }
    if layer.layout().tooltip.visible {
        map.on(layer.id(), Interaction::Tooltip)?;
    } else {
        map.off(layer.id(), Interaction::Tooltip)?;
    }
    Ok(())
}

fn reorder<M: MapPort + ?Sized>(
    map: &mut M,
    ir: &CartoKitIR,
    layer: &CartoKitLayer,
) -> Result<(), ReconcileError> {
    let before = before_id(ir, layer, map);
    for p in primitives(layer) {
        map.move_layer(&p.id, before.as_deref())?;
    }
    Ok(())
}
