// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Renderer primitives backing each layer type.
//!
//! Every layer owns one source (keyed by the layer id) and a stack of
//! primitives drawn from it. The main primitive carries the layer id and is
//! the bottom of the stack; auxiliary primitives are suffixed.

use cartokit_ir::{CartoKitIR, CartoKitLayer, LayerType, Visibility};
use cartokit_map_port::{FeatureState, Interaction, LayerSpec, MapPort, PrimitiveKind};
use serde_json::json;
use tracing::trace;

use super::paint::paint;
use crate::error::ReconcileError;

/// What a primitive draws for its layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The layer itself: fill, line, circles or heatmap.
    Main,
    /// Polygon outline.
    Stroke,
    /// Hovered feature highlight.
    Hover,
    /// Selected feature highlight.
    Select,
}

impl Role {
    fn suffix(self) -> &'static str {
        match self {
            Self::Main => "",
            Self::Stroke => "-stroke",
            Self::Hover => "-hover",
            Self::Select => "-select",
        }
    }
}

/// One primitive of a layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Primitive {
    /// Renderer id.
    pub id: String,
    /// Primitive class.
    pub kind: PrimitiveKind,
    /// What it draws.
    pub role: Role,
}

/// Primitive class and role of each primitive of `layer_type`, bottom to top.
pub fn stack(layer_type: LayerType) -> &'static [(PrimitiveKind, Role)] {
    use PrimitiveKind as K;
    match layer_type {
        LayerType::Polygon | LayerType::Choropleth => &[
            (K::Fill, Role::Main),
            (K::Line, Role::Stroke),
            (K::Line, Role::Hover),
            (K::Line, Role::Select),
        ],
        LayerType::Line => &[
            (K::Line, Role::Main),
            (K::Line, Role::Hover),
            (K::Line, Role::Select),
        ],
        LayerType::Point | LayerType::ProportionalSymbol | LayerType::DotDensity => {
            &[(K::Circle, Role::Main)]
        }
        LayerType::Heatmap => &[(K::Heatmap, Role::Main)],
    }
}

/// Primitives of `layer`, bottom to top.
pub fn primitives(layer: &CartoKitLayer) -> Vec<Primitive> {
    stack(layer.layer_type())
        .iter()
        .map(|&(kind, role)| Primitive {
            id: format!("{}{}", layer.id(), role.suffix()),
            kind,
            role,
        })
        .collect()
}

/// The primitive drawing `role` for `layer`, if the layer type has one.
pub fn primitive(layer: &CartoKitLayer, role: Role) -> Option<Primitive> {
    primitives(layer).into_iter().find(|p| p.role == role)
}

/// Interaction handlers registered on the main primitive.
pub fn interactions(layer: &CartoKitLayer) -> Vec<Interaction> {
    if layer.layer_type() == LayerType::Heatmap {
        return Vec::new();
    }
    let mut handlers = vec![Interaction::Hover, Interaction::Select];
    if layer.layout().tooltip.visible {
        handlers.push(Interaction::Tooltip);
    }
    handlers
}

/// Main primitive of the nearest layer above `layer` that is on the map.
pub fn before_id<M: MapPort + ?Sized>(
    ir: &CartoKitIR,
    layer: &CartoKitLayer,
    map: &M,
) -> Option<String> {
    ir.layers_by_z()
        .into_iter()
        .skip_while(|l| l.id() != layer.id())
        .skip(1)
        .map(|l| l.id().to_owned())
        .find(|id| map.has_layer(id))
}

pub(super) fn visibility(layer: &CartoKitLayer) -> &'static str {
    match layer.layout().visibility {
        Visibility::Visible => "visible",
        Visibility::None => "none",
    }
}

fn spec(layer: &CartoKitLayer, p: &Primitive) -> LayerSpec {
    let base = LayerSpec::new(&p.id, layer.id(), p.kind)
        .layout("visibility", json!(visibility(layer)));
    paint(layer, p.role)
        .into_iter()
        .fold(base, |spec, (name, value)| spec.paint(name, value))
}

/// Add `layer`'s primitives below `before`, bottom first.
pub fn add_primitives<M: MapPort + ?Sized>(
    map: &mut M,
    layer: &CartoKitLayer,
    before: Option<&str>,
) -> Result<(), ReconcileError> {
    for p in primitives(layer) {
        trace!(primitive = %p.id, ?before, "add primitive");
        map.add_layer(spec(layer, &p), before)?;
    }
    Ok(())
}

/// Remove `layer`'s primitives, top first.
pub fn remove_primitives<M: MapPort + ?Sized>(
    map: &mut M,
    layer: &CartoKitLayer,
) -> Result<(), ReconcileError> {
    for p in primitives(layer).iter().rev() {
        map.remove_layer(&p.id)?;
    }
    Ok(())
}

/// Register `layer`'s handlers on its main primitive.
pub fn instrument<M: MapPort + ?Sized>(
    map: &mut M,
    layer: &CartoKitLayer,
) -> Result<(), ReconcileError> {
    for interaction in interactions(layer) {
        map.on(layer.id(), interaction)?;
    }
    Ok(())
}

/// Unregister everything [`instrument`] registered for `layer`.
pub fn deinstrument<M: MapPort + ?Sized>(
    map: &mut M,
    layer: &CartoKitLayer,
) -> Result<(), ReconcileError> {
    for interaction in interactions(layer) {
        map.off(layer.id(), interaction)?;
    }
    Ok(())
}

/// Source, primitives and handlers for a layer not yet on the map.
pub fn mount<M: MapPort + ?Sized>(
    map: &mut M,
    ir: &CartoKitIR,
    layer: &CartoKitLayer,
) -> Result<(), ReconcileError> {
    map.add_source(layer.id(), &layer.data().geojson)?;
    let before = before_id(ir, layer, map);
    add_primitives(map, layer, before.as_deref())?;
    instrument(map, layer)
}

/// Inverse of [`mount`].
pub fn unmount<M: MapPort + ?Sized>(
    map: &mut M,
    layer: &CartoKitLayer,
) -> Result<(), ReconcileError> {
    deinstrument(map, layer)?;
    remove_primitives(map, layer)?;
    map.remove_source(layer.id())?;
    Ok(())
}

/// Tear down `prev`'s primitives and draw `next` in their place, reusing
/// the source.
pub fn redraw<M: MapPort + ?Sized>(
    map: &mut M,
    ir: &CartoKitIR,
    prev: &CartoKitLayer,
    next: &CartoKitLayer,
) -> Result<(), ReconcileError> {
    deinstrument(map, prev)?;
    remove_primitives(map, prev)?;
    map.set_source_data(next.id(), &next.data().geojson)?;
    let before = before_id(ir, next, map);
    add_primitives(map, next, before.as_deref())?;
    instrument(map, next)?;
    map.set_feature_state(next.id(), None, FeatureState::default())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_stack_is_fill_then_lines() {
        let kinds: Vec<_> = stack(LayerType::Choropleth).iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            [
                PrimitiveKind::Fill,
                PrimitiveKind::Line,
                PrimitiveKind::Line,
                PrimitiveKind::Line
            ]
        );
    }

    #[test]
    fn every_stack_starts_with_main() {
        for t in LayerType::ALL {
            assert_eq!(stack(t)[0].1, Role::Main, "{t}");
        }
    }
}
