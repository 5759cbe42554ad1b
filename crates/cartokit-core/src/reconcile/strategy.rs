// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Choosing how a layer type change reaches the surface.

use cartokit_ir::{CartoKitIR, CartoKitLayer};
use cartokit_map_port::MapPort;
use tracing::debug;

use super::paint::paint;
use super::primitives::{primitives, redraw, stack};
use super::set_paint;
use crate::error::ReconcileError;

/// How to move a layer from one type to another on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Same primitives, same source data: repaint what is there.
    InPlace,
    /// Remove the old primitives and add the new ones.
    Redraw,
}

/// In-place only when both types draw the same primitive stack from
/// identical data (Point and Proportional Symbol, Polygon and Choropleth).
pub fn strategy(prev: &CartoKitLayer, next: &CartoKitLayer) -> Strategy {
    if stack(prev.layer_type()) == stack(next.layer_type())
        && prev.data().geojson == next.data().geojson
    {
        Strategy::InPlace
    } else {
        Strategy::Redraw
    }
}

pub(super) fn change_type<M: MapPort + ?Sized>(
    map: &mut M,
    ir: &CartoKitIR,
    prev: &CartoKitLayer,
    next: &CartoKitLayer,
) -> Result<(), ReconcileError> {
    let chosen = strategy(prev, next);
    debug!(
        layer = next.id(),
        from = %prev.layer_type(),
        to = %next.layer_type(),
        strategy = ?chosen,
        "layer type change"
    );
    match chosen {
        Strategy::InPlace => {
            for p in primitives(next) {
                set_paint(map, &p.id, paint(next, p.role))?;
            }
            Ok(())
        }
        Strategy::Redraw => redraw(map, ir, prev, next),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StyleDefaults;
    use crate::patch::layer_type::transition;
    use cartokit_ir::{
        ConstantFill, Feature, FeatureCollection, Geometry, Layer, LayerData, LayerType, Layout,
        PolygonStyle,
    };
    use serde_json::json;

    fn polygon() -> CartoKitLayer {
        let ring = vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [0.0, 0.0]];
        let props = |v: f64| json!({ "v": v }).as_object().cloned().unwrap_or_default();
        let fc = FeatureCollection::new(vec![
            Feature::new(
                Geometry::Polygon {
                    coordinates: vec![ring.clone()],
                },
                props(1.0),
            ),
            Feature::new(
                Geometry::Polygon {
                    coordinates: vec![ring],
                },
                props(30.0),
            ),
        ]);
        CartoKitLayer::Polygon(Layer {
            id: "p".into(),
            display_name: "P".into(),
            data: LayerData::from_geojson(fc),
            layout: Layout::default(),
            style: PolygonStyle {
                fill: Some(ConstantFill {
                    color: "#abcdef".into(),
                    opacity: 1.0,
                }),
                stroke: None,
            },
        })
    }

    #[test]
    fn same_primitive_class_repaints_in_place() {
        let defaults = StyleDefaults::default();
        let prev = polygon();
        let choropleth = transition(&prev, LayerType::Choropleth, &defaults).unwrap();
        assert_eq!(strategy(&prev, &choropleth), Strategy::InPlace);

        let point = transition(&prev, LayerType::Point, &defaults).unwrap();
        let symbols = transition(&point, LayerType::ProportionalSymbol, &defaults).unwrap();
        assert_eq!(strategy(&point, &symbols), Strategy::InPlace);
    }

    #[test]
    fn class_or_data_change_redraws() {
        let defaults = StyleDefaults::default();
        let prev = polygon();
        let point = transition(&prev, LayerType::Point, &defaults).unwrap();
        assert_eq!(strategy(&prev, &point), Strategy::Redraw);
        let heatmap = transition(&point, LayerType::Heatmap, &defaults).unwrap();
        assert_eq!(strategy(&point, &heatmap), Strategy::Redraw);
    }
}
