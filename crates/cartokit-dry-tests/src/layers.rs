// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Layer and document builders.
//!
//! Only the basic geometry-backed layer types are built directly; tests
//! reach the data-driven types by transitioning one of these.

use cartokit_ir::{
    CartoKitIR, CartoKitLayer, ConstantFill, ConstantStroke, Fill, FeatureCollection, Layer,
    LayerData, LayerId, LineStyle, Layout, PointStyle, PolygonStyle,
};

/// Fill color of fixture layers.
pub const FIXTURE_FILL: &str = "#6699cc";
/// Stroke color of fixture layers.
pub const FIXTURE_STROKE: &str = "#222222";

fn envelope<S>(id: &str, geojson: FeatureCollection, style: S) -> Layer<S> {
    Layer {
        id: id.to_owned(),
        display_name: id.to_uppercase(),
        data: LayerData::from_geojson(geojson),
        layout: Layout::default(),
        style,
    }
}

/// Fixture fill at `opacity`.
pub fn fill(opacity: f64) -> ConstantFill {
    ConstantFill {
        color: FIXTURE_FILL.into(),
        opacity,
    }
}

/// Fixture stroke.
pub fn stroke() -> ConstantStroke {
    ConstantStroke {
        color: FIXTURE_STROKE.into(),
        width: 1.0,
        opacity: 1.0,
    }
}

/// Polygon layer with a fill and a stroke.
pub fn polygon_layer(id: &str, geojson: FeatureCollection) -> CartoKitLayer {
    CartoKitLayer::Polygon(envelope(
        id,
        geojson,
        PolygonStyle {
            fill: Some(fill(0.8)),
            stroke: Some(stroke()),
        },
    ))
}

/// Line layer.
pub fn line_layer(id: &str, geojson: FeatureCollection) -> CartoKitLayer {
    CartoKitLayer::Line(envelope(id, geojson, LineStyle { stroke: stroke() }))
}

/// Point layer with a constant fill and no stroke.
pub fn point_layer(id: &str, geojson: FeatureCollection) -> CartoKitLayer {
    CartoKitLayer::Point(envelope(
        id,
        geojson,
        PointStyle {
            size: 4.0,
            fill: Some(Fill::Constant(fill(1.0))),
            stroke: None,
        },
    ))
}

/// Builds a [`CartoKitIR`]; layers stack in insertion order.
#[derive(Debug, Clone, Default)]
pub struct IrBuilder {
    ir: CartoKitIR,
}

impl IrBuilder {
    /// Empty document at zoom 4 centered on the origin.
    pub fn new() -> Self {
        Self {
            ir: CartoKitIR {
                zoom: 4.0,
                ..CartoKitIR::default()
            },
        }
    }

    /// Add `layer` above every layer added so far.
    pub fn layer(mut self, mut layer: CartoKitLayer) -> Self {
        layer.layout_mut().z = self.ir.layers.len() as u32;
        self.ir.layers.insert(LayerId::from(layer.id()), layer);
        self
    }

    /// Set the map center.
    pub fn center(mut self, lng: f64, lat: f64) -> Self {
        self.ir.center = [lng, lat];
        self
    }

    /// Finish.
    pub fn build(self) -> CartoKitIR {
        self.ir
    }
}

/// A document with a `counties` polygon layer under a `stations` point layer.
pub fn sample_ir() -> CartoKitIR {
    IrBuilder::new()
        .layer(polygon_layer("counties", crate::geojson::counties()))
        .layer(point_layer("stations", crate::geojson::stations()))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartokit_ir::LayerType;

    #[test]
    fn builder_stacks_in_insertion_order() {
        let ir = sample_ir();
        let order: Vec<(&str, u32)> = ir
            .layers_by_z()
            .into_iter()
            .map(|l| (l.id(), l.layout().z))
            .collect();
        assert_eq!(order, [("counties", 0), ("stations", 1)]);
        assert_eq!(
            ir.layer("stations").map(CartoKitLayer::layer_type),
            Some(LayerType::Point)
        );
    }
}
