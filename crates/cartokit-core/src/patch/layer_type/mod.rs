// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Layer type transitions.
//!
//! A transition is a total function from `(layer, target type)` to either a
//! new layer or an [`PatchError::IllegalTransition`]. The envelope (id,
//! name, layout) is kept, the data pipeline gets the geometry-deriving
//! record the target needs, and the style is rebuilt for the target shape.

mod legality;
mod style;

use cartokit_ir::{CartoKitLayer, Layer, LayerType};

pub use legality::{derivation, Derivation};

use super::dot_density::regenerate;
use super::transformation::replace_derivation;
use super::Target;
use crate::attribute::AttributeKind;
use crate::config::StyleDefaults;
use crate::diff::payload;
use crate::error::PatchError;
use crate::transform::{attribute_view, derive_centroids, refold};

/// Convert `layer` to `target`, synthesizing a style from what the layer
/// already has plus `defaults`.
///
/// Converting to the layer's own type returns it unchanged.
pub fn transition(
    layer: &CartoKitLayer,
    target: LayerType,
    defaults: &StyleDefaults,
) -> Result<CartoKitLayer, PatchError> {
    let from = layer.layer_type();
    if from == target {
        return Ok(layer.clone());
    }
    let geometry = layer.data().source_geojson.geometry_class();
    let Some(how) = derivation(target, geometry) else {
        return Err(PatchError::IllegalTransition {
            from,
            to: target,
            geometry,
        });
    };

    let view = attribute_view(layer.data())?;
    let carried = style::Carried::from_layer(layer);
    let no_attribute = |kind: AttributeKind| PatchError::NoAttribute {
        layer_id: layer.id().to_owned(),
        to: target,
        kind: kind.as_str(),
    };
    let base = Layer {
        id: layer.id().to_owned(),
        display_name: layer.display_name().to_owned(),
        data: layer.data().clone(),
        layout: *layer.layout(),
        style: (),
    };

    let mut next = match target {
        LayerType::Point => CartoKitLayer::Point(base.with_style(style::point(&carried, defaults))),
        LayerType::ProportionalSymbol => {
            let style = style::proportional_symbol(&carried, &view, defaults)
                .ok_or_else(|| no_attribute(AttributeKind::Quantitative))?;
            CartoKitLayer::ProportionalSymbol(base.with_style(style))
        }
        LayerType::Line => CartoKitLayer::Line(base.with_style(style::line(&carried, defaults))),
        LayerType::Polygon => {
            CartoKitLayer::Polygon(base.with_style(style::polygon(&carried, defaults)))
        }
        LayerType::Choropleth => {
            let style = style::choropleth(&carried, &view, defaults)
                .ok_or_else(|| no_attribute(AttributeKind::Quantitative))?;
            CartoKitLayer::Choropleth(base.with_style(style))
        }
        LayerType::DotDensity => {
            let style = style::dot_density(&carried, &view, defaults)
                .ok_or_else(|| no_attribute(AttributeKind::Quantitative))?;
            CartoKitLayer::DotDensity(base.with_style(style))
        }
        LayerType::Heatmap => {
            CartoKitLayer::Heatmap(base.with_style(style::heatmap(&carried, defaults)))
        }
    };

    // Dot-density is the only target with `Derivation::Dots`.
    match &mut next {
        CartoKitLayer::DotDensity(l) => regenerate(l)?,
        next => {
            let record = (how == Derivation::Centroids).then(derive_centroids);
            let id = next.id().to_owned();
            let data = next.data_mut();
            replace_derivation(&id, &mut data.transformations, record)?;
            refold(data)?;
        }
    }
    Ok(next)
}

/// `layer-type`: restore the snapshot when the diff carries one, else
/// transition.
pub(crate) fn patch_layer_type(t: Target<'_>, p: &payload::LayerType) -> Result<(), PatchError> {
    let next = match &p.snapshot {
        Some(snapshot) => {
            if snapshot.layer_type() != p.layer_type || snapshot.id() != t.layer.id() {
                return Err(PatchError::InvalidValue {
                    field: "snapshot",
                    reason: format!(
                        "snapshot is {} layer {}, expected {} layer {}",
                        snapshot.layer_type(),
                        snapshot.id(),
                        p.layer_type,
                        t.layer.id()
                    ),
                });
            }
            (**snapshot).clone()
        }
        None => transition(t.layer, p.layer_type, t.defaults)?,
    };
    *t.layer = next;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartokit_ir::{
        ConstantFill, Feature, FeatureCollection, Fill, Geometry, LayerData, Layout, PolygonStyle,
    };
    use serde_json::json;

    fn square(x: f64, pop: f64, kind: &str) -> Feature {
        let ring = vec![
            [x, 0.0],
            [x + 1.0, 0.0],
            [x + 1.0, 1.0],
            [x, 1.0],
            [x, 0.0],
        ];
        Feature::new(
            Geometry::Polygon {
                coordinates: vec![ring],
            },
            json!({ "pop": pop, "kind": kind })
                .as_object()
                .cloned()
                .unwrap_or_default(),
        )
    }

    fn polygon_layer() -> CartoKitLayer {
        let fc = FeatureCollection::new(vec![
            square(0.0, 10.0, "a"),
            square(2.0, 40.0, "b"),
            square(4.0, 90.0, "a"),
        ]);
        CartoKitLayer::Polygon(Layer {
            id: "counties".into(),
            display_name: "Counties".into(),
            data: LayerData::from_geojson(fc),
            layout: Layout::default(),
            style: PolygonStyle {
                fill: Some(ConstantFill {
                    color: "#123456".into(),
                    opacity: 0.4,
                }),
                stroke: None,
            },
        })
    }

    #[test]
    fn same_type_is_identity() {
        let layer = polygon_layer();
        let next = transition(&layer, LayerType::Polygon, &StyleDefaults::default()).unwrap();
        assert_eq!(next, layer);
    }

    #[test]
    fn polygon_to_choropleth_picks_quantitative_attribute() {
        let defaults = StyleDefaults::default();
        let next = transition(&polygon_layer(), LayerType::Choropleth, &defaults).unwrap();
        let CartoKitLayer::Choropleth(l) = &next else {
            panic!("expected choropleth, got {}", next.layer_type());
        };
        let Fill::Quantitative(fill) = Fill::from(l.style.fill.clone()) else {
            panic!("expected quantitative fill");
        };
        assert_eq!(fill.attribute, "pop");
        assert_eq!(fill.opacity, 0.4);
        assert_eq!(fill.thresholds.len(), fill.count - 1);
        assert_eq!(l.style.stroke, None);
        assert_eq!(next.data(), polygon_layer().data());
    }

    #[test]
    fn polygon_to_point_derives_centroids() {
        let next = transition(&polygon_layer(), LayerType::Point, &StyleDefaults::default())
            .unwrap();
        let data = next.data();
        assert_eq!(data.transformations.len(), 1);
        assert!(data
            .geojson
            .features
            .iter()
            .all(|f| matches!(f.geometry, Some(Geometry::Point { .. }))));

        let back = transition(&next, LayerType::Polygon, &StyleDefaults::default()).unwrap();
        assert!(back.data().transformations.is_empty());
        assert_eq!(back.data().geojson, back.data().source_geojson);
    }

    #[test]
    fn dot_density_is_seeded_by_layer_id() {
        let defaults = StyleDefaults::default();
        let a = transition(&polygon_layer(), LayerType::DotDensity, &defaults).unwrap();
        let b = transition(&polygon_layer(), LayerType::DotDensity, &defaults).unwrap();
        assert_eq!(a, b);
        let CartoKitLayer::DotDensity(l) = &a else {
            panic!("expected dot density");
        };
        assert_eq!(l.style.dots.attribute, "pop");
        assert_eq!(l.style.dots.value, 9.0);
        assert_eq!(a.data().geojson.len(), 1 + 4 + 10);
    }

    #[test]
    fn heatmap_drops_fill_and_stroke() {
        let next = transition(&polygon_layer(), LayerType::Heatmap, &StyleDefaults::default())
            .unwrap();
        assert_eq!(next.fill(), None);
        assert_eq!(next.stroke(), None);
        let back = transition(&next, LayerType::Polygon, &StyleDefaults::default()).unwrap();
        assert!(back.stroke().is_some());
    }

    #[test]
    fn heatmap_keeps_the_fill_opacity() {
        let defaults = StyleDefaults::default();
        let heat = transition(&polygon_layer(), LayerType::Heatmap, &defaults).unwrap();
        let CartoKitLayer::Heatmap(l) = &heat else {
            panic!("expected heatmap");
        };
        assert_eq!(l.style.heatmap.opacity, 0.4);
        let back = transition(&heat, LayerType::Polygon, &defaults).unwrap();
        assert_eq!(back.fill().as_ref().map(Fill::opacity), Some(0.4));

        let CartoKitLayer::Polygon(mut unfilled) = polygon_layer() else {
            panic!("expected polygon");
        };
        unfilled.style.fill = None;
        let heat =
            transition(&CartoKitLayer::Polygon(unfilled), LayerType::Heatmap, &defaults).unwrap();
        let CartoKitLayer::Heatmap(l) = &heat else {
            panic!("expected heatmap");
        };
        assert_eq!(l.style.heatmap.opacity, defaults.heatmap_opacity);
    }

    #[test]
    fn polygons_cannot_become_lines() {
        let err = transition(&polygon_layer(), LayerType::Line, &StyleDefaults::default())
            .unwrap_err();
        assert!(matches!(
            err,
            PatchError::IllegalTransition {
                from: LayerType::Polygon,
                to: LayerType::Line,
                ..
            }
        ));
    }
}
