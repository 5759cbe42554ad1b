// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Which geometry each layer type can draw, and how to derive it.

use cartokit_ir::{GeometryClass, LayerType};

/// Geometry-deriving step a layer type needs on top of its source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// Draw the source geometry as-is.
    Direct,
    /// Reduce polygons to their centroids.
    Centroids,
    /// Scatter dots inside polygons.
    Dots,
}

/// How `target` would draw source data of class `geometry`, or `None` when
/// it cannot.
pub fn derivation(target: LayerType, geometry: Option<GeometryClass>) -> Option<Derivation> {
    let geometry = geometry?;
    match (target, geometry) {
        (
            LayerType::Point | LayerType::ProportionalSymbol | LayerType::Heatmap,
            GeometryClass::Point,
        )
        | (LayerType::Line, GeometryClass::Line)
        | (LayerType::Polygon | LayerType::Choropleth, GeometryClass::Polygon) => {
            Some(Derivation::Direct)
        }
        (
            LayerType::Point | LayerType::ProportionalSymbol | LayerType::Heatmap,
            GeometryClass::Polygon,
        ) => Some(Derivation::Centroids),
        (LayerType::DotDensity, GeometryClass::Polygon) => Some(Derivation::Dots),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_only_draw_as_lines() {
        for target in LayerType::ALL {
            let expected = (target == LayerType::Line).then_some(Derivation::Direct);
            assert_eq!(derivation(target, Some(GeometryClass::Line)), expected);
        }
    }

    #[test]
    fn polygons_reach_points_through_centroids() {
        assert_eq!(
            derivation(LayerType::Heatmap, Some(GeometryClass::Polygon)),
            Some(Derivation::Centroids)
        );
        assert_eq!(
            derivation(LayerType::DotDensity, Some(GeometryClass::Polygon)),
            Some(Derivation::Dots)
        );
        assert_eq!(derivation(LayerType::DotDensity, Some(GeometryClass::Point)), None);
    }

    #[test]
    fn empty_data_has_no_legal_target() {
        assert!(LayerType::ALL.iter().all(|t| derivation(*t, None).is_none()));
    }
}
