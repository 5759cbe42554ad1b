// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Bridge from document geometries to [`geo`] types.
//!
//! Area, containment and centroids are computed by `geo` on planar lng/lat
//! coordinates.

use cartokit_ir::{Geometry, Position};
use geo::{Centroid, Coord, LineString, Point, Polygon};

fn line(positions: &[Position]) -> LineString<f64> {
    positions.iter().map(|&[x, y]| Coord { x, y }).collect()
}

fn polygon(rings: &[Vec<Position>]) -> Polygon<f64> {
    let mut rings = rings.iter().map(Vec::as_slice).map(line);
    let exterior = rings.next().unwrap_or_else(|| LineString::new(Vec::new()));
    Polygon::new(exterior, rings.collect())
}

/// Convert a document geometry.
pub fn to_geo(geometry: &Geometry) -> geo::Geometry<f64> {
    match geometry {
        Geometry::Point { coordinates: [x, y] } => Point::new(*x, *y).into(),
        Geometry::MultiPoint { coordinates } => geo::Geometry::MultiPoint(
            coordinates.iter().map(|&[x, y]| Point::new(x, y)).collect(),
        ),
        Geometry::LineString { coordinates } => line(coordinates).into(),
        Geometry::MultiLineString { coordinates } => geo::Geometry::MultiLineString(
            coordinates.iter().map(Vec::as_slice).map(line).collect(),
        ),
        Geometry::Polygon { coordinates } => polygon(coordinates).into(),
        Geometry::MultiPolygon { coordinates } => geo::Geometry::MultiPolygon(
            coordinates.iter().map(Vec::as_slice).map(polygon).collect(),
        ),
        Geometry::GeometryCollection { geometries } => {
            geo::Geometry::GeometryCollection(geometries.iter().map(to_geo).collect())
        }
    }
}

/// Centroid of a geometry: area-weighted for polygons, length-weighted for
/// lines, the mean for points. `None` when the geometry is empty.
pub fn centroid(geometry: &Geometry) -> Option<Position> {
    to_geo(geometry).centroid().map(|p| [p.x(), p.y()])
}

/// Polygons of a geometry; non-polygonal geometries have none.
pub fn polygons(geometry: &Geometry) -> Vec<Polygon<f64>> {
    match geometry {
        Geometry::Polygon { coordinates } => vec![polygon(coordinates)],
        Geometry::MultiPolygon { coordinates } => {
            coordinates.iter().map(Vec::as_slice).map(polygon).collect()
        }
        Geometry::GeometryCollection { geometries } => {
            geometries.iter().flat_map(polygons).collect()
        }
        Geometry::Point { .. }
        | Geometry::MultiPoint { .. }
        | Geometry::LineString { .. }
        | Geometry::MultiLineString { .. } => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Area, Contains};

    fn square(x0: f64, y0: f64, side: f64) -> Vec<Position> {
        vec![
            [x0, y0],
            [x0 + side, y0],
            [x0 + side, y0 + side],
            [x0, y0 + side],
            [x0, y0],
        ]
    }

    fn assert_near(actual: Option<Position>, [x, y]: Position) {
        let [ax, ay] = actual.expect("centroid");
        assert!((ax - x).abs() < 1e-9 && (ay - y).abs() < 1e-9, "{ax},{ay}");
    }

    #[test]
    fn square_centroid_is_its_middle() {
        let g = Geometry::Polygon {
            coordinates: vec![square(0.0, 0.0, 2.0)],
        };
        assert_near(centroid(&g), [1.0, 1.0]);
    }

    #[test]
    fn winding_does_not_matter() {
        let mut ring = square(0.0, 0.0, 2.0);
        ring.reverse();
        let g = Geometry::Polygon {
            coordinates: vec![ring],
        };
        assert_near(centroid(&g), [1.0, 1.0]);
    }

    #[test]
    fn multipolygon_centroid_weighs_parts_by_area() {
        let g = Geometry::MultiPolygon {
            coordinates: vec![vec![square(0.0, 0.0, 1.0)], vec![square(4.0, 0.0, 3.0)]],
        };
        // (1 * 0.5 + 9 * 5.5) / 10
        assert_near(centroid(&g), [5.0, 1.4]);
    }

    #[test]
    fn holes_are_excluded() {
        let g = Geometry::Polygon {
            coordinates: vec![square(0.0, 0.0, 10.0), square(4.0, 4.0, 2.0)],
        };
        let [p] = polygons(&g).try_into().expect("one polygon");
        assert!(p.contains(&Point::new(1.0, 1.0)));
        assert!(!p.contains(&Point::new(5.0, 5.0)));
        assert!(!p.contains(&Point::new(11.0, 5.0)));
        assert_eq!(p.unsigned_area(), 96.0);
    }

    #[test]
    fn line_centroid_is_length_weighted() {
        let g = Geometry::LineString {
            coordinates: vec![[0.0, 0.0], [2.0, 0.0], [4.0, 0.0]],
        };
        assert_near(centroid(&g), [2.0, 0.0]);
    }

    #[test]
    fn points_have_no_polygons() {
        let g = Geometry::Point {
            coordinates: [1.0, 2.0],
        };
        assert!(polygons(&g).is_empty());
        assert_eq!(centroid(&g), Some([1.0, 2.0]));
    }
}
