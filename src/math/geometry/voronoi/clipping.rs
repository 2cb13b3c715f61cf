// src/math/geometry/voronoi/clipping.rs
//! Sutherland-Hodgman clipping of convex cell polygons against half-planes.

use crate::math::types::*;

/// A closed half-plane `{ p | normal · p <= offset }`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfPlane {
    pub normal: DVec2,
    pub offset: f64,
}

impl HalfPlane {
    pub fn new(normal: DVec2, offset: f64) -> Self {
        Self { normal, offset }
    }

    /// The half of the plane that is at least as close to `site` as to `other`.
    ///
    /// `site == other` yields a degenerate half-plane that contains everything.
    pub fn closer_to(site: Point, other: Point) -> Self {
        let normal = other - site;
        let offset = normal.dot(site.midpoint(other).to_dvec2());
        Self { normal, offset }
    }

    /// The four half-planes bounding an axis-aligned box.
    pub fn from_bounds(bounds: &Bounds2D) -> [Self; 4] {
        [
            Self::new(DVec2::new(-1.0, 0.0), -bounds.min.x),
            Self::new(DVec2::new(1.0, 0.0), bounds.max.x),
            Self::new(DVec2::new(0.0, -1.0), -bounds.min.y),
            Self::new(DVec2::new(0.0, 1.0), bounds.max.y),
        ]
    }

    fn signed_distance(&self, p: Point) -> f64 {
        self.normal.dot(p.to_dvec2()) - self.offset
    }

    pub fn contains(&self, p: Point) -> bool {
        self.signed_distance(p) <= 0.0
    }

    /// Intersection of segment `from`-`to` with the boundary line.
    /// Only called for segments that cross it, so the denominator is non-zero.
    fn intersect(&self, from: Point, to: Point) -> Point {
        let d_from = self.signed_distance(from);
        let d_to = self.signed_distance(to);
        let t = d_from / (d_from - d_to);
        from + (to - from) * t
    }
}

/// Clips a polygon against one half-plane (one Sutherland-Hodgman pass).
pub fn clip_to_half_plane(polygon: &[Point], plane: &HalfPlane) -> Vec<Point> {
    let mut output = Vec::with_capacity(polygon.len() + 1);
    let Some(&last) = polygon.last() else {
        return output;
    };

    let mut prev = last;
    for &current in polygon {
        match (plane.contains(prev), plane.contains(current)) {
            (true, true) => output.push(current),
            (true, false) => output.push(plane.intersect(prev, current)),
            (false, true) => {
                output.push(plane.intersect(prev, current));
                output.push(current);
            }
            (false, false) => {}
        }
        prev = current;
    }
    output
}

/// Clips a polygon against an axis-aligned box. Coordinates that land on a box
/// edge are snapped onto it exactly.
pub fn clip_to_bounds(polygon: &[Point], bounds: &Bounds2D) -> Vec<Point> {
    let clipped = HalfPlane::from_bounds(bounds)
        .iter()
        .fold(polygon.to_vec(), |poly, plane| clip_to_half_plane(&poly, plane));

    let snapped: Vec<Point> = clipped
        .into_iter()
        .map(|p| {
            Point::new(
                p.x.clamp(bounds.min.x, bounds.max.x),
                p.y.clamp(bounds.min.y, bounds.max.y),
            )
        })
        .collect();
    dedup_ring(snapped)
}

/// Removes consecutive duplicates, including a closing duplicate of the first point.
pub fn dedup_ring(mut ring: Vec<Point>) -> Vec<Point> {
    ring.dedup();
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Area, LineString, Polygon};

    fn area(points: &[Point]) -> f64 {
        let ring: LineString<f64> = points.iter().map(|&p| geo::Coord::from(p)).collect();
        Polygon::new(ring, vec![]).unsigned_area()
    }

    fn unit_box() -> Bounds2D {
        Bounds2D::from_points(Point::new(0.0, 0.0), Point::new(10.0, 10.0))
    }

    #[test]
    fn test_bisector_half_plane() {
        let plane = HalfPlane::closer_to(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!(plane.contains(Point::new(4.9, 100.0)));
        assert!(plane.contains(Point::new(5.0, 0.0)));
        assert!(!plane.contains(Point::new(5.1, 0.0)));
    }

    #[test]
    fn test_clip_square_in_half() {
        let square = unit_box().corners();
        let plane = HalfPlane::closer_to(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let half = clip_to_half_plane(&square, &plane);
        assert_eq!(half.len(), 4);
        assert_eq!(area(&half), 50.0);
        assert!(half.iter().all(|p| p.x <= 5.0));
    }

    #[test]
    fn test_clip_to_bounds_identity_inside() {
        let inner = vec![
            Point::new(1.0, 1.0),
            Point::new(9.0, 1.0),
            Point::new(5.0, 9.0),
        ];
        assert_eq!(clip_to_bounds(&inner, &unit_box()), inner);
    }

    #[test]
    fn test_clip_to_bounds_cuts_overhang() {
        let overhang = vec![
            Point::new(5.0, 5.0),
            Point::new(15.0, 5.0),
            Point::new(15.0, 15.0),
            Point::new(5.0, 15.0),
        ];
        let clipped = clip_to_bounds(&overhang, &unit_box());
        assert_eq!(area(&clipped), 25.0);
        assert!(clipped.iter().all(|p| unit_box().contains_point(*p)));
    }

    #[test]
    fn test_clip_outside_is_empty() {
        let outside = vec![
            Point::new(20.0, 20.0),
            Point::new(30.0, 20.0),
            Point::new(25.0, 30.0),
        ];
        assert!(clip_to_bounds(&outside, &unit_box()).is_empty());
    }

    #[test]
    fn test_dedup_ring() {
        let ring = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 0.0),
        ];
        assert_eq!(dedup_ring(ring).len(), 3);
    }
}
