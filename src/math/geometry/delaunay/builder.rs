// src/math/geometry/delaunay/builder.rs

use crate::math::{
    error::{MathError, MathResult},
    geometry::{
        mesh::MeshTopology,
        triangle::{Edge, Triangle},
    },
    types::{Bounds2D, DVec2, Point, Vector2DExt},
    utils::constants,
};
use bevy::log::{debug, warn};
use std::collections::HashSet;

/// Inkrementelle Delaunay-Triangulation nach Bowyer-Watson.
///
/// Ein Builder lebt genau für einen Rebuild: er bekommt die geordnete Kernel-Folge,
/// erzeugt die Dreiecke und schreibt sie in ein [`MeshTopology`]. Es wird kein Zustand
/// zwischen zwei Aufrufen aufbewahrt.
#[derive(Debug, Clone)]
pub struct DelaunayBuilder {
    /// Faktor für die Kantenlänge des Super-Dreiecks relativ zur Ausdehnung der Punkte
    super_triangle_margin: f64,
}

impl Default for DelaunayBuilder {
    fn default() -> Self {
        Self {
            super_triangle_margin: constants::SUPER_TRIANGLE_MARGIN,
        }
    }
}

/// Rand-Kanten der Kavität, als XOR-Menge geführt: eine zweimal eingefügte Kante
/// hebt sich auf. Ein `Vec` statt `HashSet`, damit die Reihenfolge der neuen
/// Dreiecke deterministisch bleibt.
#[derive(Debug, Default)]
struct CavityBoundary {
    edges: Vec<Edge>,
}

impl CavityBoundary {
    fn toggle(&mut self, edge: Edge) {
        match self.edges.iter().position(|e| *e == edge) {
            Some(index) => {
                self.edges.remove(index);
            }
            None => self.edges.push(edge),
        }
    }
}

/// Super-Dreieck, dessen Ecken im Umkreistest als unendlich fern gelten.
///
/// Der Umkreis eines Dreiecks mit Super-Ecke ist damit eine Halbebene und
/// wölbt sich nie über die Hüllkante hinaus.
#[derive(Debug, Clone, Copy)]
struct SuperTriangle {
    triangle: Triangle,
}

impl SuperTriangle {
    fn is_corner(&self, p: Point) -> bool {
        self.triangle.contains_vertex(p)
    }

    /// Liegt `p` im (verallgemeinerten) Umkreis von `t`?
    fn in_circum(&self, t: &Triangle, p: Point) -> bool {
        let Triangle { a, b, c } = *t;
        match (self.is_corner(a), self.is_corner(b), self.is_corner(c)) {
            (false, false, false) => t.in_circum(p),
            (true, false, false) => beyond_hull_edge(t, b, c, a, p),
            (false, true, false) => beyond_hull_edge(t, c, a, b, p),
            (false, false, true) => beyond_hull_edge(t, a, b, c, p),
            (false, true, true) => faces_corners(t, a, p),
            (true, false, true) => faces_corners(t, b, p),
            (true, true, false) => faces_corners(t, c, p),
            (true, true, true) => true,
        }
    }
}

/// Eine Ecke im Unendlichen: Umkreis = offene Halbebene jenseits von `uv` auf der
/// Seite der Ecke, dazu das Innere der Strecke `uv`.
fn beyond_hull_edge(t: &Triangle, u: Point, v: Point, corner: Point, p: Point) -> bool {
    let edge = v - u;
    let corner_side = edge.cross_product(corner - u);
    if corner_side == 0.0 {
        return t.in_circum(p);
    }

    let p_side = edge.cross_product(p - u);
    if p_side == 0.0 {
        let along = (p - u).dot(edge);
        return along > 0.0 && along < edge.length_squared();
    }
    (p_side > 0.0) == (corner_side > 0.0)
}

/// Zwei Ecken im Unendlichen: Umkreis = Halbebene durch `u`, die zum Umkreismittelpunkt zeigt
fn faces_corners(t: &Triangle, u: Point, p: Point) -> bool {
    let Some(center) = t.circumcenter() else {
        return false;
    };
    let toward_center: DVec2 = center - u;
    (p - u).dot(toward_center) > 0.0
}

impl DelaunayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_super_triangle_margin(mut self, margin: f64) -> Self {
        self.super_triangle_margin = margin;
        self
    }

    /// Triangliert die Kernel in der gegebenen Reihenfolge.
    ///
    /// Exakte Duplikate werden übersprungen (das erste Vorkommen zählt).
    /// Benötigt mindestens 3 verschiedene Punkte.
    pub fn triangulate(&self, kernels: &[Point]) -> MathResult<Vec<Triangle>> {
        let mut seen = HashSet::with_capacity(kernels.len());
        let sites: Vec<Point> = kernels
            .iter()
            .copied()
            .filter(|p| seen.insert(*p))
            .collect();

        if sites.len() < 3 {
            return Err(MathError::InsufficientPoints {
                expected: 3,
                actual: sites.len(),
            });
        }
        if sites.len() < kernels.len() {
            debug!(
                "DelaunayBuilder: skipping {} duplicate kernel(s)",
                kernels.len() - sites.len()
            );
        }

        let super_triangle = self.super_triangle(&sites)?;
        let mut triangles = vec![super_triangle];
        let infinite = SuperTriangle {
            triangle: super_triangle,
        };

        for &site in &sites {
            Self::insert_site(&mut triangles, &infinite, site);
        }

        // Alles, was eine Ecke mit dem Super-Dreieck teilt, ist ein Artefakt
        triangles.retain(|t| {
            !super_triangle
                .vertices()
                .iter()
                .any(|&corner| t.contains_vertex(corner))
        });

        debug!(
            "DelaunayBuilder: {} sites triangulated into {} triangles",
            sites.len(),
            triangles.len()
        );
        if triangles.is_empty() {
            warn!(
                "DelaunayBuilder: no triangle survived pruning for {} sites (collinear input?)",
                sites.len()
            );
        }

        Ok(triangles)
    }

    /// Trianguliert und schreibt das Ergebnis in `mesh`. Liefert die Anzahl der Dreiecke.
    pub fn build_into(&self, kernels: &[Point], mesh: &mut MeshTopology) -> MathResult<usize> {
        let triangles = self.triangulate(kernels)?;
        for t in &triangles {
            mesh.add_triangle(t.a, t.b, t.c);
        }
        Ok(triangles.len())
    }

    /// Ein Bowyer-Watson-Schritt: Kavität ausräumen und gegen `site` neu triangulieren
    fn insert_site(triangles: &mut Vec<Triangle>, super_triangle: &SuperTriangle, site: Point) {
        let mut bad_triangles = Vec::new();
        triangles.retain(|t| {
            if super_triangle.in_circum(t, site) {
                bad_triangles.push(*t);
                false
            } else {
                true
            }
        });

        let mut boundary = CavityBoundary::default();
        for triangle in &bad_triangles {
            for edge in triangle.edges() {
                boundary.toggle(edge);
            }
        }

        triangles.extend(
            boundary
                .edges
                .into_iter()
                .map(|edge| Triangle::new(edge.a, edge.b, site).counter_clockwise()),
        );
    }

    /// Super-Dreieck mit rechtem Winkel bei `min - span`, das alle Punkte strikt enthält
    fn super_triangle(&self, sites: &[Point]) -> MathResult<Triangle> {
        let bounds = Bounds2D::from_points_iter(sites.iter().copied()).ok_or(
            MathError::InsufficientPoints {
                expected: 3,
                actual: 0,
            },
        )?;

        let span = bounds.width().max(bounds.height()).max(1.0) * self.super_triangle_margin;
        let origin = Point::new(bounds.min.x - span, bounds.min.y - span);

        Ok(Triangle::new(
            origin,
            Point::new(origin.x + 4.0 * span, origin.y),
            Point::new(origin.x, origin.y + 4.0 * span),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use spade::{DelaunayTriangulation, Point2, Triangulation};

    fn same_vertex_set(t: &Triangle, expected: [Point; 3]) -> bool {
        expected.iter().all(|&p| t.contains_vertex(p))
    }

    fn random_points(seed: u64, count: usize) -> Vec<Point> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                Point::new(
                    rng.random_range(0.0..640.0),
                    rng.random_range(0.0..480.0),
                )
            })
            .collect()
    }

    /// Kein Kernel außer den eigenen Ecken liegt strikt im Umkreis eines Dreiecks
    fn assert_empty_circumcircles(triangles: &[Triangle], kernels: &[Point]) {
        for t in triangles {
            let (center, radius) = t.circumcircle().expect("committed triangle is degenerate");
            for &k in kernels {
                if t.contains_vertex(k) {
                    continue;
                }
                let dist = center.distance_to(k);
                assert!(
                    dist >= radius * (1.0 - 1e-9),
                    "kernel {} inside circumcircle of {:?}",
                    k,
                    t
                );
            }
        }
    }

    #[test]
    fn test_three_points_single_triangle() {
        let kernels = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 10.0),
        ];
        let triangles = DelaunayBuilder::new().triangulate(&kernels).unwrap();
        assert_eq!(triangles.len(), 1);
        assert!(same_vertex_set(&triangles[0], kernels));
        assert!(triangles[0].signed_area() > 0.0);
    }

    #[test]
    fn test_three_points_other_shapes() {
        let shapes = [
            [
                Point::new(100.0, 100.0),
                Point::new(300.0, 120.0),
                Point::new(180.0, 260.0),
            ],
            [
                Point::new(-3.0, 2.0),
                Point::new(1.0, -1.0),
                Point::new(2.0, 4.0),
            ],
        ];
        for kernels in shapes {
            let triangles = DelaunayBuilder::new().triangulate(&kernels).unwrap();
            assert_eq!(triangles.len(), 1);
            assert!(same_vertex_set(&triangles[0], kernels));
        }
    }

    #[test]
    fn test_square_yields_two_triangles() {
        let kernels = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let triangles = DelaunayBuilder::new().triangulate(&kernels).unwrap();
        assert_eq!(triangles.len(), 2);
        let total: f64 = triangles.iter().map(Triangle::area).sum();
        assert_eq!(total, 100.0);
    }

    #[test]
    fn test_insufficient_points() {
        let err = DelaunayBuilder::new()
            .triangulate(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)])
            .unwrap_err();
        assert_eq!(
            err,
            MathError::InsufficientPoints {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_duplicates_are_skipped() {
        let kernels = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(5.0, 10.0),
        ];
        let triangles = DelaunayBuilder::new().triangulate(&kernels).unwrap();
        assert_eq!(triangles.len(), 1);

        let err = DelaunayBuilder::new()
            .triangulate(&[Point::new(1.0, 1.0); 3])
            .unwrap_err();
        assert!(matches!(err, MathError::InsufficientPoints { actual: 1, .. }));
    }

    #[test]
    fn test_collinear_points_produce_no_triangles() {
        let kernels = [
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
        ];
        let triangles = DelaunayBuilder::new().triangulate(&kernels).unwrap();
        assert!(triangles.is_empty());
    }

    #[test]
    fn test_empty_circumcircle_property() {
        for seed in [1, 7, 42] {
            let kernels = random_points(seed, 60);
            let triangles = DelaunayBuilder::new().triangulate(&kernels).unwrap();
            assert!(!triangles.is_empty());
            assert_empty_circumcircles(&triangles, &kernels);
        }
    }

    /// Gleiche Dreiecksmenge wie spade, Dreieck für Dreieck
    fn assert_matches_reference(kernels: &[Point]) {
        let triangles = DelaunayBuilder::new().triangulate(kernels).unwrap();

        let reference: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::bulk_load(
            kernels.iter().map(|p| Point2::new(p.x, p.y)).collect(),
        )
        .unwrap();
        let reference_faces: Vec<[Point; 3]> = reference
            .inner_faces()
            .map(|face| {
                face.positions()
                    .map(|position| Point::new(position.x, position.y))
            })
            .collect();

        assert_eq!(triangles.len(), reference.num_inner_faces());
        for t in &triangles {
            assert!(
                reference_faces.iter().any(|f| same_vertex_set(t, *f)),
                "{:?} is not part of the reference triangulation",
                t
            );
        }
    }

    #[test]
    fn test_triangles_match_reference_triangulation() {
        assert_matches_reference(&random_points(2024, 80));
        assert_matches_reference(&random_points(99, 25));
    }

    #[test]
    fn test_shallow_arc_matches_reference_triangulation() {
        // 21 Punkte in konvexer Lage, die Hülle ist fast eine Gerade
        let kernels: Vec<Point> = (0..=20)
            .map(|i| {
                let x = f64::from(i) * 32.0;
                Point::new(x, 3e-5 * (x - 323.7).powi(2))
            })
            .collect();
        let triangles = DelaunayBuilder::new().triangulate(&kernels).unwrap();
        assert_eq!(triangles.len(), 19);
        assert_matches_reference(&kernels);
    }

    #[test]
    fn test_thin_triangles_survive_pruning() {
        let shapes = [
            [
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(5.0, 0.1),
            ],
            [
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(50.0, 1.0),
            ],
            [
                Point::new(0.0, 0.0),
                Point::new(640.0, 0.0),
                Point::new(320.0, 2.0),
            ],
            [
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(5.0, 0.01),
            ],
            [
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(5.0, -0.01),
            ],
        ];
        for kernels in shapes {
            let triangles = DelaunayBuilder::new().triangulate(&kernels).unwrap();
            assert_eq!(triangles.len(), 1, "lost the triangle {:?}", kernels);
            assert!(same_vertex_set(&triangles[0], kernels));
            assert!(triangles[0].signed_area() > 0.0);
        }
    }

    #[test]
    fn test_points_on_hull_line_between_kernels() {
        // (5,0) liegt auf der Hüllkante (0,0)-(10,0) und teilt sie
        let kernels = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 3.0),
            Point::new(5.0, 0.0),
        ];
        let triangles = DelaunayBuilder::new().triangulate(&kernels).unwrap();
        assert_eq!(triangles.len(), 2);
        let total: f64 = triangles.iter().map(Triangle::area).sum();
        assert_relative_eq!(total, 15.0);
    }

    #[test]
    fn test_deterministic_order() {
        let kernels = random_points(5, 40);
        let first = DelaunayBuilder::new().triangulate(&kernels).unwrap();
        let second = DelaunayBuilder::new().triangulate(&kernels).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_into_mesh() {
        let kernels = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(5.0, 4.0),
        ];
        let mut mesh = MeshTopology::new();
        let count = DelaunayBuilder::new().build_into(&kernels, &mut mesh).unwrap();
        assert_eq!(count, 4);
        assert_eq!(mesh.face_count(), 4);
        assert_eq!(mesh.vertex_count(), 5);
    }
}
