// src/math/geometry/voronoi/builder.rs

use super::clipping::{HalfPlane, clip_to_bounds, clip_to_half_plane, dedup_ring};
use crate::math::{
    geometry::{mesh::MeshTopology, triangle::Triangle},
    types::*,
    utils::{
        angles::{angle_around, ccw_delta, compare_ccw},
        constants,
    },
};
use bevy::log::{debug, warn};
use std::cmp::Ordering;

/// Baut das Voronoi-Diagramm als Dual einer fertigen Delaunay-Triangulation,
/// beschnitten auf ein achsenparalleles Rechteck.
///
/// Es entsteht genau eine Zelle pro Kernel, Zelle `i` gehört zu Kernel `i`.
/// Eine Zelle, die das Rechteck nicht berührt, ist leer.
#[derive(Debug, Clone)]
pub struct VoronoiBuilder {
    clip: ClipRectangle,
    /// Nachkommastellen, auf die Einheits-Strahlrichtungen gerundet werden
    direction_rounding_decimals: i32,
}

/// Ein Delaunay-Dreieck um einen Kernel, gegen den Uhrzeigersinn, mit Umkreismittelpunkt
#[derive(Debug, Clone, Copy)]
struct FanEntry {
    triangle: Triangle,
    center: Point,
}

impl VoronoiBuilder {
    pub fn new(clip: ClipRectangle) -> Self {
        Self {
            clip,
            direction_rounding_decimals: constants::DIRECTION_ROUNDING_DECIMALS,
        }
    }

    pub fn with_direction_rounding(mut self, decimals: i32) -> Self {
        self.direction_rounding_decimals = decimals;
        self
    }

    pub fn clip(&self) -> &ClipRectangle {
        &self.clip
    }

    /// Berechnet alle Zellen, in Kernel-Reihenfolge
    pub fn cells(&self, kernels: &[Point], delaunay: &MeshTopology) -> Vec<Vec<Point>> {
        match kernels {
            [] => Vec::new(),
            [_] => vec![self.clip.corners().to_vec()],
            [a, b] => self.split_rectangle(*a, *b).to_vec(),
            _ => {
                let triangles: Vec<Triangle> = delaunay
                    .triangles()
                    .map(|t| t.counter_clockwise())
                    .collect();
                kernels
                    .iter()
                    .map(|&k| self.cell_from_fan(k, &triangles, kernels))
                    .collect()
            }
        }
    }

    /// Schreibt die Zellen als Faces in `mesh`. Liefert die Anzahl der Faces.
    pub fn build_into(
        &self,
        kernels: &[Point],
        delaunay: &MeshTopology,
        mesh: &mut MeshTopology,
    ) -> usize {
        let cells = self.cells(kernels, delaunay);
        for cell in &cells {
            mesh.add_polygon(cell);
        }
        debug!(
            "VoronoiBuilder: {} cells, {} shared vertices",
            cells.len(),
            mesh.vertex_count()
        );
        cells.len()
    }

    // --- Zwei Kernel ---

    /// Teilt das Rechteck entlang der Mittelsenkrechten von `a` und `b`
    fn split_rectangle(&self, a: Point, b: Point) -> [Vec<Point>; 2] {
        if a == b {
            let full = self.clip.corners().to_vec();
            return [full.clone(), full];
        }

        let bounds = self.clip.bounds();
        let mid = a.midpoint(b);
        let dir = (b - a).rotated_ccw();

        let exits = if bounds.contains_point(mid) {
            bounds.ray_exit(mid, dir).zip(bounds.ray_exit(mid, -dir))
        } else {
            None
        };
        let Some((p1, p2)) = exits.filter(|(p1, p2)| p1 != p2) else {
            debug!(
                "VoronoiBuilder: bisector of {} and {} misses the rectangle, clipping half-planes",
                a, b
            );
            return [self.half_plane_cell(a, &[b]), self.half_plane_cell(b, &[a])];
        };

        let center = self.clip.center();
        let mut ring: Vec<Point> = bounds
            .corners()
            .into_iter()
            .filter(|c| *c != p1 && *c != p2)
            .collect();
        ring.push(p1);
        ring.push(p2);
        ring.sort_by(|u, v| compare_ccw(center, u, v));

        // p1 und p2 stecken sicher im Ring
        let i1 = ring.iter().position(|p| *p == p1).unwrap_or(0);
        let i2 = ring.iter().position(|p| *p == p2).unwrap_or(0);
        let first = walk_ring(&ring, i1, i2);
        let second = walk_ring(&ring, i2, i1);

        // Die Hälfte, deren Schwerpunkt auf a's Seite der Mittelsenkrechten liegt, gehört zu a
        let side = |half: &[Point]| {
            let sum = half
                .iter()
                .fold(DVec2::ZERO, |acc, p| acc + p.to_dvec2());
            (sum / half.len() as f64 - mid.to_dvec2()).dot(b - a)
        };
        if side(first.as_slice()) <= side(second.as_slice()) {
            [first, second]
        } else {
            [second, first]
        }
    }

    // --- Drei und mehr Kernel ---

    /// Zelle eines Kernels aus den Umkreismittelpunkten seiner Dreiecke
    fn cell_from_fan(&self, k: Point, triangles: &[Triangle], kernels: &[Point]) -> Vec<Point> {
        let mut fan: Vec<FanEntry> = triangles
            .iter()
            .filter(|t| t.contains_vertex(k))
            .filter_map(|&triangle| {
                let center = triangle.circumcenter()?;
                center.is_finite().then_some(FanEntry { triangle, center })
            })
            .collect();

        if fan.is_empty() {
            debug!(
                "VoronoiBuilder: kernel {} has no usable triangle, clipping half-planes",
                k
            );
            return self.half_plane_cell(k, kernels);
        }

        // Gleichstand beim Winkel (kozirkulare Punkte) über den Schwerpunkt auflösen.
        // Schwerpunkte liegen höchstens 90° neben dem gemeinsamen Mittelpunkt; gemessen
        // wird ab dessen Gegenrichtung, dort liegt keine Naht.
        fan.sort_by(|u, v| {
            compare_ccw(k, &u.center, &v.center).then_with(|| {
                let opposite = angle_around(k, u.center) + constants::PI;
                let offset = |entry: &FanEntry| {
                    ccw_delta(opposite, angle_around(k, entry.triangle.centroid()))
                };
                offset(u).partial_cmp(&offset(v)).unwrap_or(Ordering::Equal)
            })
        });

        let working = self.working_box(k, &fan);
        let mut ring = Vec::with_capacity(fan.len() + 6);

        for (i, current) in fan.iter().enumerate() {
            let next = &fan[(i + 1) % fan.len()];
            ring.push(current.center);

            // Benachbart, wenn beide Dreiecke die Kante k -> prev_of(k) teilen
            let adjacent = current.triangle.prev_of(k) == next.triangle.next_of(k);
            if !adjacent {
                let Some(boundary) = self.open_boundary(k, current, next, &working) else {
                    warn!(
                        "VoronoiBuilder: degenerate ray at kernel {}, clipping half-planes",
                        k
                    );
                    return self.half_plane_cell(k, kernels);
                };
                ring.extend(boundary);
            }
        }

        clip_to_bounds(&ring, &self.clip.bounds())
    }

    /// Arbeits-Box: das Rechteck, vergrößert um den Kernel und alle Umkreismittelpunkte
    fn working_box(&self, k: Point, fan: &[FanEntry]) -> Bounds2D {
        let mut working = self.clip.bounds();
        working.expand_to_include_point(k);
        for entry in fan {
            working.expand_to_include_point(entry.center);
        }
        working.expand(working.width().max(working.height()) * 0.1 + 1.0)
    }

    /// Strahlrichtung: normalisiert, gerundet, erneut normalisiert.
    ///
    /// Gerundet wird erst die Einheitsrichtung, sonst fallen sehr kurze Kanten auf Null.
    fn ray_direction(&self, edge: DVec2) -> Option<DVec2> {
        edge.checked_unit()?
            .rounded(self.direction_rounding_decimals)
            .checked_unit()
    }

    /// Randpunkte einer offenen Lücke zwischen zwei nicht benachbarten Dreiecken:
    /// Austritt des ersten Strahls, die Ecken dazwischen, Austritt des zweiten Strahls.
    /// `None`, wenn ein Strahl keine Richtung oder keinen Austritt hat.
    fn open_boundary(
        &self,
        k: Point,
        current: &FanEntry,
        next: &FanEntry,
        working: &Bounds2D,
    ) -> Option<Vec<Point>> {
        let outgoing = current.triangle.prev_of(k)?;
        let incoming = next.triangle.next_of(k)?;

        let d1 = self.ray_direction((outgoing - k).rotated_ccw())?;
        let d2 = self.ray_direction((incoming - k).rotated_cw())?;
        let r1 = working.ray_exit(current.center, d1)?;
        let r2 = working.ray_exit(next.center, d2)?;

        let a1 = angle_around(k, r1);
        let span = ccw_delta(a1, angle_around(k, r2));

        let mut corners: Vec<(f64, Point)> = working
            .corners()
            .into_iter()
            .map(|c| (ccw_delta(a1, angle_around(k, c)), c))
            .filter(|(delta, _)| *delta > 0.0 && *delta < span)
            .collect();
        corners.sort_by(|u, v| u.0.partial_cmp(&v.0).unwrap_or(Ordering::Equal));

        let mut boundary = Vec::with_capacity(corners.len() + 2);
        boundary.push(r1);
        boundary.extend(corners.into_iter().map(|(_, c)| c));
        boundary.push(r2);
        Some(boundary)
    }

    // --- Rückfall ---

    /// Das Rechteck, beschnitten mit den Mittelsenkrechten zu allen anderen Kerneln
    fn half_plane_cell(&self, site: Point, others: &[Point]) -> Vec<Point> {
        let cell = others
            .iter()
            .filter(|&&other| other != site)
            .fold(self.clip.bounds().corners().to_vec(), |cell, &other| {
                clip_to_half_plane(&cell, &HalfPlane::closer_to(site, other))
            });
        dedup_ring(cell)
    }
}

/// Läuft zyklisch von `from` bis einschließlich `to`
fn walk_ring(ring: &[Point], from: usize, to: usize) -> Vec<Point> {
    let mut result = Vec::with_capacity(ring.len());
    let mut i = from;
    loop {
        result.push(ring[i]);
        if i == to {
            return result;
        }
        i = (i + 1) % ring.len();
    }
}
