// src/math/geometry/triangle.rs

use crate::math::types::*;
use nalgebra::Matrix2;
use std::hash::{Hash, Hasher};

/// Ungerichtete Kante zwischen zwei Punkten.
///
/// Zwei Kanten sind gleich, wenn ihre Endpunktmengen gleich sind, unabhängig von der Richtung.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub a: Point,
    pub b: Point,
}

impl Edge {
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f64 {
        self.a.distance_to(self.b)
    }

    fn ordered(&self) -> (Point, Point) {
        if self.a.total_cmp(&self.b).is_le() {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordered().hash(state);
    }
}

/// Dreieck aus drei geordneten Punkten
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl Triangle {
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        Self { a, b, c }
    }

    pub fn vertices(&self) -> [Point; 3] {
        [self.a, self.b, self.c]
    }

    pub fn edges(&self) -> [Edge; 3] {
        [
            Edge::new(self.a, self.b),
            Edge::new(self.b, self.c),
            Edge::new(self.c, self.a),
        ]
    }

    pub fn contains_vertex(&self, p: Point) -> bool {
        self.a == p || self.b == p || self.c == p
    }

    /// Vorzeichenbehaftete Fläche, positiv bei Umlauf gegen den Uhrzeigersinn
    pub fn signed_area(&self) -> f64 {
        ((self.b.x - self.a.x) * (self.c.y - self.a.y)
            - (self.b.y - self.a.y) * (self.c.x - self.a.x))
            / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn centroid(&self) -> Point {
        Point::new(
            (self.a.x + self.b.x + self.c.x) / 3.0,
            (self.a.y + self.b.y + self.c.y) / 3.0,
        )
    }

    /// Gleiches Dreieck mit Umlauf gegen den Uhrzeigersinn (b und c ggf. getauscht)
    pub fn counter_clockwise(&self) -> Self {
        if self.signed_area() < 0.0 {
            Self::new(self.a, self.c, self.b)
        } else {
            *self
        }
    }

    /// Nachfolger von `v` im gespeicherten Umlauf
    pub fn next_of(&self, v: Point) -> Option<Point> {
        match v {
            v if v == self.a => Some(self.b),
            v if v == self.b => Some(self.c),
            v if v == self.c => Some(self.a),
            _ => None,
        }
    }

    /// Vorgänger von `v` im gespeicherten Umlauf
    pub fn prev_of(&self, v: Point) -> Option<Point> {
        match v {
            v if v == self.a => Some(self.c),
            v if v == self.b => Some(self.a),
            v if v == self.c => Some(self.b),
            _ => None,
        }
    }

    /// Umkreismittelpunkt über die Mittelsenkrechten von ab und bc.
    ///
    /// Für Richtung `d` und Mittelpunkt `m` einer Kante gilt `d·x = d·m`; die beiden
    /// Gleichungen werden per Cramerscher Regel gelöst. `None` bei Determinante 0 (kollinear).
    pub fn circumcenter(&self) -> Option<Point> {
        let mid_ab = self.a.midpoint(self.b);
        let mid_bc = self.b.midpoint(self.c);
        let dir_ab = self.b - self.a;
        let dir_bc = self.c - self.b;

        let det = Matrix2::new(dir_ab.x, dir_ab.y, dir_bc.x, dir_bc.y).determinant();
        if det == 0.0 {
            return None;
        }

        let d1 = dir_ab.dot(mid_ab.to_dvec2());
        let d2 = dir_bc.dot(mid_bc.to_dvec2());

        let cx = Matrix2::new(d1, dir_ab.y, d2, dir_bc.y).determinant() / det;
        let cy = Matrix2::new(dir_ab.x, d1, dir_bc.x, d2).determinant() / det;

        Some(Point::new(cx, cy))
    }

    /// Umkreisradius `|ab|·|bc|·|ca| / (4·Fläche)`, `None` bei Fläche 0
    pub fn circumradius(&self) -> Option<f64> {
        let area = self.area();
        if area == 0.0 {
            return None;
        }
        let d_ab = self.a.distance_to(self.b);
        let d_bc = self.b.distance_to(self.c);
        let d_ca = self.c.distance_to(self.a);
        Some((d_ab * d_bc * d_ca) / (4.0 * area))
    }

    pub fn circumcircle(&self) -> Option<(Point, f64)> {
        Some((self.circumcenter()?, self.circumradius()?))
    }

    /// Liegt `p` im Umkreis (Rand eingeschlossen)? Degenerierte Dreiecke liefern immer `false`.
    pub fn in_circum(&self, p: Point) -> bool {
        match self.circumcircle() {
            Some((center, radius)) => center.distance_to(p) <= radius,
            None => false,
        }
    }
}
