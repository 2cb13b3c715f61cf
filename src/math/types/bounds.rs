// src/math/types/bounds.rs

use crate::math::{error::*, types::*};
use std::fmt;

/// 2D Bounding Box (Axis-Aligned Bounding Box)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2D {
    pub min: Point,
    pub max: Point,
}

impl Bounds2D {
    /// Erstellt eine neue Bounding Box
    pub fn new(min: Point, max: Point) -> MathResult<Self> {
        if min.x > max.x || min.y > max.y {
            return Err(MathError::InvalidConfiguration {
                message: format!("Invalid bounds: min {:?} > max {:?}", min, max),
            });
        }

        Ok(Self { min, max })
    }

    /// Erstellt eine Bounding Box aus zwei beliebigen Punkten
    pub fn from_points(p1: Point, p2: Point) -> Self {
        Self {
            min: Point::new(p1.x.min(p2.x), p1.y.min(p2.y)),
            max: Point::new(p1.x.max(p2.x), p1.y.max(p2.y)),
        }
    }

    /// Erstellt eine Bounding Box die alle Punkte umschließt
    pub fn from_points_iter<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut points_iter = points.into_iter();
        let first_point = points_iter.next()?;

        let mut bounds = Self {
            min: first_point,
            max: first_point,
        };
        for point in points_iter {
            bounds.expand_to_include_point(point);
        }

        Some(bounds)
    }

    /// Breite der Bounding Box
    pub fn width(&self) -> f64 {
        (self.max.x - self.min.x).max(0.0)
    }

    /// Höhe der Bounding Box
    pub fn height(&self) -> f64 {
        (self.max.y - self.min.y).max(0.0)
    }

    /// Zentrum der Bounding Box
    pub fn center(&self) -> Point {
        self.min.midpoint(self.max)
    }

    /// Prüft ob ein Punkt in der Bounding Box liegt (Rand eingeschlossen)
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Erweitert die Bounding Box um einen Punkt
    pub fn expand_to_include_point(&mut self, point: Point) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Erweitert die Bounding Box um einen Margin
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            min: Point::new(self.min.x - margin, self.min.y - margin),
            max: Point::new(self.max.x + margin, self.max.y + margin),
        }
    }

    /// Erzeugt die vier Eckpunkte der Bounding Box, gegen den Uhrzeigersinn
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,                           // unten links
            Point::new(self.max.x, self.min.y), // unten rechts
            self.max,                           // oben rechts
            Point::new(self.min.x, self.max.y), // oben links
        ]
    }

    /// Schnittpunkt eines Strahls mit dem Rand der Box.
    ///
    /// Pro Achse wird der nächste Treffer mit `t >= 0` bestimmt, insgesamt gewinnt
    /// das kleinste `t`. Der Ursprung sollte in der Box liegen; `None` wenn die
    /// Richtung keinen Treffer liefert (z.B. Nullvektor).
    pub fn ray_exit(&self, origin: Point, direction: DVec2) -> Option<Point> {
        let axis_hit = |o: f64, d: f64, min: f64, max: f64| -> Option<(f64, f64)> {
            let bound = if d > 0.0 {
                max
            } else if d < 0.0 {
                min
            } else {
                return None;
            };
            let t = (bound - o) / d;
            (t >= 0.0 && t.is_finite()).then_some((t, bound))
        };

        let hit_x = axis_hit(origin.x, direction.x, self.min.x, self.max.x);
        let hit_y = axis_hit(origin.y, direction.y, self.min.y, self.max.y);

        // Die getroffene Koordinate wird exakt auf den Rand gesetzt
        match (hit_x, hit_y) {
            (Some((tx, bx)), Some((ty, _))) if tx <= ty => {
                Some(Point::new(bx, origin.y + direction.y * tx))
            }
            (_, Some((ty, by))) => Some(Point::new(origin.x + direction.x * ty, by)),
            (Some((tx, bx)), None) => Some(Point::new(bx, origin.y + direction.y * tx)),
            (None, None) => None,
        }
    }
}

impl fmt::Display for Bounds2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bounds2D({} to {})", self.min, self.max)
    }
}

/// Achsenparalleles Clip-Rechteck, gegeben durch vier geordnete Ecken.
///
/// Die Ecken bleiben in der Reihenfolge des Aufrufers erhalten (für den Ein-Kern-Fall),
/// alle Berechnungen laufen über die abgeleiteten [`Bounds2D`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRectangle {
    corners: [Point; 4],
    bounds: Bounds2D,
}

impl ClipRectangle {
    /// Validiert vier Ecken: endlich, achsenparallel, positive Fläche,
    /// jede Ecke des Rechtecks genau einmal und als Umlauf geordnet.
    pub fn new(corners: [Point; 4]) -> MathResult<Self> {
        if let Some(bad) = corners.iter().find(|c| !c.is_finite()) {
            return Err(MathError::NonFiniteCoordinate { x: bad.x, y: bad.y });
        }

        let bounds = Bounds2D::from_points_iter(corners).ok_or_else(|| {
            MathError::InvalidConfiguration {
                message: "Clip rectangle needs four corners".to_string(),
            }
        })?;
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: format!("Clip rectangle has zero area: {}", bounds),
            });
        }

        let expected = bounds.corners();
        let all_present = expected.iter().all(|e| corners.contains(e));
        // Aufeinanderfolgende Ecken müssen eine gemeinsame Koordinate haben
        let is_cycle = (0..4).all(|i| {
            let a = corners[i];
            let b = corners[(i + 1) % 4];
            (a.x == b.x) != (a.y == b.y)
        });
        if !all_present || !is_cycle {
            return Err(MathError::InvalidConfiguration {
                message: format!(
                    "Corners {:?} do not describe an axis-aligned rectangle in boundary order",
                    corners
                ),
            });
        }

        Ok(Self { corners, bounds })
    }

    /// Rechteck aus zwei gegenüberliegenden Ecken, Ecken gegen den Uhrzeigersinn
    pub fn from_bounds(bounds: Bounds2D) -> MathResult<Self> {
        Self::new(bounds.corners())
    }

    /// Die Ecken in der Reihenfolge des Aufrufers
    pub fn corners(&self) -> [Point; 4] {
        self.corners
    }

    pub fn bounds(&self) -> Bounds2D {
        self.bounds
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    pub fn contains_point(&self, point: Point) -> bool {
        self.bounds.contains_point(point)
    }
}
