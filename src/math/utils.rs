// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const TAU: f64 = std::f64::consts::TAU;
    pub const PI: f64 = std::f64::consts::PI;
    /// Nachkommastellen, auf die Einheits-Strahlrichtungen gerundet werden
    pub const DIRECTION_ROUNDING_DECIMALS: i32 = 3;
    /// Standard-Faktor für die Größe des Super-Dreiecks relativ zur Punktwolke
    pub const SUPER_TRIANGLE_MARGIN: f64 = 10.0;
}

/// Vergleichsfunktionen
pub mod comparison {
    /// Rundet einen Wert auf `decimals` Nachkommastellen
    pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
        let factor = 10f64.powi(decimals);
        (value * factor).round() / factor
    }
}

/// Winkel-Hilfsfunktionen
pub mod angles {
    use super::constants::TAU;
    use crate::math::types::Point;
    use std::cmp::Ordering;

    /// Normalisiert einen Winkel auf [0, 2π)
    pub fn normalize_angle(angle: f64) -> f64 {
        let mut result = angle % TAU;
        if result < 0.0 {
            result += TAU;
        }
        // -0.0 % TAU + TAU kann durch Rundung genau TAU ergeben
        if result >= TAU { 0.0 } else { result }
    }

    /// Winkel von `point` um `center`, normalisiert auf [0, 2π)
    pub fn angle_around(center: Point, point: Point) -> f64 {
        normalize_angle((point.y - center.y).atan2(point.x - center.x))
    }

    /// Winkeldistanz gegen den Uhrzeigersinn von `from` nach `to`, in [0, 2π)
    pub fn ccw_delta(from: f64, to: f64) -> f64 {
        normalize_angle(to - from)
    }

    /// Gemeinsamer Winkel-Komparator: ordnet Punkte gegen den Uhrzeigersinn um `center`.
    ///
    /// Gleiche Winkel gelten als gleich; deren Reihenfolge ist nicht festgelegt.
    pub fn compare_ccw(center: Point, a: &Point, b: &Point) -> Ordering {
        angle_around(center, *a)
            .partial_cmp(&angle_around(center, *b))
            .unwrap_or(Ordering::Equal)
    }

}
