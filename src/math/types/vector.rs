// src/math/types/vector.rs

use crate::math::utils::comparison::round_to_decimals;
use bevy::math::DVec2;

/// Verschiebungsvektor. Wir verwenden Bevy's `DVec2` direkt.
pub type Vector = DVec2;

// --- Vektor Erweiterungen ---

/// Erweiterte Vektor-Operationen für Bevy's DVec2.
pub trait Vector2DExt {
    /// Normalisiert den Vektor. `None` bei Länge 0 oder nicht-endlicher Länge,
    /// es entsteht nie ein NaN-Vektor.
    fn checked_unit(&self) -> Option<Self>
    where
        Self: Sized;
    /// Um +90° gedreht (gegen den Uhrzeigersinn)
    fn rotated_ccw(&self) -> Self;
    /// Um -90° gedreht (im Uhrzeigersinn)
    fn rotated_cw(&self) -> Self;
    /// Komponentenweise auf `decimals` Nachkommastellen gerundet
    fn rounded(&self, decimals: i32) -> Self;
    fn cross_product(&self, other: Self) -> f64;
}

impl Vector2DExt for DVec2 {
    fn checked_unit(&self) -> Option<Self> {
        // try_normalize liefert None für Länge 0, unendlich oder NaN
        self.try_normalize()
    }

    fn rotated_ccw(&self) -> Self {
        self.perp()
    }

    fn rotated_cw(&self) -> Self {
        -self.perp()
    }

    fn rounded(&self, decimals: i32) -> Self {
        DVec2::new(
            round_to_decimals(self.x, decimals),
            round_to_decimals(self.y, decimals),
        )
    }

    fn cross_product(&self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }
}
