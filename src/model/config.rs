// src/model/config.rs

use crate::math::{
    error::{MathError, MathResult},
    types::{ClipRectangle, Point},
    utils::constants,
};

/// Konfiguration eines [`DiagramModel`](super::DiagramModel)
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramConfig {
    /// Clip-Rechteck als vier geordnete Ecken; ohne Rechteck ist kein Einfügen möglich
    pub clip_rectangle: Option<[Point; 4]>,
    /// Seed für die Kernel-Farben; `None` zieht einen Seed vom Betriebssystem
    pub color_seed: Option<u64>,
    pub super_triangle_margin: f64,
    pub direction_rounding_decimals: i32,
}

impl DiagramConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clip_rectangle(mut self, corners: [Point; 4]) -> Self {
        self.clip_rectangle = Some(corners);
        self
    }

    /// Rechteck aus Ursprung und Größe, Ecken gegen den Uhrzeigersinn
    pub fn with_clip_size(self, width: f64, height: f64) -> Self {
        self.with_clip_rectangle([
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            Point::new(width, height),
            Point::new(0.0, height),
        ])
    }

    pub fn with_color_seed(mut self, seed: u64) -> Self {
        self.color_seed = Some(seed);
        self
    }

    pub fn with_super_triangle_margin(mut self, margin: f64) -> Self {
        self.super_triangle_margin = margin;
        self
    }

    pub fn with_direction_rounding(mut self, decimals: i32) -> Self {
        self.direction_rounding_decimals = decimals;
        self
    }

    pub fn validate(&self) -> MathResult<()> {
        if let Some(corners) = self.clip_rectangle {
            ClipRectangle::new(corners)?;
        }

        // Bei Faktor 1 läge die max-Ecke der Punktwolke auf der Hypotenuse
        if !self.super_triangle_margin.is_finite() || self.super_triangle_margin <= 1.0 {
            return Err(MathError::InvalidConfiguration {
                message: format!(
                    "Super triangle margin must be finite and greater than 1.0, got {}",
                    self.super_triangle_margin
                ),
            });
        }

        if !(0..=12).contains(&self.direction_rounding_decimals) {
            return Err(MathError::InvalidConfiguration {
                message: format!(
                    "Direction rounding must be between 0 and 12 decimals, got {}",
                    self.direction_rounding_decimals
                ),
            });
        }

        Ok(())
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            clip_rectangle: None,
            color_seed: None,
            super_triangle_margin: constants::SUPER_TRIANGLE_MARGIN,
            direction_rounding_decimals: constants::DIRECTION_ROUNDING_DECIMALS,
        }
    }
}
