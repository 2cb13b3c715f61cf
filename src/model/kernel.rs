// src/model/kernel.rs

use crate::math::types::Point;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Anzeigefarbe eines Kernels. Reine Nutzlast, die Geometrie liest sie nie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KernelColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl KernelColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.random(), rng.random(), rng.random())
    }

    /// `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for KernelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Ein eingefügter Punkt mit seiner Farbe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kernel {
    pub position: Point,
    pub color: KernelColor,
}

impl Kernel {
    pub fn new(position: Point, color: KernelColor) -> Self {
        Self { position, color }
    }
}
