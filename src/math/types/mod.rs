// src/math/types/mod.rs
pub mod bounds;
pub mod point;
pub mod vector;

pub use bounds::*;
pub use point::*;
pub use vector::*;

// Re-export häufig verwendete externe Typen
pub use bevy::math::DVec2;
