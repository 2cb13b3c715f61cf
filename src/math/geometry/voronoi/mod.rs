// src/math/geometry/voronoi/mod.rs

pub mod builder;
pub mod clipping;

pub use self::builder::VoronoiBuilder;
