// src/math/geometry/delaunay/mod.rs

pub mod builder;

pub use self::builder::DelaunayBuilder;
