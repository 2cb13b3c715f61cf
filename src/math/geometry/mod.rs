// src/math/geometry/mod.rs

// Deklaration der Geometriemodule
pub mod delaunay;
pub mod mesh;
pub mod triangle;
pub mod voronoi;

// Re-Exporte für einen schnellen Zugriff, falls man nicht das gesamte
// `math::prelude` importieren möchte.
pub use self::delaunay::DelaunayBuilder;
pub use self::mesh::MeshTopology;
pub use self::triangle::{Edge, Triangle};
pub use self::voronoi::{
    VoronoiBuilder,
    clipping::{HalfPlane, clip_to_bounds, clip_to_half_plane},
};
