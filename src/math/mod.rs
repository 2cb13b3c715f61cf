pub mod error;
pub mod geometry;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{MathError, MathResult};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        error::{MathError, MathResult},
        geometry::{
            delaunay::DelaunayBuilder,
            mesh::MeshTopology,
            triangle::{Edge, Triangle},
            voronoi::VoronoiBuilder,
        },
        types::*,
    };
}
