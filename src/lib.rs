// ./src/lib.rs
//! Inkrementelle Delaunay-Triangulation und geclipptes Voronoi-Diagramm
//! für einen interaktiven Punkt-Editor.
//!
//! Der Kern liegt in [`math`] (Geometrie, Mesh-Topologie, Builder),
//! [`model`] orchestriert die Rebuilds, [`plugin`] bindet das Modell an Bevy an.

pub mod debug;
pub mod math;
pub mod model;
pub mod plugin;

pub use math::prelude;
pub use model::{
    DiagramConfig, DiagramListener, DiagramModel, DiagramState, Kernel, KernelColor,
    SyncDiagramModel,
};
pub use plugin::DiagramPlugin;
