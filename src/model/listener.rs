// src/model/listener.rs

use crate::math::types::Point;

/// Beobachter eines [`DiagramModel`](super::DiagramModel).
///
/// Beide Methoden werden synchron aufgerufen, höchstens einmal pro erfolgreichem
/// Aufruf von `insert` bzw. `clear`, nachdem die neuen Meshes sichtbar sind.
/// Thread-Grenzen verlangt erst [`SyncDiagramModel`](super::SyncDiagramModel).
pub trait DiagramListener {
    fn on_kernel_added(&mut self, _point: Point) {}

    fn on_cleared(&mut self) {}
}

/// Handle einer Registrierung, zum späteren Entfernen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);
