// src/model/statistics.rs

use serde::{Deserialize, Serialize};

/// Kennzahlen eines Diagramms zu einem Zeitpunkt
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DiagramStatistics {
    pub kernel_count: usize,
    pub triangle_count: usize,
    pub cell_count: usize,
    pub empty_cell_count: usize,
    pub delaunay_vertex_count: usize,
    pub voronoi_vertex_count: usize,
    /// Summe aller Zellflächen; entspricht bei verschiedenen Kerneln der Rechteckfläche
    pub total_cell_area: f64,
    pub min_cell_area: f64,
    pub max_cell_area: f64,
}

impl DiagramStatistics {
    /// Mittlere Fläche der nicht-leeren Zellen
    pub fn mean_cell_area(&self) -> f64 {
        let non_empty = self.cell_count - self.empty_cell_count;
        if non_empty == 0 {
            0.0
        } else {
            self.total_cell_area / non_empty as f64
        }
    }
}
