// src/model/diagram.rs

use super::{
    config::DiagramConfig,
    kernel::{Kernel, KernelColor},
    listener::{DiagramListener, ListenerId},
    state::DiagramState,
    statistics::DiagramStatistics,
};
use crate::math::{
    error::{MathError, MathResult},
    geometry::{
        delaunay::DelaunayBuilder, mesh::MeshTopology, triangle::Triangle,
        voronoi::VoronoiBuilder,
    },
    types::{ClipRectangle, Point},
};
use bevy::log::{debug, info};
use geo::{Area, Intersects};
use rand::{SeedableRng, rngs::StdRng};
use std::{collections::HashMap, fmt};

/// Kernel-Menge mit Delaunay- und Voronoi-Mesh.
///
/// Jede Mutation baut beide Meshes vollständig neu auf. Der Neuaufbau läuft in
/// frische Puffer; erst wenn er gelungen ist, werden Kernel und Meshes getauscht
/// und die Beobachter benachrichtigt. Bei einem Fehler bleibt alles unverändert.
///
/// `L` ist der Objekttyp der Beobachter. Ohne Angabe genügt jeder [`DiagramListener`];
/// [`SyncDiagramModel`] verlangt zusätzlich `Send + Sync`.
pub struct DiagramModel<L: ?Sized = dyn DiagramListener> {
    config: DiagramConfig,
    clip: Option<ClipRectangle>,
    /// Einfüge-Reihenfolge, bestimmt die Reihenfolge der Triangulierung
    kernels: Vec<Kernel>,
    /// Wert -> Index des ersten Vorkommens
    index: HashMap<Point, usize>,
    delaunay: MeshTopology,
    voronoi: MeshTopology,
    rng: StdRng,
    listeners: Vec<(ListenerId, Box<L>)>,
    next_listener_id: u64,
}

/// Modell, das zwischen Threads geteilt werden kann, z.B. als Bevy-Resource
pub type SyncDiagramModel = DiagramModel<dyn DiagramListener + Send + Sync>;

impl DiagramModel {
    pub fn new(config: DiagramConfig) -> MathResult<Self> {
        Self::with_config(config)
    }
}

impl<L: ?Sized + DiagramListener> DiagramModel<L> {
    /// Wie [`DiagramModel::new`], für einen beliebigen Beobachter-Typ
    pub fn with_config(config: DiagramConfig) -> MathResult<Self> {
        config.validate()?;
        let clip = config.clip_rectangle.map(ClipRectangle::new).transpose()?;
        let rng = match config.color_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            config,
            clip,
            kernels: Vec::new(),
            index: HashMap::new(),
            delaunay: MeshTopology::new(),
            voronoi: MeshTopology::new(),
            rng,
            listeners: Vec::new(),
            next_listener_id: 0,
        })
    }

    // --- Mutationen ---

    /// Fügt einen Kernel an und baut beide Meshes neu auf.
    ///
    /// Duplikate sind erlaubt. Fehler: nicht-endliche Koordinaten oder fehlendes
    /// Clip-Rechteck; in beiden Fällen wird nichts verändert.
    pub fn insert(&mut self, x: f64, y: f64) -> MathResult<Point> {
        let point = Point::new(x, y);
        if !point.is_finite() {
            return Err(MathError::NonFiniteCoordinate { x, y });
        }
        let clip = self.clip.ok_or(MathError::MissingClipRectangle {
            kernel_count: self.kernels.len(),
        })?;

        let mut positions = self.kernel_positions();
        positions.push(point);
        let (delaunay, voronoi) = self.rebuild(&positions, &clip)?;

        let color = KernelColor::random(&mut self.rng);
        self.index.entry(point).or_insert(self.kernels.len());
        self.kernels.push(Kernel::new(point, color));
        self.delaunay = delaunay;
        self.voronoi = voronoi;

        info!(
            "Kernel {} inserted ({} kernels, {} triangles, {} cells)",
            point,
            self.kernels.len(),
            self.delaunay.face_count(),
            self.voronoi.face_count()
        );

        for (_, listener) in self.listeners.iter_mut() {
            listener.on_kernel_added(point);
        }
        Ok(point)
    }

    /// Leert Kernel und beide Meshes
    pub fn clear(&mut self) {
        self.kernels.clear();
        self.index.clear();
        self.delaunay.clear();
        self.voronoi.clear();

        info!("Diagram cleared");
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_cleared();
        }
    }

    /// Setzt das Clip-Rechteck und baut vorhandene Zellen dagegen neu auf
    pub fn set_clip_rectangle(&mut self, corners: [Point; 4]) -> MathResult<()> {
        let clip = ClipRectangle::new(corners)?;

        if !self.kernels.is_empty() {
            let positions = self.kernel_positions();
            let (delaunay, voronoi) = self.rebuild(&positions, &clip)?;
            self.delaunay = delaunay;
            self.voronoi = voronoi;
        }

        info!("Clip rectangle set to {}", clip.bounds());
        self.clip = Some(clip);
        Ok(())
    }

    /// Neuaufbau beider Meshes in frische Puffer
    fn rebuild(
        &self,
        positions: &[Point],
        clip: &ClipRectangle,
    ) -> MathResult<(MeshTopology, MeshTopology)> {
        let mut delaunay = MeshTopology::new();
        if positions.len() >= 3 {
            let builder = DelaunayBuilder::new()
                .with_super_triangle_margin(self.config.super_triangle_margin);
            match builder.build_into(positions, &mut delaunay) {
                Ok(_) => {}
                Err(MathError::InsufficientPoints { actual, .. }) => {
                    debug!(
                        "Only {} distinct kernels, Delaunay mesh stays empty",
                        actual
                    );
                }
                Err(err) => return Err(err),
            }
        }

        let mut voronoi = MeshTopology::new();
        VoronoiBuilder::new(*clip)
            .with_direction_rounding(self.config.direction_rounding_decimals)
            .build_into(positions, &delaunay, &mut voronoi);

        Ok((delaunay, voronoi))
    }

    // --- Beobachter ---

    pub fn add_listener(&mut self, listener: Box<L>) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Entfernt einen Beobachter. `false`, wenn die Id unbekannt ist.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // --- Lesezugriffe ---

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    pub fn state(&self) -> DiagramState {
        DiagramState::from_kernel_count(self.kernels.len())
    }

    pub fn kernel_count(&self) -> usize {
        self.kernels.len()
    }

    pub fn kernels(&self) -> &[Kernel] {
        &self.kernels
    }

    pub fn kernel_positions(&self) -> Vec<Point> {
        self.kernels.iter().map(|k| k.position).collect()
    }

    pub fn delaunay_mesh(&self) -> &MeshTopology {
        &self.delaunay
    }

    pub fn voronoi_mesh(&self) -> &MeshTopology {
        &self.voronoi
    }

    pub fn clip_rectangle(&self) -> Option<&ClipRectangle> {
        self.clip.as_ref()
    }

    /// Index des ersten Kernels mit diesem Wert
    pub fn kernel_index(&self, point: Point) -> Option<usize> {
        self.index.get(&point).copied()
    }

    pub fn color_of(&self, point: Point) -> Option<KernelColor> {
        self.kernel_index(point).map(|i| self.kernels[i].color)
    }

    /// Delaunay-Nachbarn eines Kernels, in Reihenfolge des ersten Auftretens
    pub fn neighbors_of(&self, point: Point) -> Vec<Point> {
        let mut neighbors = Vec::new();
        for triangle in self.delaunay.triangles() {
            if !triangle.contains_vertex(point) {
                continue;
            }
            for v in triangle.vertices() {
                if v != point && !neighbors.contains(&v) {
                    neighbors.push(v);
                }
            }
        }
        neighbors
    }

    /// Index der ersten Voronoi-Zelle, die `point` enthält (Rand eingeschlossen)
    pub fn cell_containing(&self, point: Point) -> Option<usize> {
        let target = geo::Point::new(point.x, point.y);
        (0..self.voronoi.face_count()).find(|&i| {
            self.voronoi
                .face_polygon(i)
                .is_some_and(|poly| !poly.exterior().0.is_empty() && poly.intersects(&target))
        })
    }

    /// Dreieck `index` des Delaunay-Meshes mit Umkreismittelpunkt und -radius
    pub fn circumcircle_of_triangle(&self, index: usize) -> Option<(Triangle, Point, f64)> {
        let triangle = self.delaunay.triangle(index)?;
        let (center, radius) = triangle.circumcircle()?;
        Some((triangle, center, radius))
    }

    pub fn statistics(&self) -> DiagramStatistics {
        let areas: Vec<f64> = (0..self.voronoi.face_count())
            .filter_map(|i| self.voronoi.face_polygon(i))
            .map(|poly| poly.unsigned_area())
            .collect();
        let non_empty: Vec<f64> = areas.iter().copied().filter(|a| *a > 0.0).collect();

        DiagramStatistics {
            kernel_count: self.kernels.len(),
            triangle_count: self.delaunay.face_count(),
            cell_count: self.voronoi.face_count(),
            empty_cell_count: areas.len() - non_empty.len(),
            delaunay_vertex_count: self.delaunay.vertex_count(),
            voronoi_vertex_count: self.voronoi.vertex_count(),
            total_cell_area: non_empty.iter().sum(),
            min_cell_area: if non_empty.is_empty() {
                0.0
            } else {
                non_empty.iter().copied().fold(f64::INFINITY, f64::min)
            },
            max_cell_area: non_empty.iter().copied().fold(0.0, f64::max),
        }
    }
}

impl<L: ?Sized + DiagramListener> fmt::Debug for DiagramModel<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagramModel")
            .field("state", &self.state())
            .field("clip", &self.clip)
            .field("kernels", &self.kernels.len())
            .field("triangles", &self.delaunay.face_count())
            .field("cells", &self.voronoi.face_count())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
