// src/math/geometry/mesh.rs

use crate::math::{
    error::MathError,
    geometry::triangle::Triangle,
    types::Point,
};
use geo::{LineString, Polygon};
use serde::{Deserialize, Serialize};

/// Polygon-Mesh mit geteilten Vertices.
///
/// Die Vertex-Liste wächst nur und ist nach Wert dedupliziert; Faces sind geordnete
/// Listen von Vertex-Indizes (3 für Dreiecke, N für allgemeine Polygone).
/// Nach [`MeshTopology::clear`] sind alle vorher ausgegebenen Indizes ungültig.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MeshSnapshot")]
pub struct MeshTopology {
    vertices: Vec<Point>,
    faces: Vec<Vec<usize>>,
}

/// Ungeprüfte Rohform beim Deserialisieren, wird über [`TryFrom`] validiert
#[derive(Debug, Deserialize)]
struct MeshSnapshot {
    vertices: Vec<Point>,
    faces: Vec<Vec<usize>>,
}

impl TryFrom<MeshSnapshot> for MeshTopology {
    type Error = MathError;

    fn try_from(snapshot: MeshSnapshot) -> Result<Self, Self::Error> {
        let vertex_count = snapshot.vertices.len();
        for (face, indices) in snapshot.faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= vertex_count) {
                return Err(MathError::InvalidVertexIndex {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(Self {
            vertices: snapshot.vertices,
            faces: snapshot.faces,
        })
    }
}

impl MeshTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl der Vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Anzahl der Faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.faces.is_empty()
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn vertex(&self, index: usize) -> Option<Point> {
        self.vertices.get(index).copied()
    }

    /// Index eines vorhandenen Vertex mit gleichem Wert, sonst wird er angehängt
    pub fn add_position(&mut self, p: Point) -> usize {
        match self.vertices.iter().position(|v| *v == p) {
            Some(index) => index,
            None => {
                self.vertices.push(p);
                self.vertices.len() - 1
            }
        }
    }

    /// Hängt ein Face an. Keine geometrische Prüfung: Umlaufsinn und Einfachheit
    /// liegen beim Aufrufer.
    ///
    /// # Panics
    ///
    /// Wenn ein Index nie von diesem Mesh ausgegeben wurde.
    pub fn add_face(&mut self, indices: &[usize]) -> usize {
        let vertex_count = self.vertices.len();
        assert!(
            indices.iter().all(|&i| i < vertex_count),
            "face {:?} references a vertex index >= vertex count {}",
            indices,
            vertex_count
        );
        self.faces.push(indices.to_vec());
        self.faces.len() - 1
    }

    /// Löst alle Positionen auf und hängt sie als ein Face an
    pub fn add_polygon(&mut self, points: &[Point]) -> usize {
        let indices: Vec<usize> = points.iter().map(|&p| self.add_position(p)).collect();
        self.add_face(&indices)
    }

    pub fn add_triangle(&mut self, a: Point, b: Point, c: Point) -> usize {
        self.add_polygon(&[a, b, c])
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
    }

    pub fn face_indices(&self, index: usize) -> Option<&[usize]> {
        self.faces.get(index).map(Vec::as_slice)
    }

    /// Die aufgelösten Positionen eines Faces in Face-Reihenfolge
    pub fn face(&self, index: usize) -> Option<Vec<Point>> {
        self.face_indices(index)
            .map(|indices| indices.iter().map(|&i| self.vertices[i]).collect())
    }

    /// Alle Faces als aufgelöste Positionslisten
    pub fn faces(&self) -> impl Iterator<Item = Vec<Point>> + '_ {
        self.faces
            .iter()
            .map(move |indices| indices.iter().map(|&i| self.vertices[i]).collect())
    }

    /// Ein Dreiecks-Face als [`Triangle`], `None` für andere Face-Größen
    pub fn triangle(&self, index: usize) -> Option<Triangle> {
        match self.face_indices(index)? {
            [a, b, c] => Some(Triangle::new(
                self.vertices[*a],
                self.vertices[*b],
                self.vertices[*c],
            )),
            _ => None,
        }
    }

    /// Alle Dreiecks-Faces
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.faces.len()).filter_map(move |i| self.triangle(i))
    }

    /// Face als `geo::Polygon` für Flächen- und Enthaltenseins-Abfragen
    pub fn face_polygon(&self, index: usize) -> Option<Polygon<f64>> {
        let points = self.face(index)?;
        let exterior: LineString<f64> = points.into_iter().map(geo::Coord::from).collect();
        Some(Polygon::new(exterior, vec![]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Area;

    #[test]
    fn test_add_position_is_idempotent() {
        let mut mesh = MeshTopology::new();
        let first = mesh.add_position(Point::new(1.0, 2.0));
        let second = mesh.add_position(Point::new(3.0, 4.0));
        assert_eq!(mesh.add_position(Point::new(1.0, 2.0)), first);
        assert_ne!(first, second);
        assert_eq!(mesh.vertex_count(), 2);
    }

    #[test]
    fn test_triangle_round_trip() {
        let mut mesh = MeshTopology::new();
        let (a, b, c) = (
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 10.0),
        );
        let face = mesh.add_triangle(a, b, c);
        let read_back = mesh.face(face).unwrap();
        assert_eq!(read_back.len(), 3);
        for p in [a, b, c] {
            assert!(read_back.contains(&p));
        }
    }

    #[test]
    fn test_shared_vertices() {
        let mut mesh = MeshTopology::new();
        mesh.add_triangle(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        );
        mesh.add_triangle(
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        );
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.face_indices(1), Some(&[1, 3, 2][..]));
        assert_eq!(mesh.triangles().count(), 2);
    }

    #[test]
    fn test_clear_invalidates_everything() {
        let mut mesh = MeshTopology::new();
        mesh.add_polygon(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]);
        mesh.clear();
        assert!(mesh.is_empty());
        assert!(mesh.face(0).is_none());
    }

    #[test]
    #[should_panic]
    fn test_face_with_unknown_index_panics() {
        let mut mesh = MeshTopology::new();
        mesh.add_position(Point::new(0.0, 0.0));
        mesh.add_face(&[0, 1, 2]);
    }

    #[test]
    fn test_face_polygon_area() {
        let mut mesh = MeshTopology::new();
        let face = mesh.add_polygon(&[
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 2.0),
            Point::new(0.0, 2.0),
        ]);
        assert_eq!(mesh.face_polygon(face).unwrap().unsigned_area(), 8.0);
    }

    #[test]
    fn test_snapshot_with_valid_indices_is_accepted() {
        let snapshot = MeshSnapshot {
            vertices: vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(0.0, 1.0),
            ],
            faces: vec![vec![0, 1, 2]],
        };
        let mesh = MeshTopology::try_from(snapshot).unwrap();
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.triangles().count(), 1);
    }

    #[test]
    fn test_snapshot_with_dangling_index_is_rejected() {
        let snapshot = MeshSnapshot {
            vertices: vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
            faces: vec![vec![0, 1], vec![1, 0, 7]],
        };
        assert_eq!(
            MeshTopology::try_from(snapshot).unwrap_err(),
            MathError::InvalidVertexIndex {
                face: 1,
                index: 7,
                vertex_count: 2
            }
        );
    }
}
