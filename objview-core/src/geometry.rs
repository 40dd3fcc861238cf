//! Mesh storage: the vertex and face arrays plus their cached counts.
//!
//! Both arrays are 1-indexed. Slot 0 holds a sentinel so that the 1-based
//! references of the OBJ format map directly to positions.
use nalgebra::Point3;

use crate::transform::PendingRotation;

/// A vertex position
pub type Vertex = Point3<f64>;

/// A polygon defined by 1-based indices into the vertex array
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Face {
    pub(crate) indices: Vec<usize>,
    pub(crate) count: usize,
}

impl Face {
    pub fn new(indices: Vec<usize>) -> Self {
        let count = indices.len();
        Self { indices, count }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of indices the face was built from on its last record.
    ///
    /// Differs from `indices().len()` when a single-index record was folded
    /// into this slot.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Counts produced by the counting pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshCounts {
    pub vertices: usize,
    pub faces: usize,
}

/// A polygon mesh loaded from an OBJ source
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) faces: Vec<Face>,
    pub(crate) vertex_count: usize,
    pub(crate) face_count: usize,
    pub(crate) rotation: PendingRotation,
}

impl Mesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn face_count(&self) -> usize {
        self.face_count
    }

    pub fn counts(&self) -> MeshCounts {
        MeshCounts {
            vertices: self.vertex_count,
            faces: self.face_count,
        }
    }

    /// The vertex array, sentinel at index 0 included
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The face array, sentinel at index 0 included
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Faces that received at least one index during parsing.
    ///
    /// The face array is sized for a fan-triangulated count while the data
    /// pass stores one entry per record, so trailing slots usually stay empty.
    pub fn populated_faces(&self) -> impl Iterator<Item = &Face> {
        self.faces.iter().skip(1).filter(|face| !face.is_empty())
    }

    pub fn pending_rotation(&self) -> PendingRotation {
        self.rotation
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// Replace the vertex array wholesale, e.g. to restore a saved state.
    ///
    /// The array must keep its sentinel at index 0. Counts and faces are left
    /// alone; keeping them consistent is up to the caller.
    pub fn set_vertices(&mut self, vertices: Vec<Vertex>) {
        self.vertices = vertices;
    }

    /// Return to the empty state
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.vertex_count = 0;
        self.face_count = 0;
        self.rotation = PendingRotation::zero();
    }

    /// Vertices `1..=vertex_count`, clamped to the stored array
    pub(crate) fn active_vertices(&self) -> &[Vertex] {
        let end = (self.vertex_count + 1).min(self.vertices.len());
        self.vertices.get(1..end).unwrap_or_default()
    }

    pub(crate) fn active_vertices_mut(&mut self) -> &mut [Vertex] {
        let end = (self.vertex_count + 1).min(self.vertices.len());
        self.vertices.get_mut(1..end).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> Mesh {
        Mesh {
            vertices: vec![
                Point3::origin(),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            faces: vec![Face::default(), Face::new(vec![1, 2]), Face::default()],
            vertex_count: 2,
            face_count: 2,
            rotation: PendingRotation::new(0.1, 0.0, 0.0),
        }
    }

    #[test]
    fn test_new_mesh_is_empty() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.counts(), MeshCounts::default());
        assert!(mesh.vertices().is_empty());
        assert!(mesh.faces().is_empty());
    }

    #[test]
    fn test_populated_faces_skips_sentinel_and_tail() {
        let mesh = loaded();
        let faces: Vec<_> = mesh.populated_faces().collect();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].indices(), &[1, 2]);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut mesh = loaded();
        mesh.clear();
        mesh.clear();
        assert!(mesh.is_empty());
        assert_eq!(mesh.face_count(), 0);
        assert!(mesh.vertices().is_empty());
        assert!(mesh.pending_rotation().is_zero());
    }

    #[test]
    fn test_active_vertices_clamped_after_bulk_replace() {
        let mut mesh = loaded();
        mesh.set_vertices(vec![Point3::origin()]);
        assert!(mesh.active_vertices().is_empty());
        assert_eq!(mesh.vertex_count(), 2);
    }
}
