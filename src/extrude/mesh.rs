use crate::math::{Aabb3, Point3, Vector3};

/// An indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Triangle indices (each triple defines a triangle, counter-clockwise
    /// seen from outside).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Appends `other`, offsetting its indices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &TriangleMesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(
            other
                .indices
                .iter()
                .map(|tri| [tri[0] + base, tri[1] + base, tri[2] + base]),
        );
    }

    /// Returns a copy with every vertex moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vector3) -> Self {
        Self {
            vertices: self.vertices.iter().map(|v| v + offset).collect(),
            indices: self.indices.clone(),
        }
    }

    /// Bounding box of all vertices, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb3> {
        Aabb3::from_points(&self.vertices)
    }

    /// Signed enclosed volume (positive for outward-facing winding).
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.indices
            .iter()
            .map(|tri| {
                let a = self.vertices[tri[0] as usize].coords;
                let b = self.vertices[tri[1] as usize].coords;
                let c = self.vertices[tri[2] as usize].coords;
                a.dot(&b.cross(&c)) / 6.0
            })
            .sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn triangle() -> TriangleMesh {
        TriangleMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            indices: vec![[0, 1, 2]],
        }
    }

    #[test]
    fn merge_offsets_indices() {
        let mut mesh = triangle();
        mesh.merge(&triangle());
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices[1], [3, 4, 5]);
    }

    #[test]
    fn translated_moves_bounds() {
        let mesh = triangle().translated(Vector3::new(0.0, 0.0, 2.5));
        let b = mesh.bounds().unwrap();
        assert!((b.min.z - 2.5).abs() < 1e-12);
        assert_eq!(mesh.indices, triangle().indices);
    }

    #[test]
    fn empty_mesh_has_no_bounds() {
        let mesh = TriangleMesh::default();
        assert!(mesh.is_empty());
        assert!(mesh.bounds().is_none());
    }
}
