use std::collections::HashMap;

use crate::extrude::TriangleMesh;
use crate::math::Point3;

type Cell = (i64, i64, i64);

/// Merges vertices closer than `tolerance` and drops triangles that
/// collapse as a result.
///
/// Vertices are bucketed on a grid of `tolerance`-sized cells; each vertex
/// is compared against the 27 surrounding cells, so the first vertex seen
/// within range becomes the representative.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn weld(mesh: &TriangleMesh, tolerance: f64) -> TriangleMesh {
    let mut grid: HashMap<Cell, Vec<u32>> = HashMap::new();
    let mut vertices: Vec<Point3> = Vec::with_capacity(mesh.vertices.len());
    let mut remap: Vec<u32> = Vec::with_capacity(mesh.vertices.len());
    let tol2 = tolerance * tolerance;

    for v in &mesh.vertices {
        let cell = cell_of(v, tolerance);
        let existing = neighbours(cell).find_map(|key| {
            grid.get(&key)?
                .iter()
                .copied()
                .find(|&i| (vertices[i as usize] - *v).norm_squared() <= tol2)
        });
        let index = existing.unwrap_or_else(|| {
            let i = vertices.len() as u32;
            vertices.push(*v);
            grid.entry(cell).or_default().push(i);
            i
        });
        remap.push(index);
    }

    let indices = mesh
        .indices
        .iter()
        .map(|t| [remap[t[0] as usize], remap[t[1] as usize], remap[t[2] as usize]])
        .filter(|t| t[0] != t[1] && t[1] != t[2] && t[0] != t[2])
        .collect();

    TriangleMesh { vertices, indices }
}

#[allow(clippy::cast_possible_truncation)]
fn cell_of(p: &Point3, size: f64) -> Cell {
    (
        (p.x / size).floor() as i64,
        (p.y / size).floor() as i64,
        (p.z / size).floor() as i64,
    )
}

fn neighbours((x, y, z): Cell) -> impl Iterator<Item = Cell> {
    (-1..=1).flat_map(move |dx| {
        (-1..=1).flat_map(move |dy| (-1..=1).map(move |dz| (x + dx, y + dy, z + dz)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(a: Point3, b: Point3, c: Point3) -> TriangleMesh {
        TriangleMesh {
            vertices: vec![a, b, c],
            indices: vec![[0, 1, 2]],
        }
    }

    #[test]
    fn coincident_seams_merge() {
        let mut mesh = tri(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        mesh.merge(&tri(
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0004, 1.0, 0.0),
        ));
        let welded = weld(&mesh, 1e-3);
        assert_eq!(welded.vertex_count(), 4);
        assert_eq!(welded.triangle_count(), 2);
    }

    #[test]
    fn collapsed_triangles_are_dropped() {
        let mesh = tri(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0002, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        let welded = weld(&mesh, 1e-3);
        assert_eq!(welded.triangle_count(), 0);
    }

    #[test]
    fn distinct_vertices_survive_across_cell_boundary() {
        // Straddles a cell edge but stays outside the tolerance.
        let mesh = tri(
            Point3::new(0.0009, 0.0, 0.0),
            Point3::new(0.0021, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        let welded = weld(&mesh, 1e-3);
        assert_eq!(welded.vertex_count(), 3);
        assert_eq!(welded.triangle_count(), 1);
    }
}
