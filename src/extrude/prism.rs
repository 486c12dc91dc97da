use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, FixedVertexHandle, InnerTag};
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};
use tracing::debug;

use crate::error::{Result, TessellationError};
use crate::math::Point3;
use crate::shape::Region;

use super::{Extruder, TriangleMesh};

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Straight, unbevelled prism extrusion.
///
/// Caps are triangulated with a constrained Delaunay triangulation; walls
/// are quads sharing the cap boundary vertices, so each region yields a
/// closed shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrismExtruder;

impl PrismExtruder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Extruder for PrismExtruder {
    fn extrude(&self, regions: &[Region], depth: f64) -> Result<TriangleMesh> {
        if !depth.is_finite() || depth <= 0.0 {
            return Err(TessellationError::InvalidParameters(format!(
                "extrusion depth must be positive, got {depth}"
            ))
            .into());
        }

        let mut mesh = TriangleMesh::default();
        for region in regions {
            mesh.merge(&extrude_region(region, depth)?);
        }
        debug!(
            regions = regions.len(),
            triangles = mesh.triangle_count(),
            "extruded"
        );
        Ok(mesh)
    }
}

/// Extrudes one region into a closed prism.
#[allow(clippy::cast_possible_truncation)]
fn extrude_region(region: &Region, depth: f64) -> Result<TriangleMesh> {
    let mut cdt = Cdt::new();
    insert_constraint_loop(&mut cdt, &region.outer)?;
    for hole in &region.holes {
        insert_constraint_loop(&mut cdt, hole)?;
    }

    let interior_faces = classify_interior_faces(&cdt);

    // Bottom ring at [0, n), top ring at [n, 2n), indexed by CDT vertex.
    let n = cdt.num_vertices();
    let mut mesh = TriangleMesh {
        vertices: Vec::with_capacity(2 * n),
        indices: Vec::new(),
    };
    let mut positions = vec![Point3::origin(); n];
    for vh in cdt.vertices() {
        let pos = vh.position();
        positions[vh.fix().index()] = Point3::new(pos.x, pos.y, 0.0);
    }
    mesh.vertices.extend(positions.iter().copied());
    mesh.vertices
        .extend(positions.iter().map(|p| Point3::new(p.x, p.y, depth)));

    let bottom = |h: usize| h as u32;
    let top = |h: usize| (n + h) as u32;

    // Spade faces are counter-clockwise seen from +z.
    for face in cdt.inner_faces() {
        if !interior_faces.contains(&face.fix().index()) {
            continue;
        }
        let [a, b, c] = face.vertices().map(|v| v.fix().index());
        mesh.indices.push([top(a), top(b), top(c)]);
        mesh.indices.push([bottom(a), bottom(c), bottom(b)]);
    }

    // Walls follow the cap boundary as triangulated, so constraint edges
    // split by vertices inserted later still match the caps. Each boundary
    // edge has the solid on its left and its wall faces right.
    let is_interior =
        |face: Option<usize>| face.is_some_and(|index| interior_faces.contains(&index));
    for edge in cdt.directed_edges() {
        let left = edge.face().as_inner().map(|f| f.fix().index());
        let right = edge.rev().face().as_inner().map(|f| f.fix().index());
        if !is_interior(left) || is_interior(right) {
            continue;
        }
        let from = edge.from().fix().index();
        let to = edge.to().fix().index();
        mesh.indices.push([bottom(from), bottom(to), top(to)]);
        mesh.indices.push([bottom(from), top(to), top(from)]);
    }

    Ok(mesh)
}

/// Inserts a closed polygon as constraint edges into the CDT.
fn insert_constraint_loop(cdt: &mut Cdt, points: &[crate::math::Point2]) -> Result<()> {
    if points.len() < 3 {
        return Err(
            TessellationError::Failed("constraint loop needs at least 3 points".into()).into(),
        );
    }

    let mut handles: Vec<FixedVertexHandle> = Vec::with_capacity(points.len());
    for p in points {
        let h = cdt
            .insert(SpadePoint2::new(p.x, p.y))
            .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))?;
        if handles.last() != Some(&h) {
            handles.push(h);
        }
    }
    if handles.len() > 1 && handles.first() == handles.last() {
        handles.pop();
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(TessellationError::Failed(
                "boundary edges intersect; region is not simple".into(),
            )
            .into());
        }
        cdt.add_constraint(from, to);
    }

    Ok(())
}

/// Classifies which inner faces of the CDT are inside the region using flood-fill.
///
/// Starts from faces adjacent to the outer (infinite) face at depth 0. Each time
/// a constraint edge is crossed, depth increments. Odd depth = interior.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();

    for edge in cdt.directed_edges() {
        if edge.face().fix() == outer_fix {
            if let Some(inner) = edge.rev().face().as_inner() {
                let idx = inner.fix().index();
                if depth_map.contains_key(&idx) {
                    continue;
                }
                let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
                depth_map.insert(idx, depth);
                if depth % 2 == 1 {
                    interior.insert(idx);
                }
                queue.push_back((inner.fix(), depth));
            }
        }
    }

    while let Some((face_fix, depth)) = queue.pop_front() {
        let face = cdt.face(face_fix);
        for edge in face.adjacent_edges() {
            if let Some(neighbor) = edge.rev().face().as_inner() {
                let n_idx = neighbor.fix().index();
                if depth_map.contains_key(&n_idx) {
                    continue;
                }
                let new_depth = if cdt.is_constraint_edge(edge.as_undirected().fix()) {
                    depth + 1
                } else {
                    depth
                };
                depth_map.insert(n_idx, new_depth);
                if new_depth % 2 == 1 {
                    interior.insert(n_idx);
                }
                queue.push_back((neighbor.fix(), new_depth));
            }
        }
    }

    interior
}
