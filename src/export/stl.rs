use crate::config::{STL_HEADER_LEN, STL_MIN_LEN, STL_TRIANGLE_LEN};
use crate::error::{ExportError, Result};
use crate::extrude::TriangleMesh;
use crate::math::{Aabb3, Point3};

const HEADER: &[u8] = b"keysmith binary STL";

/// Serializes `mesh` in the binary STL layout.
///
/// - 80 bytes: header
/// - 4 bytes: u32 LE triangle count
/// - Per triangle (50 bytes each):
///   - 12 bytes: unit normal (3 x f32 LE), zero for degenerate faces
///   - 36 bytes: 3 vertices (3 x 3 x f32 LE)
///   - 2 bytes: attribute byte count (0u16)
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn write_stl(mesh: &TriangleMesh) -> Vec<u8> {
    let count = mesh.triangle_count();
    let mut buf = Vec::with_capacity(STL_MIN_LEN + count * STL_TRIANGLE_LEN);

    buf.extend_from_slice(HEADER);
    buf.resize(STL_HEADER_LEN, 0);
    buf.extend_from_slice(&(count as u32).to_le_bytes());

    for tri in &mesh.indices {
        let [a, b, c] = tri.map(|i| mesh.vertices[i as usize]);
        let n = (b - a).cross(&(c - a));
        let len = n.norm();
        let normal = if len > 1e-12 { n / len } else { n * 0.0 };

        for value in normal.iter().chain(a.coords.iter()).chain(b.coords.iter()).chain(c.coords.iter()) {
            buf.extend_from_slice(&(*value as f32).to_le_bytes());
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }
    buf
}

/// Triangle count and extent read back from a binary STL buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StlSummary {
    pub triangles: usize,
    /// `None` when the buffer holds no triangles.
    pub bounds: Option<Aabb3>,
}

impl StlSummary {
    /// Parses a binary STL buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Malformed`] if the buffer is shorter than its
    /// header or its length disagrees with the declared triangle count.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let Some(count) = bytes.get(STL_HEADER_LEN..STL_MIN_LEN) else {
            return Err(ExportError::Malformed(format!(
                "{} bytes is shorter than the {STL_MIN_LEN}-byte header",
                bytes.len()
            ))
            .into());
        };
        let triangles = u32::from_le_bytes([count[0], count[1], count[2], count[3]]) as usize;
        let expected = STL_MIN_LEN + triangles * STL_TRIANGLE_LEN;
        if bytes.len() != expected {
            return Err(ExportError::Malformed(format!(
                "{triangles} triangles need {expected} bytes, found {}",
                bytes.len()
            ))
            .into());
        }

        let mut bounds: Option<Aabb3> = None;
        for record in bytes[STL_MIN_LEN..].chunks_exact(STL_TRIANGLE_LEN) {
            // Skip the normal; three vertices follow.
            for vertex in record[12..48].chunks_exact(12) {
                let p = Point3::new(read_f32(vertex, 0), read_f32(vertex, 4), read_f32(vertex, 8));
                bounds = Some(match bounds {
                    Some(mut b) => {
                        b.include(&p);
                        b
                    }
                    None => Aabb3 { min: p, max: p },
                });
            }
        }
        Ok(Self { triangles, bounds })
    }
}

fn read_f32(bytes: &[u8], at: usize) -> f64 {
    f64::from(f32::from_le_bytes([
        bytes[at],
        bytes[at + 1],
        bytes[at + 2],
        bytes[at + 3],
    ]))
}
