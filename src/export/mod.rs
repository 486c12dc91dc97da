//! Baking, welding and binary STL serialization of composites.

mod stl;
mod weld;

pub use stl::{write_stl, StlSummary};
pub use weld::weld;

use std::collections::BTreeMap;

use tracing::info;

use crate::builder::{Composite, Material, Solid};
use crate::config::{STL_MIN_LEN, WELD_TOLERANCE};
use crate::error::{ExportError, Result};
use crate::extrude::TriangleMesh;

/// Bakes placements, merges every solid, welds and serializes to binary STL.
///
/// # Errors
///
/// Returns [`ExportError::EmptyComposite`] if no solid has triangles and
/// [`ExportError::TooSmall`] if welding leaves nothing to write.
pub fn export_stl(composite: &Composite) -> Result<Vec<u8>> {
    let bytes = serialize(composite.solids().iter())?;
    info!(bytes = bytes.len(), solids = composite.solids().len(), "exported STL");
    Ok(bytes)
}

/// Exports one STL per material, in material order, for multi-material
/// printing.
///
/// # Errors
///
/// Returns [`ExportError::EmptyComposite`] for an empty composite, or the
/// first per-material failure.
pub fn export_by_material(composite: &Composite) -> Result<Vec<(Material, Vec<u8>)>> {
    if composite.is_empty() {
        return Err(ExportError::EmptyComposite.into());
    }

    let mut groups: BTreeMap<&Material, Vec<&Solid>> = BTreeMap::new();
    for solid in composite.solids() {
        if !solid.mesh.is_empty() {
            groups.entry(&solid.material).or_default().push(solid);
        }
    }

    let mut out = Vec::with_capacity(groups.len());
    for (material, solids) in groups {
        let bytes = serialize(solids.into_iter())?;
        info!(%material, bytes = bytes.len(), "exported STL group");
        out.push((material.clone(), bytes));
    }
    Ok(out)
}

fn serialize<'a>(solids: impl Iterator<Item = &'a Solid>) -> Result<Vec<u8>> {
    let mut merged = TriangleMesh::default();
    for solid in solids {
        merged.merge(&solid.world_mesh());
    }
    if merged.is_empty() {
        return Err(ExportError::EmptyComposite.into());
    }

    let welded = weld(&merged, WELD_TOLERANCE);
    let bytes = write_stl(&welded);
    if bytes.len() <= STL_MIN_LEN {
        return Err(ExportError::TooSmall {
            len: bytes.len(),
            min: STL_MIN_LEN,
        }
        .into());
    }
    Ok(bytes)
}
