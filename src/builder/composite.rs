use std::fmt;

use crate::extrude::TriangleMesh;
use crate::math::{Aabb3, Vector3};

/// Logical role of a solid within a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Base,
    Text,
    Initial,
    Border,
    Center,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Base => "base",
            Self::Text => "text",
            Self::Initial => "initial",
            Self::Border => "border",
            Self::Center => "center",
        };
        f.write_str(name)
    }
}

/// Named color tag used to group solids for multi-material export.
///
/// Carries no geometric meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Material {
    name: String,
}

impl Material {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One extruded layer: a mesh in local coordinates plus its placement.
#[derive(Debug, Clone)]
pub struct Solid {
    pub kind: LayerKind,
    /// Mesh with its footprint as extruded and z in `[0, depth]`.
    pub mesh: TriangleMesh,
    /// Translation applied on export.
    pub placement: Vector3,
    pub material: Material,
}

impl Solid {
    /// Mesh with the placement baked into every vertex.
    #[must_use]
    pub fn world_mesh(&self) -> TriangleMesh {
        self.mesh.translated(self.placement)
    }

    /// World-space bounds, or `None` for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb3> {
        let local = self.mesh.bounds()?;
        Some(Aabb3 {
            min: local.min + self.placement,
            max: local.max + self.placement,
        })
    }
}

/// Ordered set of solids forming one exportable design.
///
/// A composite is produced whole by a build and replaced whole by the next.
#[derive(Debug, Clone, Default)]
pub struct Composite {
    solids: Vec<Solid>,
}

impl Composite {
    #[must_use]
    pub fn new(solids: Vec<Solid>) -> Self {
        Self { solids }
    }

    #[must_use]
    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }

    /// First solid of the given kind.
    #[must_use]
    pub fn solid(&self, kind: LayerKind) -> Option<&Solid> {
        self.solids.iter().find(|s| s.kind == kind)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solids.iter().all(|s| s.mesh.is_empty())
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.solids.iter().map(|s| s.mesh.vertex_count()).sum()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.solids.iter().map(|s| s.mesh.triangle_count()).sum()
    }

    /// World-space bounds over every solid.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb3> {
        self.solids
            .iter()
            .filter_map(Solid::bounds)
            .reduce(|a, b| a.union(&b))
    }
}
