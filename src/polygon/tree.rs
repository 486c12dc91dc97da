use crate::math::Aabb2;

use super::path::{Orientation, Path};

/// One contour of a [`PolygonTree`] and everything nested inside it.
///
/// Children of a filled node are its holes; children of a hole are islands
/// filled again inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub is_hole: bool,
    pub contour: Path,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Creates a filled node, winding its contour clockwise.
    #[must_use]
    pub fn fill(contour: Path) -> Self {
        Self {
            is_hole: false,
            contour: contour.with_orientation(Orientation::Clockwise),
            children: Vec::new(),
        }
    }

    /// Creates a hole node, winding its contour counter-clockwise.
    #[must_use]
    pub fn hole(contour: Path) -> Self {
        Self {
            is_hole: true,
            contour: contour.with_orientation(Orientation::CounterClockwise),
            children: Vec::new(),
        }
    }

    /// Net filled area of this node and its descendants, in square millimetres.
    #[must_use]
    pub fn net_area(&self) -> f64 {
        let own = self.contour.area().abs();
        let nested: f64 = self.children.iter().map(TreeNode::net_area).sum();
        if self.is_hole {
            nested - own
        } else {
            own + nested
        }
    }

    fn depth(&self) -> usize {
        1 + self.children.iter().map(TreeNode::depth).max().unwrap_or(0)
    }

    fn translated(&self, dx: i64, dy: i64) -> Self {
        Self {
            is_hole: self.is_hole,
            contour: self.contour.translated(dx, dy),
            children: self.children.iter().map(|c| c.translated(dx, dy)).collect(),
        }
    }

    fn collect_contours(&self, out: &mut Vec<Path>) {
        out.push(self.contour.clone());
        for child in &self.children {
            child.collect_contours(out);
        }
    }
}

/// A forest of filled contours with nested holes and islands.
///
/// Invariant: `is_hole` alternates with depth, starting with filled roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolygonTree {
    pub roots: Vec<TreeNode>,
}

impl PolygonTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Net filled area in square millimetres.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.roots.iter().map(TreeNode::net_area).sum()
    }

    /// Maximum nesting depth; `0` for an empty tree.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.roots.iter().map(TreeNode::depth).max().unwrap_or(0)
    }

    /// Every contour in the tree, depth first, with role orientation
    /// (filled clockwise, holes counter-clockwise). Suitable as input to
    /// another boolean operation.
    #[must_use]
    pub fn contours(&self) -> Vec<Path> {
        let mut out = Vec::new();
        for root in &self.roots {
            root.collect_contours(&mut out);
        }
        out
    }

    /// Bounding box in millimetres, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb2> {
        let points: Vec<_> = self
            .roots
            .iter()
            .flat_map(|root| root.contour.to_points_f64())
            .collect();
        Aabb2::from_points(&points)
    }

    /// Returns the tree shifted by `(dx, dy)` engine units.
    #[must_use]
    pub fn translated(&self, dx: i64, dy: i64) -> Self {
        Self {
            roots: self.roots.iter().map(|r| r.translated(dx, dy)).collect(),
        }
    }

    /// Builds a tree from filled contours, each paired with its direct holes.
    ///
    /// Input order is irrelevant: larger contours are placed first so that
    /// every island lands inside the smallest hole that encloses it.
    #[must_use]
    pub fn from_polygons(mut polygons: Vec<(Path, Vec<Path>)>) -> Self {
        polygons.sort_by(|a, b| b.0.signed_area2().abs().cmp(&a.0.signed_area2().abs()));

        let mut tree = Self::new();
        for (outer, holes) in polygons {
            let mut node = TreeNode::fill(outer);
            node.children = holes.into_iter().map(TreeNode::hole).collect();
            insert_fill(&mut tree.roots, node);
        }
        tree
    }
}

/// Places a filled node under the hole that encloses it, or among `siblings`.
fn insert_fill(siblings: &mut Vec<TreeNode>, node: TreeNode) {
    for fill in siblings.iter_mut() {
        for hole in &mut fill.children {
            if hole.contour.encloses(&node.contour) {
                insert_fill(&mut hole.children, node);
                return;
            }
        }
    }
    siblings.push(node);
}
