use crate::polygon::{PolygonTree, TreeNode};

use super::Region;

/// Unwraps a polygon tree into independent filled regions.
///
/// Every filled node becomes one region whose holes are its direct hole
/// children. Islands inside those holes are disconnected fill areas and
/// become regions of their own, recursively.
pub struct ToRegions<'a> {
    tree: &'a PolygonTree,
}

impl<'a> ToRegions<'a> {
    /// Creates a new `ToRegions` conversion.
    #[must_use]
    pub fn new(tree: &'a PolygonTree) -> Self {
        Self { tree }
    }

    /// Executes the conversion.
    ///
    /// Windings are normalized per boundary: the tree stores filled contours
    /// clockwise, regions want them counter-clockwise.
    #[must_use]
    pub fn execute(&self) -> Vec<Region> {
        let mut regions = Vec::new();
        for root in &self.tree.roots {
            collect_fill(root, &mut regions);
        }
        regions
    }
}

fn collect_fill(node: &TreeNode, regions: &mut Vec<Region>) {
    if node.is_hole {
        // Only reachable from a malformed tree; treat its islands as roots.
        for island in &node.children {
            collect_fill(island, regions);
        }
        return;
    }

    let holes = node
        .children
        .iter()
        .filter(|child| child.is_hole)
        .map(|hole| hole.contour.to_points_f64())
        .collect();
    regions.push(Region::new(node.contour.to_points_f64(), holes));

    for hole in &node.children {
        for island in &hole.children {
            collect_fill(island, regions);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::signed_area;
    use crate::polygon::{IntPoint, Path};

    fn square(x0: i64, y0: i64, side: i64) -> Path {
        Path::new(vec![
            IntPoint::new(x0, y0),
            IntPoint::new(x0 + side, y0),
            IntPoint::new(x0 + side, y0 + side),
            IntPoint::new(x0, y0 + side),
        ])
    }

    fn nested_tree() -> PolygonTree {
        // fill > hole > island > hole
        PolygonTree::from_polygons(vec![
            (square(0, 0, 40_000), vec![square(5_000, 5_000, 30_000)]),
            (square(10_000, 10_000, 20_000), vec![square(15_000, 15_000, 10_000)]),
        ])
    }

    #[test]
    fn islands_become_separate_regions() {
        let regions = ToRegions::new(&nested_tree()).execute();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].holes.len(), 1);
        assert_eq!(regions[1].holes.len(), 1);
        assert!((regions[0].area() - (1600.0 - 900.0)).abs() < 1e-9);
        assert!((regions[1].area() - (400.0 - 100.0)).abs() < 1e-9);
    }

    #[test]
    fn regions_are_ccw_with_cw_holes() {
        for region in ToRegions::new(&nested_tree()).execute() {
            assert!(signed_area(&region.outer) > 0.0);
            for hole in &region.holes {
                assert!(signed_area(hole) < 0.0);
            }
        }
    }

    #[test]
    fn empty_tree_yields_no_regions() {
        assert!(ToRegions::new(&PolygonTree::new()).execute().is_empty());
    }

    #[test]
    fn area_is_preserved() {
        let tree = nested_tree();
        let total: f64 = ToRegions::new(&tree).execute().iter().map(Region::area).sum();
        assert!((total - tree.area()).abs() < 1e-9);
    }
}
