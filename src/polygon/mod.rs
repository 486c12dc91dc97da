//! Integer-coordinate polygon booleans producing nested polygon trees.

mod backend;
mod difference;
mod offset;
mod path;
mod tree;
mod union;

pub use difference::Difference;
pub use offset::Offset;
pub use path::{IntPoint, Orientation, Path, PointLocation};
pub use tree::{PolygonTree, TreeNode};
pub use union::Union;

/// Corner treatment for offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinStyle {
    #[default]
    Round,
    Square,
    Miter,
}
