//! Conversion of polygon trees into extrudable filled regions.

mod reconstruct;
mod region;

pub use reconstruct::ToRegions;
pub use region::Region;
