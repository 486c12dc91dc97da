pub mod builder;
pub mod config;
pub mod error;
pub mod export;
pub mod extrude;
pub mod math;
pub mod outline;
pub mod polygon;
pub mod primitives;
pub mod shape;
pub mod workbench;

pub use error::{KeysmithError, Result};
