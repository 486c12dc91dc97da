use thiserror::Error;

/// Top-level error type for keysmith.
#[derive(Debug, Error)]
pub enum KeysmithError {
    #[error(transparent)]
    Polygon(#[from] PolygonError),

    #[error(transparent)]
    Outline(#[from] OutlineError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Errors raised by the polygon engine.
#[derive(Debug, Error)]
pub enum PolygonError {
    #[error("degenerate path: {points} usable points (at least 3 required)")]
    DegenerateInput { points: usize },
}

/// Errors raised by glyph outline providers.
#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("font could not be parsed: {0}")]
    FontParse(String),

    #[error("invalid outline request: {0}")]
    InvalidRequest(String),
}

/// Errors related to cap triangulation and extrusion.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid extrusion parameters: {0}")]
    InvalidParameters(String),

    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Errors raised while assembling a composite.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("parameter {parameter} = {value} is invalid: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("layer {0} produced no geometry")]
    EmptyLayer(String),
}

/// Errors raised while exporting a composite.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("composite contains no triangles")]
    EmptyComposite,

    #[error("STL buffer of {len} bytes is not above the {min}-byte minimum")]
    TooSmall { len: usize, min: usize },

    #[error("malformed STL buffer: {0}")]
    Malformed(String),

    #[error("export not permitted: {0}")]
    GateDenied(String),
}

/// Convenience type alias for results using [`KeysmithError`].
pub type Result<T> = std::result::Result<T, KeysmithError>;
