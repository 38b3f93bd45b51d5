/// Error taxonomy for the geometry core
use thiserror::Error;

/// Errors raised by polyhedron construction and scene selection.
///
/// Degenerate rotation axes and near-singular perspective divisors are not
/// errors; they are recovered where they occur.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid face index: face {face} refers to vertex {index}, but only {vertex_count} vertices exist")]
    InvalidFaceIndex {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("face {face} has {len} vertices; at least 3 are required")]
    DegenerateFace { face: usize, len: usize },

    #[error("polyhedron has no vertices")]
    EmptyPolyhedron,

    #[error("unknown axis '{0}' (expected x, y or z)")]
    UnknownAxis(String),

    #[error("unknown projection '{0}' (expected perspective or axonometric)")]
    UnknownProjection(String),

    #[error("unknown figure key {0} (expected 1..=5)")]
    UnknownFigure(u8),

    #[error("unknown figure '{0}' (expected 1..=5 or a solid name)")]
    UnknownFigureName(String),
}

pub type Result<T> = std::result::Result<T, GeometryError>;

/// Failure of one recompute-and-draw pass
#[derive(Debug, Error)]
pub enum RenderError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("render surface failed: {0}")]
    Surface(#[source] E),
}
