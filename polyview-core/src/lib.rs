/// Polyview Core Library - transformation engine for wireframe polyhedra
///
/// This library provides the stateless core: homogeneous transformation
/// matrices, perspective and axonometric projections, the catalog of regular
/// solids, and the scene pipeline that turns a parameter snapshot into draw
/// calls on a render surface.

pub mod catalog;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod render;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use catalog::{Catalog, PolyhedronKind};
pub use error::{GeometryError, RenderError};
pub use geometry::{Face, Point, Polyhedron};
pub use projection::{Projection, ScreenPoint, Viewport};
pub use render::{Color, DrawCommand, RecordingSurface, RenderSurface, StrokeStyle};
pub use scene::{Frame, Scene, StageKind, TransformParameters, TransformStage};
pub use transform::{ParallelAxis, Transform};
