/// Projection of 3D points onto the 2D viewport
use std::f64::consts::FRAC_PI_6;
use std::fmt;
use std::str::FromStr;

use log::trace;
use nalgebra::Matrix4;

use crate::error::GeometryError;
use crate::geometry::Point;
use crate::transform::Transform;

/// Distance to the projection plane for the perspective mapping
pub const PERSPECTIVE_DISTANCE: f64 = 5.0;
/// Screen units per world unit in perspective mode
pub const PERSPECTIVE_SCALE: f64 = 100.0;
/// Lower bound for the perspective divisor
pub const MIN_PERSPECTIVE_W: f64 = 0.1;
/// Screen units per world unit in axonometric mode
pub const AXONOMETRIC_SCALE: f64 = 80.0;
/// Oblique angle of the axonometric mapping (30 degrees)
pub const AXONOMETRIC_ANGLE: f64 = FRAC_PI_6;

/// Size of the drawing area in screen units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(400.0, 400.0)
    }
}

/// A point on the viewport; y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    #[default]
    Perspective,
    Axonometric,
}

impl Projection {
    pub fn project(self, point: Point, viewport: Viewport) -> ScreenPoint {
        match self {
            Projection::Perspective => project_perspective(point, viewport),
            Projection::Axonometric => project_axonometric(point, viewport),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Projection::Perspective => "perspective",
            Projection::Axonometric => "axonometric",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Projection::Perspective => Projection::Axonometric,
            Projection::Axonometric => Projection::Perspective,
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Projection {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "perspective" => Ok(Projection::Perspective),
            "axonometric" => Ok(Projection::Axonometric),
            _ => Err(GeometryError::UnknownProjection(s.to_string())),
        }
    }
}

/// Perspective matrix: screen scale on x, flipped scale on y, `-1/c` in the last row
#[rustfmt::skip]
pub fn perspective_matrix() -> Matrix4<f64> {
    let s = PERSPECTIVE_SCALE;
    Matrix4::new(
        s, 0.0, 0.0, 0.0,
        0.0, -s, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, -1.0 / PERSPECTIVE_DISTANCE, 1.0,
    )
}

/// Fixed oblique matrix; the z row is flattened to zero
#[rustfmt::skip]
pub fn axonometric_matrix() -> Matrix4<f64> {
    let (s, c) = AXONOMETRIC_ANGLE.sin_cos();
    Matrix4::new(
        c, 0.0, -s, 0.0,
        s * s, c, c * s, 0.0,
        0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Perspective divide with the divisor clamped to `MIN_PERSPECTIVE_W`
pub fn project_perspective(point: Point, viewport: Viewport) -> ScreenPoint {
    let v = Transform::multiply_matrix_vector(&perspective_matrix(), point);
    let w = if v.w < MIN_PERSPECTIVE_W {
        trace!("perspective divisor {} clamped for {:?}", v.w, point);
        MIN_PERSPECTIVE_W
    } else {
        v.w
    };
    let origin = viewport.center();
    ScreenPoint::new(v.x / w + origin.x, v.y / w + origin.y)
}

pub fn project_axonometric(point: Point, viewport: Viewport) -> ScreenPoint {
    let v = Transform::multiply_matrix_vector(&axonometric_matrix(), point);
    let origin = viewport.center();
    ScreenPoint::new(
        v.x * AXONOMETRIC_SCALE + origin.x,
        origin.y - v.y * AXONOMETRIC_SCALE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perspective_cube_corner() {
        let p = project_perspective(Point::new(1.0, 1.0, 1.0), Viewport::new(400.0, 400.0));
        assert_relative_eq!(p.x, 325.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 75.0, epsilon = 1e-9);
    }

    #[test]
    fn test_perspective_origin_maps_to_center() {
        let p = project_perspective(Point::origin(), Viewport::new(640.0, 480.0));
        assert_eq!(p, ScreenPoint::new(320.0, 240.0));
    }

    #[test]
    fn test_perspective_clamps_points_behind_plane() {
        let viewport = Viewport::new(400.0, 400.0);
        // w = -z/5 + 1 = -1 without the clamp.
        let p = project_perspective(Point::new(1.0, 0.0, 10.0), viewport);
        assert_relative_eq!(p.x, 100.0 / 0.1 + 200.0, epsilon = 1e-9);
        // Exactly on the plane: w = 0.
        let q = project_perspective(Point::new(0.0, 1.0, 5.0), viewport);
        assert_relative_eq!(q.y, -100.0 / 0.1 + 200.0, epsilon = 1e-9);
        assert!(q.y.is_finite());
    }

    #[test]
    fn test_perspective_far_points_shrink() {
        let viewport = Viewport::default();
        let near = project_perspective(Point::new(1.0, 0.0, 0.0), viewport);
        let far = project_perspective(Point::new(1.0, 0.0, -5.0), viewport);
        assert_relative_eq!(near.x - 200.0, 100.0, epsilon = 1e-9);
        assert_relative_eq!(far.x - 200.0, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_axonometric_axes() {
        let viewport = Viewport::new(400.0, 400.0);
        let (s, c) = AXONOMETRIC_ANGLE.sin_cos();

        let x = project_axonometric(Point::new(1.0, 0.0, 0.0), viewport);
        assert_relative_eq!(x.x, 200.0 + 80.0 * c, epsilon = 1e-9);
        assert_relative_eq!(x.y, 200.0 - 80.0 * s * s, epsilon = 1e-9);

        let y = project_axonometric(Point::new(0.0, 1.0, 0.0), viewport);
        assert_relative_eq!(y.x, 200.0, epsilon = 1e-9);
        assert_relative_eq!(y.y, 200.0 - 80.0 * c, epsilon = 1e-9);

        let z = project_axonometric(Point::new(0.0, 0.0, 1.0), viewport);
        assert_relative_eq!(z.x, 200.0 - 80.0 * s, epsilon = 1e-9);
        assert_relative_eq!(z.y, 200.0 - 80.0 * c * s, epsilon = 1e-9);
    }

    #[test]
    fn test_projection_dispatch_and_parse() {
        let viewport = Viewport::default();
        let p = Point::new(0.3, -0.7, 0.2);
        assert_eq!(Projection::Perspective.project(p, viewport), project_perspective(p, viewport));
        assert_eq!(Projection::Axonometric.project(p, viewport), project_axonometric(p, viewport));
        assert_eq!("Axonometric".parse::<Projection>().unwrap(), Projection::Axonometric);
        assert!("isometric".parse::<Projection>().is_err());
        assert_eq!(Projection::Perspective.toggled(), Projection::Axonometric);
    }
}
