/// Homogeneous 4x4 transformation matrices
use std::fmt;
use std::str::FromStr;

use log::debug;
use nalgebra::{Matrix4, Vector4};

use crate::error::GeometryError;
use crate::geometry::Point;

/// Coordinate axis a parallel-axis rotation runs along.
///
/// The two perpendicular offsets apply to the remaining coordinates in
/// ascending order: (y, z) for X, (x, z) for Y, (x, y) for Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParallelAxis {
    #[default]
    X,
    Y,
    Z,
}

impl ParallelAxis {
    /// Point on the rotation line: `center` shifted by the two perpendicular offsets
    pub fn offset_point(self, center: Point, offset1: f64, offset2: f64) -> Point {
        let offset = match self {
            ParallelAxis::X => Point::new(0.0, offset1, offset2),
            ParallelAxis::Y => Point::new(offset1, 0.0, offset2),
            ParallelAxis::Z => Point::new(offset1, offset2, 0.0),
        };
        center + offset
    }

    /// Unit vector along the axis
    pub fn direction(self) -> Point {
        match self {
            ParallelAxis::X => Point::new(1.0, 0.0, 0.0),
            ParallelAxis::Y => Point::new(0.0, 1.0, 0.0),
            ParallelAxis::Z => Point::new(0.0, 0.0, 1.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ParallelAxis::X => "x",
            ParallelAxis::Y => "y",
            ParallelAxis::Z => "z",
        }
    }

    /// Next axis in x -> y -> z -> x order
    pub fn next(self) -> Self {
        match self {
            ParallelAxis::X => ParallelAxis::Y,
            ParallelAxis::Y => ParallelAxis::Z,
            ParallelAxis::Z => ParallelAxis::X,
        }
    }
}

impl fmt::Display for ParallelAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParallelAxis {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(ParallelAxis::X),
            "y" => Ok(ParallelAxis::Y),
            "z" => Ok(ParallelAxis::Z),
            _ => Err(GeometryError::UnknownAxis(s.to_string())),
        }
    }
}

/// Transform builder for 3D transformations.
///
/// All matrices act on column vectors: `v' = M * v`.
pub struct Transform;

impl Transform {
    pub fn identity() -> Matrix4<f64> {
        Matrix4::identity()
    }

    /// Rotation about the X axis (radians)
    #[rustfmt::skip]
    pub fn rotation_x(angle: f64) -> Matrix4<f64> {
        let (s, c) = angle.sin_cos();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c, -s, 0.0,
            0.0, s, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about the Y axis (radians)
    #[rustfmt::skip]
    pub fn rotation_y(angle: f64) -> Matrix4<f64> {
        let (s, c) = angle.sin_cos();
        Matrix4::new(
            c, 0.0, s, 0.0,
            0.0, 1.0, 0.0, 0.0,
            -s, 0.0, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about the Z axis (radians)
    #[rustfmt::skip]
    pub fn rotation_z(angle: f64) -> Matrix4<f64> {
        let (s, c) = angle.sin_cos();
        Matrix4::new(
            c, -s, 0.0, 0.0,
            s, c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Uniform scale about the origin
    #[rustfmt::skip]
    pub fn scale(factor: f64) -> Matrix4<f64> {
        Matrix4::new(
            factor, 0.0, 0.0, 0.0,
            0.0, factor, 0.0, 0.0,
            0.0, 0.0, factor, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    #[rustfmt::skip]
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Matrix4<f64> {
        Matrix4::new(
            1.0, 0.0, 0.0, dx,
            0.0, 1.0, 0.0, dy,
            0.0, 0.0, 1.0, dz,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Mirror through the coordinate planes whose flags are set.
    ///
    /// XY negates z, XZ negates y, YZ negates x.
    pub fn reflection(about_xy: bool, about_xz: bool, about_yz: bool) -> Matrix4<f64> {
        let mut m = Self::identity();
        if about_xy {
            m[(2, 2)] = -1.0;
        }
        if about_xz {
            m[(1, 1)] = -1.0;
        }
        if about_yz {
            m[(0, 0)] = -1.0;
        }
        m
    }

    /// Matrix product `a * b`. Not commutative.
    pub fn multiply_matrices(a: &Matrix4<f64>, b: &Matrix4<f64>) -> Matrix4<f64> {
        a * b
    }

    /// Apply `m` to `(x, y, z, 1)` and return the full homogeneous result
    pub fn multiply_matrix_vector(m: &Matrix4<f64>, v: Point) -> Vector4<f64> {
        m * v.to_homogeneous()
    }

    /// Uniform scale that keeps `center` fixed
    pub fn scale_around_center(factor: f64, center: Point) -> Matrix4<f64> {
        Self::about_pivot(center, &Self::scale(factor))
    }

    /// Rotation by `angle` about the line through `a` and `b` (Rodrigues).
    ///
    /// Returns the identity when `a == b`.
    pub fn rotation_around_line(a: Point, b: Point, angle: f64) -> Matrix4<f64> {
        let d = b - a;
        let length = d.norm();
        if length == 0.0 {
            debug!("rotation axis through {:?} has zero length; using identity", a);
            return Self::identity();
        }

        let (l, m, n) = (d.x / length, d.y / length, d.z / length);
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;

        #[rustfmt::skip]
        let rotation = Matrix4::new(
            l * l * t + c, m * l * t - n * s, n * l * t + m * s, 0.0,
            l * m * t + n * s, m * m * t + c, n * m * t - l * s, 0.0,
            l * n * t - m * s, m * n * t + l * s, n * n * t + c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        Self::about_pivot(a, &rotation)
    }

    /// Rotation about the line parallel to `axis` through `center`, shifted
    /// by two perpendicular offsets.
    pub fn rotation_around_parallel_axis(
        axis: ParallelAxis,
        angle: f64,
        offset1: f64,
        offset2: f64,
        center: Point,
    ) -> Matrix4<f64> {
        let on_line = axis.offset_point(center, offset1, offset2);
        let along = on_line + axis.direction();
        Self::rotation_around_line(on_line, along, angle)
    }

    /// Move `pivot` to the origin, apply `linear`, move back
    fn about_pivot(pivot: Point, linear: &Matrix4<f64>) -> Matrix4<f64> {
        let to_origin = Self::translation(-pivot.x, -pivot.y, -pivot.z);
        let back = Self::translation(pivot.x, pivot.y, pivot.z);
        Self::multiply_matrices(&Self::multiply_matrices(&back, linear), &to_origin)
    }
}
