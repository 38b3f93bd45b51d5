/// Geometry primitives: points, faces and polyhedra
use std::ops::{Add, Div, Sub};

use nalgebra::Vector4;

use crate::error::{GeometryError, Result};

/// A point (or offset) in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Euclidean length when the point is read as a vector from the origin
    pub fn norm(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Homogeneous form `(x, y, z, 1)`
    pub fn to_homogeneous(self) -> Vector4<f64> {
        Vector4::new(self.x, self.y, self.z, 1.0)
    }

    /// Drop the fourth component of a homogeneous vector.
    ///
    /// No division by `w` happens here; projections do that themselves.
    pub fn from_homogeneous(v: &Vector4<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    pub fn approx_eq(self, other: Point, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.z - other.z).abs() <= epsilon
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl From<[f64; 3]> for Point {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Point::new(x, y, z)
    }
}

/// A polygonal face, given as indices into the owning polyhedron's vertices.
///
/// The boundary is implicitly closed: the last index connects back to the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    pub fn vertex_indices(&self) -> &[usize] {
        &self.indices
    }
}

/// A convex polyhedron with a cached centroid.
///
/// Immutable after construction, so `center` always matches `vertices`.
#[derive(Debug, PartialEq)]
pub struct Polyhedron {
    vertices: Vec<Point>,
    faces: Vec<Face>,
    center: Point,
}

impl Polyhedron {
    /// Build a polyhedron, checking every face against the vertex list.
    pub fn new(vertices: Vec<Point>, faces: Vec<Face>) -> Result<Self> {
        if vertices.is_empty() {
            return Err(GeometryError::EmptyPolyhedron);
        }

        for (face_idx, face) in faces.iter().enumerate() {
            let len = face.vertex_indices().len();
            if len < 3 {
                return Err(GeometryError::DegenerateFace { face: face_idx, len });
            }
            if let Some(&index) = face.vertex_indices().iter().find(|&&i| i >= vertices.len()) {
                return Err(GeometryError::InvalidFaceIndex {
                    face: face_idx,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }

        let center = centroid(&vertices);
        Ok(Self {
            vertices,
            faces,
            center,
        })
    }

    /// Build from raw coordinate and index tables
    pub fn from_tables<F: AsRef<[usize]>>(vertices: &[[f64; 3]], faces: &[F]) -> Result<Self> {
        Self::new(
            vertices.iter().copied().map(Point::from).collect(),
            faces.iter().map(|f| Face::new(f.as_ref().to_vec())).collect(),
        )
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

impl Clone for Polyhedron {
    /// Deep copy; the centroid is recomputed from the copied vertices.
    fn clone(&self) -> Self {
        let vertices = self.vertices.clone();
        let center = centroid(&vertices);
        Self {
            vertices,
            faces: self.faces.clone(),
            center,
        }
    }
}

/// Unweighted mean of the given points. Callers guarantee a non-empty slice.
fn centroid(points: &[Point]) -> Point {
    let sum = points.iter().fold(Point::origin(), |acc, &p| acc + p);
    sum / points.len() as f64
}
