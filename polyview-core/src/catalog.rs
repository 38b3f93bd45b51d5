/// The five convex regular solids offered by the viewer
use std::fmt;
use std::str::FromStr;

use crate::error::{GeometryError, Result};
use crate::geometry::Polyhedron;

/// Selectable solids, keyed 1..=5 in the order the viewer lists them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolyhedronKind {
    Tetrahedron,
    #[default]
    Cube,
    Octahedron,
    Icosahedron,
    Dodecahedron,
}

impl PolyhedronKind {
    pub const ALL: [PolyhedronKind; 5] = [
        PolyhedronKind::Tetrahedron,
        PolyhedronKind::Cube,
        PolyhedronKind::Octahedron,
        PolyhedronKind::Icosahedron,
        PolyhedronKind::Dodecahedron,
    ];

    pub fn from_key(key: u8) -> Result<Self> {
        match key {
            1 => Ok(Self::Tetrahedron),
            2 => Ok(Self::Cube),
            3 => Ok(Self::Octahedron),
            4 => Ok(Self::Icosahedron),
            5 => Ok(Self::Dodecahedron),
            other => Err(GeometryError::UnknownFigure(other)),
        }
    }

    pub fn key(self) -> u8 {
        match self {
            Self::Tetrahedron => 1,
            Self::Cube => 2,
            Self::Octahedron => 3,
            Self::Icosahedron => 4,
            Self::Dodecahedron => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Tetrahedron => "tetrahedron",
            Self::Cube => "cube",
            Self::Octahedron => "octahedron",
            Self::Icosahedron => "icosahedron",
            Self::Dodecahedron => "dodecahedron",
        }
    }

    /// Construct the solid from its vertex and face tables
    pub fn build(self) -> Result<Polyhedron> {
        match self {
            Self::Tetrahedron => tetrahedron(),
            Self::Cube => cube(),
            Self::Octahedron => octahedron(),
            Self::Icosahedron => icosahedron(),
            Self::Dodecahedron => dodecahedron(),
        }
    }
}

impl fmt::Display for PolyhedronKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolyhedronKind {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(key) = s.parse::<u8>() {
            return Self::from_key(key);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GeometryError::UnknownFigureName(s.to_string()))
    }
}

/// All five solids, built once
#[derive(Debug, Clone)]
pub struct Catalog {
    solids: Vec<Polyhedron>,
}

impl Catalog {
    pub fn new() -> Result<Self> {
        let solids = PolyhedronKind::ALL
            .into_iter()
            .map(PolyhedronKind::build)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { solids })
    }

    pub fn get(&self, kind: PolyhedronKind) -> &Polyhedron {
        &self.solids[kind as usize]
    }
}

fn tetrahedron() -> Result<Polyhedron> {
    let a = (8.0_f64 / 3.0).sqrt();
    let b = (8.0_f64 / 9.0).sqrt();
    let c = (2.0_f64 / 3.0).sqrt();
    let d = 2.0_f64.sqrt();
    let vertices = [[0.0, 0.0, a], [a, 0.0, -b], [-c, d, -b], [-c, -d, -b]];
    let faces = [[0usize, 1, 2], [0, 2, 3], [0, 3, 1], [1, 3, 2]];
    Polyhedron::from_tables(&vertices, &faces)
}

fn cube() -> Result<Polyhedron> {
    let vertices = [
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0],
    ];
    let faces = [
        [0usize, 1, 2, 3],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [2, 3, 7, 6],
        [0, 3, 7, 4],
        [1, 2, 6, 5],
    ];
    Polyhedron::from_tables(&vertices, &faces)
}

fn octahedron() -> Result<Polyhedron> {
    let vertices = [
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, -1.0],
    ];
    let faces = [
        [0usize, 1, 2],
        [0, 2, 3],
        [0, 3, 4],
        [0, 4, 1],
        [5, 1, 2],
        [5, 2, 3],
        [5, 3, 4],
        [5, 4, 1],
    ];
    Polyhedron::from_tables(&vertices, &faces)
}

fn golden_ratio() -> f64 {
    (1.0 + 5.0_f64.sqrt()) / 2.0
}

fn icosahedron() -> Result<Polyhedron> {
    let t = golden_ratio();
    let vertices = [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ];
    let faces = [
        [0usize, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];
    Polyhedron::from_tables(&vertices, &faces)
}

fn dodecahedron() -> Result<Polyhedron> {
    let t = golden_ratio();
    let r = 1.0 / t;

    // Cube corners first, then the three golden rectangles.
    let mut vertices = Vec::with_capacity(20);
    for sx in [1.0, -1.0] {
        for sy in [1.0, -1.0] {
            for sz in [1.0, -1.0] {
                vertices.push([sx, sy, sz]);
            }
        }
    }
    vertices.extend_from_slice(&[
        [0.0, r, t],
        [0.0, r, -t],
        [0.0, -r, t],
        [0.0, -r, -t],
        [r, t, 0.0],
        [r, -t, 0.0],
        [-r, t, 0.0],
        [-r, -t, 0.0],
        [t, 0.0, r],
        [t, 0.0, -r],
        [-t, 0.0, r],
        [-t, 0.0, -r],
    ]);

    let faces = [
        [0usize, 8, 10, 2, 16],
        [0, 16, 18, 1, 9],
        [0, 9, 11, 3, 8],
        [1, 13, 15, 3, 9],
        [1, 18, 19, 5, 13],
        [2, 10, 12, 4, 17],
        [2, 17, 19, 5, 16],
        [3, 11, 14, 6, 15],
        [4, 12, 14, 6, 7],
        [4, 7, 19, 5, 17],
        [6, 7, 18, 1, 15],
        [7, 18, 16, 2, 17],
    ];
    Polyhedron::from_tables(&vertices, &faces)
}
