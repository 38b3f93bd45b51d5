//! TOML startup configuration for the terminal viewer.

use anyhow::{Context, Result};
use log::warn;
use polyview_core::{
    GeometryError, ParallelAxis, Point, PolyhedronKind, Projection, TransformParameters, Viewport,
};
use serde::Deserialize;
use std::path::Path;

/// Top-level viewer configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub scene: SceneConfig,
    pub transform: TransformConfig,
}

/// Figure, projection and virtual viewport.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Catalog key, 1..=5.
    pub figure: u8,
    /// "perspective" or "axonometric".
    pub projection: String,
    pub width: f64,
    pub height: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            figure: PolyhedronKind::Cube.key(),
            projection: Projection::Perspective.name().into(),
            width: 400.0,
            height: 400.0,
        }
    }
}

/// Initial transform parameters. Angles are in degrees.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub rotate_z: f64,
    pub scale: f64,
    pub translate: [f64; 3],
    pub reflect_xy: bool,
    pub reflect_xz: bool,
    pub reflect_yz: bool,
    pub line_a: [f64; 3],
    pub line_b: [f64; 3],
    pub line_angle: f64,
    pub parallel_axis: String,
    pub parallel_offsets: [f64; 2],
    pub parallel_angle: f64,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            rotate_x: 0.0,
            rotate_y: 0.0,
            rotate_z: 0.0,
            scale: 1.0,
            translate: [0.0; 3],
            reflect_xy: false,
            reflect_xz: false,
            reflect_yz: false,
            line_a: [0.0, 0.0, 0.0],
            line_b: [1.0, 0.0, 0.0],
            line_angle: 0.0,
            parallel_axis: "x".into(),
            parallel_offsets: [0.0; 2],
            parallel_angle: 0.0,
        }
    }
}

pub fn load_config(path: &Path) -> Result<ViewerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    parse_config(&content).with_context(|| format!("invalid config file: {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<ViewerConfig> {
    let config: ViewerConfig = toml::from_str(content)?;
    Ok(config)
}

fn finite_or(name: &str, value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        warn!("ignoring non-finite {name} = {value}, using {fallback}");
        fallback
    }
}

impl ViewerConfig {
    pub fn figure(&self) -> Result<PolyhedronKind, GeometryError> {
        PolyhedronKind::from_key(self.scene.figure)
    }

    pub fn projection(&self) -> Result<Projection, GeometryError> {
        self.scene.projection.parse()
    }

    pub fn viewport(&self) -> Viewport {
        let default = SceneConfig::default();
        let dim = |name: &str, value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                warn!("ignoring {name} = {value}, using {fallback}");
                fallback
            }
        };
        Viewport::new(
            dim("width", self.scene.width, default.width),
            dim("height", self.scene.height, default.height),
        )
    }

    /// Convert to the core snapshot, degrees to radians.
    pub fn params(&self) -> Result<TransformParameters, GeometryError> {
        let t = &self.transform;
        let d = TransformParameters::default();
        let point = |name: &str, [x, y, z]: [f64; 3], fallback: Point| {
            Point::new(
                finite_or(name, x, fallback.x),
                finite_or(name, y, fallback.y),
                finite_or(name, z, fallback.z),
            )
        };
        let angle = |name: &str, degrees: f64| finite_or(name, degrees, 0.0).to_radians();
        let axis: ParallelAxis = t.parallel_axis.parse()?;

        Ok(TransformParameters {
            rotate_x: angle("rotate_x", t.rotate_x),
            rotate_y: angle("rotate_y", t.rotate_y),
            rotate_z: angle("rotate_z", t.rotate_z),
            scale: finite_or("scale", t.scale, d.scale),
            translate_x: finite_or("translate", t.translate[0], 0.0),
            translate_y: finite_or("translate", t.translate[1], 0.0),
            translate_z: finite_or("translate", t.translate[2], 0.0),
            reflect_xy: t.reflect_xy,
            reflect_xz: t.reflect_xz,
            reflect_yz: t.reflect_yz,
            line_a: point("line_a", t.line_a, d.line_a),
            line_b: point("line_b", t.line_b, d.line_b),
            line_angle: angle("line_angle", t.line_angle),
            parallel_axis: axis,
            parallel_offset1: finite_or("parallel_offsets", t.parallel_offsets[0], 0.0),
            parallel_offset2: finite_or("parallel_offsets", t.parallel_offsets[1], 0.0),
            parallel_angle: angle("parallel_angle", t.parallel_angle),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.figure().unwrap(), PolyhedronKind::Cube);
        assert_eq!(config.projection().unwrap(), Projection::Perspective);
        assert_eq!(config.viewport(), Viewport::new(400.0, 400.0));
        assert_eq!(config.params().unwrap(), TransformParameters::default());
    }

    #[test]
    fn test_full_config() {
        let config = parse_config(
            r#"
            [scene]
            figure = 4
            projection = "axonometric"
            width = 800
            height = 600

            [transform]
            rotate_z = 90
            scale = 1.5
            translate = [1.0, 0.0, -2.0]
            reflect_xz = true
            line_a = [0.0, 0.0, 0.0]
            line_b = [0.0, 0.0, 1.0]
            line_angle = 45
            parallel_axis = "Z"
            parallel_offsets = [0.5, -0.5]
            parallel_angle = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.figure().unwrap(), PolyhedronKind::Icosahedron);
        assert_eq!(config.projection().unwrap(), Projection::Axonometric);
        assert_eq!(config.viewport(), Viewport::new(800.0, 600.0));

        let params = config.params().unwrap();
        assert!((params.rotate_z - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(params.scale, 1.5);
        assert_eq!(params.translate_z, -2.0);
        assert!(params.reflect_xz);
        assert_eq!(params.line_b, Point::new(0.0, 0.0, 1.0));
        assert!((params.line_angle - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        assert_eq!(params.parallel_axis, ParallelAxis::Z);
        assert_eq!(params.parallel_offset2, -0.5);
    }

    #[test]
    fn test_bad_values_are_reported() {
        let config = parse_config("[scene]\nfigure = 7\nprojection = \"fisheye\"").unwrap();
        assert_eq!(config.figure().unwrap_err(), GeometryError::UnknownFigure(7));
        assert!(config.projection().is_err());

        let config = parse_config("[transform]\nparallel_axis = \"w\"").unwrap();
        assert!(config.params().is_err());
    }

    #[test]
    fn test_nonpositive_viewport_falls_back() {
        let config = parse_config("[scene]\nwidth = 0\nheight = -3").unwrap();
        assert_eq!(config.viewport(), Viewport::new(400.0, 400.0));
    }

    #[test]
    fn test_unknown_key_type_is_an_error() {
        assert!(parse_config("[scene]\nfigure = \"cube\"").is_err());
    }
}
