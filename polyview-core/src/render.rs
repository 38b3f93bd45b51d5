/// Drawing interface between the scene pipeline and a concrete surface
use std::fmt;

use crate::projection::ScreenPoint;

/// 24-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Face edges
pub const EDGE_COLOR: Color = Color::rgb(0x33, 0x33, 0x33);
/// Vertex markers
pub const VERTEX_COLOR: Color = Color::rgb(0xe7, 0x4c, 0x3c);
/// Rotation axis and its endpoints
pub const AXIS_COLOR: Color = Color::rgb(0xf3, 0x9c, 0x12);

pub const EDGE_WIDTH: f64 = 2.0;
pub const VERTEX_RADIUS: f64 = 4.0;
pub const AXIS_ENDPOINT_RADIUS: f64 = 5.0;
pub const AXIS_DASH: [f64; 2] = [5.0, 5.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
}

impl StrokeStyle {
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// A 2D drawing target
pub trait RenderSurface {
    type Error;

    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Stroke a polyline; when `closed`, the last point joins the first.
    fn stroke_polyline(
        &mut self,
        points: &[ScreenPoint],
        closed: bool,
        style: &StrokeStyle,
    ) -> Result<(), Self::Error>;

    fn fill_circle(
        &mut self,
        center: ScreenPoint,
        radius: f64,
        color: Color,
    ) -> Result<(), Self::Error>;

    /// Dash pattern for subsequent strokes; an empty slice restores solid lines.
    fn set_line_dash(&mut self, pattern: &[f64]) -> Result<(), Self::Error>;
}

/// One recorded call on a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Polyline {
        points: Vec<ScreenPoint>,
        closed: bool,
        style: StrokeStyle,
    },
    Circle {
        center: ScreenPoint,
        radius: f64,
        color: Color,
    },
    LineDash(Vec<f64>),
}

/// Surface that stores the draw calls it receives
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn polylines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polyline { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }
}

impl RenderSurface for RecordingSurface {
    type Error = std::convert::Infallible;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        Ok(())
    }

    fn stroke_polyline(
        &mut self,
        points: &[ScreenPoint],
        closed: bool,
        style: &StrokeStyle,
    ) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            closed,
            style: *style,
        });
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: ScreenPoint,
        radius: f64,
        color: Color,
    ) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
        Ok(())
    }

    fn set_line_dash(&mut self, pattern: &[f64]) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::LineDash(pattern.to_vec()));
        Ok(())
    }
}
