/// ASCII canvas for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use polyview_core::{RenderSurface, ScreenPoint, StrokeStyle, Viewport};
use std::convert::Infallible;
use std::io::Write;

const VERTEX_CHAR: char = 'o';

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Option<Color>,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        color: None,
    };
}

/// Character grid that maps a virtual viewport onto terminal cells
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    viewport: Viewport,
    cells: Vec<Cell>,
    dash: Vec<f64>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize, viewport: Viewport) -> Self {
        Self {
            width,
            height,
            viewport,
            cells: vec![Cell::BLANK; width * height],
            dash: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::BLANK; width * height];
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Character at a cell, `None` outside the grid
    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x].ch)
    }

    pub fn lines(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|c| c.ch).collect())
            .collect()
    }

    /// Queue the grid, starting at terminal row `top`
    pub fn draw<W: Write>(&self, writer: &mut W, top: u16) -> std::io::Result<()> {
        let mut current: Option<Color> = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, top + y as u16))?;
            for cell in &self.cells[y * self.width..(y + 1) * self.width] {
                if cell.color != current {
                    match cell.color {
                        Some(color) => writer.queue(SetForegroundColor(color))?,
                        None => writer.queue(ResetColor)?,
                    };
                    current = cell.color;
                }
                writer.queue(Print(cell.ch))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    /// Viewport units to fractional cell coordinates
    fn to_cell(&self, p: ScreenPoint) -> (f64, f64) {
        (
            p.x / self.viewport.width * self.width as f64,
            p.y / self.viewport.height * self.height as f64,
        )
    }

    fn plot(&mut self, cx: f64, cy: f64, ch: char, color: Color) {
        if cx < 0.0 || cy < 0.0 {
            return;
        }
        let (x, y) = (cx.floor() as usize, cy.floor() as usize);
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = Cell {
                ch,
                color: Some(color),
            };
        }
    }

    /// Whether `distance` (viewport units along a stroke) falls on a dash
    fn dash_on(&self, distance: f64) -> bool {
        let period: f64 = self.dash.iter().sum();
        if self.dash.is_empty() || period <= 0.0 {
            return true;
        }
        let mut pos = distance % period;
        for (i, len) in self.dash.iter().enumerate() {
            if pos < *len {
                return i % 2 == 0;
            }
            pos -= len;
        }
        true
    }

    fn segment(&mut self, a: ScreenPoint, b: ScreenPoint, offset: f64, color: Color) -> f64 {
        let length = ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt();
        let (ax, ay) = self.to_cell(a);
        let (bx, by) = self.to_cell(b);
        let (dx, dy) = (bx - ax, by - ay);
        let ch = line_char(dx, dy);

        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            if self.dash_on(offset + t * length) {
                self.plot(ax + t * dx, ay + t * dy, ch, color);
            }
        }
        offset + length
    }
}

/// Glyph for a stroke direction in cell space (y grows downward)
fn line_char(dx: f64, dy: f64) -> char {
    if dx == 0.0 && dy == 0.0 {
        return '.';
    }
    // Terminal cells are roughly twice as tall as they are wide.
    let angle = (dy * 2.0).atan2(dx).to_degrees().rem_euclid(180.0);
    match angle {
        a if !(22.5..157.5).contains(&a) => '-',
        a if a < 67.5 => '\\',
        a if a < 112.5 => '|',
        _ => '/',
    }
}

/// Very dark canvas colours are unreadable on a dark terminal; lift them to grey.
fn terminal_color(color: polyview_core::Color) -> Color {
    if color.r < 0x60 && color.g < 0x60 && color.b < 0x60 {
        Color::Grey
    } else {
        Color::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }
}

impl RenderSurface for AsciiRenderer {
    type Error = Infallible;

    fn clear(&mut self) -> Result<(), Infallible> {
        self.cells.fill(Cell::BLANK);
        Ok(())
    }

    fn stroke_polyline(
        &mut self,
        points: &[ScreenPoint],
        closed: bool,
        style: &StrokeStyle,
    ) -> Result<(), Infallible> {
        let color = terminal_color(style.color);
        let mut travelled = 0.0;
        for pair in points.windows(2) {
            travelled = self.segment(pair[0], pair[1], travelled, color);
        }
        if closed && points.len() > 2 {
            self.segment(points[points.len() - 1], points[0], travelled, color);
        }
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: ScreenPoint,
        radius: f64,
        color: polyview_core::Color,
    ) -> Result<(), Infallible> {
        let color = terminal_color(color);
        let (cx, cy) = self.to_cell(center);
        let rx = radius / self.viewport.width * self.width as f64;
        let ry = radius / self.viewport.height * self.height as f64;

        self.plot(cx, cy, VERTEX_CHAR, color);
        let (x0, x1) = ((cx - rx).floor() as i64, (cx + rx).ceil() as i64);
        let (y0, y1) = ((cy - ry).floor() as i64, (cy + ry).ceil() as i64);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let nx = (x as f64 + 0.5 - cx) / rx.max(f64::EPSILON);
                let ny = (y as f64 + 0.5 - cy) / ry.max(f64::EPSILON);
                if nx * nx + ny * ny <= 1.0 {
                    self.plot(x as f64, y as f64, VERTEX_CHAR, color);
                }
            }
        }
        Ok(())
    }

    fn set_line_dash(&mut self, pattern: &[f64]) -> Result<(), Infallible> {
        self.dash = pattern.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyview_core::render::{AXIS_DASH, EDGE_COLOR};

    fn renderer() -> AsciiRenderer {
        // One cell per 10 viewport units.
        AsciiRenderer::new(40, 20, Viewport::new(400.0, 200.0))
    }

    #[test]
    fn test_horizontal_stroke() {
        let mut r = renderer();
        let style = StrokeStyle::new(EDGE_COLOR, 2.0);
        r.stroke_polyline(
            &[ScreenPoint::new(5.0, 55.0), ScreenPoint::new(95.0, 55.0)],
            false,
            &style,
        )
        .unwrap();
        let row = &r.lines()[5];
        assert_eq!(&row[0..10], "----------");
        assert_eq!(r.char_at(10, 5), Some(' '));
    }

    #[test]
    fn test_closed_outline_returns_to_start() {
        let mut r = renderer();
        let style = StrokeStyle::new(EDGE_COLOR, 2.0);
        let square = [
            ScreenPoint::new(15.0, 15.0),
            ScreenPoint::new(95.0, 15.0),
            ScreenPoint::new(95.0, 95.0),
            ScreenPoint::new(15.0, 95.0),
        ];
        r.stroke_polyline(&square, true, &style).unwrap();
        // Left edge comes only from the closing segment.
        assert_eq!(r.char_at(1, 5), Some('|'));
        assert_eq!(r.char_at(9, 5), Some('|'));
        assert_eq!(r.char_at(5, 1), Some('-'));
    }

    #[test]
    fn test_dashed_stroke_has_gaps() {
        let mut r = renderer();
        let style = StrokeStyle::new(EDGE_COLOR, 2.0);
        r.set_line_dash(&[20.0, 20.0]).unwrap();
        r.stroke_polyline(
            &[ScreenPoint::new(5.0, 5.0), ScreenPoint::new(395.0, 5.0)],
            false,
            &style,
        )
        .unwrap();
        let row = &r.lines()[0];
        assert!(row.contains('-'));
        assert!(row.trim().contains(' '));

        r.set_line_dash(&[]).unwrap();
        r.clear().unwrap();
        r.stroke_polyline(
            &[ScreenPoint::new(5.0, 5.0), ScreenPoint::new(395.0, 5.0)],
            false,
            &style,
        )
        .unwrap();
        assert_eq!(r.lines()[0], "-".repeat(40));
    }

    #[test]
    fn test_dash_pattern_phase() {
        let mut r = renderer();
        r.set_line_dash(&AXIS_DASH).unwrap();
        assert!(r.dash_on(0.0));
        assert!(r.dash_on(4.9));
        assert!(!r.dash_on(5.1));
        assert!(r.dash_on(10.2));
    }

    #[test]
    fn test_circle_marks_center_and_clips() {
        let mut r = renderer();
        r.fill_circle(ScreenPoint::new(205.0, 105.0), 4.0, EDGE_COLOR)
            .unwrap();
        assert_eq!(r.char_at(20, 10), Some(VERTEX_CHAR));
        // Off-grid markers are silently dropped.
        r.fill_circle(ScreenPoint::new(-50.0, 900.0), 4.0, EDGE_COLOR)
            .unwrap();
    }

    #[test]
    fn test_line_glyphs() {
        assert_eq!(line_char(1.0, 0.0), '-');
        assert_eq!(line_char(0.0, 1.0), '|');
        assert_eq!(line_char(1.0, 1.0), '\\');
        assert_eq!(line_char(1.0, -1.0), '/');
        assert_eq!(line_char(-1.0, 0.0), '-');
    }

    #[test]
    fn test_draw_writes_every_row() {
        let r = AsciiRenderer::new(3, 2, Viewport::new(30.0, 20.0));
        let mut out = Vec::new();
        r.draw(&mut out, 2).unwrap();
        assert!(!out.is_empty());
    }
}
