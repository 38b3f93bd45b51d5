/// Polyview Web - HTML canvas front end compiled to WASM
///
/// `CanvasSurface` implements the core render surface on a 2D canvas context;
/// `WebViewer` exposes one setter per transform parameter so page controls can
/// drive the scene. Angles arrive in degrees, as the page sliders show them.

use polyview_core::{
    Color, ParallelAxis, Point, Projection, RenderSurface, Scene, ScreenPoint,
    StrokeStyle, TransformParameters, Viewport,
};
use std::f64::consts::TAU;
use std::fmt;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// A failed canvas call, carrying the JS exception text
#[derive(Debug)]
pub struct CanvasError(String);

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "canvas error: {}", self.0)
    }
}

impl std::error::Error for CanvasError {}

impl From<JsValue> for CanvasError {
    fn from(value: JsValue) -> Self {
        CanvasError(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

fn to_js<E: fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Render surface backed by a `CanvasRenderingContext2d`
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    viewport: Viewport,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, viewport: Viewport) -> Self {
        Self { ctx, viewport }
    }

    /// Resize the backing canvas to match a new viewport
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<(), CanvasError> {
        let canvas = self
            .ctx
            .canvas()
            .ok_or_else(|| CanvasError("context has no canvas".to_string()))?;
        canvas.set_width(viewport.width as u32);
        canvas.set_height(viewport.height as u32);
        self.viewport = viewport;
        Ok(())
    }

    fn trace(&self, points: &[ScreenPoint]) {
        self.ctx.begin_path();
        if let Some((first, rest)) = points.split_first() {
            self.ctx.move_to(first.x, first.y);
            for p in rest {
                self.ctx.line_to(p.x, p.y);
            }
        }
    }
}

impl RenderSurface for CanvasSurface {
    type Error = CanvasError;

    fn clear(&mut self) -> Result<(), CanvasError> {
        self.ctx
            .clear_rect(0.0, 0.0, self.viewport.width, self.viewport.height);
        Ok(())
    }

    fn stroke_polyline(
        &mut self,
        points: &[ScreenPoint],
        closed: bool,
        style: &StrokeStyle,
    ) -> Result<(), CanvasError> {
        self.ctx.set_stroke_style_str(&style.color.to_hex());
        self.ctx.set_line_width(style.width);
        self.trace(points);
        if closed {
            if let Some(first) = points.first() {
                self.ctx.line_to(first.x, first.y);
            }
        }
        self.ctx.stroke();
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: ScreenPoint,
        radius: f64,
        color: Color,
    ) -> Result<(), CanvasError> {
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.begin_path();
        self.ctx.arc(center.x, center.y, radius, 0.0, TAU)?;
        self.ctx.fill();
        Ok(())
    }

    fn set_line_dash(&mut self, pattern: &[f64]) -> Result<(), CanvasError> {
        let segments = js_sys::Array::new();
        for &len in pattern {
            segments.push(&JsValue::from_f64(len));
        }
        self.ctx.set_line_dash(&segments)?;
        Ok(())
    }
}

#[wasm_bindgen]
pub struct WebViewer {
    scene: Scene,
    surface: CanvasSurface,
}

#[wasm_bindgen]
impl WebViewer {
    /// Attach to the `<canvas>` with the given element id and draw the default cube
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebViewer, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", canvas_id)))?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let viewport = Viewport::new(canvas.width() as f64, canvas.height() as f64);
        let scene = Scene::new(viewport).map_err(to_js)?;
        let mut viewer = WebViewer {
            scene,
            surface: CanvasSurface::new(ctx, viewport),
        };
        viewer.draw()?;
        Ok(viewer)
    }

    /// Full recompute and redraw
    pub fn draw(&mut self) -> Result<(), JsValue> {
        self.scene.render(&mut self.surface).map_err(to_js)
    }

    pub fn select_figure(&mut self, key: u8) -> Result<(), JsValue> {
        self.scene.select_key(key).map_err(to_js)?;
        self.draw()
    }

    pub fn set_projection(&mut self, name: &str) -> Result<(), JsValue> {
        let projection: Projection = name.parse().map_err(to_js)?;
        self.scene.set_projection(projection);
        self.draw()
    }

    /// Resize the canvas; the projection recentres on the new viewport
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        let viewport = Viewport::new(width as f64, height as f64);
        self.surface.set_viewport(viewport).map_err(to_js)?;
        self.scene.set_viewport(viewport);
        self.draw()
    }

    pub fn set_rotation(&mut self, x_deg: f64, y_deg: f64, z_deg: f64) -> Result<(), JsValue> {
        self.edit(|p| {
            p.rotate_x = x_deg.to_radians();
            p.rotate_y = y_deg.to_radians();
            p.rotate_z = z_deg.to_radians();
        })
    }

    pub fn set_scale(&mut self, factor: f64) -> Result<(), JsValue> {
        self.edit(|p| p.scale = factor)
    }

    pub fn set_translation(&mut self, dx: f64, dy: f64, dz: f64) -> Result<(), JsValue> {
        self.edit(|p| {
            p.translate_x = dx;
            p.translate_y = dy;
            p.translate_z = dz;
        })
    }

    pub fn set_reflection(&mut self, xy: bool, xz: bool, yz: bool) -> Result<(), JsValue> {
        self.edit(|p| {
            p.reflect_xy = xy;
            p.reflect_xz = xz;
            p.reflect_yz = yz;
        })
    }

    /// Endpoints of the arbitrary rotation axis
    pub fn set_line(
        &mut self,
        ax: f64,
        ay: f64,
        az: f64,
        bx: f64,
        by: f64,
        bz: f64,
    ) -> Result<(), JsValue> {
        self.edit(|p| {
            p.line_a = Point::new(ax, ay, az);
            p.line_b = Point::new(bx, by, bz);
        })
    }

    pub fn set_line_angle(&mut self, degrees: f64) -> Result<(), JsValue> {
        self.edit(|p| p.line_angle = degrees.to_radians())
    }

    pub fn set_parallel_axis(&mut self, axis: &str) -> Result<(), JsValue> {
        let axis: ParallelAxis = axis.parse().map_err(to_js)?;
        self.edit(|p| p.parallel_axis = axis)
    }

    pub fn set_parallel_offsets(&mut self, offset1: f64, offset2: f64) -> Result<(), JsValue> {
        self.edit(|p| {
            p.parallel_offset1 = offset1;
            p.parallel_offset2 = offset2;
        })
    }

    pub fn set_parallel_angle(&mut self, degrees: f64) -> Result<(), JsValue> {
        self.edit(|p| p.parallel_angle = degrees.to_radians())
    }

    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.edit(|p| *p = TransformParameters::default())
    }
}

impl WebViewer {
    /// Copy the snapshot, change it, hand it back and redraw
    fn edit(&mut self, change: impl FnOnce(&mut TransformParameters)) -> Result<(), JsValue> {
        let mut params = *self.scene.params();
        change(&mut params);
        log::debug!("parameters updated: {:?}", params);
        self.scene.update(params);
        self.draw()
    }
}
