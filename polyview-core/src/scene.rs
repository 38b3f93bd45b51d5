/// Scene pipeline: parameter snapshot -> composite matrix -> projected frame
use log::{debug, info};
use nalgebra::Matrix4;

use crate::catalog::{Catalog, PolyhedronKind};
use crate::error::{GeometryError, RenderError, Result};
use crate::geometry::{Point, Polyhedron};
use crate::projection::{Projection, ScreenPoint, Viewport};
use crate::render::{
    RenderSurface, StrokeStyle, AXIS_COLOR, AXIS_DASH, AXIS_ENDPOINT_RADIUS, EDGE_COLOR,
    EDGE_WIDTH, VERTEX_COLOR, VERTEX_RADIUS,
};
use crate::transform::{ParallelAxis, Transform};

/// Snapshot of every user-controlled transform parameter. Angles are radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParameters {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub rotate_z: f64,
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub translate_z: f64,
    pub reflect_xy: bool,
    pub reflect_xz: bool,
    pub reflect_yz: bool,
    /// First point of the arbitrary rotation axis
    pub line_a: Point,
    /// Second point of the arbitrary rotation axis
    pub line_b: Point,
    pub line_angle: f64,
    pub parallel_axis: ParallelAxis,
    pub parallel_offset1: f64,
    pub parallel_offset2: f64,
    pub parallel_angle: f64,
}

impl Default for TransformParameters {
    fn default() -> Self {
        Self {
            rotate_x: 0.0,
            rotate_y: 0.0,
            rotate_z: 0.0,
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            translate_z: 0.0,
            reflect_xy: false,
            reflect_xz: false,
            reflect_yz: false,
            line_a: Point::origin(),
            line_b: Point::new(1.0, 0.0, 0.0),
            line_angle: 0.0,
            parallel_axis: ParallelAxis::X,
            parallel_offset1: 0.0,
            parallel_offset2: 0.0,
            parallel_angle: 0.0,
        }
    }
}

impl TransformParameters {
    /// Composite matrix for a polyhedron centred at `center`
    pub fn composite(&self, center: Point) -> Matrix4<f64> {
        composite_matrix(&transform_stages(self, center))
    }
}

/// Named step of the composition, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    LineRotation,
    ParallelAxisRotation,
    ScaleAroundCenter,
    RotateX,
    RotateY,
    RotateZ,
    Translation,
    Reflection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformStage {
    pub kind: StageKind,
    pub matrix: Matrix4<f64>,
}

impl TransformStage {
    fn new(kind: StageKind, matrix: Matrix4<f64>) -> Self {
        Self { kind, matrix }
    }
}

/// Active stages in their fixed multiplication order.
///
/// The two line rotations are omitted when their angle is zero; every other
/// stage is always present.
pub fn transform_stages(params: &TransformParameters, center: Point) -> Vec<TransformStage> {
    let mut stages = Vec::with_capacity(8);

    if params.line_angle != 0.0 {
        stages.push(TransformStage::new(
            StageKind::LineRotation,
            Transform::rotation_around_line(params.line_a, params.line_b, params.line_angle),
        ));
    }

    if params.parallel_angle != 0.0 {
        stages.push(TransformStage::new(
            StageKind::ParallelAxisRotation,
            Transform::rotation_around_parallel_axis(
                params.parallel_axis,
                params.parallel_angle,
                params.parallel_offset1,
                params.parallel_offset2,
                center,
            ),
        ));
    }

    stages.push(TransformStage::new(
        StageKind::ScaleAroundCenter,
        Transform::scale_around_center(params.scale, center),
    ));
    stages.push(TransformStage::new(StageKind::RotateX, Transform::rotation_x(params.rotate_x)));
    stages.push(TransformStage::new(StageKind::RotateY, Transform::rotation_y(params.rotate_y)));
    stages.push(TransformStage::new(StageKind::RotateZ, Transform::rotation_z(params.rotate_z)));
    stages.push(TransformStage::new(
        StageKind::Translation,
        Transform::translation(params.translate_x, params.translate_y, params.translate_z),
    ));
    stages.push(TransformStage::new(
        StageKind::Reflection,
        Transform::reflection(params.reflect_xy, params.reflect_xz, params.reflect_yz),
    ));

    stages
}

/// Fold the stages left to right, seeded with the identity
pub fn composite_matrix(stages: &[TransformStage]) -> Matrix4<f64> {
    stages.iter().fold(Transform::identity(), |acc, stage| {
        Transform::multiply_matrices(&acc, &stage.matrix)
    })
}

/// Result of one pipeline pass, ready to hand to a surface
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Transformed vertices, before projection
    pub world: Vec<Point>,
    /// Projected vertices, parallel to the polyhedron's vertex list
    pub vertices: Vec<ScreenPoint>,
    /// One closed outline per face, in face index order
    pub faces: Vec<Vec<ScreenPoint>>,
    /// Projected endpoints of the arbitrary rotation axis
    pub axis: (ScreenPoint, ScreenPoint),
}

impl Frame {
    pub fn build(
        polyhedron: &Polyhedron,
        params: &TransformParameters,
        projection: Projection,
        viewport: Viewport,
    ) -> Result<Self> {
        let stages = transform_stages(params, polyhedron.center());
        debug!(
            "composing {} stages: {:?}",
            stages.len(),
            stages.iter().map(|s| s.kind).collect::<Vec<_>>()
        );
        let matrix = composite_matrix(&stages);

        let world: Vec<Point> = polyhedron
            .vertices()
            .iter()
            .map(|&v| Point::from_homogeneous(&Transform::multiply_matrix_vector(&matrix, v)))
            .collect();
        let vertices: Vec<ScreenPoint> = world
            .iter()
            .map(|&p| projection.project(p, viewport))
            .collect();

        let faces = polyhedron
            .faces()
            .iter()
            .enumerate()
            .map(|(face_idx, face)| {
                face.vertex_indices()
                    .iter()
                    .map(|&index| {
                        vertices.get(index).copied().ok_or(GeometryError::InvalidFaceIndex {
                            face: face_idx,
                            index,
                            vertex_count: vertices.len(),
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        // The axis indicator is drawn where the user placed it, untransformed.
        let axis = (
            projection.project(params.line_a, viewport),
            projection.project(params.line_b, viewport),
        );

        Ok(Self {
            world,
            vertices,
            faces,
            axis,
        })
    }

    /// Issue the draw calls for this frame
    pub fn draw<S: RenderSurface>(&self, surface: &mut S) -> std::result::Result<(), S::Error> {
        surface.clear()?;

        let edge = StrokeStyle::new(EDGE_COLOR, EDGE_WIDTH);
        for outline in &self.faces {
            surface.stroke_polyline(outline, true, &edge)?;
        }

        for &vertex in &self.vertices {
            surface.fill_circle(vertex, VERTEX_RADIUS, VERTEX_COLOR)?;
        }

        let (a, b) = self.axis;
        surface.set_line_dash(&AXIS_DASH)?;
        surface.stroke_polyline(&[a, b], false, &StrokeStyle::new(AXIS_COLOR, EDGE_WIDTH))?;
        surface.set_line_dash(&[])?;
        surface.fill_circle(a, AXIS_ENDPOINT_RADIUS, AXIS_COLOR)?;
        surface.fill_circle(b, AXIS_ENDPOINT_RADIUS, AXIS_COLOR)?;

        Ok(())
    }
}

/// Owns the current selection and parameter snapshot
#[derive(Debug, Clone)]
pub struct Scene {
    catalog: Catalog,
    kind: PolyhedronKind,
    params: TransformParameters,
    projection: Projection,
    viewport: Viewport,
}

impl Scene {
    pub fn new(viewport: Viewport) -> Result<Self> {
        Ok(Self {
            catalog: Catalog::new()?,
            kind: PolyhedronKind::default(),
            params: TransformParameters::default(),
            projection: Projection::default(),
            viewport,
        })
    }

    pub fn params(&self) -> &TransformParameters {
        &self.params
    }

    /// Replace the parameter snapshot
    pub fn update(&mut self, params: TransformParameters) {
        self.params = params;
    }

    pub fn kind(&self) -> PolyhedronKind {
        self.kind
    }

    pub fn select(&mut self, kind: PolyhedronKind) {
        info!("selected {}", kind);
        self.kind = kind;
    }

    pub fn select_key(&mut self, key: u8) -> Result<()> {
        self.select(PolyhedronKind::from_key(key)?);
        Ok(())
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn set_projection(&mut self, projection: Projection) {
        info!("projection set to {}", projection);
        self.projection = projection;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn polyhedron(&self) -> &Polyhedron {
        self.catalog.get(self.kind)
    }

    /// Recompute the frame for the current state
    pub fn frame(&self) -> Result<Frame> {
        Frame::build(self.polyhedron(), &self.params, self.projection, self.viewport)
    }

    /// One full recompute-and-draw pass
    pub fn render<S>(&self, surface: &mut S) -> std::result::Result<(), RenderError<S::Error>>
    where
        S: RenderSurface,
        S::Error: std::error::Error + 'static,
    {
        let frame = self.frame()?;
        frame.draw(surface).map_err(RenderError::Surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn kinds(params: &TransformParameters) -> Vec<StageKind> {
        transform_stages(params, Point::origin())
            .iter()
            .map(|s| s.kind)
            .collect()
    }

    #[test]
    fn test_default_stage_order() {
        assert_eq!(
            kinds(&TransformParameters::default()),
            vec![
                StageKind::ScaleAroundCenter,
                StageKind::RotateX,
                StageKind::RotateY,
                StageKind::RotateZ,
                StageKind::Translation,
                StageKind::Reflection,
            ]
        );
    }

    #[test]
    fn test_line_rotations_lead_when_active() {
        let params = TransformParameters {
            line_angle: 0.5,
            parallel_angle: -0.5,
            ..Default::default()
        };
        let order = kinds(&params);
        assert_eq!(order.len(), 8);
        assert_eq!(order[0], StageKind::LineRotation);
        assert_eq!(order[1], StageKind::ParallelAxisRotation);
        assert_eq!(order[2], StageKind::ScaleAroundCenter);
        assert_eq!(order[7], StageKind::Reflection);
    }

    #[test]
    fn test_default_composite_is_identity() {
        let m = TransformParameters::default().composite(Point::origin());
        assert!((m - Matrix4::identity()).norm() < 1e-12);
    }

    #[test]
    fn test_composite_follows_multiplication_order() {
        // Rz * T: the translation is applied first, then rotated.
        let params = TransformParameters {
            rotate_z: FRAC_PI_2,
            translate_x: 1.0,
            ..Default::default()
        };
        let m = params.composite(Point::origin());
        let p = Point::from_homogeneous(&Transform::multiply_matrix_vector(&m, Point::origin()));
        assert!(p.approx_eq(Point::new(0.0, 1.0, 0.0), 1e-12));
    }

    #[test]
    fn test_frame_faces_follow_indices() {
        let solid = PolyhedronKind::Octahedron.build().unwrap();
        let frame = Frame::build(
            &solid,
            &TransformParameters::default(),
            Projection::Axonometric,
            Viewport::default(),
        )
        .unwrap();
        assert_eq!(frame.vertices.len(), 6);
        assert_eq!(frame.faces.len(), 8);
        for (outline, face) in frame.faces.iter().zip(solid.faces()) {
            let expected: Vec<_> = face
                .vertex_indices()
                .iter()
                .map(|&i| frame.vertices[i])
                .collect();
            assert_eq!(outline, &expected);
        }
    }

    fn tetrahedron_scene(params: TransformParameters) -> Scene {
        let mut scene = Scene::new(Viewport::default()).unwrap();
        scene.select(PolyhedronKind::Tetrahedron);
        scene.update(params);
        scene
    }

    fn mean(points: &[Point]) -> Point {
        points.iter().fold(Point::origin(), |acc, &p| acc + p) / points.len() as f64
    }

    #[test]
    fn test_scale_pivots_on_solid_center() {
        let scene = tetrahedron_scene(TransformParameters {
            scale: 2.0,
            ..Default::default()
        });
        let solid = scene.polyhedron();
        let c = solid.center();
        assert!(c.z < -0.25, "tetrahedron centroid is off the origin");

        let frame = scene.frame().unwrap();
        assert!(mean(&frame.world).approx_eq(c, 1e-9));
        for (&p, &q) in solid.vertices().iter().zip(&frame.world) {
            let expected = c + (p - c) + (p - c);
            assert!(q.approx_eq(expected, 1e-9), "{:?} -> {:?}", p, q);
        }
    }

    #[test]
    fn test_parallel_axis_pivots_on_solid_center() {
        let scene = tetrahedron_scene(TransformParameters {
            parallel_axis: ParallelAxis::X,
            parallel_angle: PI,
            ..Default::default()
        });
        let solid = scene.polyhedron();
        let c = solid.center();

        let frame = scene.frame().unwrap();
        assert!(mean(&frame.world).approx_eq(c, 1e-9));
        // Half turn about the x-parallel line through C mirrors y and z about C.
        for (&p, &q) in solid.vertices().iter().zip(&frame.world) {
            let expected = Point::new(p.x, 2.0 * c.y - p.y, 2.0 * c.z - p.z);
            assert!(q.approx_eq(expected, 1e-9), "{:?} -> {:?}", p, q);
        }
    }

    #[test]
    fn test_viewport_change_recenters_frame() {
        let mut scene = Scene::new(Viewport::new(400.0, 400.0)).unwrap();
        scene.set_viewport(Viewport::new(800.0, 600.0));
        assert_eq!(scene.viewport(), Viewport::new(800.0, 600.0));

        let frame = scene.frame().unwrap();
        let corner = frame.vertices[6];
        // (1, 1, 1) sits 125 units right of and above centre at any viewport size.
        assert!((corner.x - 525.0).abs() < 1e-9);
        assert!((corner.y - 175.0).abs() < 1e-9);
    }

    #[test]
    fn test_scene_select_key() {
        let mut scene = Scene::new(Viewport::default()).unwrap();
        assert_eq!(scene.kind(), PolyhedronKind::Cube);
        scene.select_key(4).unwrap();
        assert_eq!(scene.polyhedron().vertex_count(), 12);
        assert_eq!(
            scene.select_key(9).unwrap_err(),
            GeometryError::UnknownFigure(9)
        );
        assert_eq!(scene.kind(), PolyhedronKind::Icosahedron);
    }
}
