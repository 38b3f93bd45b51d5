/// Keyboard bindings: each key press maps to one scene edit
use crossterm::event::KeyCode;
use polyview_core::{PolyhedronKind, TransformParameters};

/// Angle change per key press, in degrees
pub const ANGLE_STEP_DEGREES: f64 = 5.0;
pub const SCALE_STEP: f64 = 0.1;
pub const MIN_SCALE: f64 = 0.1;
pub const TRANSLATE_STEP: f64 = 0.1;
pub const OFFSET_STEP: f64 = 0.1;

/// What a key press asks the application to do
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Update(TransformParameters),
    Select(PolyhedronKind),
    ToggleProjection,
    Ignore,
}

pub const HELP: &str = "WASD/arrows rot X/Y  E/R rot Z  +/- scale  H/L J/K N/M move  \
Z/X/C mirror  [/] line  T axis  ,/. axis rot  F/G V/B offsets  P proj  1-5 figure  0 reset  Q quit";

/// Translate a key into an action against the current snapshot
pub fn action_for_key(code: KeyCode, params: &TransformParameters) -> Action {
    let step = ANGLE_STEP_DEGREES.to_radians();
    let mut next = *params;

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        KeyCode::Char('p') => return Action::ToggleProjection,
        KeyCode::Char(c @ '1'..='5') => {
            return match PolyhedronKind::from_key(c as u8 - b'0') {
                Ok(kind) => Action::Select(kind),
                Err(_) => Action::Ignore,
            };
        }
        KeyCode::Char('0') => next = TransformParameters::default(),

        KeyCode::Char('w') | KeyCode::Up => next.rotate_x += step,
        KeyCode::Char('s') | KeyCode::Down => next.rotate_x -= step,
        KeyCode::Char('a') | KeyCode::Left => next.rotate_y -= step,
        KeyCode::Char('d') | KeyCode::Right => next.rotate_y += step,
        KeyCode::Char('e') => next.rotate_z += step,
        KeyCode::Char('r') => next.rotate_z -= step,

        KeyCode::Char('+') | KeyCode::Char('=') => next.scale += SCALE_STEP,
        KeyCode::Char('-') => next.scale = (next.scale - SCALE_STEP).max(MIN_SCALE),

        KeyCode::Char('h') => next.translate_x -= TRANSLATE_STEP,
        KeyCode::Char('l') => next.translate_x += TRANSLATE_STEP,
        KeyCode::Char('j') => next.translate_y -= TRANSLATE_STEP,
        KeyCode::Char('k') => next.translate_y += TRANSLATE_STEP,
        KeyCode::Char('n') => next.translate_z -= TRANSLATE_STEP,
        KeyCode::Char('m') => next.translate_z += TRANSLATE_STEP,

        KeyCode::Char('z') => next.reflect_xy = !next.reflect_xy,
        KeyCode::Char('x') => next.reflect_xz = !next.reflect_xz,
        KeyCode::Char('c') => next.reflect_yz = !next.reflect_yz,

        KeyCode::Char('[') => next.line_angle -= step,
        KeyCode::Char(']') => next.line_angle += step,

        KeyCode::Char('t') => next.parallel_axis = next.parallel_axis.next(),
        KeyCode::Char(',') => next.parallel_angle -= step,
        KeyCode::Char('.') => next.parallel_angle += step,
        KeyCode::Char('f') => next.parallel_offset1 -= OFFSET_STEP,
        KeyCode::Char('g') => next.parallel_offset1 += OFFSET_STEP,
        KeyCode::Char('v') => next.parallel_offset2 -= OFFSET_STEP,
        KeyCode::Char('b') => next.parallel_offset2 += OFFSET_STEP,

        _ => return Action::Ignore,
    }

    Action::Update(next)
}

/// One-line summary of the snapshot, angles in degrees
pub fn status_line(params: &TransformParameters) -> String {
    let flag = |on: bool, name: &'static str| if on { name } else { "--" };
    format!(
        "rot {:.0}/{:.0}/{:.0}  scale {:.1}  move {:.1},{:.1},{:.1}  mirror {} {} {}  line {:.0}  axis {} {:.0} ({:.1},{:.1})",
        params.rotate_x.to_degrees(),
        params.rotate_y.to_degrees(),
        params.rotate_z.to_degrees(),
        params.scale,
        params.translate_x,
        params.translate_y,
        params.translate_z,
        flag(params.reflect_xy, "XY"),
        flag(params.reflect_xz, "XZ"),
        flag(params.reflect_yz, "YZ"),
        params.line_angle.to_degrees(),
        params.parallel_axis,
        params.parallel_angle.to_degrees(),
        params.parallel_offset1,
        params.parallel_offset2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyview_core::ParallelAxis;

    fn update(code: KeyCode, params: &TransformParameters) -> TransformParameters {
        match action_for_key(code, params) {
            Action::Update(next) => next,
            other => panic!("expected update for {code:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_rotation_keys_step_in_radians() {
        let params = TransformParameters::default();
        let next = update(KeyCode::Char('w'), &params);
        assert!((next.rotate_x - 5f64.to_radians()).abs() < 1e-12);
        let next = update(KeyCode::Left, &next);
        assert!((next.rotate_y + 5f64.to_radians()).abs() < 1e-12);
        // Source snapshot is untouched.
        assert_eq!(params.rotate_x, 0.0);
    }

    #[test]
    fn test_scale_has_a_floor() {
        let params = TransformParameters {
            scale: 0.15,
            ..Default::default()
        };
        let next = update(KeyCode::Char('-'), &params);
        assert_eq!(next.scale, MIN_SCALE);
    }

    #[test]
    fn test_toggles_and_axis_cycle() {
        let params = TransformParameters::default();
        let next = update(KeyCode::Char('c'), &params);
        assert!(next.reflect_yz);
        let next = update(KeyCode::Char('c'), &next);
        assert!(!next.reflect_yz);
        let next = update(KeyCode::Char('t'), &next);
        assert_eq!(next.parallel_axis, ParallelAxis::Y);
    }

    #[test]
    fn test_figure_projection_and_quit() {
        let params = TransformParameters::default();
        assert_eq!(
            action_for_key(KeyCode::Char('5'), &params),
            Action::Select(PolyhedronKind::Dodecahedron)
        );
        assert_eq!(action_for_key(KeyCode::Char('p'), &params), Action::ToggleProjection);
        assert_eq!(action_for_key(KeyCode::Esc, &params), Action::Quit);
        assert_eq!(action_for_key(KeyCode::Char('9'), &params), Action::Ignore);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let params = TransformParameters {
            rotate_z: 1.0,
            scale: 3.0,
            ..Default::default()
        };
        assert_eq!(update(KeyCode::Char('0'), &params), TransformParameters::default());
    }

    #[test]
    fn test_status_line_in_degrees() {
        let params = TransformParameters {
            rotate_z: 90f64.to_radians(),
            reflect_xy: true,
            ..Default::default()
        };
        let line = status_line(&params);
        assert!(line.starts_with("rot 0/0/90"));
        assert!(line.contains("mirror XY -- --"));
    }
}
