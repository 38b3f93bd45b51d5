/// Terminal front end for the polyhedron transformation viewer
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use log::debug;
use polyview_core::Scene;
use std::io::{self, stdout, Write};

pub mod config;
pub mod controls;
pub mod renderer;

pub use controls::{action_for_key, Action};
pub use renderer::AsciiRenderer;

/// Rows reserved for the header and status lines
const OVERLAY_ROWS: u16 = 2;

/// Main application struct for terminal rendering.
///
/// Event driven: every key press yields one new parameter snapshot and one
/// full redraw. Nothing happens between events.
pub struct TerminalApp {
    scene: Scene,
    renderer: AsciiRenderer,
    running: bool,
}

impl TerminalApp {
    pub fn new(scene: Scene) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(scene, width, height))
    }

    /// Build for a terminal of `width` x `height` cells
    pub fn with_size(scene: Scene, width: u16, height: u16) -> Self {
        let renderer = AsciiRenderer::new(
            width as usize,
            height.saturating_sub(OVERLAY_ROWS) as usize,
            scene.viewport(),
        );

        Self {
            scene,
            renderer,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        self.render()?;

        while self.running {
            match event::read()? {
                Event::Key(key) => {
                    if self.handle_key(key) {
                        self.render()?;
                    }
                }
                Event::Resize(width, height) => {
                    self.renderer.resize(
                        width as usize,
                        height.saturating_sub(OVERLAY_ROWS) as usize,
                    );
                    self.render()?;
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Apply one key press; returns whether a redraw is needed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }

        match action_for_key(key.code, self.scene.params()) {
            Action::Quit => {
                self.running = false;
                false
            }
            Action::Update(params) => {
                debug!("parameters updated: {:?}", params);
                self.scene.update(params);
                true
            }
            Action::Select(kind) => {
                self.scene.select(kind);
                true
            }
            Action::ToggleProjection => {
                self.scene.set_projection(self.scene.projection().toggled());
                true
            }
            Action::Ignore => false,
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.scene
            .render(&mut self.renderer)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

        let mut stdout = stdout();
        queue!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        queue!(
            stdout,
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Polyview | {} | {} | {}",
                self.scene.kind(),
                self.scene.projection(),
                controls::HELP
            )),
            ResetColor,
            cursor::MoveTo(0, 1),
            Print(controls::status_line(self.scene.params()))
        )?;

        self.renderer.draw(&mut stdout, OVERLAY_ROWS)?;
        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use polyview_core::{PolyhedronKind, Projection, Viewport};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> TerminalApp {
        TerminalApp::with_size(Scene::new(Viewport::default()).unwrap(), 80, 24)
    }

    #[test]
    fn test_key_press_updates_scene() {
        let mut app = app();
        assert!(app.handle_key(press(KeyCode::Char('e'))));
        assert!(app.scene().params().rotate_z > 0.0);

        assert!(app.handle_key(press(KeyCode::Char('3'))));
        assert_eq!(app.scene().kind(), PolyhedronKind::Octahedron);

        assert!(app.handle_key(press(KeyCode::Char('p'))));
        assert_eq!(app.scene().projection(), Projection::Axonometric);
    }

    #[test]
    fn test_unbound_key_skips_redraw() {
        let mut app = app();
        assert!(!app.handle_key(press(KeyCode::F(5))));
        assert!(app.is_running());
    }

    #[test]
    fn test_quit_stops_loop() {
        let mut app = app();
        assert!(!app.handle_key(press(KeyCode::Char('q'))));
        assert!(!app.is_running());
    }

    #[test]
    fn test_scene_renders_into_grid() {
        let mut app = app();
        app.scene.render(&mut app.renderer).unwrap();
        let drawn = app
            .renderer
            .lines()
            .iter()
            .flat_map(|l| l.chars())
            .filter(|c| *c != ' ')
            .count();
        assert!(drawn > 0);
        assert_eq!(app.renderer.size(), (80, 22));
    }
}
