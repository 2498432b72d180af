/// Terminal wireframe viewer for OBJ files
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::cell::Cell;
use std::io::{self, stdout, Write};
use std::rc::Rc;
use std::time::Duration;

use objview_core::{Controller, Subscriber};

pub mod camera;
pub mod renderer;

pub use camera::{Camera, ProjectionMode};
pub use renderer::WireframeRenderer;

/// Set whenever the model reports a change; cleared by a redraw
#[derive(Debug, Default)]
pub struct RedrawFlag(Cell<bool>);

impl RedrawFlag {
    pub fn request(&self) {
        self.0.set(true);
    }

    /// Returns whether a redraw was pending and clears it.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

impl Subscriber for RedrawFlag {
    fn notify(&self) {
        self.request();
    }
}

/// A user command, decoupled from the key that triggered it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Rotate([f32; 3]),
    Translate([f32; 3]),
    ZoomIn,
    ZoomOut,
    ToggleProjection,
    Quit,
}

impl Command {
    /// Map a key to a command using the configured step sizes
    pub fn from_key(code: KeyCode, rotate_step: f32, move_step: f32) -> Option<Self> {
        let r = rotate_step;
        let m = move_step;
        let command = match code {
            KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
            KeyCode::Char('w') | KeyCode::Up => Command::Rotate([-r, 0.0, 0.0]),
            KeyCode::Char('s') | KeyCode::Down => Command::Rotate([r, 0.0, 0.0]),
            KeyCode::Char('a') | KeyCode::Left => Command::Rotate([0.0, -r, 0.0]),
            KeyCode::Char('d') | KeyCode::Right => Command::Rotate([0.0, r, 0.0]),
            KeyCode::Char('e') => Command::Rotate([0.0, 0.0, r]),
            KeyCode::Char('r') => Command::Rotate([0.0, 0.0, -r]),
            KeyCode::Char('i') => Command::Translate([0.0, m, 0.0]),
            KeyCode::Char('k') => Command::Translate([0.0, -m, 0.0]),
            KeyCode::Char('j') => Command::Translate([-m, 0.0, 0.0]),
            KeyCode::Char('l') => Command::Translate([m, 0.0, 0.0]),
            KeyCode::Char('u') => Command::Translate([0.0, 0.0, m]),
            KeyCode::Char('o') => Command::Translate([0.0, 0.0, -m]),
            KeyCode::Char('+') | KeyCode::Char('=') => Command::ZoomIn,
            KeyCode::Char('-') => Command::ZoomOut,
            KeyCode::Char('p') => Command::ToggleProjection,
            _ => return None,
        };
        Some(command)
    }
}

/// Main application struct for the terminal viewer
pub struct TerminalApp {
    controller: Controller,
    title: String,
    camera: Camera,
    renderer: WireframeRenderer,
    redraw: Rc<RedrawFlag>,
    running: bool,
}

impl TerminalApp {
    pub fn new(mut controller: Controller, title: impl Into<String>) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        let redraw = Rc::new(RedrawFlag::default());
        let subscriber: Rc<dyn Subscriber> = redraw.clone();
        controller.model_mut().subscribe(&subscriber);
        redraw.request();

        Ok(Self {
            controller,
            title: title.into(),
            camera: Camera::new(width as u32, height as u32),
            renderer: WireframeRenderer::new(width as usize, height as usize),
            redraw,
            running: true,
        })
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
        while self.running {
            if event::poll(Duration::from_millis(50))? {
                self.handle_event(event::read()?);
            }

            if self.redraw.take() {
                self.render()?;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => {
                let config = *self.controller.config();
                if let Some(command) = Command::from_key(code, config.rotate_step, config.move_step)
                {
                    self.apply(command);
                }
            }
            Event::Resize(width, height) => {
                self.camera.resize(width as u32, height as u32);
                self.renderer = WireframeRenderer::new(width as usize, height as usize);
                self.redraw.request();
            }
            _ => {}
        }
    }

    /// Run a command against the model; the model's notification
    /// schedules the redraw.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Rotate(degrees) => self.controller.rotate(degrees),
            Command::Translate(offset) => self.controller.translate(offset),
            Command::ZoomIn => self.controller.zoom_in(),
            Command::ZoomOut => self.controller.zoom_out(),
            Command::ToggleProjection => {
                self.camera.toggle_mode();
                self.redraw.request();
            }
            Command::Quit => self.running = false,
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let model = self.controller.model();

        self.renderer.clear();
        self.renderer.render_mesh(model.mesh(), &self.camera);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let mesh = model.mesh();
        let status = if model.is_empty() {
            " (nothing to draw)"
        } else {
            ""
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "objview | {} | vertices: {} edges: {}{} | WASD/Arrows=Rotate E/R=Roll +/-=Zoom IJKL/UO=Move P=Projection Q=Quit",
                self.title,
                mesh.vertex_count(),
                mesh.edge_count(),
                status,
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }
}
