/// Terminal viewer driving the homog-core transform pipeline
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod camera;
pub mod config;
pub mod geometry;
pub mod renderer;

pub use camera::{Camera, RotationState};
pub use config::ViewerConfig;
pub use geometry::{Mesh, Triangle, Vertex};
pub use renderer::AsciiRenderer;

/// Main application struct for terminal rendering
pub struct TerminalApp {
    config: ViewerConfig,
    mesh: Mesh,
    rotation: RotationState,
    camera: Camera,
    renderer: AsciiRenderer,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, config: ViewerConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        // Top row is the status line
        let rows = height.saturating_sub(1);

        log::debug!("Terminal size {}x{}, config {:?}", width, height, config);

        Ok(Self {
            camera: Camera::for_terminal(
                width,
                rows,
                config.fov,
                config.near,
                config.far,
                config.distance,
            ),
            renderer: AsciiRenderer::new(width as usize, rows as usize),
            rotation: RotationState::new(0.3, 0.3, 0.0),
            config,
            mesh,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / u64::from(self.config.fps.max(1)));

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            self.rotation.rotate(self.config.spin * 0.66, self.config.spin, 0.0);
            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                KeyCode::Char('w') | KeyCode::Up => self.rotation.rotate(0.1, 0.0, 0.0),
                KeyCode::Char('s') | KeyCode::Down => self.rotation.rotate(-0.1, 0.0, 0.0),
                KeyCode::Char('a') | KeyCode::Left => self.rotation.rotate(0.0, -0.1, 0.0),
                KeyCode::Char('d') | KeyCode::Right => self.rotation.rotate(0.0, 0.1, 0.0),
                KeyCode::Char('e') => self.rotation.rotate(0.0, 0.0, 0.1),
                KeyCode::Char('r') => self.rotation.rotate(0.0, 0.0, -0.1),
                _ => {}
            }
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let model = self.camera.model_matrix(&self.rotation);

        self.renderer.clear();
        self.renderer.render_mesh(&self.mesh, &model, &self.camera);

        let mut stdout = stdout();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "homog | FPS: {:.1} | fov {:.0} | WASD/Arrows=Rotate E/R=Roll Q=Quit",
                self.fps, self.camera.fov
            )),
            ResetColor,
            cursor::MoveTo(0, 1)
        )?;
        self.renderer.draw(&mut stdout)?;

        stdout.flush()
    }
}
