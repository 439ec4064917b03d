/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use homog_core::{Matrix44, Point3, Point4};
use std::io::Write;

use crate::camera::Camera;
use crate::geometry::{Mesh, Triangle};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Direction towards the light, in view space
const LIGHT_DIRECTION: Point3<f64> = Point3::new(0.0, 0.0, 1.0);

/// ASCII renderer that converts meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f64>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f64::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f64::INFINITY);
        self.char_buffer.fill(' ');
    }

    pub fn char_at(&self, x: usize, y: usize) -> char {
        self.char_buffer[y * self.width + x]
    }

    pub fn render_mesh(&mut self, mesh: &Mesh, model: &Matrix44, camera: &Camera) {
        let model_view_projection = *model * *camera.projection_matrix();
        for triangle in &mesh.triangles {
            self.render_triangle(triangle, model, &model_view_projection, camera);
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        model: &Matrix44,
        model_view_projection: &Matrix44,
        camera: &Camera,
    ) {
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (coords, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            match camera.project_to_screen(
                vertex.position,
                model_view_projection,
                self.width as f64,
                self.height as f64,
            ) {
                Some(projected) => *coords = projected,
                None => return, // Triangle is clipped
            }
        }

        // Directions ignore the translation row
        let n = triangle.normal();
        let normal = (Point4::new(n.x, n.y, n.z, 0.0) * *model).xyz();
        if normal.z <= 0.0 {
            return; // Back face
        }
        let brightness = normal.x * LIGHT_DIRECTION.x
            + normal.y * LIGHT_DIRECTION.y
            + normal.z * LIGHT_DIRECTION.z;

        let char_index = (brightness.clamp(0.0, 1.0) * (LUMINOSITY_RAMP.len() - 1) as f64) as usize;
        let character = LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)];

        self.rasterize_triangle(&screen_coords, character);
    }

    fn rasterize_triangle(&mut self, coords: &[(f64, f64, f64); 3], character: char) {
        let [v0, v1, v2] = *coords;

        // Bounding box clipped to the screen
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i64).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i64).min(self.width as i64 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i64).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i64).min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f64 + 0.5, y as f64 + 0.5);
                let Some((w0, w1, w2)) = barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), p)
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.char_buffer[idx] = character;
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in self.char_buffer.chunks(self.width.max(1)) {
            for &c in row {
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    _ => Color::Cyan,
                };
                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Barycentric coordinates of `p` in the triangle, `None` if degenerate
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
