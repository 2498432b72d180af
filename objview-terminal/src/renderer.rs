/// ASCII wireframe rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

use crate::camera::Camera;
use objview_core::Mesh;

/// Renders the edges of a mesh as line characters
pub struct WireframeRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl WireframeRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    pub fn render_mesh(&mut self, mesh: &Mesh, camera: &Camera) {
        let view_projection = camera.view_projection();
        let projected: Vec<_> = mesh
            .points()
            .map(|p| {
                camera.project_to_screen(
                    &view_projection,
                    &p,
                    self.width as u32,
                    self.height as u32,
                )
            })
            .collect();

        for (a, b) in mesh.edge_pairs() {
            // Faces may reference vertices the file never defined.
            let (Some(Some(p0)), Some(Some(p1))) =
                (projected.get(a as usize), projected.get(b as usize))
            else {
                continue;
            };
            self.draw_line(*p0, *p1);
        }
    }

    /// Bresenham line between two projected points, depth-tested per cell
    ///
    /// The segment is clipped to the screen first, so the walk is bounded
    /// by the screen size however far the endpoints project.
    fn draw_line(&mut self, p0: (f32, f32, f32), p1: (f32, f32, f32)) {
        let character = line_char(p1.0 - p0.0, p1.1 - p0.1);
        let Some((p0, p1)) = clip_segment(p0, p1, self.width as f32, self.height as f32) else {
            return;
        };
        let (x0, y0) = (p0.0.floor() as i64, p0.1.floor() as i64);
        let (x1, y1) = (p1.0.floor() as i64, p1.1.floor() as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let steps = dx.max(-dy).max(1) as f32;

        let (mut x, mut y) = (x0, y0);
        let mut err = dx + dy;
        let mut step = 0.0;
        loop {
            let depth = p0.2 + (p1.2 - p0.2) * (step / steps);
            self.plot(x, y, depth, character);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
            step += 1.0;
        }
    }

    fn plot(&mut self, x: i64, y: i64, depth: f32, character: char) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = character;
        }
    }

    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.char_buffer[y * self.width + x])
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let c = self.char_buffer[idx];

                // Nearer lines are brighter
                let depth = self.depth_buffer[idx];
                let color = if !depth.is_finite() {
                    Color::DarkGrey
                } else if depth < 0.95 {
                    Color::Cyan
                } else {
                    Color::White
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

type ScreenPoint = (f32, f32, f32);

/// Liang-Barsky clip of a segment to `[0, width) x [0, height)`
///
/// Depth is interpolated along with x and y. Returns `None` when no part
/// of the segment is on screen.
fn clip_segment(
    p0: ScreenPoint,
    p1: ScreenPoint,
    width: f32,
    height: f32,
) -> Option<(ScreenPoint, ScreenPoint)> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    let finite = |p: ScreenPoint| p.0.is_finite() && p.1.is_finite() && p.2.is_finite();
    if !finite(p0) || !finite(p1) {
        return None;
    }

    // f64 keeps far-off endpoints from swallowing the on-screen part.
    let (x0, y0, z0) = (p0.0 as f64, p0.1 as f64, p0.2 as f64);
    let (dx, dy, dz) = (p1.0 as f64 - x0, p1.1 as f64 - y0, p1.2 as f64 - z0);
    // Stay just inside the far edges so floor() lands on a real cell.
    let (x_max, y_max) = (width as f64 - 1e-3, height as f64 - 1e-3);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [(-dx, x0), (dx, x_max - x0), (-dy, y0), (dy, y_max - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f64| -> ScreenPoint {
        (
            (x0 + dx * t).clamp(0.0, x_max) as f32,
            (y0 + dy * t).clamp(0.0, y_max) as f32,
            (z0 + dz * t) as f32,
        )
    };
    Some((at(t0), at(t1)))
}

/// Pick a line character for a step of (dx, dy) in screen cells, y down
fn line_char(dx: f32, dy: f32) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay * 2.0 <= ax {
        '-'
    } else if ax * 2.0 <= ay {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn test_line_chars() {
        assert_eq!(line_char(10.0, 0.0), '-');
        assert_eq!(line_char(0.0, 5.0), '|');
        assert_eq!(line_char(0.0, 0.0), '-');
        assert_eq!(line_char(4.0, 4.0), '\\');
        assert_eq!(line_char(4.0, -4.0), '/');
        assert_eq!(line_char(-4.0, 4.0), '/');
    }

    #[test]
    fn test_horizontal_line() {
        let mut renderer = WireframeRenderer::new(10, 3);
        renderer.draw_line((1.0, 1.0, 0.5), (8.0, 1.0, 0.5));
        for x in 1..=8 {
            assert_eq!(renderer.char_at(x, 1), Some('-'));
        }
        assert_eq!(renderer.char_at(0, 1), Some(' '));
        assert_eq!(renderer.char_at(9, 1), Some(' '));
    }

    #[test]
    fn test_nearer_line_wins() {
        let mut renderer = WireframeRenderer::new(10, 10);
        renderer.draw_line((5.0, 0.0, 0.9), (5.0, 9.0, 0.9));
        renderer.draw_line((0.0, 5.0, 0.1), (9.0, 5.0, 0.1));
        renderer.draw_line((0.0, 5.0, 0.99), (9.0, 5.0, 0.99));
        assert_eq!(renderer.char_at(5, 5), Some('-'));
        assert_eq!(renderer.char_at(5, 2), Some('|'));
    }

    #[test]
    fn test_offscreen_line_is_clipped() {
        let mut renderer = WireframeRenderer::new(4, 4);
        renderer.draw_line((-10.0, -10.0, 0.0), (20.0, 20.0, 0.0));
        assert_eq!(renderer.char_at(2, 2), Some('\\'));
        renderer.clear();
        assert_eq!(renderer.char_at(2, 2), Some(' '));
    }

    #[test]
    fn test_clip_segment() {
        let (a, b) = clip_segment((-10.0, 1.0, 0.0), (30.0, 1.0, 1.0), 10.0, 3.0).unwrap();
        assert_float_eq!(a.0, 0.0, abs <= 1e-4);
        assert_float_eq!(a.2, 0.25, abs <= 1e-4);
        assert!(b.0 < 10.0 && b.0 > 9.9);
        assert_float_eq!(b.2, 0.5, abs <= 1e-3);

        assert!(clip_segment((-5.0, -5.0, 0.0), (-1.0, 20.0, 0.0), 10.0, 10.0).is_none());
        assert!(clip_segment((0.0, 0.0, 0.0), (f32::NAN, 1.0, 0.0), 10.0, 10.0).is_none());

        let inside = ((1.0, 2.0, 0.5), (3.0, 4.0, 0.5));
        assert_eq!(clip_segment(inside.0, inside.1, 10.0, 10.0), Some(inside));
    }

    #[test]
    fn test_huge_line_is_clipped_to_screen() {
        let mut renderer = WireframeRenderer::new(10, 3);
        renderer.draw_line((-1.0e12, 1.5, 0.5), (1.0e12, 1.5, 0.5));
        for x in 0..10 {
            assert_eq!(renderer.char_at(x, 1), Some('-'));
        }
        assert_eq!(renderer.char_at(0, 0), Some(' '));
    }

    #[test]
    fn test_render_mesh_skips_dangling_edges() {
        let mesh = objview_core::obj::parse_obj_str(
            "v -0.5 0 0\nv 0.5 0 0\nf 1 2\nf 1 9\n",
            &objview_core::LoaderConfig::default(),
        );
        let camera = Camera::new(40, 20);
        let mut renderer = WireframeRenderer::new(40, 20);
        renderer.render_mesh(&mesh, &camera);
        assert_eq!(renderer.char_at(20, 10), Some('-'));
    }

    #[test]
    fn test_draw_writes_every_cell() {
        let renderer = WireframeRenderer::new(3, 2);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\r\n"));
    }
}
